use tracing::Level;

/// Install the global stderr subscriber
///
/// Later calls are no-ops, so tests and the binary can both call it.
pub fn init_log(level: Level, json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if json {
        builder
            .json()
            .with_file(true)
            .with_line_number(true)
            .try_init()
    } else {
        builder.try_init()
    };
}
