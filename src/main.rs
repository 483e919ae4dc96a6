use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use hashidx::{Command, Config, OutputFormat, Session, Shell, load_file, logging};

/// Compare hash index lookups against table scans over a text file of keys
#[derive(Debug, Parser)]
#[command(name = "hashidx", version, about)]
struct Cli {
    /// Input file, one key per line
    input: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page size applied before running commands
    #[arg(short, long)]
    page_size: Option<usize>,

    /// Result format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Action>,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Table scan for a key
    Scan {
        key: String,
        /// Only look at the first N records
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Hash index lookup for a key
    Search { key: String },
    /// Collision and overflow statistics of one bucket
    Bucket { ordinal: usize },
    /// Occupancy of every bucket
    Stats,
}

impl From<Action> for Command {
    fn from(action: Action) -> Self {
        match action {
            Action::Scan { key, limit } => Command::Scan { key, limit },
            Action::Search { key } => Command::Search(key),
            Action::Bucket { ordinal } => Command::Bucket(ordinal),
            Action::Stats => Command::Stats,
        }
    }
}

fn build_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(input) = &cli.input {
        config.input = Some(input.clone());
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }
    if cli.log_json {
        config.log_json = true;
    }
    match cli.verbose {
        0 => {}
        1 => config.log_level = "info".to_string(),
        2 => config.log_level = "debug".to_string(),
        _ => config.log_level = "trace".to_string(),
    }

    Ok(config)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(&cli)?;
    logging::init_log(config.level()?, config.log_json);

    let store = load_file(config.input()?)?;
    let mut session = Session::new(store)?;
    session.configure_pages(config.page_size);

    let mut shell = Shell::new(session, config.output);
    match cli.command {
        Some(action) => {
            if let Some(output) = shell.execute(action.into())? {
                println!("{}", output);
            }
        }
        None => shell.run()?,
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
