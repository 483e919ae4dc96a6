use super::error::{ShellError, ShellResult};

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Re-page the store with a new page size
    Page(usize),
    /// Table scan, optionally bounded
    Scan { key: String, limit: Option<usize> },
    /// Hash index lookup
    Search(String),
    /// Collision/overflow statistics of one bucket
    Bucket(usize),
    /// Statistics of every bucket
    Stats,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  page <size>                re-page the table with a fixed page size
  scan <key> [limit=<n>]     table scan, optionally over the first n records
  search <key>               hash index lookup
  bucket <ordinal>           collisions and overflows of one bucket
  stats                      occupancy of every bucket
  help                       show this message
  quit                       leave the shell";

impl Command {
    /// Parse one input line
    ///
    /// Keys run to the end of the line, so they may contain spaces.
    pub fn parse(line: &str) -> ShellResult<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "page" => Ok(Command::Page(parse_number(rest, "page size")?)),
            "scan" => {
                let (key, limit) = match rest.rsplit_once(char::is_whitespace) {
                    Some((key, last)) if last.starts_with("limit=") => {
                        (key.trim(), Some(parse_number(&last["limit=".len()..], "limit")?))
                    }
                    _ => (rest, None),
                };
                Ok(Command::Scan {
                    key: require_key(key)?,
                    limit,
                })
            }
            "search" => Ok(Command::Search(require_key(rest)?)),
            "bucket" => Ok(Command::Bucket(parse_number(rest, "bucket ordinal")?)),
            "stats" | "buckets" => Ok(Command::Stats),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err(ShellError::InvalidCommand("empty command".to_string())),
            other => Err(ShellError::InvalidCommand(format!(
                "unknown command '{}'",
                other
            ))),
        }
    }
}

fn parse_number(text: &str, what: &str) -> ShellResult<usize> {
    text.parse()
        .map_err(|_| ShellError::InvalidNumber(format!("{} '{}'", what, text)))
}

fn require_key(key: &str) -> ShellResult<String> {
    if key.is_empty() {
        return Err(ShellError::InvalidCommand("missing key".to_string()));
    }
    Ok(key.to_string())
}
