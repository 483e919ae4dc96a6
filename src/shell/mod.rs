//! Interactive front end over a [`Session`]

mod command;
mod error;
mod render;

pub use command::{Command, HELP};
pub use error::{ShellError, ShellResult};

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::warn;

use crate::config::OutputFormat;
use crate::session::Session;

const PROMPT: &str = "hashidx> ";

pub struct Shell {
    session: Session,
    output: OutputFormat,
}

impl Shell {
    pub fn new(session: Session, output: OutputFormat) -> Self {
        Self { session, output }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run one command, returning its rendered output
    ///
    /// Returns `None` when the command ends the session.
    pub fn execute(&mut self, command: Command) -> ShellResult<Option<String>> {
        let output = match command {
            Command::Page(page_size) => {
                let report = self.session.configure_pages(page_size);
                render::paging(&report, self.output)?
            }
            Command::Scan { key, limit } => {
                let report = self.session.table_scan(&key, limit)?;
                render::scan(&report, self.output)?
            }
            Command::Search(key) => {
                let report = self.session.index_search(&key)?;
                render::search(&report, self.output)?
            }
            Command::Bucket(bucket) => {
                let report = self.session.bucket_report(bucket)?;
                render::bucket(&report, self.output)?
            }
            Command::Stats => render::stats(&self.session.stats(), self.output)?,
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(None),
        };
        Ok(Some(output))
    }

    /// Parse and run one input line
    pub fn execute_line(&mut self, line: &str) -> ShellResult<Option<String>> {
        let command = Command::parse(line)?;
        self.execute(command)
    }

    /// Read-eval-print loop on the terminal until `quit`, Ctrl-C or Ctrl-D
    pub fn run(&mut self) -> ShellResult<()> {
        let mut editor = DefaultEditor::new()?;
        println!("{} records loaded. Type 'help' for commands.", self.session.store().size());

        loop {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = editor.add_history_entry(line.as_str());

                    match self.execute_line(&line) {
                        Ok(Some(output)) => println!("{}", output),
                        Ok(None) => break,
                        Err(err) => {
                            warn!(command = line.as_str(), error = %err, "command failed");
                            eprintln!("Error: {}", err);
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_shell(output: OutputFormat) -> Shell {
        let session = Session::from_keys(["alice", "bob", "carol", "dave"]).unwrap();
        Shell::new(session, output)
    }

    #[test]
    fn test_page_then_search() {
        let mut shell = setup_shell(OutputFormat::Table);
        let output = shell.execute_line("page 2").unwrap().unwrap();
        assert!(output.contains("Pages"));
        assert_eq!(shell.session().pager().unwrap().page_count(), 2);

        let output = shell.execute_line("search carol").unwrap().unwrap();
        assert!(output.starts_with("Record 'carol' found in the index"));
    }

    #[test]
    fn test_json_output() {
        let mut shell = setup_shell(OutputFormat::Json);
        let output = shell.execute_line("bucket 1").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["bucket"], 1);
        assert_eq!(value["capacity"], 1);
    }

    #[test]
    fn test_errors_surface() {
        let mut shell = setup_shell(OutputFormat::Table);
        assert!(matches!(
            shell.execute_line("scan alice limit=0"),
            Err(ShellError::Session(_))
        ));
        assert!(matches!(
            shell.execute_line("bucket 9"),
            Err(ShellError::Session(_))
        ));
        assert!(matches!(
            shell.execute_line("frobnicate"),
            Err(ShellError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_quit_and_help() {
        let mut shell = setup_shell(OutputFormat::Table);
        assert_eq!(shell.execute_line("help").unwrap().as_deref(), Some(HELP));
        assert_eq!(shell.execute_line("quit").unwrap(), None);
    }

    #[test]
    fn test_stats_lists_every_bucket() {
        let mut shell = setup_shell(OutputFormat::Json);
        let output = shell.execute_line("stats").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["buckets"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_stats_header_shows_dispersion() {
        let session = Session::from_keys(["a", "e", "i", "m"]).unwrap();
        let mut shell = Shell::new(session, OutputFormat::Table);
        let output = shell.execute_line("stats").unwrap().unwrap();
        assert!(output.starts_with(
            "4 buckets of 1 slots, 4 records, 3 overflow buckets, 3 collisions, dispersion 75.00%"
        ));

        let mut shell = Shell::new(
            Session::from_keys(["a", "e", "i", "m"]).unwrap(),
            OutputFormat::Json,
        );
        let output = shell.execute_line("stats").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["dispersion"], 75.0);
    }
}
