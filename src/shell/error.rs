use thiserror::Error;

use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("{0}")]
    Session(#[from] SessionError),

    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

pub type ShellResult<T> = Result<T, ShellError>;
