use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Invalid scan limit: {limit} (expected 1..={size})")]
    InvalidScanLimit { limit: usize, size: usize },

    #[error("Record not found: record_id={0}")]
    RecordNotFound(usize),
}

pub type RecordResult<T> = Result<T, RecordError>;
