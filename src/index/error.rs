use thiserror::Error;

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors that can occur during index operations
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Cannot size a hash index for an empty table")]
    EmptyTable,

    #[error("Unknown bucket: {bucket} (bucket count {bucket_count})")]
    UnknownBucket { bucket: usize, bucket_count: usize },
}
