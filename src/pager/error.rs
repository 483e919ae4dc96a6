use thiserror::Error;

#[derive(Debug, Error)]
pub enum PagerError {
    #[error("Page out of range: page_id={page_id} (page count {page_count})")]
    PageOutOfRange { page_id: usize, page_count: usize },
}

pub type PagerResult<T> = Result<T, PagerError>;
