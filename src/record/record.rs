use crate::pager::PageId;

/// Handle of a record inside its owning [`RecordStore`](super::RecordStore).
///
/// Buckets and pages keep these instead of references, so the store stays
/// the single owner of every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub(crate) usize);

impl RecordId {
    pub fn new(position: usize) -> Self {
        Self(position)
    }

    /// Position of the record in store order
    pub fn position(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single stored tuple: its key plus the page it was assigned to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    key: String,
    page_ref: Option<PageId>,
}

impl Record {
    /// Create a new, not yet paged record
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            page_ref: None,
        }
    }

    /// Get the search key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the page this record was stamped with, if paged
    pub fn page_ref(&self) -> Option<PageId> {
        self.page_ref
    }

    /// Check whether the pager has stamped this record
    pub fn is_paged(&self) -> bool {
        self.page_ref.is_some()
    }

    pub(crate) fn set_page_ref(&mut self, page_id: PageId) {
        self.page_ref = Some(page_id);
    }

    pub(crate) fn clear_page_ref(&mut self) {
        self.page_ref = None;
    }
}

impl From<&str> for Record {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for Record {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}
