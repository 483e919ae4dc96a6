use super::error::{RecordError, RecordResult};
use super::record::{Record, RecordId};
use crate::pager::PageId;

/// Result of a table scan, with enough context to estimate its cost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOutcome {
    /// First record whose key matched, if any
    pub record: Option<RecordId>,
    /// Number of records compared before the scan stopped
    pub probes: usize,
    /// Page stamp of the last record the scan touched
    pub last_page: Option<PageId>,
}

impl ScanOutcome {
    /// Estimated page reads: every page up to the last one touched
    pub fn pages_read(&self) -> Option<usize> {
        self.last_page.map(|page| page + 1)
    }
}

/// Ordered, append-only sequence of records
///
/// Insertion order is preserved and keys are not required to be unique.
/// The store only grows; nothing is ever removed or reordered.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    items: Vec<Record>,
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a record, returning its handle
    pub fn append(&mut self, record: Record) -> RecordId {
        let rid = RecordId(self.items.len());
        self.items.push(record);
        rid
    }

    /// Number of stored records
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Check if store is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All records in insertion order
    pub fn records(&self) -> &[Record] {
        &self.items
    }

    /// Iterate over (handle, record) pairs in store order
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &Record)> {
        self.items
            .iter()
            .enumerate()
            .map(|(pos, record)| (RecordId(pos), record))
    }

    /// Get a record by handle
    pub fn get(&self, rid: RecordId) -> Option<&Record> {
        self.items.get(rid.0)
    }

    /// Get a record by handle, failing if the handle is unknown
    pub fn record(&self, rid: RecordId) -> RecordResult<&Record> {
        self.get(rid).ok_or(RecordError::RecordNotFound(rid.0))
    }

    pub(crate) fn get_mut(&mut self, rid: RecordId) -> Option<&mut Record> {
        self.items.get_mut(rid.0)
    }

    pub(crate) fn clear_page_refs(&mut self) {
        for record in &mut self.items {
            record.clear_page_ref();
        }
    }

    /// Table scan: first record matching `key` among the first `limit` records
    ///
    /// `None` scans the whole store. A bounded scan must use a limit in
    /// `1..=size()`; anything else is rejected rather than clamped.
    pub fn scan(&self, key: &str, limit: Option<usize>) -> RecordResult<Option<RecordId>> {
        Ok(self.scan_with_cost(key, limit)?.record)
    }

    /// Table scan that also reports how much work it did
    pub fn scan_with_cost(&self, key: &str, limit: Option<usize>) -> RecordResult<ScanOutcome> {
        let limit = self.validate_limit(limit)?;

        let mut outcome = ScanOutcome {
            record: None,
            probes: 0,
            last_page: None,
        };

        for (pos, record) in self.items[..limit].iter().enumerate() {
            outcome.probes += 1;
            outcome.last_page = record.page_ref();
            if record.key() == key {
                outcome.record = Some(RecordId(pos));
                break;
            }
        }

        Ok(outcome)
    }

    fn validate_limit(&self, limit: Option<usize>) -> RecordResult<usize> {
        match limit {
            None => Ok(self.size()),
            Some(limit) if limit == 0 || limit > self.size() => {
                Err(RecordError::InvalidScanLimit {
                    limit,
                    size: self.size(),
                })
            }
            Some(limit) => Ok(limit),
        }
    }
}

impl FromIterator<Record> for RecordStore {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> RecordStore {
        ["alice", "bob", "carol", "bob", "dave"]
            .into_iter()
            .map(Record::from)
            .collect()
    }

    #[test]
    fn test_append_and_size() {
        let mut store = RecordStore::new();
        assert!(store.is_empty());

        let first = store.append(Record::new("alice"));
        let second = store.append(Record::new("bob"));

        assert_eq!(store.size(), 2);
        assert_eq!(first.position(), 0);
        assert_eq!(second.position(), 1);
        assert_eq!(store.record(second).unwrap().key(), "bob");
        assert!(store.record(RecordId::new(5)).is_err());
    }

    #[test]
    fn test_records_keep_insertion_order() {
        let store = create_test_store();
        let keys: Vec<&str> = store.records().iter().map(|r| r.key()).collect();
        assert_eq!(keys, vec!["alice", "bob", "carol", "bob", "dave"]);
    }

    #[test]
    fn test_scan_returns_first_match() {
        let store = create_test_store();
        assert_eq!(store.scan("bob", None).unwrap(), Some(RecordId::new(1)));
        assert_eq!(store.scan("dave", None).unwrap(), Some(RecordId::new(4)));
        assert_eq!(store.scan("zed", None).unwrap(), None);
    }

    #[test]
    fn test_bounded_scan() {
        let store = create_test_store();

        // "carol" sits at position 2, out of reach of a 2-record scan
        assert_eq!(store.scan("carol", Some(2)).unwrap(), None);
        assert_eq!(store.scan("carol", Some(3)).unwrap(), Some(RecordId::new(2)));
    }

    #[test]
    fn test_scan_full_limit_matches_unbounded() {
        let store = create_test_store();
        for key in ["alice", "bob", "dave", "missing"] {
            assert_eq!(
                store.scan(key, Some(store.size())).unwrap(),
                store.scan(key, None).unwrap()
            );
        }
    }

    #[test]
    fn test_scan_rejects_invalid_limit() {
        let store = create_test_store();

        let result = store.scan("alice", Some(0));
        assert!(matches!(
            result,
            Err(RecordError::InvalidScanLimit { limit: 0, size: 5 })
        ));

        let result = store.scan("alice", Some(6));
        assert!(matches!(
            result,
            Err(RecordError::InvalidScanLimit { limit: 6, size: 5 })
        ));
    }

    #[test]
    fn test_scan_empty_store() {
        let store = RecordStore::new();
        assert_eq!(store.scan("alice", None).unwrap(), None);
        assert!(store.scan("alice", Some(1)).is_err());
    }

    #[test]
    fn test_scan_is_idempotent() {
        let store = create_test_store();
        let first = store.scan_with_cost("carol", Some(4)).unwrap();
        let second = store.scan_with_cost("carol", Some(4)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_scan_cost() {
        let mut store = create_test_store();
        for (pos, page) in [0, 0, 1, 1, 2].into_iter().enumerate() {
            store.get_mut(RecordId::new(pos)).unwrap().set_page_ref(page);
        }

        let outcome = store.scan_with_cost("carol", None).unwrap();
        assert_eq!(outcome.record, Some(RecordId::new(2)));
        assert_eq!(outcome.probes, 3);
        assert_eq!(outcome.last_page, Some(1));
        assert_eq!(outcome.pages_read(), Some(2));

        // A miss touches every record in range
        let outcome = store.scan_with_cost("zed", None).unwrap();
        assert_eq!(outcome.record, None);
        assert_eq!(outcome.probes, 5);
        assert_eq!(outcome.pages_read(), Some(3));
    }

    #[test]
    fn test_scan_cost_unpaged() {
        let store = create_test_store();
        let outcome = store.scan_with_cost("alice", None).unwrap();
        assert_eq!(outcome.probes, 1);
        assert_eq!(outcome.pages_read(), None);
    }
}
