//! Fixed-size paging of the record store
//!
//! Pages do not own records. Each page is a list of [`RecordId`] handles in
//! store order, and every paged record carries the ordinal of its page.

mod error;

pub use error::{PagerError, PagerResult};

use tracing::{debug, info};

use crate::record::{RecordId, RecordStore};

/// Page ordinal
pub type PageId = usize;

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Partitions a record store into pages of a fixed size
#[derive(Debug, Clone)]
pub struct Pager {
    /// Configured page size
    fixed_page_size: usize,

    /// Page contents, indexed by page ordinal
    pages: Vec<Vec<RecordId>>,

    /// Page currently being filled
    current: PageId,
}

impl Pager {
    /// Create a pager with a single empty page (ordinal 0)
    pub fn new(fixed_page_size: usize) -> Self {
        Self {
            fixed_page_size,
            pages: vec![Vec::new()],
            current: 0,
        }
    }

    /// Get the configured page size
    pub fn fixed_page_size(&self) -> usize {
        self.fixed_page_size
    }

    /// Number of pages opened so far (always at least 1)
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of records held across all pages
    pub fn record_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    /// Page every record of `store` in order, stamping each with its page
    ///
    /// A new page is opened only once the current page holds *more* than
    /// `fixed_page_size` records, so a full page ends up with
    /// `fixed_page_size + 1` entries.
    ///
    /// Must be called once per store: running it again appends and
    /// re-stamps every record a second time.
    pub fn insert_all(&mut self, store: &mut RecordStore) -> usize {
        let mut paged = 0;

        for pos in 0..store.size() {
            if self.pages[self.current].len() > self.fixed_page_size {
                self.current += 1;
                self.pages.push(Vec::new());
                debug!(page_id = self.current, "opened page");
            }

            let rid = RecordId::new(pos);
            if let Some(record) = store.get_mut(rid) {
                record.set_page_ref(self.current);
                self.pages[self.current].push(rid);
                paged += 1;
            }
        }

        info!(
            records = paged,
            pages = self.page_count(),
            page_size = self.fixed_page_size,
            "paged record store"
        );

        paged
    }

    /// Get the records of one page, in store order
    pub fn page(&self, page_id: PageId) -> PagerResult<&[RecordId]> {
        self.pages
            .get(page_id)
            .map(Vec::as_slice)
            .ok_or(PagerError::PageOutOfRange {
                page_id,
                page_count: self.page_count(),
            })
    }

    /// Number of records in one page
    pub fn page_len(&self, page_id: PageId) -> PagerResult<usize> {
        Ok(self.page(page_id)?.len())
    }

    /// Iterate over (page ordinal, contents) pairs
    pub fn pages(&self) -> impl Iterator<Item = (PageId, &[RecordId])> {
        self.pages
            .iter()
            .enumerate()
            .map(|(page_id, page)| (page_id, page.as_slice()))
    }

    /// Search a single page for the first record with `key`
    ///
    /// Only the given page is inspected, which makes this the check that a
    /// record's stamped page really holds it.
    pub fn find(
        &self,
        store: &RecordStore,
        key: &str,
        page_id: PageId,
    ) -> PagerResult<Option<RecordId>> {
        let page = self.page(page_id)?;
        Ok(page
            .iter()
            .copied()
            .find(|&rid| store.get(rid).is_some_and(|record| record.key() == key)))
    }

    /// Check whether a page holds the given record
    pub fn contains(&self, rid: RecordId, page_id: PageId) -> PagerResult<bool> {
        Ok(self.page(page_id)?.contains(&rid))
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn create_store(keys: &[&str]) -> RecordStore {
        keys.iter().map(|&key| Record::new(key)).collect()
    }

    fn page_keys<'a>(pager: &Pager, store: &'a RecordStore, page_id: PageId) -> Vec<&'a str> {
        pager
            .page(page_id)
            .unwrap()
            .iter()
            .map(|&rid| store.get(rid).unwrap().key())
            .collect()
    }

    #[test]
    fn test_new_pager_has_one_empty_page() {
        let pager = Pager::new(4);
        assert_eq!(pager.page_count(), 1);
        assert_eq!(pager.fixed_page_size(), 4);
        assert_eq!(pager.page_len(0).unwrap(), 0);
    }

    #[test]
    fn test_four_records_page_size_two() {
        let mut store = create_store(&["alice", "bob", "carol", "dave"]);
        let mut pager = Pager::new(2);
        assert_eq!(pager.insert_all(&mut store), 4);

        // Rollover happens only once a page holds more than the fixed size,
        // so page 0 takes three records instead of the two a `>=` rule
        // would give it.
        assert_eq!(pager.page_count(), 2);
        assert_eq!(page_keys(&pager, &store, 0), vec!["alice", "bob", "carol"]);
        assert_eq!(page_keys(&pager, &store, 1), vec!["dave"]);

        for (rid, record) in store.iter() {
            let page_id = record.page_ref().unwrap();
            assert!(pager.contains(rid, page_id).unwrap());
        }
    }

    #[test]
    fn test_pages_hold_fixed_size_plus_one() {
        let keys: Vec<String> = (0..10).map(|i| format!("k{}", i)).collect();
        let mut store: RecordStore = keys.iter().map(|k| Record::new(k.as_str())).collect();
        let mut pager = Pager::new(3);
        pager.insert_all(&mut store);

        assert_eq!(pager.page_count(), 3);
        assert_eq!(pager.page_len(0).unwrap(), 4);
        assert_eq!(pager.page_len(1).unwrap(), 4);
        assert_eq!(pager.page_len(2).unwrap(), 2);
    }

    #[test]
    fn test_every_record_in_exactly_one_page() {
        let keys: Vec<String> = (0..37).map(|i| format!("rec{}", i)).collect();
        let mut store: RecordStore = keys.iter().map(|k| Record::new(k.as_str())).collect();
        let mut pager = Pager::new(5);
        pager.insert_all(&mut store);

        assert_eq!(pager.record_count(), store.size());

        for (rid, record) in store.iter() {
            let holders: Vec<PageId> = pager
                .pages()
                .filter(|(_, page)| page.contains(&rid))
                .map(|(page_id, _)| page_id)
                .collect();
            assert_eq!(holders, vec![record.page_ref().unwrap()]);
        }
    }

    #[test]
    fn test_page_out_of_range() {
        let pager = Pager::new(2);
        let result = pager.page(1);
        assert!(matches!(
            result,
            Err(PagerError::PageOutOfRange {
                page_id: 1,
                page_count: 1
            })
        ));
        assert!(pager.page_len(7).is_err());
    }

    #[test]
    fn test_find_within_page() {
        let mut store = create_store(&["alice", "bob", "carol", "dave"]);
        let mut pager = Pager::new(1);
        pager.insert_all(&mut store);

        assert_eq!(pager.find(&store, "bob", 0).unwrap(), Some(RecordId::new(1)));
        // find never looks outside the requested page
        assert_eq!(pager.find(&store, "dave", 0).unwrap(), None);
        assert_eq!(pager.find(&store, "dave", 1).unwrap(), Some(RecordId::new(3)));
        assert!(pager.find(&store, "dave", 2).is_err());
    }

    #[test]
    fn test_empty_store() {
        let mut store = RecordStore::new();
        let mut pager = Pager::new(2);
        assert_eq!(pager.insert_all(&mut store), 0);
        assert_eq!(pager.page_count(), 1);
        assert_eq!(pager.record_count(), 0);
    }

    #[test]
    fn test_zero_page_size_gives_single_record_pages() {
        let mut store = create_store(&["a", "b", "c"]);
        let mut pager = Pager::new(0);
        pager.insert_all(&mut store);
        assert_eq!(pager.page_count(), 3);
        assert_eq!(store.records()[2].page_ref(), Some(2));
    }
}
