//! Query session: the entry points the presentation layer drives
//!
//! A session owns the record store together with the hash index and the
//! current pager built over it, and answers each request with a
//! serializable report.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::index::{BucketId, HashIndex, IndexStats};
use crate::pager::{PageId, Pager};
use crate::record::{Record, RecordStore};


#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Record error: {0}")]
    RecordError(#[from] crate::record::RecordError),

    #[error("Pager error: {0}")]
    PagerError(#[from] crate::pager::PagerError),

    #[error("Index error: {0}")]
    IndexError(#[from] crate::index::IndexError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Outcome of (re)paging the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagingReport {
    pub page_size: usize,
    pub page_count: usize,
    pub records: usize,
}

/// Outcome of a table scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub key: String,
    pub limit: usize,
    pub found: Option<String>,
    pub position: Option<usize>,
    pub probes: usize,
    /// Pages read up to the last record scanned; unknown before paging
    pub pages_read: Option<usize>,
}

/// Outcome of an index lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub key: String,
    pub found: Option<String>,
    /// Main bucket holding the key, or -1 on a miss
    pub bucket: i64,
    pub page_ref: Option<PageId>,
    /// Whether the stamped page really holds the key; unknown before paging
    pub page_verified: Option<bool>,
}

/// Overflow statistics of one main bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketReport {
    pub bucket: BucketId,
    pub capacity: usize,
    pub slots_used: usize,
    pub chain_len: usize,
    pub collisions: usize,
    pub overflows: usize,
}

pub struct Session {
    store: RecordStore,
    index: HashIndex,
    pager: Option<Pager>,
}

impl Session {
    /// Index a loaded store; fails if the store is empty
    pub fn new(store: RecordStore) -> SessionResult<Self> {
        let index = HashIndex::build(&store)?;
        info!(
            records = store.size(),
            buckets = index.bucket_count(),
            capacity = index.bucket_capacity(),
            "session ready"
        );
        Ok(Self {
            store,
            index,
            pager: None,
        })
    }

    /// Convenience constructor from raw keys
    pub fn from_keys<I, S>(keys: I) -> SessionResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(keys.into_iter().map(Record::new).collect())
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn index(&self) -> &HashIndex {
        &self.index
    }

    pub fn pager(&self) -> Option<&Pager> {
        self.pager.as_ref()
    }

    /// Replace the pager with a fresh one of `page_size` and page the store
    ///
    /// Previous page stamps are cleared first so reconfiguring never
    /// double-counts records.
    pub fn configure_pages(&mut self, page_size: usize) -> PagingReport {
        self.store.clear_page_refs();

        let mut pager = Pager::new(page_size);
        let records = pager.insert_all(&mut self.store);
        let report = PagingReport {
            page_size,
            page_count: pager.page_count(),
            records,
        };
        self.pager = Some(pager);
        report
    }

    /// Table scan over the first `limit` records (all when `None`)
    pub fn table_scan(&self, key: &str, limit: Option<usize>) -> SessionResult<ScanReport> {
        let outcome = self.store.scan_with_cost(key, limit)?;
        let found = outcome.record.map(|rid| self.store.record(rid)).transpose()?;

        debug!(key, probes = outcome.probes, hit = found.is_some(), "table scan");

        Ok(ScanReport {
            key: key.to_string(),
            limit: limit.unwrap_or(self.store.size()),
            found: found.map(|record| record.key().to_string()),
            position: outcome.record.map(|rid| rid.position()),
            probes: outcome.probes,
            pages_read: outcome.pages_read(),
        })
    }

    /// Hash index lookup, verified against the pager when one is configured
    pub fn index_search(&self, key: &str) -> SessionResult<SearchReport> {
        let Some(hit) = self.index.search(&self.store, key) else {
            debug!(key, "index miss");
            return Ok(SearchReport {
                key: key.to_string(),
                found: None,
                bucket: -1,
                page_ref: None,
                page_verified: None,
            });
        };

        let record = self.store.record(hit.record)?;
        let page_verified = match (&self.pager, record.page_ref()) {
            (Some(pager), Some(page_id)) => {
                Some(pager.find(&self.store, key, page_id)? == Some(hit.record))
            }
            _ => None,
        };

        debug!(key, bucket = hit.bucket, "index hit");

        Ok(SearchReport {
            key: key.to_string(),
            found: Some(record.key().to_string()),
            bucket: hit.bucket as i64,
            page_ref: record.page_ref(),
            page_verified,
        })
    }

    /// Collision and overflow statistics for one main bucket
    pub fn bucket_report(&self, bucket: BucketId) -> SessionResult<BucketReport> {
        Ok(BucketReport {
            bucket,
            capacity: self.index.bucket_capacity(),
            slots_used: self.index.bucket(bucket)?.len(),
            chain_len: self.index.chain_len(bucket)?,
            collisions: self.index.collision_count(bucket)?,
            overflows: self.index.overflow_count(bucket)?,
        })
    }

    /// Occupancy of every bucket
    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }
}
