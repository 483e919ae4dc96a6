//! Static hash index over the record store
//!
//! The index is sized once from the record count and never rehashed.
//! Buckets live in a single arena: the main buckets occupy slots
//! `[0, bucket_count)` and overflow buckets are appended after them as
//! chains grow, linked by arena slot.

mod bucket;
mod error;
mod hash;

pub use bucket::{Bucket, BucketId};
pub use error::{IndexError, IndexResult};
pub use hash::hash_key;

use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::{debug, info};

use crate::record::{RecordId, RecordStore};

/// A successful index lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit {
    /// The matched record
    pub record: RecordId,
    /// Main bucket the key hashed to (not the overflow node that held it)
    pub bucket: BucketId,
}

/// Occupancy of one main bucket and its overflow chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketStats {
    pub bucket: BucketId,
    pub slots_used: usize,
    pub chain_len: usize,
    pub collisions: usize,
    pub overflows: usize,
}

/// Occupancy of the whole index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    pub bucket_count: usize,
    pub bucket_capacity: usize,
    pub records: usize,
    pub overflow_buckets: usize,
    pub total_collisions: usize,
    /// Percentage of records held outside their main bucket
    pub dispersion: f64,
    pub buckets: Vec<BucketStats>,
}

/// Bucket manager: owns every bucket and routes records through [`hash_key`]
#[derive(Debug, Clone)]
pub struct HashIndex {
    /// Number of main buckets
    bucket_count: NonZeroUsize,

    /// Slots per bucket, uniform across main and overflow buckets
    bucket_capacity: usize,

    /// Bucket arena: main buckets first, then overflow buckets
    buckets: Vec<Bucket>,

    /// Number of records inserted
    record_count: usize,
}

impl HashIndex {
    /// Compute (bucket count, bucket capacity) for a table of `record_count`
    ///
    /// The bucket count divides the record count by ten raised to half its
    /// digit count, so it grows roughly with the square root of the table.
    /// The capacity is the even split of records over those buckets.
    pub fn sizing(record_count: usize) -> IndexResult<(NonZeroUsize, usize)> {
        if record_count == 0 {
            return Err(IndexError::EmptyTable);
        }

        let digits = record_count.ilog10() + 1;
        let halved = digits / 2;
        let bucket_count = record_count / 10usize.pow(halved);
        let bucket_count = NonZeroUsize::new(bucket_count).ok_or(IndexError::EmptyTable)?;
        let bucket_capacity = record_count / bucket_count.get();

        Ok((bucket_count, bucket_capacity))
    }

    /// Create an empty index sized for `record_count` records
    ///
    /// All main buckets are allocated up front.
    pub fn with_record_count(record_count: usize) -> IndexResult<Self> {
        let (bucket_count, bucket_capacity) = Self::sizing(record_count)?;

        let buckets = (0..bucket_count.get())
            .map(|ordinal| Bucket::new(ordinal, bucket_capacity))
            .collect();

        info!(
            record_count,
            bucket_count = bucket_count.get(),
            bucket_capacity,
            "sized hash index"
        );

        Ok(Self {
            bucket_count,
            bucket_capacity,
            buckets,
            record_count: 0,
        })
    }

    /// Size an index for `store` and insert all of its records
    pub fn build(store: &RecordStore) -> IndexResult<Self> {
        let mut index = Self::with_record_count(store.size())?;
        index.insert_all(store);
        Ok(index)
    }

    /// Get the number of main buckets
    pub fn bucket_count(&self) -> usize {
        self.bucket_count.get()
    }

    /// Get the uniform bucket capacity
    pub fn bucket_capacity(&self) -> usize {
        self.bucket_capacity
    }

    /// Get number of records inserted
    pub fn len(&self) -> usize {
        self.record_count
    }

    /// Check if no records have been inserted
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Number of overflow buckets allocated across all chains
    pub fn overflow_bucket_count(&self) -> usize {
        self.buckets.len() - self.bucket_count()
    }

    /// Bucket ordinal `key` hashes to
    pub fn bucket_of(&self, key: &str) -> BucketId {
        hash_key(key, self.bucket_count)
    }

    /// Insert a record under `key`, returning the main bucket it hashed to
    ///
    /// Never fails: a full bucket hands the record down its overflow chain,
    /// growing the chain when the last bucket is full too.
    pub fn insert(&mut self, rid: RecordId, key: &str) -> BucketId {
        let head = self.bucket_of(key);
        let mut slot = head;

        while self.buckets[slot].push(rid).is_err() {
            slot = match self.buckets[slot].next() {
                Some(next) => next,
                None => self.allocate_overflow(slot),
            };
        }

        self.record_count += 1;
        head
    }

    /// Insert every record of `store`, in store order
    pub fn insert_all(&mut self, store: &RecordStore) {
        for (rid, record) in store.iter() {
            self.insert(rid, record.key());
        }

        info!(
            records = self.record_count,
            overflow_buckets = self.overflow_bucket_count(),
            "indexed record store"
        );
    }

    /// Look up the first record with `key`
    ///
    /// Walks the main bucket `key` hashes to, then its overflow chain.
    pub fn search(&self, store: &RecordStore, key: &str) -> Option<SearchHit> {
        let head = self.bucket_of(key);
        self.chain(head)
            .find_map(|bucket| bucket.search(store, key))
            .map(|record| SearchHit {
                record,
                bucket: head,
            })
    }

    /// Get a main bucket
    pub fn bucket(&self, bucket: BucketId) -> IndexResult<&Bucket> {
        self.check_bucket(bucket)?;
        Ok(&self.buckets[bucket])
    }

    /// Iterate over the overflow buckets chained behind a main bucket
    pub fn overflow_chain(&self, bucket: BucketId) -> IndexResult<impl Iterator<Item = &Bucket>> {
        self.check_bucket(bucket)?;
        Ok(self.chain(bucket).skip(1))
    }

    /// Number of overflow buckets chained behind a main bucket
    pub fn chain_len(&self, bucket: BucketId) -> IndexResult<usize> {
        Ok(self.overflow_chain(bucket)?.count())
    }

    /// Records held past a main bucket's nominal capacity
    ///
    /// Sum of the slots of every overflow bucket in the chain; the main
    /// bucket's own slots are not counted.
    pub fn collision_count(&self, bucket: BucketId) -> IndexResult<usize> {
        Ok(self.overflow_chain(bucket)?.map(Bucket::len).sum())
    }

    /// Highest ordinal reached along a main bucket's overflow chain
    ///
    /// Overflow ordinals are `main ordinal + depth`, so this is an absolute
    /// ordinal rather than a hop count. A bucket that never overflowed
    /// reports 0.
    pub fn overflow_count(&self, bucket: BucketId) -> IndexResult<usize> {
        Ok(self
            .overflow_chain(bucket)?
            .map(Bucket::ordinal)
            .max()
            .unwrap_or(0))
    }

    /// Per-bucket and total occupancy
    pub fn stats(&self) -> IndexStats {
        let buckets: Vec<BucketStats> = (0..self.bucket_count())
            .map(|bucket| {
                let overflow: Vec<&Bucket> = self.chain(bucket).skip(1).collect();
                BucketStats {
                    bucket,
                    slots_used: self.buckets[bucket].len(),
                    chain_len: overflow.len(),
                    collisions: overflow.iter().map(|b| b.len()).sum(),
                    overflows: overflow.iter().map(|b| b.ordinal()).max().unwrap_or(0),
                }
            })
            .collect();

        let total_collisions: usize = buckets.iter().map(|b| b.collisions).sum();
        let dispersion = if self.record_count == 0 {
            0.0
        } else {
            total_collisions as f64 / self.record_count as f64 * 100.0
        };

        IndexStats {
            bucket_count: self.bucket_count(),
            bucket_capacity: self.bucket_capacity,
            records: self.record_count,
            overflow_buckets: self.overflow_bucket_count(),
            total_collisions,
            dispersion,
            buckets,
        }
    }

    // ========== Chain Management ==========

    /// Walk a chain starting at arena slot `head`
    fn chain(&self, head: usize) -> impl Iterator<Item = &Bucket> {
        std::iter::successors(self.buckets.get(head), |bucket| {
            bucket.next().and_then(|next| self.buckets.get(next))
        })
    }

    /// Append an overflow bucket behind arena slot `tail`, returning its slot
    fn allocate_overflow(&mut self, tail: usize) -> usize {
        let ordinal = self.buckets[tail].ordinal() + 1;
        let slot = self.buckets.len();
        self.buckets.push(Bucket::new(ordinal, self.bucket_capacity));
        self.buckets[tail].set_next(slot);

        debug!(ordinal, slot, "allocated overflow bucket");
        slot
    }

    fn check_bucket(&self, bucket: BucketId) -> IndexResult<()> {
        if bucket >= self.bucket_count() {
            return Err(IndexError::UnknownBucket {
                bucket,
                bucket_count: self.bucket_count(),
            });
        }
        Ok(())
    }
}
