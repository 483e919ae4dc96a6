use crate::record::{RecordId, RecordStore};

/// Bucket ordinal
pub type BucketId = usize;

/// Fixed-capacity slot list for hash-routed records
///
/// A bucket stores record handles, never the records themselves. When it
/// fills up, further records go to its overflow bucket, which the owning
/// [`HashIndex`](super::HashIndex) allocates and links through `next`.
#[derive(Debug, Clone)]
pub struct Bucket {
    /// Logical ordinal: the main bucket's ordinal plus chain depth
    ordinal: BucketId,
    /// Maximum number of slots
    capacity: usize,
    /// Stored record handles
    slots: Vec<RecordId>,
    /// Arena slot of the overflow bucket
    next: Option<usize>,
}

impl Bucket {
    /// Create an empty bucket
    pub fn new(ordinal: BucketId, capacity: usize) -> Self {
        Self {
            ordinal,
            capacity,
            slots: Vec::with_capacity(capacity),
            next: None,
        }
    }

    pub fn ordinal(&self) -> BucketId {
        self.ordinal
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    /// Occupied slots in insertion order
    pub fn slots(&self) -> &[RecordId] {
        &self.slots
    }

    /// Overflow link
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    pub(crate) fn set_next(&mut self, next: usize) {
        self.next = Some(next);
    }

    /// Store a record handle, handing it back if the bucket is full
    pub fn push(&mut self, rid: RecordId) -> Result<(), RecordId> {
        if self.is_full() {
            return Err(rid);
        }
        self.slots.push(rid);
        Ok(())
    }

    /// Search this bucket's own slots for `key`
    ///
    /// The overflow chain is not followed here.
    pub fn search(&self, store: &RecordStore, key: &str) -> Option<RecordId> {
        self.slots
            .iter()
            .copied()
            .find(|&rid| store.get(rid).is_some_and(|record| record.key() == key))
    }
}
