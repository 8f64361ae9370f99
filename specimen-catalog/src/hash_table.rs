//! Fixed-size bucket array rebuilt from a document's precomputed buckets.

use std::collections::TryReserveError;

use crate::hash::{HASH_SIZE, hash_name};

/// A bucket key outside `[0, HASH_SIZE)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutOfRange(pub usize);

/// Hash table of record indices with exactly [`HASH_SIZE`] buckets.
///
/// Each bucket holds the indices of the records whose name hashes to the
/// bucket's key, in the order the document lists them. The table stores
/// indices only; name verification happens against the records themselves.
#[derive(Debug, Clone)]
pub struct HashTable {
    buckets: Vec<Vec<u32>>,
}

impl HashTable {
    /// Allocate a table with every bucket empty.
    pub fn new() -> Result<Self, TryReserveError> {
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(HASH_SIZE)?;
        buckets.resize_with(HASH_SIZE, Vec::new);
        Ok(Self { buckets })
    }

    /// Replace the contents of bucket `key` with a copy of `values`.
    ///
    /// Rejects keys outside the table instead of trusting the document.
    pub fn insert(&mut self, key: usize, values: &[u32]) -> Result<(), InsertError> {
        let bucket = self
            .buckets
            .get_mut(key)
            .ok_or(InsertError::KeyOutOfRange(KeyOutOfRange(key)))?;
        let mut copy = Vec::new();
        copy.try_reserve_exact(values.len())?;
        copy.extend_from_slice(values);
        *bucket = copy;
        Ok(())
    }

    /// Indices stored in bucket `key`. Out-of-range keys read as empty.
    pub fn lookup(&self, key: usize) -> &[u32] {
        self.buckets.get(key).map_or(&[], Vec::as_slice)
    }

    /// Bucket for `name`, or an empty slice for the empty name.
    pub fn candidates(&self, name: &str) -> &[u32] {
        match hash_name(name) {
            Some(code) => self.lookup(code as usize),
            None => &[],
        }
    }

    /// Whether bucket `key` holds at least one index.
    pub fn is_occupied(&self, key: usize) -> bool {
        !self.lookup(key).is_empty()
    }

    /// Number of non-empty buckets.
    pub fn occupied(&self) -> usize {
        self.buckets.iter().filter(|b| !b.is_empty()).count()
    }

    /// Total number of stored indices across all buckets.
    pub fn entries(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Length of the fullest bucket.
    pub fn max_bucket_len(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Why [`HashTable::insert`] refused a bucket.
#[derive(Debug)]
pub enum InsertError {
    /// The key does not address a bucket.
    KeyOutOfRange(KeyOutOfRange),
    /// The bucket copy could not be allocated.
    Allocation(TryReserveError),
}

impl From<TryReserveError> for InsertError {
    fn from(e: TryReserveError) -> Self {
        InsertError::Allocation(e)
    }
}
