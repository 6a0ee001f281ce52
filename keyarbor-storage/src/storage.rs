//! Storage seam between the index core and concrete engines.

use keyarbor_query::{Key, ScanOptions};

use crate::Error;

/// An ordered key-value store: the flat, lexicographically sorted keyspace
/// the tree index is derived from.
///
/// Implementations are expected from local embedded engines and from remote
/// transport clients alike; the trait is synchronous and callers that need
/// an async boundary wrap the store behind one. Scans are lazy and may fail
/// mid-stream, which is why the iterator yields `Result`.
pub trait OrderedStore {
    /// Lazy sequence of keys produced by [OrderedStore::scan].
    type ScanIter<'a>: Iterator<Item = Result<Key, Error>>
    where
        Self: 'a;

    /// Fetches the value stored under `key`, failing with
    /// [Error::KeyNotFound] when absent.
    fn get(&self, key: &[u8]) -> Result<Vec<u8>, Error>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), Error>;

    /// Removes `key` from the store. Removing an absent key is not an
    /// error.
    fn delete(&mut self, key: &[u8]) -> Result<(), Error>;

    /// Starts a bounded, ordered, limited scan over the keyspace. Keys are
    /// yielded in ascending lexicographic order, or descending when
    /// `options.reverse` is set, never more than `options.limit` of them.
    fn scan(&self, options: &ScanOptions) -> Result<Self::ScanIter<'_>, Error>;

    /// Applies a batch of operations. The batch is applied in order;
    /// implementations should apply it atomically where the engine allows.
    fn apply_batch(&mut self, batch: Batch) -> Result<(), Error>;

    /// Closes the store handle, releasing whatever the backend holds.
    fn close(self) -> Result<(), Error>;
}

/// A single deferred store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Store `value` under `key`.
    Put {
        /// Key to store the value under.
        key: Key,
        /// Value to store.
        value: Vec<u8>,
    },
    /// Remove `key`.
    Delete {
        /// Key to remove.
        key: Key,
    },
}

/// An ordered collection of operations applied together through
/// [OrderedStore::apply_batch].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    operations: Vec<BatchOperation>,
}

impl Batch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a put operation.
    pub fn put(&mut self, key: &[u8], value: &[u8]) {
        self.operations.push(BatchOperation::Put {
            key: key.to_vec(),
            value: value.to_vec(),
        });
    }

    /// Appends a delete operation.
    pub fn delete(&mut self, key: &[u8]) {
        self.operations.push(BatchOperation::Delete { key: key.to_vec() });
    }

    /// Number of operations in the batch.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the batch holds no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl IntoIterator for Batch {
    type Item = BatchOperation;
    type IntoIter = std::vec::IntoIter<BatchOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.into_iter()
    }
}
