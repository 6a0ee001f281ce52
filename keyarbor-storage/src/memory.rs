//! In-memory reference backend.
//!
//! Backed by a `BTreeMap`, so the keyspace is ordered exactly the way an
//! on-disk LevelDB-family engine orders it: raw lexicographic byte order.
//! Used as the reference implementation and as the storage double in tests.

use std::collections::{btree_map, BTreeMap};

use keyarbor_query::{Key, ScanOptions};

use crate::{Batch, BatchOperation, Error, OrderedStore};

/// Ordered store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: BTreeMap<Key, Vec<u8>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in the store.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl FromIterator<(Key, Vec<u8>)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (Key, Vec<u8>)>>(entries: I) -> Self {
        MemoryStore {
            map: entries.into_iter().collect(),
        }
    }
}

/// Scan cursor over a [MemoryStore].
pub struct MemoryScanIter<'a> {
    range: Option<btree_map::Range<'a, Key, Vec<u8>>>,
    remaining: usize,
    reverse: bool,
}

impl Iterator for MemoryScanIter<'_> {
    type Item = Result<Key, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let range = self.range.as_mut()?;
        let (key, _) = if self.reverse {
            range.next_back()?
        } else {
            range.next()?
        };
        self.remaining -= 1;
        Some(Ok(key.clone()))
    }
}

impl OrderedStore for MemoryStore {
    type ScanIter<'a>
        = MemoryScanIter<'a>
    where
        Self: 'a;

    fn get(&self, key: &[u8]) -> Result<Vec<u8>, Error> {
        self.map
            .get(key)
            .cloned()
            .ok_or_else(|| Error::key_not_found(key))
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), Error> {
        self.map.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), Error> {
        self.map.remove(key);
        Ok(())
    }

    fn scan(&self, options: &ScanOptions) -> Result<Self::ScanIter<'_>, Error> {
        // BTreeMap::range panics on inverted bounds; answer with an empty
        // cursor instead.
        let range = if options.is_empty_range() {
            None
        } else {
            Some(self.map.range((options.lower.clone(), options.upper.clone())))
        };
        Ok(MemoryScanIter {
            range,
            remaining: options.limit,
            reverse: options.reverse,
        })
    }

    fn apply_batch(&mut self, batch: Batch) -> Result<(), Error> {
        for operation in batch {
            match operation {
                BatchOperation::Put { key, value } => {
                    self.map.insert(key, value);
                }
                BatchOperation::Delete { key } => {
                    self.map.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn close(self) -> Result<(), Error> {
        Ok(())
    }
}
