//! One open store plus its query state, index, and selection.
//!
//! Everything an embedding application previously had to hold in ambient
//! globals (the store handle, the query form values, the flat key list,
//! the selected key) lives in one [Session] passed by reference to all
//! operations, so multiple independent sessions can coexist and tests need
//! no setup beyond constructing one.

use keyarbor_query::{Key, ScanOptions};
use keyarbor_storage::{Batch, OrderedStore};

use crate::{index::TreeIndex, Error};

/// The persisted query form state: the raw text inputs the scan is planned
/// from on every refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryConfig {
    /// Lower bound text, empty meaning absent.
    pub lower: Vec<u8>,
    /// Upper bound text, empty meaning absent.
    pub upper: Vec<u8>,
    /// Active key prefix, usually set by a tree node selection.
    pub prefix: Vec<u8>,
    /// Limit text as typed; anything unusable falls back to the default.
    pub limit: String,
    /// Scan direction toggle.
    pub reverse: bool,
}

impl QueryConfig {
    /// Plans the scan this config describes.
    pub fn plan(&self) -> ScanOptions {
        ScanOptions::plan(
            &self.lower,
            &self.upper,
            &self.prefix,
            &self.limit,
            self.reverse,
        )
    }
}

/// A store handle with its query config, tree index, and selection.
///
/// The session tracks whether the key set may have changed since the last
/// refresh: bound/limit/prefix edits and writes mark it dirty and the next
/// [Session::refresh] rebuilds the tree, while a bare direction toggle
/// takes the cheaper reorder-only path.
#[derive(Debug)]
pub struct Session<S: OrderedStore> {
    store: S,
    config: QueryConfig,
    index: TreeIndex,
    selected: Option<Key>,
    key_set_dirty: bool,
}

impl<S: OrderedStore> Session<S> {
    /// Opens a session over a store with a default (full keyspace) query.
    pub fn open(store: S) -> Self {
        Session {
            store,
            config: QueryConfig::default(),
            index: TreeIndex::new(),
            selected: None,
            key_set_dirty: true,
        }
    }

    /// The current query form state.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Replaces the lower bound text.
    pub fn set_lower_bound(&mut self, lower: &[u8]) {
        self.config.lower = lower.to_vec();
        self.key_set_dirty = true;
    }

    /// Replaces the upper bound text.
    pub fn set_upper_bound(&mut self, upper: &[u8]) {
        self.config.upper = upper.to_vec();
        self.key_set_dirty = true;
    }

    /// Replaces the active prefix.
    pub fn set_prefix(&mut self, prefix: &[u8]) {
        self.config.prefix = prefix.to_vec();
        self.key_set_dirty = true;
    }

    /// Replaces the limit text.
    pub fn set_limit(&mut self, limit: &str) {
        self.config.limit = limit.to_string();
        self.key_set_dirty = true;
    }

    /// Flips the scan direction. Does not touch the key set, so the next
    /// refresh keeps the tree.
    pub fn toggle_reverse(&mut self) {
        self.config.reverse = !self.config.reverse;
    }

    /// Plans the current query and refreshes the index, rebuilding the
    /// tree only when the key set may have changed. Drops the selection if
    /// the selected key fell out of the result set.
    pub fn refresh(&mut self) -> Result<(), Error> {
        let options = self.config.plan();
        if self.key_set_dirty {
            self.index.refresh_full(&self.store, &options)?;
            self.key_set_dirty = false;
        } else {
            self.index.refresh_order_only(&self.store, &options)?;
        }

        if let Some(selected) = &self.selected {
            if self.index.index_of(selected).is_none() {
                self.selected = None;
            }
        }
        Ok(())
    }

    /// The current index state, for rendering.
    pub fn index(&self) -> &TreeIndex {
        &self.index
    }

    /// Read access to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Selects `key` if it is present in the flat list, returning its
    /// position there to keep a list widget in sync.
    pub fn select(&mut self, key: &[u8]) -> Option<usize> {
        let position = self.index.index_of(key)?;
        self.selected = Some(key.to_vec());
        Some(position)
    }

    /// Selects the stored key a tree node terminates at, identified by its
    /// chain of segment names, returning its flat list position.
    pub fn select_node(&mut self, path: &[&[u8]]) -> Option<usize> {
        let key = self.index.lookup_full_key(path)?.clone();
        self.select(&key)
    }

    /// The currently selected key, if any.
    pub fn selected(&self) -> Option<&Key> {
        self.selected.as_ref()
    }

    /// Loads the value of the selected key.
    pub fn selected_value(&self) -> Result<Vec<u8>, Error> {
        let key = self.selected.as_ref().ok_or(Error::NoSelection)?;
        self.store.get(key).map_err(Error::Store)
    }

    /// Overwrites the value of the selected key. The key set is unchanged,
    /// so no refresh is needed.
    pub fn put_selected(&mut self, value: &[u8]) -> Result<(), Error> {
        let key = self.selected.clone().ok_or(Error::NoSelection)?;
        self.store.put(&key, value).map_err(Error::Store)
    }

    /// Stores a value under an arbitrary key and refreshes, since the key
    /// may be new.
    pub fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), Error> {
        self.store.put(key, value).map_err(Error::Store)?;
        self.key_set_dirty = true;
        self.refresh()
    }

    /// Deletes the selected key, clears the selection, and refreshes.
    pub fn delete_selected(&mut self) -> Result<(), Error> {
        let key = self.selected.take().ok_or(Error::NoSelection)?;
        self.store.delete(&key).map_err(Error::Store)?;
        self.key_set_dirty = true;
        self.refresh()
    }

    /// Deletes several keys in one batch (a multi-select delete) and
    /// refreshes.
    pub fn delete_many<I, K>(&mut self, keys: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
    {
        let mut batch = Batch::new();
        for key in keys {
            let key = key.as_ref();
            batch.delete(key);
            if self.selected.as_deref() == Some(key) {
                self.selected = None;
            }
        }
        if batch.is_empty() {
            return Ok(());
        }
        self.store.apply_batch(batch).map_err(Error::Store)?;
        self.key_set_dirty = true;
        self.refresh()
    }

    /// Closes the store handle, consuming the session.
    pub fn close(self) -> Result<(), Error> {
        self.store.close().map_err(Error::Store)
    }
}
