//! The stateful index: flat key list in scan order plus the prefix tree.

use std::collections::HashMap;

use keyarbor_query::{Key, ScanOptions};
use keyarbor_storage::OrderedStore;

use crate::{tree::TreeNode, Error};

/// Tree view and flat key list over one store's keyspace.
///
/// The flat list reflects the last scan's order exactly (ascending or
/// descending per [ScanOptions::reverse]); the tree is always built from a
/// lexicographically sorted copy of the key set, so tree shape is stable
/// independent of scan direction. That is what makes
/// [TreeIndex::refresh_order_only] possible: toggling direction replaces
/// the flat list and leaves the tree alone.
///
/// Single-writer: overlapping refreshes are not safe and must be
/// serialized (debounced) by the caller. A refresh either completes fully
/// or fails with the previous state untouched.
#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    tree: TreeNode,
    flat_keys: Vec<Key>,
    key_positions: HashMap<Key, usize>,
    reverse_active: bool,
    generation: u64,
}

impl TreeIndex {
    /// Creates an empty index, the state before any store is scanned.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans the store and replaces both the flat key list and the tree.
    ///
    /// Use after anything that may have changed the key set: bound, limit,
    /// or prefix edits, writes, deletes, opening a store. On scan failure
    /// the previous state is left untouched.
    pub fn refresh_full<S: OrderedStore>(
        &mut self,
        store: &S,
        options: &ScanOptions,
    ) -> Result<(), Error> {
        let keys = collect_scan(store, options)?;

        let mut sorted = keys.clone();
        sorted.sort_unstable();
        self.tree = TreeNode::from_keys(&sorted);

        self.replace_flat_keys(keys, options.reverse);
        Ok(())
    }

    /// Scans the store and replaces the flat key list only; the tree is
    /// left byte-for-byte unchanged.
    ///
    /// Caller's precondition, not enforced here: the underlying key set
    /// has not changed since the last [TreeIndex::refresh_full]. Violating
    /// it leaves the tree stale relative to the flat list until the next
    /// full refresh; that window is accepted, the alternative of rebuilding
    /// the tree on every direction toggle is the cost this path avoids.
    pub fn refresh_order_only<S: OrderedStore>(
        &mut self,
        store: &S,
        options: &ScanOptions,
    ) -> Result<(), Error> {
        let keys = collect_scan(store, options)?;
        self.replace_flat_keys(keys, options.reverse);
        Ok(())
    }

    /// Resets to the empty state. Called when the store handle is closed
    /// or a different store is opened. The generation counter keeps
    /// counting so stale completions from the previous store still lose.
    pub fn clear(&mut self) {
        self.tree = TreeNode::root();
        self.flat_keys.clear();
        self.key_positions.clear();
        self.reverse_active = false;
        self.generation += 1;
    }

    /// Resolves a tree node identity (its chain of segment names from the
    /// root) to the stored key terminating there, if any.
    pub fn lookup_full_key(&self, path: &[&[u8]]) -> Option<&Key> {
        self.tree.descendant(path)?.full_key.as_ref()
    }

    /// Position of `key` in the flat list, in current scan order. O(1).
    pub fn index_of(&self, key: &[u8]) -> Option<usize> {
        self.key_positions.get(key).copied()
    }

    /// The current tree root.
    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    /// Keys of the last scan, in scan order.
    pub fn flat_keys(&self) -> &[Key] {
        &self.flat_keys
    }

    /// Number of keys in the flat list.
    pub fn len(&self) -> usize {
        self.flat_keys.len()
    }

    /// Returns `true` if the last scan yielded no keys (or none ran yet).
    pub fn is_empty(&self) -> bool {
        self.flat_keys.is_empty()
    }

    /// Whether the flat list is currently in descending order.
    pub fn reverse_active(&self) -> bool {
        self.reverse_active
    }

    /// Monotonic counter bumped by every successful refresh and clear.
    /// Callers racing overlapping refreshes compare generations to discard
    /// out-of-order completions.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn replace_flat_keys(&mut self, keys: Vec<Key>, reverse: bool) {
        self.key_positions = keys
            .iter()
            .enumerate()
            .map(|(position, key)| (key.clone(), position))
            .collect();
        self.flat_keys = keys;
        self.reverse_active = reverse;
        self.generation += 1;
    }
}

/// Materializes a scan. Failing before touching any index state is what
/// keeps a failed refresh "stale but valid".
fn collect_scan<S: OrderedStore>(store: &S, options: &ScanOptions) -> Result<Vec<Key>, Error> {
    let mut keys = Vec::new();
    for key in store.scan(options)? {
        keys.push(key?);
    }
    Ok(keys)
}
