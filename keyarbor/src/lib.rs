//! Key-prefix tree index and bounded range query core.
//!
//! Keys in a LevelDB-family store are flat, lexicographically ordered byte
//! strings; by convention they form colon-delimited paths such as
//! `Robots:RootTests`. This crate derives and incrementally maintains a
//! tree view over an arbitrary flat key set on top of bounded, ordered,
//! limited range scans:
//!
//! - [ScanOptions::plan] turns user-facing bound/prefix/limit/reverse
//!   inputs into one well-formed scan request;
//! - [TreeNode::from_keys] builds the multi-level prefix tree from a key
//!   sequence;
//! - [TreeIndex] owns the current tree and flat key list, refreshing them
//!   fully when the key set may have changed and reorder-only when only
//!   the scan direction toggled;
//! - [Session] bundles a store handle, the persisted query form state, the
//!   index, and the current selection into one explicit object.
//!
//! The index follows a single-writer, request/response model: a refresh
//! either completes fully or fails cleanly with the previous state
//! untouched. Overlapping refreshes must be serialized by the caller;
//! [TreeIndex::generation] gives callers a monotonic sequence number to
//! discard stale completions with.

#![warn(missing_docs)]

mod error;
mod index;
mod session;
pub mod tree;

pub use keyarbor_query::{
    display_bytes, Key, ScanOptions, DEFAULT_LIMIT, HIGH_SENTINEL, SEGMENT_SEPARATOR,
};
pub use keyarbor_storage::{
    memory::MemoryStore, Batch, BatchOperation, Error as StorageError, OrderedStore,
};

pub use crate::{
    error::Error,
    index::TreeIndex,
    session::{QueryConfig, Session},
    tree::TreeNode,
};
