#![deny(missing_docs)]

//! Ordered key-value storage abstraction for keyarbor.
//!
//! The index core never talks to a concrete database; it goes through the
//! [OrderedStore] trait, which any LevelDB-family engine or remote
//! transport client can implement. A [memory] backend is provided as the
//! reference implementation and test double.

mod error;
pub mod memory;
mod storage;
#[cfg(test)]
mod tests;

pub use crate::{
    error::Error,
    storage::{Batch, BatchOperation, OrderedStore},
};
