//! Storage errors.

use keyarbor_query::display_bytes;

/// Errors surfaced by [OrderedStore](crate::OrderedStore) implementations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested key is not present in the store.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// The underlying engine or transport failed. Covers disk I/O errors
    /// for local stores and connection drops for remote ones.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// The store handle has been closed.
    #[error("store is closed")]
    Closed,
}

impl Error {
    /// Builds a [Error::KeyNotFound] with the key rendered for display.
    pub fn key_not_found(key: &[u8]) -> Self {
        Error::KeyNotFound(display_bytes(key))
    }
}
