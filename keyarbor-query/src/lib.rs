//! Scan planning primitives for keyarbor
//!
//! This crate provides the core scan types ([ScanOptions], bound helpers)
//! used to turn user-facing lower/upper/prefix/limit/reverse inputs into a
//! single well-formed range scan against an ordered key-value store.

#![warn(missing_docs)]

mod scan_options;

pub use scan_options::{prefix_successor, PrefixBoundMode, ScanOptions};

/// Type alias for a store key.
pub type Key = Vec<u8>;

/// Byte separating path segments inside a key, e.g. `Robots:RootTests`.
pub const SEGMENT_SEPARATOR: u8 = b':';

/// Limit applied when the caller supplies no usable limit.
pub const DEFAULT_LIMIT: usize = 1000;

/// Byte used as the synthetic upper bound of a prefix scan.
///
/// `~` (0x7E) sorts after every other printable ASCII byte, so
/// `[prefix, prefix + '~')` covers all continuations of `prefix` in a
/// printable-ASCII keyspace. It does NOT cover bytes 0x7F..=0xFF; binary
/// keyspaces should plan with [PrefixBoundMode::Successor] instead.
pub const HIGH_SENTINEL: u8 = b'~';

/// Render a byte string as ASCII if every byte is printable, otherwise
/// hex-encode it.
pub fn display_bytes(bytes: &[u8]) -> String {
    if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        String::from_utf8(bytes.to_vec()).unwrap_or_else(|_| format!("0x{}", hex::encode(bytes)))
    } else {
        format!("0x{}", hex::encode(bytes))
    }
}
