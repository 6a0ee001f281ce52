use std::{fmt, ops::Bound};

use crate::{display_bytes, Key, DEFAULT_LIMIT, HIGH_SENTINEL};

/// How the upper end of a prefix scan is synthesized when no explicit upper
/// bound is given.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PrefixBoundMode {
    /// Append [HIGH_SENTINEL] to the prefix. Matches the classic LevelDB
    /// browser behavior; only safe for keyspaces of printable ASCII below
    /// `~`.
    #[default]
    Sentinel,
    /// Compute the true successor of the prefix bytes. Safe for arbitrary
    /// binary keyspaces.
    Successor,
}

/// `ScanOptions` is one well-formed, bounded, ordered, limited range scan
/// request against an ordered key-value store.
///
/// Both ends use [std::ops::Bound]; `Unbounded` on both ends means the scan
/// covers the entire keyspace up to `limit`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanOptions {
    /// Lower end of the scanned range.
    pub lower: Bound<Key>,
    /// Upper end of the scanned range.
    pub upper: Bound<Key>,
    /// Maximum number of keys the scan may yield.
    pub limit: usize,
    /// Scan from the upper end toward the lower end?
    pub reverse: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::everything()
    }
}

impl ScanOptions {
    /// Creates a scan over the entire keyspace, ascending, with the default
    /// limit.
    pub fn everything() -> Self {
        ScanOptions {
            lower: Bound::Unbounded,
            upper: Bound::Unbounded,
            limit: DEFAULT_LIMIT,
            reverse: false,
        }
    }

    /// Creates a scan with a direction specified.
    pub fn with_direction(reverse: bool) -> Self {
        ScanOptions {
            reverse,
            ..Self::everything()
        }
    }

    /// Translates the user-facing query form into a scan request.
    ///
    /// The four text inputs are optional, empty meaning absent. Non-empty
    /// bound texts are prepended with `prefix` and used as inclusive ends.
    /// When both bound texts are empty but a prefix is active, the scan
    /// covers `[prefix, prefix + '~')`. When everything is empty the scan
    /// covers the whole keyspace. `limit_text` that does not parse as a
    /// positive integer silently falls back to [DEFAULT_LIMIT]. This
    /// function is pure and cannot fail.
    pub fn plan(
        lower_text: &[u8],
        upper_text: &[u8],
        prefix: &[u8],
        limit_text: &str,
        reverse: bool,
    ) -> Self {
        Self::plan_binary(
            lower_text,
            upper_text,
            prefix,
            limit_text,
            reverse,
            PrefixBoundMode::Sentinel,
        )
    }

    /// Like [ScanOptions::plan], with an explicit choice of how a
    /// prefix-only scan bounds its upper end.
    pub fn plan_binary(
        lower_text: &[u8],
        upper_text: &[u8],
        prefix: &[u8],
        limit_text: &str,
        reverse: bool,
        mode: PrefixBoundMode,
    ) -> Self {
        let mut lower = Bound::Unbounded;
        let mut upper = Bound::Unbounded;

        if !lower_text.is_empty() {
            lower = Bound::Included(concat(prefix, lower_text));
        }
        if !upper_text.is_empty() {
            upper = Bound::Included(concat(prefix, upper_text));
        }

        if lower_text.is_empty() && upper_text.is_empty() && !prefix.is_empty() {
            lower = Bound::Included(prefix.to_vec());
            upper = match mode {
                PrefixBoundMode::Sentinel => Bound::Excluded(concat(prefix, &[HIGH_SENTINEL])),
                PrefixBoundMode::Successor => match prefix_successor(prefix) {
                    Some(successor) => Bound::Excluded(successor),
                    None => Bound::Unbounded,
                },
            };
        }

        ScanOptions {
            lower,
            upper,
            limit: parse_limit(limit_text),
            reverse,
        }
    }

    /// Returns `true` if `key` falls within the scanned range, respecting
    /// inclusive/exclusive semantics. `Unbounded` ends always pass.
    pub fn contains<K: AsRef<[u8]>>(&self, key: K) -> bool {
        let key = key.as_ref();

        let passes_lower = match &self.lower {
            Bound::Unbounded => true,
            Bound::Included(bound) => key >= bound.as_slice(),
            Bound::Excluded(bound) => key > bound.as_slice(),
        };
        let passes_upper = match &self.upper {
            Bound::Unbounded => true,
            Bound::Included(bound) => key <= bound.as_slice(),
            Bound::Excluded(bound) => key < bound.as_slice(),
        };

        passes_lower && passes_upper
    }

    /// Returns `true` if no key can satisfy both bounds, i.e. the lower end
    /// starts past the upper end. Backends use this to answer with an empty
    /// sequence instead of feeding an invalid range to their cursor.
    pub fn is_empty_range(&self) -> bool {
        let (lower, lower_exclusive) = match &self.lower {
            Bound::Unbounded => return false,
            Bound::Included(bound) => (bound, false),
            Bound::Excluded(bound) => (bound, true),
        };
        let (upper, upper_exclusive) = match &self.upper {
            Bound::Unbounded => return false,
            Bound::Included(bound) => (bound, false),
            Bound::Excluded(bound) => (bound, true),
        };

        lower > upper || (lower == upper && (lower_exclusive || upper_exclusive))
    }
}

impl fmt::Display for ScanOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lower = match &self.lower {
            Bound::Unbounded => "(-inf".to_string(),
            Bound::Included(key) => format!("[{}", display_bytes(key)),
            Bound::Excluded(key) => format!("({}", display_bytes(key)),
        };
        let upper = match &self.upper {
            Bound::Unbounded => "+inf)".to_string(),
            Bound::Included(key) => format!("{}]", display_bytes(key)),
            Bound::Excluded(key) => format!("{})", display_bytes(key)),
        };
        write!(
            f,
            "{} .. {} limit {}{}",
            lower,
            upper,
            self.limit,
            if self.reverse { " reverse" } else { "" }
        )
    }
}

/// Computes the shortest byte string strictly greater than every key that
/// starts with `prefix`: the last non-0xFF byte is incremented and trailing
/// 0xFF bytes are dropped. Returns `None` when no such string exists (empty
/// or all-0xFF prefix), in which case the scan upper end is unbounded.
pub fn prefix_successor(prefix: &[u8]) -> Option<Key> {
    let mut successor = prefix.to_vec();
    while let Some(last) = successor.last_mut() {
        if *last == u8::MAX {
            successor.pop();
        } else {
            *last += 1;
            return Some(successor);
        }
    }
    None
}

/// Parses a limit text input, falling back to [DEFAULT_LIMIT] when it is
/// empty, malformed, or not positive.
fn parse_limit(limit_text: &str) -> usize {
    match limit_text.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => limit,
        _ => DEFAULT_LIMIT,
    }
}

fn concat(prefix: &[u8], text: &[u8]) -> Key {
    let mut key = Vec::with_capacity(prefix.len() + text.len());
    key.extend_from_slice(prefix);
    key.extend_from_slice(text);
    key
}
