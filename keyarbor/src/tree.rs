//! The key-prefix tree: a multi-level view over a flat key set.

use std::fmt;

use indexmap::IndexMap;
use keyarbor_query::{display_bytes, Key, SEGMENT_SEPARATOR};

/// One node of the prefix tree.
///
/// `full_key` is set if and only if some stored key's segment path
/// terminates exactly at this node. A node may have children and a
/// `full_key` at the same time: `A` and `A:B` can both be stored keys, in
/// which case the `A` node carries both roles.
///
/// Children are keyed by segment name and keep first-seen insertion order,
/// so a tree built from keys in scan order renders in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNode {
    /// One path segment. Empty for the synthetic root, and possibly empty
    /// for nodes produced by keys with empty segments (`:foo`, `foo:`).
    pub name: Vec<u8>,
    /// The stored key terminating at this node, if any.
    pub full_key: Option<Key>,
    /// Child nodes by segment name, in first-seen order.
    pub children: IndexMap<Vec<u8>, TreeNode>,
}

impl TreeNode {
    /// Creates a node for one path segment.
    pub fn new(name: Vec<u8>) -> Self {
        TreeNode {
            name,
            full_key: None,
            children: IndexMap::new(),
        }
    }

    /// Creates the synthetic root owning all top-level segments.
    pub fn root() -> Self {
        Self::new(Vec::new())
    }

    /// Builds the tree for a key sequence.
    ///
    /// Each key is split on `:` and its segment path is walked from the
    /// root, creating nodes for unseen segments; the terminal node gets
    /// `full_key` set regardless of whether it also has children. Keys with
    /// empty segments are tolerated and produce nodes named `""`. The
    /// build is a full deterministic rebuild, O(total bytes across keys).
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
    {
        let mut root = Self::root();
        for key in keys {
            let key = key.as_ref();
            let mut node = &mut root;
            for segment in key.split(|byte| *byte == SEGMENT_SEPARATOR) {
                node = node
                    .children
                    .entry(segment.to_vec())
                    .or_insert_with(|| TreeNode::new(segment.to_vec()));
            }
            node.full_key = Some(key.to_vec());
        }
        root
    }

    /// Returns the child named `name`, if any.
    pub fn child(&self, name: &[u8]) -> Option<&TreeNode> {
        self.children.get(name)
    }

    /// Follows a chain of segment names down from this node. An empty path
    /// yields this node itself.
    pub fn descendant(&self, path: &[&[u8]]) -> Option<&TreeNode> {
        let mut node = self;
        for segment in path {
            node = node.child(segment)?;
        }
        Some(node)
    }

    /// A node with no children: a stored key nothing else hangs under.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// A node some other key's path passes through.
    pub fn is_internal(&self) -> bool {
        !self.children.is_empty()
    }

    /// A stored key that is itself a path prefix of other stored keys.
    /// Renderers must distinguish this from the plain internal case.
    pub fn has_both_roles(&self) -> bool {
        self.full_key.is_some() && !self.children.is_empty()
    }

    /// Segment name rendered for display; non-printable names are
    /// hex-encoded.
    pub fn display_name(&self) -> String {
        display_bytes(&self.name)
    }

    /// Structural equality that ignores child insertion order.
    ///
    /// Trees built from the same key set supplied in different orders
    /// differ in child iteration order. This compares names, full keys,
    /// and child sets recursively, with no regard to that order.
    pub fn shape_eq(&self, other: &TreeNode) -> bool {
        if self.name != other.name
            || self.full_key != other.full_key
            || self.children.len() != other.children.len()
        {
            return false;
        }
        self.children.iter().all(|(name, child)| {
            other
                .children
                .get(name)
                .is_some_and(|other_child| child.shape_eq(other_child))
        })
    }

    fn fmt_at_depth(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for child in self.children.values() {
            let marker = if child.full_key.is_some() { "*" } else { "" };
            writeln!(
                f,
                "{:indent$}{}{}",
                "",
                child.display_name(),
                marker,
                indent = depth * 2
            )?;
            child.fmt_at_depth(f, depth + 1)?;
        }
        Ok(())
    }
}

impl Default for TreeNode {
    /// The synthetic root.
    fn default() -> Self {
        TreeNode::root()
    }
}

impl fmt::Display for TreeNode {
    /// Renders the subtree as an indented listing, one segment per line,
    /// stored keys marked with `*`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at_depth(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn single_key_produces_one_terminal_node_per_segment_path() {
        let root = TreeNode::from_keys([b"a:b:c"]);

        let a = root.child(b"a").unwrap();
        assert_eq!(a.full_key, None);
        let b = a.child(b"b").unwrap();
        assert_eq!(b.full_key, None);
        let c = b.child(b"c").unwrap();
        assert_eq!(c.full_key, Some(b"a:b:c".to_vec()));
        assert!(c.is_leaf());
    }

    #[test]
    fn terminal_node_keeps_full_key_even_with_children() {
        let root = TreeNode::from_keys([b"A:B".as_slice(), b"A".as_slice()]);

        let a = root.child(b"A").unwrap();
        assert_eq!(a.full_key, Some(b"A".to_vec()));
        assert!(a.has_both_roles());

        // Supply order must not matter for the terminal marking.
        let root = TreeNode::from_keys([b"A".as_slice(), b"A:B".as_slice()]);
        assert_eq!(root.child(b"A").unwrap().full_key, Some(b"A".to_vec()));
    }

    #[test]
    fn empty_segments_are_tolerated() {
        let root = TreeNode::from_keys([b"".as_slice(), b":foo".as_slice(), b"foo:".as_slice()]);

        let unnamed = root.child(b"").unwrap();
        assert_eq!(unnamed.full_key, Some(b"".to_vec()));
        assert_eq!(
            unnamed.child(b"foo").unwrap().full_key,
            Some(b":foo".to_vec())
        );
        assert_eq!(
            root.child(b"foo").unwrap().child(b"").unwrap().full_key,
            Some(b"foo:".to_vec())
        );
    }

    #[test]
    fn children_keep_first_seen_order() {
        let root = TreeNode::from_keys([b"b".as_slice(), b"a".as_slice(), b"c".as_slice()]);
        let names: Vec<_> = root.children.keys().cloned().collect();
        assert_eq!(names, [b"b".to_vec(), b"a".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn shape_equality_ignores_supply_order() {
        let forward = TreeNode::from_keys([b"x:1".as_slice(), b"y".as_slice(), b"x".as_slice()]);
        let shuffled = TreeNode::from_keys([b"y".as_slice(), b"x".as_slice(), b"x:1".as_slice()]);

        assert!(forward.shape_eq(&shuffled));
        assert!(!forward.shape_eq(&TreeNode::from_keys([b"x:1".as_slice(), b"y".as_slice()])));
    }

    #[test]
    fn display_marks_stored_keys() {
        let root = TreeNode::from_keys([b"a".as_slice(), b"a:b".as_slice()]);
        assert_eq!(root.to_string(), "a*\n  b*\n");
    }
}
