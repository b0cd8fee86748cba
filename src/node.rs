//! Internal node implementation for the Patricia trie.
//!
//! This module contains the `Node` type that forms the backbone of
//! `PatriciaDict`. Nodes own their children outright through `Box`, so the
//! tree is a plain exclusive-ownership structure with no sharing.

use crate::bits;
use crate::key::Key;
use crate::record::Record;

/// A node of the bit-level Patricia trie.
///
/// A branch stores the bits shared by every key beneath it and the index of
/// the bit that picks a child. A leaf stores one complete key together with
/// every record inserted under that key.
#[derive(Debug)]
pub(crate) enum Node {
    Branch {
        /// Bits `[0, bit_index)` common to every key in the subtree.
        stem: Box<[u8]>,
        /// The bit that selects a child: 0 goes left, 1 goes right.
        bit_index: usize,
        children: [Box<Node>; 2],
    },
    Leaf {
        /// The full key; its stem covers the terminator too.
        key: Key,
        /// Records sharing `key`, in insertion order. Never empty.
        records: Vec<Record>,
    },
}

impl Node {
    /// Creates a leaf holding a single record.
    pub fn leaf(key: Key, record: Record) -> Self {
        Node::Leaf {
            key,
            records: vec![record],
        }
    }

    /// Returns whether this node is a leaf (has no children)
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// The stored bit sequence: a shared prefix for branches, the key for leaves.
    pub fn stem(&self) -> &[u8] {
        match self {
            Node::Branch { stem, .. } => &stem[..],
            Node::Leaf { key, .. } => key.as_bytes(),
        }
    }

    /// Number of meaningful bits in `stem()`.
    ///
    /// For a branch this equals its `bit_index`; for a leaf it is the full
    /// key length including the terminator.
    pub fn stem_bits(&self) -> usize {
        match self {
            Node::Branch { bit_index, .. } => *bit_index,
            Node::Leaf { key, .. } => key.bits(),
        }
    }

    /// Replaces the subtree in `slot` with a branch splitting at `bit_index`.
    ///
    /// The branch's stem is the first `bit_index` bits of `key`. The new
    /// leaf goes to the side named by bit `bit_index` of `key`; the old
    /// subtree takes the other side.
    pub fn split(slot: &mut Box<Node>, bit_index: usize, key: Key, record: Record) {
        let stem = bits::extract_bits(key.as_bytes(), 0, bit_index).into_boxed_slice();
        let side = key.bit(bit_index);
        let leaf = Box::new(Node::leaf(key, record));

        let placeholder = Node::Leaf {
            key: Key::default(),
            records: Vec::new(),
        };
        let old = Box::new(std::mem::replace(&mut **slot, placeholder));

        let children = if side == 0 { [leaf, old] } else { [old, leaf] };
        **slot = Node::Branch {
            stem,
            bit_index,
            children,
        };
    }

    /// Returns the number of records stored in this subtree
    pub fn record_count(&self) -> usize {
        match self {
            Node::Branch { children, .. } => children.iter().map(|c| c.record_count()).sum(),
            Node::Leaf { records, .. } => records.len(),
        }
    }

    /// Returns the number of distinct keys (leaves) in this subtree
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Branch { children, .. } => children.iter().map(|c| c.leaf_count()).sum(),
            Node::Leaf { .. } => 1,
        }
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        match self {
            Node::Branch { children, .. } => {
                1 + children.iter().map(|c| c.height()).max().unwrap_or(0)
            }
            Node::Leaf { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Schema;

    fn record(key: &str) -> Record {
        let schema = Schema::new(1, 0).unwrap();
        Record::copy_from(&[key], &schema).unwrap()
    }

    #[test]
    fn test_new_leaf() {
        let node = Node::leaf(Key::new("CAT"), record("CAT"));

        assert!(node.is_leaf());
        assert_eq!(node.stem(), b"CAT");
        assert_eq!(node.stem_bits(), 32);
        assert_eq!(node.record_count(), 1);
        assert_eq!(node.leaf_count(), 1);
        assert_eq!(node.height(), 1);
    }

    #[test]
    fn test_split_places_children_by_bit() {
        let mut slot = Box::new(Node::leaf(Key::new("CAT"), record("CAT")));

        // "CAR" has a 0 at bit 21 where "CAT" has a 1.
        Node::split(&mut slot, 21, Key::new("CAR"), record("CAR"));

        assert!(!slot.is_leaf());
        assert_eq!(slot.stem_bits(), 21);
        assert_eq!(slot.stem(), &bits::extract_bits(b"CAT", 0, 21)[..]);
        match &*slot {
            Node::Branch { children, .. } => {
                assert_eq!(children[0].stem(), b"CAR");
                assert_eq!(children[1].stem(), b"CAT");
            }
            Node::Leaf { .. } => panic!("split must produce a branch"),
        }
        assert_eq!(slot.record_count(), 2);
        assert_eq!(slot.leaf_count(), 2);
        assert_eq!(slot.height(), 2);
    }

    #[test]
    fn test_split_keeps_old_subtree_whole() {
        let mut slot = Box::new(Node::leaf(Key::new("CAT"), record("CAT")));
        Node::split(&mut slot, 21, Key::new("CAR"), record("CAR"));
        // "DOG" leaves the C-prefix at bit 5 with a 1.
        Node::split(&mut slot, 5, Key::new("DOG"), record("DOG"));

        match &*slot {
            Node::Branch {
                bit_index,
                children,
                ..
            } => {
                assert_eq!(*bit_index, 5);
                assert_eq!(children[0].leaf_count(), 2);
                assert_eq!(children[1].stem(), b"DOG");
            }
            Node::Leaf { .. } => panic!("split must produce a branch"),
        }
        assert_eq!(slot.height(), 3);
    }
}
