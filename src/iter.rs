//! Ordered traversal of the leaves of a trie.
//!
//! This module provides the `Leaves` iterator used both for nearest-match
//! candidate collection and for walking a whole `PatriciaDict`.

use crate::key::Key;
use crate::node::Node;
use crate::record::Record;

/// An iterator over the leaves of a subtree.
///
/// This iterator performs a depth-first traversal visiting left children
/// before right ones, so keys come out in ascending byte order (a key that
/// is a prefix of another sorts first because its terminator bits are 0).
pub struct Leaves<'a> {
    /// Nodes still to visit; the top of the stack is visited next
    stack: Vec<&'a Node>,
}

impl<'a> Leaves<'a> {
    pub(crate) fn new(root: Option<&'a Node>) -> Self {
        Leaves {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = (&'a Key, &'a [Record]);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Branch { children, .. } => {
                    self.stack.push(&children[1]);
                    self.stack.push(&children[0]);
                }
                Node::Leaf { key, records } => return Some((key, records.as_slice())),
            }
        }
        None
    }
}
