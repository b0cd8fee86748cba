//! The Patricia trie dictionary.
//!
//! This module contains `PatriciaDict`, which indexes records by the bits of
//! one key field and answers exact and nearest-match lookups.

use tracing::{debug, trace};

use crate::bits;
use crate::dict::Dictionary;
use crate::distance::Levenshtein;
use crate::error::Result;
use crate::iter::Leaves;
use crate::key::Key;
use crate::node::Node;
use crate::record::{Record, Schema};
use crate::result::{Outcome, QueryResult};

/// A bit-level radix trie over one field of a record set.
///
/// Keys are compared as NUL-terminated bit strings. Every leaf holds one
/// complete key and every record inserted under it; every branch holds the
/// prefix its subtree shares and the bit at which the subtree divides. Chains
/// with a single child are never materialised, so the trie has exactly one
/// branch fewer than it has distinct keys.
///
/// # Examples
///
/// ```
/// use patricia_lookup::{Dictionary, PatriciaDict, Record, Schema};
///
/// let schema = Schema::new(2, 0).unwrap();
/// let mut dict = PatriciaDict::new(schema);
/// dict.insert(Record::copy_from(&["CAT", "meow"], &schema).unwrap()).unwrap();
/// dict.insert(Record::copy_from(&["DOG", "woof"], &schema).unwrap()).unwrap();
///
/// let result = dict.lookup("DOG");
/// assert!(result.is_exact());
/// assert_eq!(result.records()[0].field(1), Some("woof"));
///
/// // No exact match: the closest key is returned instead.
/// let result = dict.lookup("COT");
/// assert_eq!(result.records()[0].field(0), Some("CAT"));
/// ```
#[derive(Debug)]
pub struct PatriciaDict {
    /// The root node, absent while the trie is empty
    root: Option<Box<Node>>,

    schema: Schema,

    /// The number of records stored in the trie
    size: usize,

    /// The number of distinct keys (leaves)
    keys: usize,
}

/// What a teardown released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Teardown {
    pub branches: usize,
    pub leaves: usize,
    pub records: usize,
    /// Bytes of stem storage: branch prefixes plus leaf keys.
    pub stem_bytes: usize,
}

impl PatriciaDict {
    /// Creates a new, empty dictionary keyed on `schema.key_field()`.
    pub fn new(schema: Schema) -> Self {
        PatriciaDict {
            root: None,
            schema,
            size: 0,
            keys: 0,
        }
    }

    /// Returns the number of distinct keys stored.
    pub fn key_count(&self) -> usize {
        self.keys
    }

    /// Number of nodes on the longest root-to-leaf path; 0 when empty.
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.height())
    }

    /// Iterates over `(key, records)` pairs in ascending key order.
    pub fn iter(&self) -> Leaves<'_> {
        Leaves::new(self.root.as_deref())
    }

    /// Inserts a record under the value of its key field.
    ///
    /// A record whose key is already present is appended to that key's
    /// leaf; otherwise exactly one node is split to make room for a new
    /// leaf.
    pub fn insert(&mut self, record: Record) -> Result<()> {
        self.schema.check(record.len())?;
        let key = Key::new(record.key(&self.schema));

        let new_key = match self.root.as_mut() {
            None => {
                trace!(key = %key, "insert into empty trie");
                self.root = Some(Box::new(Node::leaf(key, record)));
                true
            }
            Some(root) => Self::insert_recursive(root, key, record),
        };

        self.size += 1;
        if new_key {
            self.keys += 1;
        }
        Ok(())
    }

    // Returns whether a new leaf was created.
    fn insert_recursive(slot: &mut Box<Node>, key: Key, record: Record) -> bool {
        let stem_bits = slot.stem_bits();
        let matched = bits::first_mismatch(key.as_bytes(), key.bits(), slot.stem(), stem_bits);

        if matched < stem_bits {
            debug!(key = %key, bit = matched, "split inside stem");
            Node::split(slot, matched, key, record);
            return true;
        }

        let diverge = match &mut **slot {
            Node::Branch {
                bit_index,
                children,
                ..
            } => {
                let side = key.bit(*bit_index) as usize;
                trace!(key = %key, bit = *bit_index, side, "descend");
                return Self::insert_recursive(&mut children[side], key, record);
            }
            Node::Leaf {
                key: existing,
                records,
            } => {
                if *existing == key {
                    trace!(key = %key, count = records.len() + 1, "duplicate key");
                    records.push(record);
                    return false;
                }
                // The stem matched but the keys differ, so one runs past
                // the other; find the first differing bit over the longer.
                let end = key.bits().max(existing.bits());
                bits::first_mismatch_from(key.as_bytes(), existing.as_bytes(), 0, end)
            }
        };

        debug!(key = %key, bit = diverge, "split at leaf");
        Node::split(slot, diverge, key, record);
        true
    }

    /// Looks up `query`, falling back to the closest stored key.
    ///
    /// The walk compares only the part of each stem not already confirmed.
    /// If the query diverges inside a stem, every key beneath that node is
    /// ranked by edit distance and the records of the closest one (ties go
    /// to the smaller key) are returned. If the walk reaches a leaf, that
    /// leaf's records are returned whether or not its key equals the query.
    pub fn lookup(&self, query: &str) -> QueryResult<'_> {
        let mut result = QueryResult::new(query);
        let mut node = match self.root.as_deref() {
            Some(root) => root,
            None => return result,
        };

        let key = Key::new(query);
        let key_bits = key.bits();
        let mut offset = 0;

        loop {
            let stem_bits = node.stem_bits();
            let end = stem_bits.min(key_bits);
            let mismatch = bits::first_mismatch_from(key.as_bytes(), node.stem(), offset, end);

            let counters = result.comparisons_mut();
            counters.nodes += 1;
            counters.bits += if mismatch < end {
                mismatch - offset + 1
            } else {
                end.saturating_sub(offset)
            };

            if mismatch < stem_bits {
                Self::closest(node, &key, &mut result);
                debug!(query, outcome = ?result.outcome(), records = result.len(), "lookup");
                return result;
            }
            offset = stem_bits;

            match node {
                Node::Branch {
                    bit_index,
                    children,
                    ..
                } => {
                    node = &*children[key.bit(*bit_index) as usize];
                }
                Node::Leaf {
                    key: stored,
                    records,
                } => {
                    result.comparisons_mut().strings += 1;
                    let outcome = if *stored == key {
                        Outcome::Exact
                    } else {
                        Outcome::Leaf
                    };
                    result.resolve(outcome, records.iter());
                    debug!(query, outcome = ?outcome, records = result.len(), "lookup");
                    return result;
                }
            }
        }
    }

    // Resolves `result` to the records of the key under `subtree` closest
    // to `key`.
    fn closest<'a>(subtree: &'a Node, key: &Key, result: &mut QueryResult<'a>) {
        let mut distance = Levenshtein::new(key.as_bytes());
        let mut best: Option<(&'a Key, &'a [Record], usize)> = None;

        for (candidate, records) in Leaves::new(Some(subtree)) {
            result.comparisons_mut().strings += 1;
            let d = distance.distance_to(candidate.as_bytes());
            let better = match best {
                None => true,
                Some((best_key, _, best_d)) => d < best_d || (d == best_d && candidate < best_key),
            };
            if better {
                best = Some((candidate, records, d));
            }
        }

        if let Some((winner, records, d)) = best {
            trace!(query = %key, winner = %winner, distance = d, "closest key");
            result.resolve(Outcome::Closest { distance: d }, records.iter());
        }
    }

    /// Releases every node and record, children before parents, and reports
    /// what was freed.
    ///
    /// Dropping the dictionary frees the same memory; this walk exists so
    /// the release can be observed.
    pub fn teardown(mut self) -> Teardown {
        let mut freed = Teardown::default();
        if let Some(root) = self.root.take() {
            Self::release(root, &mut freed);
        }
        debug!(?freed, "teardown");
        freed
    }

    fn release(node: Box<Node>, freed: &mut Teardown) {
        match *node {
            Node::Branch {
                stem,
                children: [left, right],
                ..
            } => {
                Self::release(left, freed);
                Self::release(right, freed);
                freed.stem_bytes += stem.len();
                freed.branches += 1;
            }
            Node::Leaf { key, records } => {
                freed.stem_bytes += key.len();
                freed.records += records.len();
                freed.leaves += 1;
            }
        }
    }
}

impl Dictionary for PatriciaDict {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn insert(&mut self, record: Record) -> Result<()> {
        PatriciaDict::insert(self, record)
    }

    fn lookup(&self, query: &str) -> QueryResult<'_> {
        PatriciaDict::lookup(self, query)
    }

    fn len(&self) -> usize {
        self.size
    }
}
