//! # Patricia Lookup
//!
//! Exact and nearest-match lookup over tabular records, keyed on one field.
//!
//! This crate provides a bit-level Patricia trie (radix trie over the bits
//! of each key) that stores every record of a dataset under the value of a
//! chosen field. Unary chains are compressed into single edges, so the trie
//! holds one leaf per distinct key and one branch per point where keys
//! diverge.
//!
//! ## Features
//!
//! - **Bit-level keys**: keys are compared as NUL-terminated bit strings, so a
//!   key that is a prefix of another still gets its own leaf
//! - **Duplicate keys**: every record sharing a key is kept, in insertion order
//! - **Nearest match**: a query with no exact match returns the records of the
//!   closest key (Levenshtein distance) beneath the point where it diverged
//! - **Comparison counters**: every result reports bits, nodes and strings
//!   compared, for comparison against the linear-scan [`ScanDict`]
//! - **CSV loading and rendering**: [`csv::Reader`] and [`render`] handle the
//!   dataset and output formats
//!
//! ## Example
//!
//! ```rust
//! use patricia_lookup::{Dictionary, PatriciaDict, Record, Schema};
//!
//! // Two fields per record, keyed on the second.
//! let schema = Schema::new(2, 1).unwrap();
//! let mut dict = PatriciaDict::new(schema);
//!
//! dict.insert(Record::copy_from(&["1", "12 MAIN ST"], &schema).unwrap()).unwrap();
//! dict.insert(Record::copy_from(&["2", "14 MAIN ST"], &schema).unwrap()).unwrap();
//!
//! // Exact match
//! let result = dict.lookup("12 MAIN ST");
//! assert!(result.is_exact());
//! assert_eq!(result.records()[0].field(0), Some("1"));
//!
//! // Nearest match
//! let result = dict.lookup("14 MAIN RD");
//! assert!(!result.is_exact());
//! assert_eq!(result.records()[0].field(0), Some("2"));
//! ```

pub mod bits;
pub mod csv;
mod dict;
pub mod distance;
mod error;
mod iter;
mod key;
mod node;
mod record;
pub mod render;
mod result;
mod scan;
mod trie;

// Re-export public types
pub use crate::dict::{load, Dictionary};
pub use crate::error::{Error, Result};
pub use crate::iter::Leaves;
pub use crate::key::Key;
pub use crate::record::{
    address_field_index, Record, Schema, ADDRESS_FIELDS, ADDRESS_FIELD_COUNT, EZI_ADD,
};
pub use crate::result::{Comparisons, Outcome, QueryResult};
pub use crate::scan::ScanDict;
pub use crate::trie::{PatriciaDict, Teardown};
