//! A linear-scan dictionary used as a baseline for the trie.

use tracing::debug;

use crate::bits;
use crate::dict::Dictionary;
use crate::error::Result;
use crate::key::Key;
use crate::record::{Record, Schema};
use crate::result::QueryResult;

/// Records kept in insertion order and searched front to back.
///
/// Every lookup visits every record and compares its key with the query
/// bit by bit, stopping at the first differing bit. Only exact matches are
/// returned; there is no nearest-match fallback.
#[derive(Debug)]
pub struct ScanDict {
    schema: Schema,
    records: Vec<Record>,
}

impl ScanDict {
    pub fn new(schema: Schema) -> Self {
        ScanDict {
            schema,
            records: Vec::new(),
        }
    }

    /// Iterates over the stored records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl Dictionary for ScanDict {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn insert(&mut self, record: Record) -> Result<()> {
        self.schema.check(record.len())?;
        self.records.push(record);
        Ok(())
    }

    fn lookup(&self, query: &str) -> QueryResult<'_> {
        let mut result = QueryResult::new(query);
        let query = Key::new(query);
        let query_bits = query.bits();

        for record in &self.records {
            let candidate = Key::new(record.key(&self.schema));
            let candidate_bits = candidate.bits();
            let shorter = query_bits.min(candidate_bits);
            let matched =
                bits::first_mismatch(query.as_bytes(), query_bits, candidate.as_bytes(), candidate_bits);

            let counters = result.comparisons_mut();
            counters.nodes += 1;
            counters.strings += 1;
            // The differing bit counts as examined.
            counters.bits += if matched < shorter { matched + 1 } else { shorter };

            if matched == shorter && query_bits == candidate_bits {
                result.push_exact(record);
            }
        }

        debug!(query = %query, records = result.len(), "scan lookup");
        result
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{Comparisons, Outcome};

    fn schema() -> Schema {
        Schema::new(2, 1).unwrap()
    }

    fn dict_with(entries: &[(&str, &str)]) -> ScanDict {
        let mut dict = ScanDict::new(schema());
        for (tag, key) in entries {
            dict.insert(Record::copy_from(&[*tag, *key], &schema()).unwrap())
                .unwrap();
        }
        dict
    }

    #[test]
    fn test_empty() {
        let dict = ScanDict::new(schema());
        let result = dict.lookup("x");
        assert!(result.is_empty());
        assert_eq!(result.comparisons(), Comparisons::default());
    }

    #[test]
    fn test_exact_matches_in_order() {
        let dict = dict_with(&[("1", "A"), ("2", "B"), ("3", "A")]);
        let result = dict.lookup("A");

        let tags: Vec<_> = result.records().iter().map(|r| r.field(0)).collect();
        assert_eq!(tags, vec![Some("1"), Some("3")]);
        assert_eq!(result.outcome(), Outcome::Exact);
        assert_eq!(result.comparisons().nodes, 3);
        assert_eq!(result.comparisons().strings, 3);
    }

    #[test]
    fn test_bit_counts() {
        // "A" vs "A": 16 bits. "A" vs "B": 'A' = 0x41, 'B' = 0x42 differ at bit 6.
        let dict = dict_with(&[("1", "A"), ("2", "B")]);
        let result = dict.lookup("A");
        assert_eq!(result.comparisons().bits, 16 + 7);
    }

    #[test]
    fn test_prefix_is_not_a_match() {
        let dict = dict_with(&[("1", "AB"), ("2", "ABC")]);

        let result = dict.lookup("AB");
        assert_eq!(result.len(), 1);
        assert_eq!(result.records()[0].field(0), Some("1"));

        let result = dict.lookup("A");
        assert!(result.is_empty());
        assert_eq!(result.outcome(), Outcome::NotFound);
    }

    #[test]
    fn test_insert_wrong_field_count() {
        let mut dict = ScanDict::new(schema());
        let record = Record::copy_from(&["a", "b", "c"], &Schema::new(3, 0).unwrap()).unwrap();
        assert!(dict.insert(record).is_err());
        assert!(dict.is_empty());
    }
}
