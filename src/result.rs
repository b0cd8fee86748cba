//! Query results and their comparison counters.

use crate::record::Record;

/// Work performed by one lookup. Diagnostic only; never affects results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Comparisons {
    /// Bits actually examined.
    pub bits: usize,
    /// Nodes visited.
    pub nodes: usize,
    /// Whole-key string comparisons (exact checks and edit distances).
    pub strings: usize,
}

/// How a lookup arrived at its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing matched: the dictionary is empty or, for a scan, no key equals the query.
    NotFound,
    /// The query equals the records' key.
    Exact,
    /// The query left the trie inside a stem; the records belong to the
    /// closest key beneath that point.
    Closest { distance: usize },
    /// The query followed the trie down to a leaf holding a different key.
    /// No distance is computed on this path.
    Leaf,
}

/// The answer to one query.
///
/// Records are borrowed from the dictionary that produced the result, so a
/// result cannot outlive it. Dropping a result frees only the query copy and
/// the reference list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult<'a> {
    query: String,
    records: Vec<&'a Record>,
    comparisons: Comparisons,
    outcome: Outcome,
}

impl<'a> QueryResult<'a> {
    /// An empty result for `query`.
    pub fn new(query: &str) -> Self {
        QueryResult {
            query: query.to_string(),
            records: Vec::new(),
            comparisons: Comparisons::default(),
            outcome: Outcome::NotFound,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn comparisons(&self) -> Comparisons {
        self.comparisons
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns `true` when the records' key equals the query.
    pub fn is_exact(&self) -> bool {
        self.outcome == Outcome::Exact
    }

    pub(crate) fn comparisons_mut(&mut self) -> &mut Comparisons {
        &mut self.comparisons
    }

    /// Records the final outcome and the records backing it.
    pub(crate) fn resolve<I>(&mut self, outcome: Outcome, records: I)
    where
        I: IntoIterator<Item = &'a Record>,
    {
        self.outcome = outcome;
        self.records.extend(records);
    }

    /// Appends one exact match, as a linear scan finds them.
    pub(crate) fn push_exact(&mut self, record: &'a Record) {
        self.outcome = Outcome::Exact;
        self.records.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Schema;

    #[test]
    fn test_new_result_is_empty() {
        let result = QueryResult::new("12 MAIN ST");
        assert_eq!(result.query(), "12 MAIN ST");
        assert!(result.is_empty());
        assert_eq!(result.comparisons(), Comparisons::default());
        assert_eq!(result.outcome(), Outcome::NotFound);
        assert!(!result.is_exact());
    }

    #[test]
    fn test_result_borrows_records() {
        let schema = Schema::new(1, 0).unwrap();
        let records = vec![
            Record::copy_from(&["a"], &schema).unwrap(),
            Record::copy_from(&["a"], &schema).unwrap(),
        ];

        let mut result = QueryResult::new("a");
        result.comparisons_mut().strings += 1;
        result.resolve(Outcome::Exact, records.iter());

        assert_eq!(result.len(), 2);
        assert!(result.is_exact());
        assert!(std::ptr::eq(result.records()[0], &records[0]));
        assert_eq!(result.comparisons().strings, 1);

        drop(result);
        // The records are still owned here.
        assert_eq!(records.len(), 2);
    }
}
