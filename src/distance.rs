use std::cmp::min;

/// Levenshtein distance between one fixed query and many candidates.
///
/// Deletion, insertion and substitution each cost 1. The dynamic
/// programming matrix is kept between calls: candidates are treated as a
/// stack of bytes that can be pushed and truncated, so a candidate sharing a
/// prefix with the previous one only recomputes the rows after that prefix.
/// Candidates coming out of a trie in key order share long prefixes, which
/// makes this cheap.
#[derive(Debug, Clone)]
pub struct Levenshtein<'a> {
    /// The word every candidate is measured against.
    query: &'a [u8],
    /// The candidate bytes pushed so far.
    current: Vec<u8>,
    /// Row-major matrix, one row of `query.len() + 1` cells per pushed byte
    /// plus the initial row. Never shrunk, so rows are reused after a
    /// truncate.
    rows: Vec<usize>,
}

impl<'a> Levenshtein<'a> {
    /// Create a new distance calculator for the given query.
    pub fn new(query: &'a [u8]) -> Self {
        Levenshtein::with_capacity(query, query.len())
    }

    /// Create a calculator that can hold candidates of `max_len` bytes
    /// without reallocating.
    pub fn with_capacity(query: &'a [u8], max_len: usize) -> Self {
        let mut rows = Vec::with_capacity((query.len() + 1) * (max_len + 1));
        rows.extend(0..=query.len());

        Levenshtein {
            query,
            current: Vec::with_capacity(max_len),
            rows,
        }
    }

    /// Append a byte to the candidate and return the new distance.
    pub fn push(&mut self, value: u8) -> usize {
        let width = self.query.len() + 1;
        let previous = self.current.len() * width;
        let offset = previous + width;

        self.current.push(value);
        if self.rows.len() < offset + width {
            self.rows.resize(offset + width, 0);
        }

        self.rows[offset] = self.current.len();
        for index in 1..width {
            let cost = (self.query[index - 1] != value) as usize;

            let deletion = self.rows[offset + index - 1] + 1;
            let insertion = self.rows[previous + index] + 1;
            let substitution = self.rows[previous + index - 1] + cost;

            self.rows[offset + index] = min(min(deletion, insertion), substitution);
        }

        self.rows[offset + width - 1]
    }

    /// Drop candidate bytes past `len`.
    pub fn truncate(&mut self, len: usize) {
        self.current.truncate(len);
    }

    /// Distance between the query and the current candidate.
    pub fn distance(&self) -> usize {
        let width = self.query.len() + 1;
        self.rows[self.current.len() * width + width - 1]
    }

    /// Distance between the query and `candidate`, reusing the rows shared
    /// with the previous candidate.
    pub fn distance_to(&mut self, candidate: &[u8]) -> usize {
        let shared = self
            .current
            .iter()
            .zip(candidate)
            .take_while(|(a, b)| a == b)
            .count();
        self.truncate(shared);
        for &value in &candidate[shared..] {
            self.push(value);
        }
        self.distance()
    }
}

/// Edit distance between two byte strings.
pub fn edit_distance(a: &[u8], b: &[u8]) -> usize {
    Levenshtein::with_capacity(a, b.len()).distance_to(b)
}
