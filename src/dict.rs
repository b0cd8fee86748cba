//! The interface shared by every dictionary implementation.

use crate::error::Result;
use crate::record::{Record, Schema};
use crate::result::QueryResult;

/// A store of records that answers lookups on the schema's key field.
///
/// Records are inserted during a load phase and the dictionary is read-only
/// afterwards: `insert` takes `&mut self` and `lookup` takes `&self`, so the
/// two can never interleave.
pub trait Dictionary {
    /// The schema every inserted record must match.
    fn schema(&self) -> &Schema;

    /// Takes ownership of `record`. Fails without modifying the dictionary
    /// if the record does not match the schema.
    fn insert(&mut self, record: Record) -> Result<()>;

    /// Finds the records for `query`. A miss is an empty result, not an error.
    fn lookup(&self, query: &str) -> QueryResult<'_>;

    /// Number of records stored.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Inserts every record from `records`, stopping at the first error.
///
/// Returns the number of records inserted.
pub fn load<D, I>(dict: &mut D, records: I) -> Result<usize>
where
    D: Dictionary + ?Sized,
    I: IntoIterator<Item = Result<Record>>,
{
    let mut count = 0;
    for record in records {
        dict.insert(record?)?;
        count += 1;
    }
    Ok(count)
}
