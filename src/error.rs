//! Error types shared by the dictionaries, the record model and the CSV loader.

use thiserror::Error;

/// Errors that can occur while building or loading a dictionary.
///
/// A query that matches nothing is not an error: lookups report it as a
/// result with zero records.
#[derive(Debug, Error)]
pub enum Error {
    /// A schema must have at least one field.
    #[error("schema must have at least one field")]
    EmptySchema,

    /// The key field index does not name a field of the schema.
    #[error("key field {index} is out of range for a schema of {field_count} fields")]
    KeyFieldOutOfRange { index: usize, field_count: usize },

    /// A row or record does not have the number of fields the schema expects.
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// A column name could not be resolved to a field index.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// The input ended before a header row was read.
    #[error("input has no header row")]
    MissingHeader,

    /// The input ended inside a quoted field that started on `line`.
    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },

    /// An error originating from I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` type alias using the crate's `Error` type.
pub type Result<T> = std::result::Result<T, Error>;
