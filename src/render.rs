//! Text output for query results.
//!
//! Each query produces one summary line, for example
//!
//! ```text
//! 12 MAIN ST --> 2 records found - comparisons: b96 n3 s1
//! ```
//!
//! and a detail block listing every field of every record, one record per
//! line prefixed with `-->`.

use std::io::{self, Write};

use crate::result::QueryResult;

/// Written in place of records when a query matched nothing.
pub const NOT_FOUND: &str = "NOTFOUND";

/// Writes the one-line summary of `result`.
pub fn write_summary<W: Write>(out: &mut W, result: &QueryResult<'_>) -> io::Result<()> {
    let c = result.comparisons();
    if result.is_empty() {
        writeln!(
            out,
            "{} --> {} - comparisons: b{} n{} s{}",
            result.query(),
            NOT_FOUND,
            c.bits,
            c.nodes,
            c.strings
        )
    } else {
        writeln!(
            out,
            "{} --> {} records found - comparisons: b{} n{} s{}",
            result.query(),
            result.len(),
            c.bits,
            c.nodes,
            c.strings
        )
    }
}

/// Writes the query followed by every record as `header: value || ` pairs.
pub fn write_details<W, S>(out: &mut W, result: &QueryResult<'_>, headers: &[S]) -> io::Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    writeln!(out, "{}", result.query())?;
    if result.is_empty() {
        return writeln!(out, "--> {}", NOT_FOUND);
    }

    for record in result.records() {
        write!(out, "--> ")?;
        for (index, value) in record.fields().iter().enumerate() {
            let header = headers.get(index).map_or("", |h| h.as_ref());
            write!(out, "{}: {} || ", header, value)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes the summary to `summary` and the details to `details`.
pub fn render<S, W1, W2>(
    result: &QueryResult<'_>,
    headers: &[S],
    summary: &mut W1,
    details: &mut W2,
) -> io::Result<()>
where
    S: AsRef<str>,
    W1: Write,
    W2: Write,
{
    write_summary(summary, result)?;
    write_details(details, result, headers)
}
