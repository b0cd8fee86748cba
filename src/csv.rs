//! Reading the comma-separated dataset.
//!
//! Fields are separated by commas outside double quotes. Quotes around a
//! field are removed and a doubled quote inside a quoted field stands for
//! one quote. A row whose quotes are still open at the end of a line
//! continues on the next line.

use std::io::BufRead;
use std::mem;

use tracing::trace;

use crate::error::{Error, Result};
use crate::record::{Record, Schema};

/// Splits one logical CSV row into its fields.
///
/// A trailing comma yields a final empty field; an empty line yields a
/// single empty field.
pub fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(mem::take(&mut field)),
            c => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Strips trailing `\n` and `\r` characters.
pub fn trim_line_end(line: &str) -> &str {
    line.trim_end_matches(|c| c == '\n' || c == '\r')
}

fn quotes_open(line: &str) -> bool {
    line.bytes().filter(|&b| b == b'"').count() % 2 == 1
}

/// A CSV reader that has already consumed the header row.
#[derive(Debug)]
pub struct Reader<R> {
    inner: R,
    headers: Vec<String>,
    /// Number of physical lines consumed so far.
    line: usize,
}

impl<R: BufRead> Reader<R> {
    /// Reads the header row from `inner`.
    pub fn new(inner: R) -> Result<Self> {
        let mut reader = Reader {
            inner,
            headers: Vec::new(),
            line: 0,
        };
        reader.headers = reader.next_row()?.ok_or(Error::MissingHeader)?;
        Ok(reader)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    fn read_line(&mut self, buf: &mut String) -> Result<bool> {
        buf.clear();
        if self.inner.read_line(buf)? == 0 {
            return Ok(false);
        }
        self.line += 1;
        let len = trim_line_end(buf).len();
        buf.truncate(len);
        Ok(true)
    }

    /// Reads the next non-blank row, joining continuation lines.
    pub fn next_row(&mut self) -> Result<Option<Vec<String>>> {
        let mut row = String::new();
        loop {
            if !self.read_line(&mut row)? {
                return Ok(None);
            }
            if !row.is_empty() {
                break;
            }
        }

        let start = self.line;
        let mut next = String::new();
        while quotes_open(&row) {
            if !self.read_line(&mut next)? {
                return Err(Error::UnterminatedQuote { line: start });
            }
            trace!(line = self.line, start, "continuation line");
            row.push('\n');
            row.push_str(&next);
        }

        Ok(Some(split_record(&row)))
    }

    /// Turns the remaining rows into records checked against `schema`.
    pub fn records(self, schema: Schema) -> Records<R> {
        Records {
            reader: self,
            schema,
        }
    }
}

/// Iterator over the records of a [`Reader`].
#[derive(Debug)]
pub struct Records<R> {
    reader: Reader<R>,
    schema: Schema,
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.next_row() {
            Ok(Some(fields)) => Some(Record::new(fields, &self.schema)),
            Ok(None) => None,
            Err(err) => Some(Err(err)),
        }
    }
}
