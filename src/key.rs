//! Encoding of field values as bit-addressable trie keys.
use std::borrow::Borrow;
use std::fmt;

use crate::bits::{self, BITS_PER_BYTE};

/// A field value viewed as a NUL-terminated byte string.
///
/// The terminator is not stored: the bit helpers read past the end of a
/// buffer as zero, so a key of `n` bytes exposes `(n + 1) * 8` comparable
/// bits. A value with an interior NUL is truncated there, which keeps the
/// terminator unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key {
    text: String,
}

impl Key {
    /// Creates a key from a field value.
    pub fn new(value: &str) -> Self {
        let end = value.find('\0').unwrap_or(value.len());
        Key {
            text: value[..end].to_string(),
        }
    }

    /// The key as text, without the terminator.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The key bytes, without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Length of the key in bytes, without the terminator.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` for the empty string key.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of comparable bits, terminator included.
    pub fn bits(&self) -> usize {
        (self.text.len() + 1) * BITS_PER_BYTE
    }

    /// Value of bit `index` of the terminated key.
    pub fn bit(&self, index: usize) -> u8 {
        bits::bit_at(self.as_bytes(), index)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::new(value)
    }
}

impl From<String> for Key {
    fn from(mut value: String) -> Self {
        if let Some(end) = value.find('\0') {
            value.truncate(end);
        }
        Key { text: value }
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
