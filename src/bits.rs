//! Bit-level helpers over byte strings.
//!
//! Bits are numbered most-significant-first within each byte, so bit `i`
//! lives in byte `i / 8`. Every buffer is treated as if it were followed by
//! zero bytes: reading past the end yields 0. That gives each key an implicit
//! NUL terminator without storing it.

/// Number of bits in one byte of a key.
pub const BITS_PER_BYTE: usize = 8;

/// Number of bytes needed to hold `bits` bits.
pub fn bytes_for(bits: usize) -> usize {
    (bits + BITS_PER_BYTE - 1) / BITS_PER_BYTE
}

#[inline]
fn byte_at(bytes: &[u8], index: usize) -> u8 {
    bytes.get(index).copied().unwrap_or(0)
}

/// Returns the value (0 or 1) of bit `index` of `bytes`.
#[inline]
pub fn bit_at(bytes: &[u8], index: usize) -> u8 {
    let byte = byte_at(bytes, index / BITS_PER_BYTE);
    (byte >> (BITS_PER_BYTE - 1 - index % BITS_PER_BYTE)) & 1
}

/// Counts the leading bits that `a` and `b` have in common.
///
/// The scan is bounded by the shorter of the two bit lengths, so the result
/// is at most `min(a_bits, b_bits)`.
pub fn first_mismatch(a: &[u8], a_bits: usize, b: &[u8], b_bits: usize) -> usize {
    first_mismatch_from(a, b, 0, a_bits.min(b_bits))
}

/// Finds the first bit in `[start, end)` where `a` and `b` differ.
///
/// Returns the absolute index of that bit, or `end` when the whole range
/// matches. Whole bytes are compared at once while the cursor is byte
/// aligned.
pub fn first_mismatch_from(a: &[u8], b: &[u8], start: usize, end: usize) -> usize {
    let mut i = start;
    while i < end {
        if i % BITS_PER_BYTE == 0 && i + BITS_PER_BYTE <= end {
            let diff = byte_at(a, i / BITS_PER_BYTE) ^ byte_at(b, i / BITS_PER_BYTE);
            if diff == 0 {
                i += BITS_PER_BYTE;
                continue;
            }
            return i + diff.leading_zeros() as usize;
        }
        if bit_at(a, i) != bit_at(b, i) {
            return i;
        }
        i += 1;
    }
    end
}

/// Copies bits `[start, start + count)` of `src` into a new zeroed buffer.
///
/// The returned buffer is `bytes_for(count)` long; bits past `count` in its
/// last byte are zero.
pub fn extract_bits(src: &[u8], start: usize, count: usize) -> Vec<u8> {
    let mut out = vec![0u8; bytes_for(count)];

    if start % BITS_PER_BYTE == 0 {
        let first = start / BITS_PER_BYTE;
        for (index, byte) in out.iter_mut().enumerate() {
            *byte = byte_at(src, first + index);
        }
        let tail = count % BITS_PER_BYTE;
        if tail != 0 {
            if let Some(last) = out.last_mut() {
                *last &= 0xFFu8 << (BITS_PER_BYTE - tail);
            }
        }
        return out;
    }

    for i in 0..count {
        if bit_at(src, start + i) == 1 {
            out[i / BITS_PER_BYTE] |= 0x80 >> (i % BITS_PER_BYTE);
        }
    }
    out
}
