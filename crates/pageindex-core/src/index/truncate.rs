//! Size-limited publication of variable-length page bounds.
//!
//! Published bounds must stay conservative: `truncated_min <= min` and
//! `max <= truncated_max` under byte-lexicographic order. Search may then
//! visit a page that lacks the value, but never skips one that holds it.

use std::borrow::Cow;

///
/// Truncation
///
/// Outcome of publishing one bound under a size limit.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Truncation {
    /// The bound already fit (or no limit applies).
    Unchanged,
    /// The bound was shortened to the limit.
    Truncated,
    /// The bound exceeded the limit but could not be shortened safely.
    Skipped,
}

/// Shorten a lower bound to its first `size_limit` bytes.
///
/// A prefix never sorts after the value it was cut from.
#[must_use]
pub fn truncate_min_value(value: &[u8], size_limit: usize) -> (&[u8], Truncation) {
    if size_limit == 0 || value.len() <= size_limit {
        return (value, Truncation::Unchanged);
    }

    (&value[..size_limit], Truncation::Truncated)
}

/// Shorten an upper bound to at most `size_limit` bytes without sorting below it.
///
/// The prefix is incremented as a big-endian counter. A prefix made only of
/// `0xFF` bytes has no successor of that length, so the bound is kept whole.
#[must_use]
pub fn truncate_max_value(value: &[u8], size_limit: usize) -> (Cow<'_, [u8]>, Truncation) {
    if size_limit == 0 || value.len() <= size_limit {
        return (Cow::Borrowed(value), Truncation::Unchanged);
    }

    let prefix = &value[..size_limit];
    if is_max_byte_array(prefix) {
        return (Cow::Borrowed(value), Truncation::Skipped);
    }

    let mut bound = prefix.to_vec();
    increment_byte_array(&mut bound);

    (Cow::Owned(bound), Truncation::Truncated)
}

fn is_max_byte_array(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == u8::MAX)
}

// Add one to the last byte, carrying leftward on overflow.
fn increment_byte_array(bytes: &mut [u8]) {
    for byte in bytes.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            break;
        }
    }
}

///
/// TESTS
///
