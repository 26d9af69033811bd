use derive_more::{Deref, From};
use std::cmp::Ordering;

///
/// Int96
///
/// Signed 96-bit integer stored as three little-endian 32-bit words.
/// The last word carries the sign.
///

#[derive(Clone, Copy, Debug, Default, Deref, Eq, From, Hash, PartialEq)]
pub struct Int96([u32; 3]);

impl Int96 {
    pub const WIDTH: usize = 12;

    #[must_use]
    pub const fn new(words: [u32; 3]) -> Self {
        Self(words)
    }

    /// Sign-extend a 64-bit integer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn from_i64(v: i64) -> Self {
        let hi = if v < 0 { u32::MAX } else { 0 };

        Self([v as u32, (v >> 32) as u32, hi])
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0[2] >> 31 == 1
    }

    #[must_use]
    pub fn to_le_bytes(self) -> [u8; Self::WIDTH] {
        let mut out = [0u8; Self::WIDTH];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.0) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }

        out
    }

    #[must_use]
    pub fn from_le_bytes(bytes: [u8; Self::WIDTH]) -> Self {
        let mut words = [0u32; 3];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        Self(words)
    }
}

impl Ord for Int96 {
    #[allow(clippy::cast_possible_wrap)]
    fn cmp(&self, other: &Self) -> Ordering {
        (self.0[2] as i32)
            .cmp(&(other.0[2] as i32))
            .then(self.0[1].cmp(&other.0[1]))
            .then(self.0[0].cmp(&other.0[0]))
    }
}

impl PartialOrd for Int96 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
