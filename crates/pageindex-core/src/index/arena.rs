use crate::value::{ColumnType, Value, ValueEncodeError};

///
/// ValueArena
///
/// Packed sequence of encoded page bounds: one growable byte buffer plus the
/// end offset of each entry. Fixed- and variable-length kinds share the
/// same layout so the indexer never allocates per page.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValueArena {
    bytes: Vec<u8>,
    ends: Vec<usize>,
}

impl ValueArena {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            ends: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(entries: usize, bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            ends: Vec::with_capacity(entries),
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.ends.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// Total encoded bytes across all entries.
    #[must_use]
    pub const fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Borrow entry `i`. Panics when `i >= len()`.
    #[must_use]
    pub fn get(&self, i: usize) -> &[u8] {
        let end = self.ends[i];
        let start = if i == 0 { 0 } else { self.ends[i - 1] };

        &self.bytes[start..end]
    }

    pub fn push(&mut self, entry: &[u8]) {
        self.bytes.extend_from_slice(entry);
        self.ends.push(self.bytes.len());
    }

    /// Encode `value` directly into the arena; nothing is appended on failure.
    pub fn push_encoded(
        &mut self,
        column: ColumnType,
        value: &Value,
    ) -> Result<(), ValueEncodeError> {
        let mark = self.bytes.len();
        if let Err(err) = column.encode(value, &mut self.bytes) {
            self.bytes.truncate(mark);
            return Err(err);
        }
        self.ends.push(self.bytes.len());

        Ok(())
    }

    /// Drop the last entry, if any.
    pub fn pop(&mut self) {
        if self.ends.pop().is_some() {
            let end = self.ends.last().copied().unwrap_or(0);
            self.bytes.truncate(end);
        }
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
        self.ends.clear();
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        (0..self.len()).map(|i| self.get(i))
    }

    /// Copy every entry out into individually owned buffers.
    #[must_use]
    pub fn to_vecs(&self) -> Vec<Vec<u8>> {
        self.iter().map(<[u8]>::to_vec).collect()
    }
}

///
/// TESTS
///
