use crate::{
    error::InternalError,
    value::{Int96, Value},
};
use pageindex_primitives::PhysicalKind;
use std::cmp::Ordering;
use thiserror::Error as ThisError;

///
/// ValueEncodeError
///
/// A page bound could not be laid out in the column's native encoding.
///

#[derive(Debug, ThisError)]
pub enum ValueEncodeError {
    #[error("value kind '{found}' does not match column kind '{expected}'")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("fixed-length value is {found} bytes, column expects {expected}")]
    FixedLengthMismatch { expected: usize, found: usize },
}

impl From<ValueEncodeError> for InternalError {
    fn from(err: ValueEncodeError) -> Self {
        Self::indexer_unsupported(format!("page bound is not encodable: {err}"))
    }
}

///
/// ValueDecodeError
///
/// Stored bound bytes do not form a valid value of the column kind.
///

#[derive(Debug, ThisError)]
pub enum ValueDecodeError {
    #[error("{kind} bound is {found} bytes, expected {expected}")]
    WidthMismatch {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("boolean bound byte {byte:#04x} is neither 0 nor 1")]
    InvalidBoolean { byte: u8 },
}

impl From<ValueDecodeError> for InternalError {
    fn from(err: ValueDecodeError) -> Self {
        Self::value_corruption(format!("stored page bound is corrupted: {err}"))
    }
}

///
/// ColumnType
///
/// Kind descriptor driving the generic indexer and search engine.
/// Owns the native byte layout (little-endian plain encoding for numerics,
/// raw bytes for byte arrays) and the kind's native ordering.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ColumnType {
    kind: PhysicalKind,
    type_length: usize,
}

impl ColumnType {
    pub const BOOLEAN: Self = Self::new(PhysicalKind::Boolean);
    pub const INT32: Self = Self::new(PhysicalKind::Int32);
    pub const INT64: Self = Self::new(PhysicalKind::Int64);
    pub const INT96: Self = Self::new(PhysicalKind::Int96);
    pub const FLOAT: Self = Self::new(PhysicalKind::Float);
    pub const DOUBLE: Self = Self::new(PhysicalKind::Double);
    pub const BYTE_ARRAY: Self = Self::new(PhysicalKind::ByteArray);

    /// Descriptor for any kind whose width does not depend on the column.
    ///
    /// Fixed-length byte arrays built here have length zero; use
    /// [`ColumnType::fixed_len_byte_array`] to carry the column's length.
    #[must_use]
    pub const fn new(kind: PhysicalKind) -> Self {
        let type_length = match kind.fixed_width() {
            Some(width) => width,
            None => 0,
        };

        Self { kind, type_length }
    }

    #[must_use]
    pub const fn fixed_len_byte_array(length: usize) -> Self {
        Self {
            kind: PhysicalKind::FixedLenByteArray,
            type_length: length,
        }
    }

    #[must_use]
    pub const fn kind(self) -> PhysicalKind {
        self.kind
    }

    /// Encoded width of one bound, or `None` for variable-length kinds.
    #[must_use]
    pub const fn encoded_width(self) -> Option<usize> {
        if self.kind.is_variable_length() {
            None
        } else {
            Some(self.type_length)
        }
    }

    #[must_use]
    pub const fn is_variable_length(self) -> bool {
        self.kind.is_variable_length()
    }

    /// Placeholder value standing in for the bounds of an all-null page.
    #[must_use]
    pub fn zero_value(self) -> Value {
        match self.kind {
            PhysicalKind::Boolean => Value::Boolean(false),
            PhysicalKind::Int32 => Value::Int32(0),
            PhysicalKind::Int64 => Value::Int64(0),
            PhysicalKind::Int96 => Value::Int96(Int96::default()),
            PhysicalKind::Float => Value::Float(0.0),
            PhysicalKind::Double => Value::Double(0.0),
            PhysicalKind::ByteArray => Value::ByteArray(Vec::new()),
            PhysicalKind::FixedLenByteArray => Value::FixedLenByteArray(vec![0; self.type_length]),
        }
    }

    /// Native ordering of two values of this column.
    ///
    /// Floats use IEEE total ordering, so `-0.0 < +0.0` and NaN sorts at the
    /// ends. Page bounds must be derived with this comparator; the indexer
    /// only widens signed zeros on its own. Null and mismatched variants are
    /// ordered by rank only so the comparator stays total; callers that care
    /// about null placement wrap this with a [`NullOrdering`](crate::value::NullOrdering).
    #[must_use]
    pub fn compare(self, left: &Value, right: &Value) -> Ordering {
        match (left, right) {
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Int32(a), Value::Int32(b)) => a.cmp(b),
            (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
            (Value::Int96(a), Value::Int96(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Double(a), Value::Double(b)) => a.total_cmp(b),
            (Value::ByteArray(a), Value::ByteArray(b))
            | (Value::FixedLenByteArray(a), Value::FixedLenByteArray(b)) => a.cmp(b),
            _ => left.rank().cmp(&right.rank()),
        }
    }

    /// Append the native encoding of `value`; null encodes as the zero placeholder.
    pub fn encode(self, value: &Value, out: &mut Vec<u8>) -> Result<(), ValueEncodeError> {
        match (self.kind, value) {
            (_, Value::Null) => self.encode(&self.zero_value(), out),
            (PhysicalKind::Boolean, Value::Boolean(v)) => {
                out.push(u8::from(*v));
                Ok(())
            }
            (PhysicalKind::Int32, Value::Int32(v)) => {
                out.extend_from_slice(&v.to_le_bytes());
                Ok(())
            }
            (PhysicalKind::Int64, Value::Int64(v)) => {
                out.extend_from_slice(&v.to_le_bytes());
                Ok(())
            }
            (PhysicalKind::Int96, Value::Int96(v)) => {
                out.extend_from_slice(&v.to_le_bytes());
                Ok(())
            }
            (PhysicalKind::Float, Value::Float(v)) => {
                out.extend_from_slice(&v.to_le_bytes());
                Ok(())
            }
            (PhysicalKind::Double, Value::Double(v)) => {
                out.extend_from_slice(&v.to_le_bytes());
                Ok(())
            }
            (PhysicalKind::ByteArray, Value::ByteArray(v)) => {
                out.extend_from_slice(v);
                Ok(())
            }
            (PhysicalKind::FixedLenByteArray, Value::FixedLenByteArray(v)) => {
                if v.len() != self.type_length {
                    return Err(ValueEncodeError::FixedLengthMismatch {
                        expected: self.type_length,
                        found: v.len(),
                    });
                }
                out.extend_from_slice(v);
                Ok(())
            }
            _ => Err(ValueEncodeError::KindMismatch {
                expected: self.kind.label(),
                found: value.label(),
            }),
        }
    }

    /// Encode one value into a fresh buffer.
    pub fn encode_to_vec(self, value: &Value) -> Result<Vec<u8>, ValueEncodeError> {
        let mut out = Vec::with_capacity(self.encoded_width().unwrap_or(0));
        self.encode(value, &mut out)?;

        Ok(out)
    }

    /// Decode one stored bound back into a value of this column.
    pub fn decode(self, bytes: &[u8]) -> Result<Value, ValueDecodeError> {
        let value = match self.kind {
            PhysicalKind::Boolean => match self.fixed::<1>(bytes)? {
                [0] => Value::Boolean(false),
                [1] => Value::Boolean(true),
                [byte] => return Err(ValueDecodeError::InvalidBoolean { byte }),
            },
            PhysicalKind::Int32 => Value::Int32(i32::from_le_bytes(self.fixed(bytes)?)),
            PhysicalKind::Int64 => Value::Int64(i64::from_le_bytes(self.fixed(bytes)?)),
            PhysicalKind::Int96 => Value::Int96(Int96::from_le_bytes(self.fixed(bytes)?)),
            PhysicalKind::Float => Value::Float(f32::from_le_bytes(self.fixed(bytes)?)),
            PhysicalKind::Double => Value::Double(f64::from_le_bytes(self.fixed(bytes)?)),
            PhysicalKind::ByteArray => Value::ByteArray(bytes.to_vec()),
            PhysicalKind::FixedLenByteArray => {
                if bytes.len() != self.type_length {
                    return Err(self.width_mismatch(self.type_length, bytes.len()));
                }
                Value::FixedLenByteArray(bytes.to_vec())
            }
        };

        Ok(value)
    }

    // Copy a fixed-width bound into an array, rejecting any other width.
    fn fixed<const N: usize>(self, bytes: &[u8]) -> Result<[u8; N], ValueDecodeError> {
        bytes
            .try_into()
            .map_err(|_| self.width_mismatch(N, bytes.len()))
    }

    const fn width_mismatch(self, expected: usize, found: usize) -> ValueDecodeError {
        ValueDecodeError::WidthMismatch {
            kind: self.kind.label(),
            expected,
            found,
        }
    }
}
