mod column_type;
mod compare;
mod int96;


use pageindex_primitives::PhysicalKind;
use std::borrow::Cow;

// re-exports
pub use column_type::{ColumnType, ValueDecodeError, ValueEncodeError};
pub use compare::{NullOrdering, compare_nulls_first, compare_nulls_last};
pub use int96::Int96;

///
/// Value
///
/// Typed, possibly-null scalar as handed over by the page writer.
/// Byte-array payloads are owned; the index never retains a `Value`
/// beyond the running bounds of variable-length columns.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Int96(Int96),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
    FixedLenByteArray(Vec<u8>),
}

impl Value {
    /// Physical kind of a non-null value.
    #[must_use]
    pub const fn kind(&self) -> Option<PhysicalKind> {
        let kind = match self {
            Self::Null => return None,
            Self::Boolean(_) => PhysicalKind::Boolean,
            Self::Int32(_) => PhysicalKind::Int32,
            Self::Int64(_) => PhysicalKind::Int64,
            Self::Int96(_) => PhysicalKind::Int96,
            Self::Float(_) => PhysicalKind::Float,
            Self::Double(_) => PhysicalKind::Double,
            Self::ByteArray(_) => PhysicalKind::ByteArray,
            Self::FixedLenByteArray(_) => PhysicalKind::FixedLenByteArray,
        };

        Some(kind)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self.kind() {
            Some(kind) => kind.label(),
            None => "Null",
        }
    }

    // Float zero as a page lower bound: `-0.0` sorts first under total order.
    pub(crate) fn as_lower_bound(&self) -> Cow<'_, Self> {
        match self {
            Self::Float(v) if *v == 0.0 => Cow::Owned(Self::Float(-0.0)),
            Self::Double(v) if *v == 0.0 => Cow::Owned(Self::Double(-0.0)),
            _ => Cow::Borrowed(self),
        }
    }

    // Float zero as a page upper bound: `+0.0` sorts last under total order.
    pub(crate) fn as_upper_bound(&self) -> Cow<'_, Self> {
        match self {
            Self::Float(v) if *v == 0.0 => Cow::Owned(Self::Float(0.0)),
            Self::Double(v) if *v == 0.0 => Cow::Owned(Self::Double(0.0)),
            _ => Cow::Borrowed(self),
        }
    }

    // Rank used to order mismatched variants deterministically.
    const fn rank(&self) -> i32 {
        match self.kind() {
            Some(kind) => kind.format_code() + 1,
            None => 0,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<Int96> for Value {
    fn from(v: Int96) -> Self {
        Self::Int96(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::ByteArray(v.to_vec())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::ByteArray(v.as_bytes().to_vec())
    }
}
