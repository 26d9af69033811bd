use crate::{
    error::InternalError,
    index::BoundaryOrder,
    value::ValueDecodeError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// FormatColumnIndex
///
/// Field-for-field shape of the container's column index record: four
/// parallel per-page arrays plus the chunk boundary order. This is the unit
/// handed to (and received from) the external metadata serializer.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FormatColumnIndex {
    pub null_pages: Vec<bool>,
    pub null_counts: Vec<i64>,
    pub min_values: Vec<Vec<u8>>,
    pub max_values: Vec<Vec<u8>>,
    pub boundary_order: BoundaryOrder,
}

///
/// FormatIndexError
///
/// Structural violations in a column index record produced elsewhere.
///

#[derive(Debug, ThisError)]
pub enum FormatIndexError {
    #[error(
        "per-page arrays disagree in length: null_pages={null_pages}, null_counts={null_counts}, min_values={min_values}, max_values={max_values}"
    )]
    LengthMismatch {
        null_pages: usize,
        null_counts: usize,
        min_values: usize,
        max_values: usize,
    },

    #[error("unknown boundary order code {code}")]
    UnknownBoundaryOrder { code: i32 },

    #[error("page {page} has negative null count {count}")]
    NegativeNullCount { page: usize, count: i64 },

    #[error("page {page} {side} bound is invalid: {source}")]
    InvalidBound {
        page: usize,
        side: &'static str,
        source: ValueDecodeError,
    },
}

impl From<FormatIndexError> for InternalError {
    fn from(err: FormatIndexError) -> Self {
        Self::index_corruption(format!("column index record is corrupted: {err}"))
    }
}
