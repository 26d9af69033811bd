use crate::{
    index::{FormatIndexError, ValueArena, column_index::decode_bound},
    value::{ColumnType, Value},
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Boundary orders indexed by their container format code.
const BOUNDARY_ORDERS: [BoundaryOrder; 3] = [
    BoundaryOrder::Unordered,
    BoundaryOrder::Ascending,
    BoundaryOrder::Descending,
];

///
/// BoundaryOrder
///
/// Chunk-level ordering of the per-page min and max sequences.
/// Serialized as its container format code.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum BoundaryOrder {
    #[default]
    Unordered,
    Ascending,
    Descending,
}

impl BoundaryOrder {
    /// Stable format code: 0 unordered, 1 ascending, 2 descending.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Unordered => 0,
            Self::Ascending => 1,
            Self::Descending => 2,
        }
    }

    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn from_code(code: i32) -> Option<Self> {
        if code < 0 || code as usize >= BOUNDARY_ORDERS.len() {
            return None;
        }

        Some(BOUNDARY_ORDERS[code as usize])
    }

    /// Combine the independently inferred orders of the min and max sequences.
    /// Both must agree on one direction; anything else is unordered.
    #[must_use]
    pub const fn from_sequence_orders(min_order: SequenceOrder, max_order: SequenceOrder) -> Self {
        match (min_order, max_order) {
            (SequenceOrder::Ascending, SequenceOrder::Ascending) => Self::Ascending,
            (SequenceOrder::Descending, SequenceOrder::Descending) => Self::Descending,
            _ => Self::Unordered,
        }
    }
}

impl From<BoundaryOrder> for i32 {
    fn from(order: BoundaryOrder) -> Self {
        order.code()
    }
}

impl TryFrom<i32> for BoundaryOrder {
    type Error = FormatIndexError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(FormatIndexError::UnknownBoundaryOrder { code })
    }
}

///
/// SequenceOrder
///
/// Monotonic direction of one bound sequence.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SequenceOrder {
    Unordered,
    Ascending,
    Descending,
}

/// Classify a sequence by adjacent pairwise comparison.
///
/// Sequences shorter than two entries make no directional claim. A constant
/// sequence satisfies both directions and reports ascending.
#[must_use]
pub fn sequence_order_by<T, F>(values: &[T], cmp: F) -> SequenceOrder
where
    F: Fn(&T, &T) -> Ordering,
{
    if values.len() < 2 {
        return SequenceOrder::Unordered;
    }

    if values.windows(2).all(|pair| cmp(&pair[0], &pair[1]).is_le()) {
        SequenceOrder::Ascending
    } else if values.windows(2).all(|pair| cmp(&pair[0], &pair[1]).is_ge()) {
        SequenceOrder::Descending
    } else {
        SequenceOrder::Unordered
    }
}

// Infer the boundary order of published min/max bounds.
pub(crate) fn boundary_order_of(
    column: ColumnType,
    min_values: &ValueArena,
    max_values: &ValueArena,
) -> BoundaryOrder {
    let min_order = arena_order(column, min_values);
    if min_order == SequenceOrder::Unordered {
        return BoundaryOrder::Unordered;
    }

    BoundaryOrder::from_sequence_orders(min_order, arena_order(column, max_values))
}

fn arena_order(column: ColumnType, values: &ValueArena) -> SequenceOrder {
    let decoded: Vec<Value> = values.iter().map(|bytes| decode_bound(column, bytes)).collect();

    sequence_order_by(&decoded, |left, right| column.compare(left, right))
}
