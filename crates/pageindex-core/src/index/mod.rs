//! Per-page column statistics: the write-side [`ColumnIndexer`] and the
//! queryable [`ColumnIndex`] snapshot it publishes.

mod arena;
mod column_index;
mod format;
mod indexer;
mod order;
mod truncate;

#[cfg(test)]
mod tests;

// re-exports
pub use arena::ValueArena;
pub use column_index::ColumnIndex;
pub use format::{FormatColumnIndex, FormatIndexError};
pub use indexer::{ColumnIndexer, IndexPageError};
pub use order::{BoundaryOrder, SequenceOrder, sequence_order_by};
pub use truncate::{Truncation, truncate_max_value, truncate_min_value};
