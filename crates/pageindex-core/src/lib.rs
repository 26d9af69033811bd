//! Core runtime for pageindex: per-page column statistics, the queryable
//! column index, page search, and the ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod error;
pub mod index;
pub mod obs;
pub mod search;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, metrics, or record shapes are re-exported here.
///

pub mod prelude {
    pub use crate::{
        config::IndexerConfig,
        index::{BoundaryOrder, ColumnIndex, ColumnIndexer},
        search::{find, search, search_with},
        value::{ColumnType, NullOrdering, Value},
    };
}
