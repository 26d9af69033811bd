//! ## Crate layout
//! - `core`: value encoding, the column indexer, column index snapshots,
//!   page search, configuration, and observability.
//! - `primitives`: the physical kind registry shared by every layer.
//! - `error`: the public error type with a stable kind + origin taxonomy.
//!
//! The `prelude` module mirrors the surface a page writer or row-group
//! scanner needs.

pub use pageindex_core as core;
pub use pageindex_primitives as primitives;

pub mod error;

pub use error::Error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error,
        core::{
            config::IndexerConfig,
            index::{BoundaryOrder, ColumnIndex, ColumnIndexer, FormatColumnIndex},
            search::{find, search, search_with, search_with_config},
            value::{
                ColumnType, Int96, NullOrdering, Value, compare_nulls_first, compare_nulls_last,
            },
        },
        primitives::PhysicalKind,
    };
}
