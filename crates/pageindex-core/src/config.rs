use crate::value::NullOrdering;
use serde::{Deserialize, Serialize};

///
/// IndexerConfig
///
/// Per-writer settings for column index construction and lookup.
/// Missing fields fall back to defaults; unknown fields are rejected.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexerConfig {
    /// Maximum published length of a variable-length page bound, in bytes.
    /// Zero disables truncation.
    pub size_limit: usize,

    /// Null placement used by [`search_with_config`](crate::search::search_with_config).
    pub null_ordering: NullOrdering,
}

impl IndexerConfig {
    pub const DEFAULT_SIZE_LIMIT: usize = 16;

    #[must_use]
    pub const fn with_size_limit(mut self, size_limit: usize) -> Self {
        self.size_limit = size_limit;
        self
    }

    #[must_use]
    pub const fn with_null_ordering(mut self, null_ordering: NullOrdering) -> Self {
        self.null_ordering = null_ordering;
        self
    }

    #[must_use]
    pub const fn truncation_enabled(&self) -> bool {
        self.size_limit > 0
    }
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            size_limit: Self::DEFAULT_SIZE_LIMIT,
            null_ordering: NullOrdering::Last,
        }
    }
}

///
/// TESTS
///
