use crate::{
    config::IndexerConfig,
    error::InternalError,
    index::{
        ColumnIndex, Truncation, ValueArena, order::boundary_order_of, truncate_max_value,
        truncate_min_value,
    },
    obs::sink::{self, MetricsEvent},
    value::{ColumnType, Value},
};
use std::borrow::Cow;
use thiserror::Error as ThisError;

///
/// IndexPageError
///
/// Page statistics that violate the writer's contract.
///

#[derive(Debug, ThisError)]
pub enum IndexPageError {
    #[error("page counts must be non-negative: num_values={num_values}, num_nulls={num_nulls}")]
    NegativeCount { num_values: i64, num_nulls: i64 },

    #[error("page reports {num_nulls} nulls but only {num_values} values")]
    NullCountExceedsValues { num_values: i64, num_nulls: i64 },
}

impl From<IndexPageError> for InternalError {
    fn from(err: IndexPageError) -> Self {
        Self::indexer_invariant(format!("page statistics rejected: {err}"))
    }
}

///
/// ColumnIndexer
///
/// Write-side accumulator of per-page statistics for one column chunk.
/// Owned by a single writer; call [`ColumnIndexer::reset`] between chunks.
///
/// Internal bounds are kept exact. Truncation only ever applies to the
/// published snapshot.
///

#[derive(Clone, Debug)]
pub struct ColumnIndexer {
    column: ColumnType,
    config: IndexerConfig,
    null_pages: Vec<bool>,
    null_counts: Vec<i64>,
    min_values: ValueArena,
    max_values: ValueArena,
    bounds: Option<(Value, Value)>,
}

impl ColumnIndexer {
    #[must_use]
    pub fn new(column: ColumnType) -> Self {
        Self::with_config(column, IndexerConfig::default())
    }

    #[must_use]
    pub const fn with_config(column: ColumnType, config: IndexerConfig) -> Self {
        Self {
            column,
            config,
            null_pages: Vec::new(),
            null_counts: Vec::new(),
            min_values: ValueArena::new(),
            max_values: ValueArena::new(),
            bounds: None,
        }
    }

    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        self.column
    }

    #[must_use]
    pub const fn config(&self) -> &IndexerConfig {
        &self.config
    }

    #[must_use]
    pub const fn num_pages(&self) -> usize {
        self.null_pages.len()
    }

    /// Forget every page seen so far; configuration is kept.
    pub fn reset(&mut self) {
        self.null_pages.clear();
        self.null_counts.clear();
        self.min_values.clear();
        self.max_values.clear();
        self.bounds = None;

        sink::record(MetricsEvent::IndexerReset);
    }

    /// Record the statistics of one completed page.
    ///
    /// A page whose values are all null is flagged as a null page. Null
    /// bounds are stored as the column's zero placeholder. A floating-point
    /// zero min is stored as `-0.0` and a zero max as `+0.0`, so either
    /// signed zero falls inside the page. On error nothing is recorded.
    pub fn index_page(
        &mut self,
        num_values: i64,
        num_nulls: i64,
        min: &Value,
        max: &Value,
    ) -> Result<(), InternalError> {
        if num_values < 0 || num_nulls < 0 {
            return Err(IndexPageError::NegativeCount {
                num_values,
                num_nulls,
            }
            .into());
        }
        if num_nulls > num_values {
            return Err(IndexPageError::NullCountExceedsValues {
                num_values,
                num_nulls,
            }
            .into());
        }

        let (min, max) = (min.as_lower_bound(), max.as_upper_bound());
        self.min_values.push_encoded(self.column, &min)?;
        if let Err(err) = self.max_values.push_encoded(self.column, &max) {
            self.min_values.pop();
            return Err(err.into());
        }

        let null_page = num_values == num_nulls;
        self.null_pages.push(null_page);
        self.null_counts.push(num_nulls);

        if !null_page && self.column.is_variable_length() {
            self.widen_bounds(&min, &max);
        }

        sink::record(MetricsEvent::PageIndexed {
            kind: self.column.kind(),
            null_page,
        });

        Ok(())
    }

    /// Running global min and max across non-null pages since the last reset.
    ///
    /// Only tracked for variable-length kinds; always `None` otherwise.
    #[must_use]
    pub fn bounds(&self) -> Option<(&Value, &Value)> {
        self.bounds.as_ref().map(|(min, max)| (min, max))
    }

    /// Snapshot the pages indexed so far, truncating variable-length bounds
    /// longer than `size_limit` bytes. A limit of zero publishes them whole.
    ///
    /// The snapshot borrows this indexer; it must be dropped (or made owned)
    /// before the next [`index_page`](Self::index_page) or [`reset`](Self::reset).
    #[must_use]
    pub fn column_index(&self, size_limit: usize) -> ColumnIndex<'_> {
        let mut stats = TruncationStats::default();
        let truncate = size_limit > 0 && self.column.kind().supports_truncation();
        let (min_values, max_values) = if truncate {
            (
                self.publish_min_values(size_limit, &mut stats),
                self.publish_max_values(size_limit, &mut stats),
            )
        } else {
            (
                Cow::Borrowed(&self.min_values),
                Cow::Borrowed(&self.max_values),
            )
        };

        let boundary_order = boundary_order_of(self.column, &min_values, &max_values);

        sink::record(MetricsEvent::IndexBuilt {
            kind: self.column.kind(),
            pages: self.num_pages() as u64,
            order: boundary_order,
            truncated_min: stats.truncated_min,
            truncated_max: stats.truncated_max,
            truncation_skipped: stats.skipped,
        });

        ColumnIndex::from_parts(
            self.column,
            Cow::Borrowed(&self.null_pages),
            Cow::Borrowed(&self.null_counts),
            min_values,
            max_values,
            boundary_order,
        )
    }

    /// Snapshot using the configured size limit.
    #[must_use]
    pub fn column_index_default(&self) -> ColumnIndex<'_> {
        self.column_index(self.config.size_limit)
    }

    fn widen_bounds(&mut self, min: &Value, max: &Value) {
        if min.is_null() || max.is_null() {
            return;
        }

        let column = self.column;
        match &mut self.bounds {
            Some((lo, hi)) => {
                if column.compare(min, lo).is_lt() {
                    lo.clone_from(min);
                }
                if column.compare(max, hi).is_gt() {
                    hi.clone_from(max);
                }
            }
            None => self.bounds = Some((min.clone(), max.clone())),
        }
    }

    fn publish_min_values(
        &self,
        size_limit: usize,
        stats: &mut TruncationStats,
    ) -> Cow<'_, ValueArena> {
        if !exceeds_limit(&self.min_values, size_limit) {
            return Cow::Borrowed(&self.min_values);
        }

        let mut published =
            ValueArena::with_capacity(self.min_values.len(), self.min_values.byte_len());
        for bound in self.min_values.iter() {
            let (bound, outcome) = truncate_min_value(bound, size_limit);
            if outcome == Truncation::Truncated {
                stats.truncated_min += 1;
            }
            published.push(bound);
        }

        Cow::Owned(published)
    }

    fn publish_max_values(
        &self,
        size_limit: usize,
        stats: &mut TruncationStats,
    ) -> Cow<'_, ValueArena> {
        if !exceeds_limit(&self.max_values, size_limit) {
            return Cow::Borrowed(&self.max_values);
        }

        let mut published =
            ValueArena::with_capacity(self.max_values.len(), self.max_values.byte_len());
        for bound in self.max_values.iter() {
            let (bound, outcome) = truncate_max_value(bound, size_limit);
            match outcome {
                Truncation::Truncated => stats.truncated_max += 1,
                Truncation::Skipped => stats.skipped += 1,
                Truncation::Unchanged => {}
            }
            published.push(&bound);
        }

        Cow::Owned(published)
    }
}

#[derive(Default)]
struct TruncationStats {
    truncated_min: u64,
    truncated_max: u64,
    skipped: u64,
}

fn exceeds_limit(values: &ValueArena, size_limit: usize) -> bool {
    values.iter().any(|bound| bound.len() > size_limit)
}
