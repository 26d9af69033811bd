//! Metrics sink boundary.
//!
//! Indexer and search logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between index logic
//! and the thread-local metrics state.
use crate::{index::BoundaryOrder, obs::metrics};
use pageindex_primitives::PhysicalKind;
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// SearchStrategy
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchStrategy {
    Binary,
    Linear,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    PageIndexed {
        kind: PhysicalKind,
        null_page: bool,
    },
    IndexerReset,
    IndexBuilt {
        kind: PhysicalKind,
        pages: u64,
        order: BoundaryOrder,
        truncated_min: u64,
        truncated_max: u64,
        truncation_skipped: u64,
    },
    Search {
        strategy: SearchStrategy,
        probes: u64,
        found: bool,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::PageIndexed { kind, null_page } => {
                metrics::with_state_mut(|m| {
                    m.ops.pages_indexed = m.ops.pages_indexed.saturating_add(1);
                    if null_page {
                        m.ops.null_pages_indexed = m.ops.null_pages_indexed.saturating_add(1);
                    }

                    let entry = m.kinds.entry(kind.label().to_string()).or_default();
                    entry.pages_indexed = entry.pages_indexed.saturating_add(1);
                });
            }

            MetricsEvent::IndexerReset => {
                metrics::with_state_mut(|m| {
                    m.ops.indexer_resets = m.ops.indexer_resets.saturating_add(1);
                });
            }

            MetricsEvent::IndexBuilt {
                kind,
                pages: _,
                order,
                truncated_min,
                truncated_max,
                truncation_skipped,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.indexes_built = m.ops.indexes_built.saturating_add(1);
                    match order {
                        BoundaryOrder::Ascending => {
                            m.ops.ascending_indexes = m.ops.ascending_indexes.saturating_add(1);
                        }
                        BoundaryOrder::Descending => {
                            m.ops.descending_indexes = m.ops.descending_indexes.saturating_add(1);
                        }
                        BoundaryOrder::Unordered => {
                            m.ops.unordered_indexes = m.ops.unordered_indexes.saturating_add(1);
                        }
                    }
                    m.ops.min_values_truncated =
                        m.ops.min_values_truncated.saturating_add(truncated_min);
                    m.ops.max_values_truncated =
                        m.ops.max_values_truncated.saturating_add(truncated_max);
                    m.ops.truncations_skipped =
                        m.ops.truncations_skipped.saturating_add(truncation_skipped);

                    let entry = m.kinds.entry(kind.label().to_string()).or_default();
                    entry.indexes_built = entry.indexes_built.saturating_add(1);
                    entry.values_truncated = entry
                        .values_truncated
                        .saturating_add(truncated_min)
                        .saturating_add(truncated_max);
                });
            }

            MetricsEvent::Search {
                strategy,
                probes,
                found,
            } => {
                metrics::with_state_mut(|m| {
                    match strategy {
                        SearchStrategy::Binary => {
                            m.ops.binary_searches = m.ops.binary_searches.saturating_add(1);
                        }
                        SearchStrategy::Linear => {
                            m.ops.linear_searches = m.ops.linear_searches.saturating_add(1);
                        }
                    }
                    m.ops.search_probes = m.ops.search_probes.saturating_add(probes);
                    if found {
                        m.ops.search_hits = m.ops.search_hits.saturating_add(1);
                    } else {
                        m.ops.search_misses = m.ops.search_misses.saturating_add(1);
                    }
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // Preconditions:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`.
        // - `with_metrics_sink` always restores the previous pointer before returning,
        //   including unwind paths via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        //
        // Aliasing:
        // - Only a shared reference is materialized, matching the shared borrow
        //   used to install the override.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current thread's metrics counters.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics counters on the current thread.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - `sink_ptr` is installed only for this dynamic scope.
    // - `Guard` restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///
