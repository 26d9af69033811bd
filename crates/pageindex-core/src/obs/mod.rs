//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Counters are thread-local; an index built on one thread and searched on
//! another reports each side on its own thread.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, KindCounters};
pub use sink::{
    MetricsEvent, MetricsSink, SearchStrategy, metrics_report, metrics_reset_all,
    with_metrics_sink,
};
