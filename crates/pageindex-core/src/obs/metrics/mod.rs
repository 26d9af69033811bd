use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for index builds and page searches.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub(crate) struct EventState {
    pub ops: EventOps,
    pub kinds: BTreeMap<String, KindCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Write side
    pub pages_indexed: u64,
    pub null_pages_indexed: u64,
    pub indexer_resets: u64,

    // Snapshots
    pub indexes_built: u64,
    pub ascending_indexes: u64,
    pub descending_indexes: u64,
    pub unordered_indexes: u64,

    // Truncation
    pub min_values_truncated: u64,
    pub max_values_truncated: u64,
    pub truncations_skipped: u64,

    // Read side
    pub binary_searches: u64,
    pub linear_searches: u64,
    pub search_probes: u64,
    pub search_hits: u64,
    pub search_misses: u64,
}

///
/// KindCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct KindCounters {
    pub pages_indexed: u64,
    pub indexes_built: u64,
    pub values_truncated: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters (useful in tests).
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
/// Point-in-time copy of the counters for the current thread.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    pub counters: EventOps,
    pub kinds: BTreeMap<String, KindCounters>,
}

/// Snapshot the current thread's counters.
#[must_use]
pub(crate) fn report() -> EventReport {
    with_state(|m| EventReport {
        counters: m.ops.clone(),
        kinds: m.kinds.clone(),
    })
}
