//! Page pruning: locate the page of a column chunk that may hold a value
//! using only its [`ColumnIndex`].
//!
//! Every entry point returns a page number in `0..=num_pages`; `num_pages`
//! means no page can hold the value. Truncated bounds may yield a page that
//! does not actually hold the value, never the reverse.


use crate::{
    config::IndexerConfig,
    index::ColumnIndex,
    obs::sink::{self, MetricsEvent, SearchStrategy},
    value::{NullOrdering, Value, compare_nulls_last},
};
use std::cmp::Ordering;

/// Find the candidate page for `value` under a caller-supplied comparator.
///
/// Ascending chunks are bisected; descending and unordered chunks are
/// scanned front to back.
pub fn find<F>(index: &ColumnIndex<'_>, value: &Value, cmp: F) -> usize
where
    F: Fn(&Value, &Value) -> Ordering,
{
    let (strategy, (page, probes)) = if index.is_ascending() {
        (SearchStrategy::Binary, binary_search(index, value, &cmp))
    } else {
        (SearchStrategy::Linear, linear_search(index, value, &cmp))
    };

    sink::record(MetricsEvent::Search {
        strategy,
        probes,
        found: page < index.num_pages(),
    });

    page
}

/// [`find`] with the column's native order and nulls sorted last.
#[must_use]
pub fn search(index: &ColumnIndex<'_>, value: &Value) -> usize {
    let column = index.column_type();

    find(index, value, compare_nulls_last(|left, right| column.compare(left, right)))
}

/// [`find`] with the column's native order and an explicit null placement.
#[must_use]
pub fn search_with(index: &ColumnIndex<'_>, value: &Value, null_ordering: NullOrdering) -> usize {
    let column = index.column_type();

    find(index, value, null_ordering.wrap(|left, right| column.compare(left, right)))
}

/// [`search_with`] using the null placement of an indexer configuration.
#[must_use]
pub fn search_with_config(index: &ColumnIndex<'_>, value: &Value, config: &IndexerConfig) -> usize {
    search_with(index, value, config.null_ordering)
}

// Bisect over [cur, top). A value equal to a page minimum may also end the
// previous page, in which case the search keeps narrowing leftward.
fn binary_search<F>(index: &ColumnIndex<'_>, value: &Value, cmp: &F) -> (usize, u64)
where
    F: Fn(&Value, &Value) -> Ordering,
{
    let num_pages = index.num_pages();
    let (mut cur, mut top) = (0, num_pages);
    let mut probes = 0u64;

    while top - cur > 1 {
        let mid = cur + (top - cur) / 2;
        probes += 1;

        let min = index.min(mid);
        let against_min = cmp(value, &min);
        if against_min == Ordering::Less {
            top = mid;
            continue;
        }

        if cmp(value, &index.max(mid)) == Ordering::Greater {
            cur = mid;
            continue;
        }

        if against_min == Ordering::Equal
            && mid - 1 > cur
            && cmp(&index.max(mid - 1), value) == Ordering::Equal
        {
            top = mid;
            continue;
        }

        return (mid, probes);
    }

    if cur < num_pages {
        probes += 1;
        if page_contains(index, cur, value, cmp) {
            return (cur, probes);
        }
    }

    (num_pages, probes)
}

fn linear_search<F>(index: &ColumnIndex<'_>, value: &Value, cmp: &F) -> (usize, u64)
where
    F: Fn(&Value, &Value) -> Ordering,
{
    let num_pages = index.num_pages();
    let mut probes = 0u64;

    for page in 0..num_pages {
        probes += 1;
        if page_contains(index, page, value, cmp) {
            return (page, probes);
        }
    }

    (num_pages, probes)
}

fn page_contains<F>(index: &ColumnIndex<'_>, page: usize, value: &Value, cmp: &F) -> bool
where
    F: Fn(&Value, &Value) -> Ordering,
{
    cmp(&index.min(page), value) != Ordering::Greater
        && cmp(value, &index.max(page)) != Ordering::Greater
}
