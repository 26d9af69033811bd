use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// NullOrdering
///
/// Placement of nulls relative to every non-null value.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NullOrdering {
    First,
    #[default]
    Last,
}

impl NullOrdering {
    /// Wrap a non-null comparator with this null placement.
    pub fn wrap<F>(self, cmp: F) -> impl Fn(&Value, &Value) -> Ordering
    where
        F: Fn(&Value, &Value) -> Ordering,
    {
        move |left, right| compare_with_nulls(self, left, right, &cmp)
    }
}

/// Order nulls before every value, deferring to `cmp` for non-null pairs.
pub fn compare_nulls_first<F>(cmp: F) -> impl Fn(&Value, &Value) -> Ordering
where
    F: Fn(&Value, &Value) -> Ordering,
{
    NullOrdering::First.wrap(cmp)
}

/// Order nulls after every value, deferring to `cmp` for non-null pairs.
pub fn compare_nulls_last<F>(cmp: F) -> impl Fn(&Value, &Value) -> Ordering
where
    F: Fn(&Value, &Value) -> Ordering,
{
    NullOrdering::Last.wrap(cmp)
}

fn compare_with_nulls<F>(ordering: NullOrdering, left: &Value, right: &Value, cmp: &F) -> Ordering
where
    F: Fn(&Value, &Value) -> Ordering,
{
    let null_side = match ordering {
        NullOrdering::First => Ordering::Less,
        NullOrdering::Last => Ordering::Greater,
    };

    match (left.is_null(), right.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => null_side,
        (false, true) => null_side.reverse(),
        (false, false) => cmp(left, right),
    }
}
