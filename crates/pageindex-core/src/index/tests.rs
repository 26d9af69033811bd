use crate::{
    error::{ErrorClass, ErrorOrigin},
    index::{BoundaryOrder, ColumnIndex, ColumnIndexer, FormatColumnIndex, ValueArena},
    obs::{MetricsEvent, MetricsSink, with_metrics_sink},
    value::{ColumnType, Value},
};
use proptest::prelude::*;
use std::{borrow::Cow, cell::RefCell};

#[derive(Default)]
struct CapturingSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl MetricsSink for CapturingSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}

fn int32_indexer(pages: &[(i32, i32)]) -> ColumnIndexer {
    let mut indexer = ColumnIndexer::new(ColumnType::INT32);
    for &(min, max) in pages {
        indexer
            .index_page(4, 0, &Value::Int32(min), &Value::Int32(max))
            .expect("int32 page should index");
    }

    indexer
}

fn bytes(raw: &[u8]) -> Value {
    Value::ByteArray(raw.to_vec())
}

fn order_of(pages: &[(i32, i32)]) -> BoundaryOrder {
    int32_indexer(pages).column_index(0).boundary_order()
}

#[test]
fn per_page_sequences_stay_aligned() {
    let mut indexer = int32_indexer(&[(0, 9), (10, 10)]);
    indexer
        .index_page(2, 2, &Value::Null, &Value::Null)
        .expect("null page should index");

    let index = indexer.column_index(0);
    assert_eq!(index.num_pages(), 3);

    let record = index.to_format();
    assert_eq!(record.null_pages, vec![false, false, true]);
    assert_eq!(record.null_counts, vec![0, 0, 2]);
    assert_eq!(record.min_values.len(), 3);
    assert_eq!(record.max_values.len(), 3);
}

#[test]
fn null_page_stores_zero_placeholder() {
    let mut indexer = ColumnIndexer::new(ColumnType::INT32);
    indexer
        .index_page(3, 3, &Value::Null, &Value::Null)
        .expect("null page should index");

    let index = indexer.column_index(0);
    assert!(index.null_page(0));
    assert_eq!(index.null_count(0), 3);
    assert_eq!(index.min_value(0), &[0, 0, 0, 0]);
    assert_eq!(index.max(0), Value::Int32(0));
}

#[test]
fn null_count_above_value_count_is_rejected() {
    let mut indexer = ColumnIndexer::new(ColumnType::INT64);
    let err = indexer
        .index_page(2, 3, &Value::Int64(1), &Value::Int64(2))
        .expect_err("more nulls than values must be rejected");

    assert_eq!(err.class, ErrorClass::InvariantViolation);
    assert_eq!(err.origin, ErrorOrigin::Indexer);
    assert_eq!(indexer.num_pages(), 0);
}

#[test]
fn negative_counts_are_rejected() {
    let mut indexer = ColumnIndexer::new(ColumnType::INT64);

    assert!(indexer.index_page(-1, 0, &Value::Null, &Value::Null).is_err());
    assert!(indexer.index_page(1, -1, &Value::Null, &Value::Null).is_err());
    assert_eq!(indexer.num_pages(), 0);
}

#[test]
fn kind_mismatch_records_nothing() {
    let mut indexer = ColumnIndexer::new(ColumnType::INT32);
    let err = indexer
        .index_page(4, 0, &Value::Int32(1), &Value::Int64(9))
        .expect_err("int64 max must not index into an int32 column");

    assert_eq!(err.class, ErrorClass::Unsupported);
    assert_eq!(indexer.num_pages(), 0);

    indexer
        .index_page(4, 0, &Value::Int32(5), &Value::Int32(6))
        .expect("valid page should index after a rejected one");

    let index = indexer.column_index(0);
    assert_eq!(index.num_pages(), 1);
    assert_eq!(index.min(0), Value::Int32(5));
    assert_eq!(index.max(0), Value::Int32(6));
}

#[test]
fn boundary_order_requires_both_sequences_to_agree() {
    assert_eq!(order_of(&[(0, 9), (10, 19), (20, 29)]), BoundaryOrder::Ascending);
    assert_eq!(order_of(&[(20, 29), (10, 19), (0, 9)]), BoundaryOrder::Descending);

    // min ascends, max descends
    assert_eq!(order_of(&[(0, 50), (10, 40), (20, 30)]), BoundaryOrder::Unordered);
    assert_eq!(order_of(&[(0, 9), (20, 29), (10, 19)]), BoundaryOrder::Unordered);
}

#[test]
fn short_and_constant_sequences() {
    assert_eq!(order_of(&[]), BoundaryOrder::Unordered);
    assert_eq!(order_of(&[(3, 7)]), BoundaryOrder::Unordered);
    assert_eq!(order_of(&[(5, 5), (5, 5), (5, 5)]), BoundaryOrder::Ascending);
}

#[test]
fn negative_int32_bounds_order_numerically() {
    assert_eq!(order_of(&[(-20, -10), (-5, 0), (1, 8)]), BoundaryOrder::Ascending);
}

#[test]
fn byte_array_bounds_are_truncated_on_publish() {
    let mut indexer = ColumnIndexer::new(ColumnType::BYTE_ARRAY);
    indexer
        .index_page(6, 0, &bytes(&[0, 0, 0]), &bytes(&[1, 2, 3, 4, 5, 6]))
        .expect("byte-array page should index");

    let published = indexer.column_index(4);
    assert_eq!(published.min_value(0), &[0, 0, 0]);
    assert_eq!(published.max_value(0), &[1, 2, 3, 5]);

    let exact = indexer.column_index(0);
    assert_eq!(exact.max_value(0), &[1, 2, 3, 4, 5, 6]);
}

#[test]
fn all_ff_max_prefix_is_published_whole() {
    let sink = CapturingSink::default();
    let mut indexer = ColumnIndexer::new(ColumnType::BYTE_ARRAY);
    indexer
        .index_page(
            2,
            0,
            &bytes(&[0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00]),
            &bytes(&[0xFF, 0xFF, 0xFF, 0xFF, 0x01]),
        )
        .expect("byte-array page should index");

    let max = with_metrics_sink(&sink, || indexer.column_index(4).max_value(0).to_vec());
    assert_eq!(max, vec![0xFF, 0xFF, 0xFF, 0xFF, 0x01]);

    let events = sink.events.borrow();
    assert!(matches!(
        events.as_slice(),
        [MetricsEvent::IndexBuilt {
            truncated_min: 1,
            truncated_max: 0,
            truncation_skipped: 1,
            ..
        }]
    ));
}

#[test]
fn fixed_len_byte_arrays_are_never_truncated() {
    let column = ColumnType::fixed_len_byte_array(8);
    let mut indexer = ColumnIndexer::new(column);
    indexer
        .index_page(
            1,
            0,
            &Value::FixedLenByteArray(vec![1; 8]),
            &Value::FixedLenByteArray(vec![9; 8]),
        )
        .expect("flba page should index");

    let index = indexer.column_index(4);
    assert_eq!(index.min_value(0), &[1; 8]);
    assert_eq!(index.max_value(0), &[9; 8]);
}

#[test]
fn default_snapshot_uses_configured_size_limit() {
    let config = crate::config::IndexerConfig::default().with_size_limit(2);
    let mut indexer = ColumnIndexer::with_config(ColumnType::BYTE_ARRAY, config);
    indexer
        .index_page(1, 0, &Value::from("apple"), &Value::from("apricot"))
        .expect("byte-array page should index");

    let index = indexer.column_index_default();
    assert_eq!(index.min_value(0), b"ap");
    assert_eq!(index.max_value(0), b"aq");
}

#[test]
fn bounds_track_non_null_variable_length_pages() {
    let mut indexer = ColumnIndexer::new(ColumnType::BYTE_ARRAY);
    assert_eq!(indexer.bounds(), None);

    for (min, max) in [("m", "p"), ("c", "f"), ("q", "z")] {
        indexer
            .index_page(3, 1, &Value::from(min), &Value::from(max))
            .expect("byte-array page should index");
    }
    indexer
        .index_page(2, 2, &Value::Null, &Value::Null)
        .expect("null page should index");

    assert_eq!(
        indexer.bounds(),
        Some((&Value::from("c"), &Value::from("z")))
    );

    indexer.reset();
    assert_eq!(indexer.bounds(), None);
    assert_eq!(indexer.num_pages(), 0);
}

#[test]
fn bounds_are_not_tracked_for_fixed_width_kinds() {
    let indexer = int32_indexer(&[(0, 9)]);

    assert_eq!(indexer.bounds(), None);
}

#[test]
fn snapshot_survives_format_round_trip() {
    let mut indexer = ColumnIndexer::new(ColumnType::BYTE_ARRAY);
    indexer
        .index_page(4, 1, &Value::from("alpha"), &Value::from("delta"))
        .expect("byte-array page should index");
    indexer
        .index_page(1, 1, &Value::Null, &Value::Null)
        .expect("null page should index");

    let index = indexer.column_index(3);
    let record = index.to_format();
    let restored =
        ColumnIndex::from_format(&record, ColumnType::BYTE_ARRAY).expect("record should validate");

    assert_eq!(restored, index);
}

#[test]
fn owned_snapshot_outlives_reset() {
    let mut indexer = int32_indexer(&[(1, 2), (3, 4)]);
    let owned = indexer.column_index(0).into_owned();

    indexer.reset();
    indexer
        .index_page(1, 0, &Value::Int32(100), &Value::Int32(200))
        .expect("int32 page should index");

    assert_eq!(owned.num_pages(), 2);
    assert_eq!(owned.max(1), Value::Int32(4));
    assert!(owned.is_ascending());
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn page_bound_past_the_end_panics() {
    let indexer = int32_indexer(&[(0, 9), (10, 19)]);
    let index = indexer.column_index(0);

    let _ = index.min_value(2);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn null_count_past_the_end_panics() {
    let indexer = int32_indexer(&[(0, 9)]);
    let index = indexer.column_index(0);

    let _ = index.null_count(1);
}

#[test]
#[should_panic(expected = "per-page sequences disagree in length")]
fn assembling_unequal_sequences_panics() {
    let mut min_values = ValueArena::new();
    min_values.push(&[0; 4]);

    let _ = ColumnIndex::from_parts(
        ColumnType::INT32,
        Cow::Owned(vec![false, false]),
        Cow::Owned(vec![0, 0]),
        Cow::Owned(min_values.clone()),
        Cow::Owned(min_values),
        BoundaryOrder::Unordered,
    );
}

#[test]
fn float_zero_bounds_are_widened_to_both_signs() {
    let mut indexer = ColumnIndexer::new(ColumnType::DOUBLE);
    indexer
        .index_page(2, 0, &Value::Double(0.0), &Value::Double(-0.0))
        .expect("double page should index");

    let index = indexer.column_index(0);
    assert_eq!(index.min_value(0), (-0.0f64).to_le_bytes());
    assert_eq!(index.max_value(0), 0.0f64.to_le_bytes());
}

#[test]
fn empty_index_has_no_pages() {
    let index = ColumnIndex::empty(ColumnType::DOUBLE);

    assert_eq!(index.num_pages(), 0);
    assert!(!index.is_ascending());
    assert!(!index.is_descending());
}

#[test]
fn from_format_rejects_length_mismatch() {
    let record = FormatColumnIndex {
        null_pages: vec![false, false],
        null_counts: vec![0],
        min_values: vec![vec![0; 4], vec![0; 4]],
        max_values: vec![vec![0; 4], vec![0; 4]],
        boundary_order: BoundaryOrder::Ascending,
    };

    let err = ColumnIndex::from_format(&record, ColumnType::INT32)
        .expect_err("short null_counts must be rejected");
    assert!(err.is_corruption());
    assert_eq!(err.origin, ErrorOrigin::Index);
}

#[test]
fn from_format_rejects_negative_null_count() {
    let record = FormatColumnIndex {
        null_pages: vec![false],
        null_counts: vec![-2],
        min_values: vec![vec![0; 4]],
        max_values: vec![vec![0; 4]],
        boundary_order: BoundaryOrder::Unordered,
    };

    assert!(ColumnIndex::from_format(&record, ColumnType::INT32).is_err());
}

#[test]
fn from_format_checks_only_non_null_bounds() {
    let mut record = FormatColumnIndex {
        null_pages: vec![true, false],
        null_counts: vec![5, 0],
        min_values: vec![Vec::new(), 7i32.to_le_bytes().to_vec()],
        max_values: vec![Vec::new(), 9i32.to_le_bytes().to_vec()],
        boundary_order: BoundaryOrder::Unordered,
    };

    let index =
        ColumnIndex::from_format(&record, ColumnType::INT32).expect("empty null bounds are legal");
    assert_eq!(index.min(0), Value::Int32(0));
    assert_eq!(index.max(1), Value::Int32(9));

    record.max_values[1] = vec![9, 0, 0];
    let err = ColumnIndex::from_format(&record, ColumnType::INT32)
        .expect_err("three-byte int32 bound must be rejected");
    assert!(err.is_corruption());
}

#[test]
fn record_serializes_boundary_order_as_code() {
    let indexer = int32_indexer(&[(0, 1), (2, 3)]);
    let index = indexer.column_index(0);
    let json = serde_json::to_value(index.to_format()).expect("record should serialize");

    assert_eq!(json["boundary_order"], 1);
}

#[test]
fn unknown_boundary_order_code_is_rejected() {
    assert_eq!(BoundaryOrder::from_code(2), Some(BoundaryOrder::Descending));
    assert_eq!(BoundaryOrder::from_code(3), None);
    assert_eq!(BoundaryOrder::from_code(-1), None);

    let json = r#"{
        "null_pages": [],
        "null_counts": [],
        "min_values": [],
        "max_values": [],
        "boundary_order": 7
    }"#;
    let err = serde_json::from_str::<FormatColumnIndex>(json)
        .expect_err("boundary order 7 must not deserialize");

    assert!(err.to_string().contains("unknown boundary order code 7"));
}

fn int32_pages() -> impl Strategy<Value = Vec<(i32, i32, i64)>> {
    prop::collection::vec((any::<i32>(), any::<i32>(), 0i64..3), 0..16).prop_map(|pages| {
        pages
            .into_iter()
            .map(|(a, b, nulls)| (a.min(b), a.max(b), nulls))
            .collect()
    })
}

fn index_all(indexer: &mut ColumnIndexer, pages: &[(i32, i32, i64)]) {
    for &(min, max, nulls) in pages {
        indexer
            .index_page(4, nulls, &Value::Int32(min), &Value::Int32(max))
            .expect("int32 page should index");
    }
}

proptest! {
    #[test]
    fn reset_then_replay_reproduces_the_index(
        first in int32_pages(),
        pages in int32_pages(),
    ) {
        let mut indexer = ColumnIndexer::new(ColumnType::INT32);
        index_all(&mut indexer, &first);
        indexer.reset();
        index_all(&mut indexer, &pages);
        let replayed = indexer.column_index(0).into_owned();

        let mut fresh = ColumnIndexer::new(ColumnType::INT32);
        index_all(&mut fresh, &pages);

        prop_assert_eq!(replayed, fresh.column_index(0));
    }

    #[test]
    fn boundary_order_matches_published_bounds(pages in int32_pages()) {
        let mut indexer = ColumnIndexer::new(ColumnType::INT32);
        index_all(&mut indexer, &pages);
        let index = indexer.column_index(0);

        let pairs: Vec<(i32, i32)> = pages.iter().map(|&(min, max, _)| (min, max)).collect();
        let ascending = pairs.windows(2).all(|w| w[0].0 <= w[1].0 && w[0].1 <= w[1].1);
        let descending = pairs.windows(2).all(|w| w[0].0 >= w[1].0 && w[0].1 >= w[1].1);

        let expected = if pairs.len() < 2 {
            BoundaryOrder::Unordered
        } else if ascending {
            BoundaryOrder::Ascending
        } else if descending {
            BoundaryOrder::Descending
        } else {
            BoundaryOrder::Unordered
        };
        prop_assert_eq!(index.boundary_order(), expected);
    }

    #[test]
    fn published_byte_bounds_stay_conservative(
        pages in prop::collection::vec(
            (prop::collection::vec(any::<u8>(), 0..24), prop::collection::vec(any::<u8>(), 0..24)),
            1..8,
        ),
        size_limit in 1usize..12,
    ) {
        let mut indexer = ColumnIndexer::new(ColumnType::BYTE_ARRAY);
        let pages: Vec<(Vec<u8>, Vec<u8>)> = pages
            .into_iter()
            .map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
            .collect();
        for (min, max) in &pages {
            indexer
                .index_page(1, 0, &bytes(min), &bytes(max))
                .expect("byte-array page should index");
        }

        let index = indexer.column_index(size_limit);
        for (page, (min, max)) in pages.iter().enumerate() {
            prop_assert!(index.min_value(page) <= min.as_slice());
            prop_assert!(index.max_value(page) >= max.as_slice());
        }
    }
}
