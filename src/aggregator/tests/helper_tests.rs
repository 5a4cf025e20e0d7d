//! Tests for bucket selection, modes and value counts

use super::*;
use crate::aggregator::{bucket_records, buckets_for, build_table, mode, percent, round_to, value_counts};
use crate::models::{DayOfWeek, FilterSpec, Month, Selection};
use crate::stats::{Bucket, MetricValue, Metrics, NoData, Outcome};

#[test]
fn test_buckets_follow_unfiltered_axes() {
    assert_eq!(buckets_for(&FilterSpec::all()).len(), 1 + 6 + 7);

    let month_only = FilterSpec::new(Selection::Only(Month::May), Selection::All);
    let buckets = buckets_for(&month_only);
    assert_eq!(buckets.len(), 1 + 7);
    assert!(!buckets.contains(&Bucket::Month(Month::May)));
    assert!(buckets.contains(&Bucket::Day(DayOfWeek::Saturday)));

    let both = FilterSpec::new(
        Selection::Only(Month::May),
        Selection::Only(DayOfWeek::Monday),
    );
    assert_eq!(buckets_for(&both), vec![Bucket::Overall]);
}

#[test]
fn test_bucket_records_excludes_uncovered_months() {
    let table = create_test_table(vec![
        create_test_record(1, 2, 8),
        create_test_record(7, 3, 8),
    ]);

    assert_eq!(bucket_records(&table, Bucket::Overall).len(), 2);
    assert_eq!(bucket_records(&table, Bucket::Month(Month::January)).len(), 1);
    // 2017-01-02 and 2017-07-03 are both Mondays
    assert_eq!(bucket_records(&table, Bucket::Day(DayOfWeek::Monday)).len(), 2);
}

#[test]
fn test_mode_breaks_ties_on_smallest_value() {
    assert_eq!(mode(vec![17, 8, 17, 8, 3]), Some((8, 2)));
    assert_eq!(mode(vec!["b", "a"]), Some(("a", 1)));
    assert_eq!(mode(Vec::<u32>::new()), None);
}

#[test]
fn test_value_counts_order() {
    let counts = value_counts(vec!["C", "B", "A", "B", "C"]);
    assert_eq!(counts, vec![("B", 2), ("C", 2), ("A", 1)]);
}

#[test]
fn test_percent_rounds_to_one_decimal() {
    assert_eq!(percent(2, 3), 66.7);
    assert_eq!(percent(1, 3), 33.3);
    assert_eq!(percent(0, 0), 0.0);
}

#[test]
fn test_percent_ties_round_to_even() {
    // 6.25% and 18.75% sit exactly between two tenths
    assert_eq!(percent(1, 16), 6.2);
    assert_eq!(percent(3, 16), 18.8);
    assert_eq!(round_to(0.125, 2), 0.12);
    assert_eq!(round_to(0.375, 2), 0.38);
}

#[test]
fn test_empty_bucket_does_not_abort_others() {
    let table = create_test_table(vec![create_test_record(3, 6, 8)]);
    let stat = build_table("Count", &table, &FilterSpec::all(), |records| {
        Some(Metrics::new().with("Count", MetricValue::Count(records.len())))
    });

    assert_eq!(stat.entries.len(), 14);
    assert_eq!(
        stat.get(Bucket::Month(Month::February)),
        Some(&Outcome::NoData(NoData::EmptyGroup))
    );
    let march = stat
        .get(Bucket::Month(Month::March))
        .and_then(Outcome::metrics)
        .unwrap();
    assert_eq!(march.get("Count"), Some(&MetricValue::Count(1)));
}
