//! Tests for trip duration statistics

use super::*;
use crate::aggregator::duration::{DURATION_TABLE, duration_stats, split_total};
use crate::models::FilterSpec;
use crate::stats::{Bucket, MetricValue, NoData, Outcome};

#[test]
fn test_sum_and_mean() {
    let table = create_test_table(vec![
        create_duration(Some(321.0)),
        create_duration(Some(1610.0)),
        create_duration(Some(416.0)),
    ]);

    let tables = duration_stats(&table, &FilterSpec::all());
    assert_eq!(tables[0].name, DURATION_TABLE);

    let overall = tables[0].overall().and_then(Outcome::metrics).unwrap();
    // 2347 seconds
    assert_eq!(
        overall.get("Sum"),
        Some(&MetricValue::TotalDuration {
            minutes: 39,
            seconds: 7
        })
    );
    assert_eq!(overall.get("Sum").unwrap().to_string(), "39 minutes 7 seconds");
    assert_eq!(overall.get("Mean").unwrap().to_string(), "13.04 minutes");
}

#[test]
fn test_mean_tie_rounds_to_even() {
    // 7.5 seconds is exactly 0.125 minutes
    let table = create_test_table(vec![create_duration(Some(7.5))]);
    let tables = duration_stats(&table, &FilterSpec::all());
    let overall = tables[0].overall().and_then(Outcome::metrics).unwrap();
    assert_eq!(overall.get("Mean"), Some(&MetricValue::MeanMinutes(0.12)));
    assert_eq!(overall.get("Mean").unwrap().to_string(), "0.12 minutes");
}

#[test]
fn test_sum_round_trips_to_total_seconds() {
    let secs = [59.0, 61.0, 3600.0, 1234567.0, 0.0];
    let total: f64 = secs.iter().sum();
    let (minutes, seconds) = split_total(total);
    assert!(seconds < 60);
    assert_eq!(minutes * 60 + seconds, total as u64);
}

#[test]
fn test_fractional_total_is_floored() {
    assert_eq!(split_total(600.9), (10, 0));
    assert_eq!(split_total(119.5), (1, 59));
}

#[test]
fn test_missing_durations_are_skipped() {
    let table = create_test_table(vec![create_duration(None), create_duration(Some(120.0))]);
    let tables = duration_stats(&table, &FilterSpec::all());
    let overall = tables[0].overall().and_then(Outcome::metrics).unwrap();
    assert_eq!(overall.get("Mean"), Some(&MetricValue::MeanMinutes(2.0)));

    let table = create_test_table(vec![create_duration(None)]);
    let tables = duration_stats(&table, &FilterSpec::all());
    assert_eq!(
        tables[0].get(Bucket::Overall),
        Some(&Outcome::NoData(NoData::EmptyGroup))
    );
}
