//! Station popularity statistics
//!
//! Start station, end station and the `start->end` trip identifier each
//! report their modal value, its count and the number of distinct values.

use super::{build_table, value_counts};
use crate::constants::columns::{END_STATION, START_STATION};
use crate::models::{FilterSpec, TripRecord, TripTable};
use crate::stats::{MetricValue, Metrics, StatisticTable};

pub const TRIPS_TABLE: &str = "Trips";

pub fn station_stats(view: &TripTable, filter: &FilterSpec) -> Vec<StatisticTable> {
    vec![
        popularity_table(START_STATION, view, filter, |record| {
            record.start_station.as_deref()
        }),
        popularity_table(END_STATION, view, filter, |record| {
            record.end_station.as_deref()
        }),
        popularity_table(TRIPS_TABLE, view, filter, |record| record.trip.as_deref()),
    ]
}

fn popularity_table<F>(name: &str, view: &TripTable, filter: &FilterSpec, field: F) -> StatisticTable
where
    F: Fn(&TripRecord) -> Option<&str>,
{
    build_table(name, view, filter, |records| {
        let counts = value_counts(records.iter().copied().filter_map(&field));
        let (top, count) = counts.first()?;
        Some(
            Metrics::new()
                .with("Mode", MetricValue::Text(top.to_string()))
                .with("Count", MetricValue::Count(*count))
                .with("Range", MetricValue::Count(counts.len())),
        )
    })
}
