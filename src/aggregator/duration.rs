//! Trip duration statistics

use super::{build_table, round_to};
use crate::models::{FilterSpec, TripRecord, TripTable};
use crate::stats::{MetricValue, Metrics, StatisticTable};

pub const DURATION_TABLE: &str = "Trip Duration";

/// Total as whole minutes plus remainder seconds, mean in minutes
pub fn duration_stats(view: &TripTable, filter: &FilterSpec) -> Vec<StatisticTable> {
    vec![build_table(DURATION_TABLE, view, filter, duration_metrics)]
}

fn duration_metrics(records: &[&TripRecord]) -> Option<Metrics> {
    let durations: Vec<f64> = records
        .iter()
        .filter_map(|record| record.duration_secs)
        .collect();
    if durations.is_empty() {
        return None;
    }

    let total: f64 = durations.iter().sum();
    let (minutes, seconds) = split_total(total);
    let mean_minutes = total / durations.len() as f64 / 60.0;

    Some(
        Metrics::new()
            .with("Sum", MetricValue::TotalDuration { minutes, seconds })
            .with("Mean", MetricValue::MeanMinutes(round_to(mean_minutes, 2))),
    )
}

/// Floor the total to whole seconds, then split into minutes and seconds
pub fn split_total(total_secs: f64) -> (u64, u64) {
    let whole = total_secs.max(0.0).floor() as u64;
    (whole / 60, whole % 60)
}
