//! Time-of-day statistics

use super::{build_table, mode};
use crate::models::{FilterSpec, TripTable};
use crate::stats::{MetricValue, Metrics, StatisticTable};

pub const START_HOUR_TABLE: &str = "Trip Start Hour";

/// Modal start hour with its trip count
pub fn time_stats(view: &TripTable, filter: &FilterSpec) -> Vec<StatisticTable> {
    vec![build_table(START_HOUR_TABLE, view, filter, |records| {
        let (hour, count) = mode(records.iter().map(|record| record.hour))?;
        Some(
            Metrics::new()
                .with("Mode", MetricValue::Hour(hour))
                .with("Count", MetricValue::Count(count)),
        )
    })]
}
