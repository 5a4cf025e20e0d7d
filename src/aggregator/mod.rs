//! Statistic aggregation over a filtered trip view
//!
//! Each family computes its statistics for the whole view and, for every
//! filter axis left at "all", once per fixed bucket on that axis.
//!
//! # Architecture
//!
//! - [`time`] - Modal start hour
//! - [`station`] - Popular start/end stations and trips
//! - [`duration`] - Total and mean trip duration
//! - [`user`] - User type and gender distributions, birth years
//!
//! Shared helpers here handle bucket selection, modes and value counts so
//! that every family follows the same breakdown and tie-breaking rules.

pub mod duration;
pub mod station;
pub mod time;
pub mod user;

#[cfg(test)]
pub mod tests;

use crate::models::{DayOfWeek, FilterSpec, Month, TripRecord, TripTable};
use crate::session::Session;
use crate::stats::{
    Bucket, Metrics, NoData, Outcome, StatisticFamily, StatisticReport, StatisticTable,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Compute one statistic family for the session's current view
pub fn report(session: &Session, family: StatisticFamily) -> StatisticReport {
    compute(session.view(), session.filter(), family)
}

/// Compute every family for the session's current view
pub fn report_all(session: &Session) -> Vec<StatisticReport> {
    StatisticFamily::ALL
        .into_iter()
        .map(|family| report(session, family))
        .collect()
}

/// Compute one statistic family over `view`, filtered by `filter`
pub fn compute(view: &TripTable, filter: &FilterSpec, family: StatisticFamily) -> StatisticReport {
    debug!(
        "Computing {} over {} records of {}",
        family,
        view.len(),
        view.city
    );

    let tables = match family {
        StatisticFamily::Time => time::time_stats(view, filter),
        StatisticFamily::Station => station::station_stats(view, filter),
        StatisticFamily::Duration => duration::duration_stats(view, filter),
        StatisticFamily::User => user::user_stats(view, filter),
    };

    StatisticReport {
        family,
        city: view.city,
        filter: *filter,
        record_count: view.len(),
        tables,
    }
}

/// Buckets reported for a filter: always `Overall`, plus the fixed month
/// list when months are unfiltered and the fixed weekday list when days are
pub fn buckets_for(filter: &FilterSpec) -> Vec<Bucket> {
    let mut buckets = vec![Bucket::Overall];
    if filter.month.is_all() {
        buckets.extend(Month::ALL.into_iter().map(Bucket::Month));
    }
    if filter.day.is_all() {
        buckets.extend(DayOfWeek::ALL.into_iter().map(Bucket::Day));
    }
    buckets
}

/// Records of `view` falling in `bucket`
pub fn bucket_records(view: &TripTable, bucket: Bucket) -> Vec<&TripRecord> {
    view.iter()
        .filter(|record| match bucket {
            Bucket::Overall => true,
            Bucket::Month(month) => record.month_bucket() == Some(month),
            Bucket::Day(day) => record.day_of_week == day,
        })
        .collect()
}

/// Run `compute` for every bucket of the filter.
///
/// Buckets without records, or for which `compute` finds no values, are
/// recorded as [`NoData::EmptyGroup`].
pub fn build_table<F>(
    name: &str,
    view: &TripTable,
    filter: &FilterSpec,
    compute: F,
) -> StatisticTable
where
    F: Fn(&[&TripRecord]) -> Option<Metrics>,
{
    let mut table = StatisticTable::new(name);
    for bucket in buckets_for(filter) {
        let records = bucket_records(view, bucket);
        let outcome = if records.is_empty() {
            Outcome::NoData(NoData::EmptyGroup)
        } else {
            compute(&records)
                .map(Outcome::Metrics)
                .unwrap_or(Outcome::NoData(NoData::EmptyGroup))
        };
        table.insert(bucket, outcome);
    }
    table
}

/// Single-entry table for an optional column the dataset lacks
pub fn missing_field_table(name: &str, field: &'static str) -> StatisticTable {
    let mut table = StatisticTable::new(name);
    table.insert(Bucket::Overall, Outcome::NoData(NoData::MissingField { field }));
    table
}

/// Most frequent value and its count; ties go to the smallest value
pub fn mode<T, I>(values: I) -> Option<(T, usize)>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        // Ascending key order, so only a strictly larger count replaces
        if best.as_ref().is_none_or(|(_, top)| count > *top) {
            best = Some((value, count));
        }
    }
    best
}

/// Distinct values with counts, by descending count then ascending value
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut ordered: Vec<(T, usize)> = counts.into_iter().collect();
    // Stable sort keeps the ascending key order among equal counts
    ordered.sort_by(|a, b| b.1.cmp(&a.1));
    ordered
}

/// Share of `total` as a percentage rounded to one decimal
pub fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(count as f64 / total as f64 * 100.0, 1)
}

/// Round to `decimals` places, ties to the even neighbour (6.25 -> 6.2)
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}
