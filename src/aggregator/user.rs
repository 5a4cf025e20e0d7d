//! User demographic statistics
//!
//! User type and gender report a count and percentage per category, with
//! percentages taken over the records that have a value. Birth year reports
//! the youngest (max), oldest (min) and most common year. Gender and birth
//! year appear only for datasets carrying those columns.

use super::{build_table, missing_field_table, mode, percent, value_counts};
use crate::constants::columns::{BIRTH_YEAR, GENDER};
use crate::models::{FilterSpec, TripRecord, TripTable};
use crate::stats::{MetricValue, Metrics, StatisticTable};

pub const USER_TYPE_TABLE: &str = "Trips by User Type";
pub const GENDER_TABLE: &str = "Trips by Gender";
pub const BIRTH_YEAR_TABLE: &str = "Birth Year";

pub fn user_stats(view: &TripTable, filter: &FilterSpec) -> Vec<StatisticTable> {
    let user_types = build_table(USER_TYPE_TABLE, view, filter, |records| {
        distribution(records, |record| record.user_type.as_deref())
    });

    let genders = if view.schema.has_gender {
        build_table(GENDER_TABLE, view, filter, |records| {
            distribution(records, |record| record.gender.as_deref())
        })
    } else {
        missing_field_table(GENDER_TABLE, GENDER)
    };

    let birth_years = if view.schema.has_birth_year {
        build_table(BIRTH_YEAR_TABLE, view, filter, birth_year_metrics)
    } else {
        missing_field_table(BIRTH_YEAR_TABLE, BIRTH_YEAR)
    };

    vec![user_types, genders, birth_years]
}

/// One `Share` metric per category, most frequent first
fn distribution<F>(records: &[&TripRecord], field: F) -> Option<Metrics>
where
    F: Fn(&TripRecord) -> Option<&str>,
{
    let counts = value_counts(records.iter().copied().filter_map(&field));
    if counts.is_empty() {
        return None;
    }

    let total: usize = counts.iter().map(|(_, count)| count).sum();
    let metrics = counts
        .into_iter()
        .fold(Metrics::new(), |metrics, (category, count)| {
            metrics.with(
                category,
                MetricValue::Share {
                    count,
                    percent: percent(count, total),
                },
            )
        });
    Some(metrics)
}

fn birth_year_metrics(records: &[&TripRecord]) -> Option<Metrics> {
    let years: Vec<i32> = records
        .iter()
        .filter_map(|record| record.year_of_birth)
        .collect();

    let youngest = years.iter().copied().max()?;
    let oldest = years.iter().copied().min()?;
    let (common, _) = mode(years.iter().copied())?;

    Some(
        Metrics::new()
            .with("Max", MetricValue::Year(youngest))
            .with("Min", MetricValue::Year(oldest))
            .with("Mode", MetricValue::Year(common)),
    )
}
