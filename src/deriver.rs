//! Field derivation: raw text frame to typed trip table.
//!
//! Parses timestamps and numeric columns, then attaches the calendar fields
//! (month, day of week, hour, year), the `start->end` trip identifier and
//! the integer year of birth to every record.

use crate::constants::columns::{
    BIRTH_YEAR, END_STATION, END_TIME, GENDER, START_STATION, START_TIME, TRIP_DURATION,
    USER_TYPE,
};
use crate::constants::{TIMESTAMP_FORMATS, TRIP_SEPARATOR};
use crate::error::Result;
use crate::models::{City, DayOfWeek, LoadSummary, TableSchema, TripRecord, TripTable};
use chrono::{Datelike, NaiveDateTime, Timelike};
use polars::prelude::*;
use tracing::{debug, warn};

/// Build a trip table from a frame whose columns are all text
pub fn derive_table(city: City, frame: &DataFrame) -> Result<(TripTable, LoadSummary)> {
    let schema = TableSchema::from_columns(
        frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string()),
    );

    let start_times = text_column(frame, &schema, START_TIME)?;
    let end_times = text_column(frame, &schema, END_TIME)?;
    let durations = text_column(frame, &schema, TRIP_DURATION)?;
    let start_stations = text_column(frame, &schema, START_STATION)?;
    let end_stations = text_column(frame, &schema, END_STATION)?;
    let user_types = text_column(frame, &schema, USER_TYPE)?;
    let genders = text_column(frame, &schema, GENDER)?;
    let birth_years = text_column(frame, &schema, BIRTH_YEAR)?;

    let rows_read = frame.height();
    let mut records = Vec::with_capacity(rows_read);
    let mut rows_skipped = 0usize;

    for row in 0..rows_read {
        let cell = |column: &Option<Vec<Option<String>>>| -> Option<String> {
            column.as_ref().and_then(|values| values[row].clone())
        };

        let Some(start_time) = cell(&start_times).as_deref().and_then(parse_timestamp) else {
            debug!("Skipping row {}: missing or unparseable start time", row);
            rows_skipped += 1;
            continue;
        };

        let end_time = cell(&end_times).as_deref().and_then(parse_timestamp);
        let duration_secs = cell(&durations)
            .as_deref()
            .and_then(parse_number)
            .or_else(|| end_time.map(|end| elapsed_secs(start_time, end)));

        records.push(derive_record(RawTrip {
            start_time,
            end_time,
            duration_secs,
            start_station: cell(&start_stations),
            end_station: cell(&end_stations),
            user_type: cell(&user_types),
            gender: cell(&genders),
            birth_year: cell(&birth_years),
        }));
    }

    if rows_skipped > 0 {
        warn!(
            "{}: skipped {} of {} rows without a usable start time",
            city, rows_skipped, rows_read
        );
    }

    let summary = LoadSummary {
        rows_read,
        rows_kept: records.len(),
        rows_skipped,
    };

    Ok((TripTable::new(city, schema, records), summary))
}

/// Source fields of one row after parsing
#[derive(Debug, Clone)]
pub struct RawTrip {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub duration_secs: Option<f64>,
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<String>,
}

/// Attach derived fields to a parsed row
pub fn derive_record(raw: RawTrip) -> TripRecord {
    let trip = match (&raw.start_station, &raw.end_station) {
        (Some(start), Some(end)) => Some(format!("{}{}{}", start, TRIP_SEPARATOR, end)),
        _ => None,
    };
    let year_of_birth = raw.birth_year.as_deref().and_then(parse_year);

    TripRecord {
        month: raw.start_time.month(),
        day_of_week: DayOfWeek::from(raw.start_time.weekday()),
        hour: raw.start_time.hour(),
        year: raw.start_time.year(),
        trip,
        year_of_birth,
        start_time: raw.start_time,
        end_time: raw.end_time,
        duration_secs: raw.duration_secs,
        start_station: raw.start_station,
        end_station: raw.end_station,
        user_type: raw.user_type,
        gender: raw.gender,
        birth_year: raw.birth_year,
    }
}

/// Text values of a column, or `None` when the dataset lacks it.
/// Empty cells become `None`.
fn text_column(
    frame: &DataFrame,
    schema: &TableSchema,
    name: &str,
) -> Result<Option<Vec<Option<String>>>> {
    if !schema.contains(name) {
        return Ok(None);
    }

    let series = frame
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let values = series
        .str()?
        .into_iter()
        .map(|value| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
        .collect();

    Ok(Some(values))
}

/// Parse a timestamp in any of the accepted formats
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Integer year from text such as `1985` or `1985.0`
pub fn parse_year(value: &str) -> Option<i32> {
    parse_number(value)
        .filter(|year| year.fract() == 0.0 && *year >= i32::MIN as f64 && *year <= i32::MAX as f64)
        .map(|year| year as i32)
}

fn elapsed_secs(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0
}
