//! Tests for the statistic families and shared aggregation helpers

pub mod duration_tests;
pub mod helper_tests;
pub mod station_tests;

use crate::deriver::{RawTrip, derive_record};
use crate::models::{City, TableSchema, TripRecord, TripTable};
use chrono::NaiveDate;

/// Create a test record starting on 2017-`month`-`day` at `hour`:00
pub fn create_test_record(month: u32, day: u32, hour: u32) -> TripRecord {
    let start_time = NaiveDate::from_ymd_opt(2017, month, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .unwrap();
    derive_record(RawTrip {
        start_time,
        end_time: None,
        duration_secs: Some(600.0),
        start_station: Some("A".to_string()),
        end_station: Some("B".to_string()),
        user_type: Some("Subscriber".to_string()),
        gender: None,
        birth_year: None,
    })
}

/// Create a test record with the given stations
pub fn create_trip(start: &str, end: &str) -> TripRecord {
    let mut raw = raw_trip();
    raw.start_station = Some(start.to_string());
    raw.end_station = Some(end.to_string());
    derive_record(raw)
}

/// Create a test record with demographic fields
pub fn create_user(user_type: &str, gender: Option<&str>, birth_year: Option<&str>) -> TripRecord {
    let mut raw = raw_trip();
    raw.user_type = Some(user_type.to_string());
    raw.gender = gender.map(str::to_string);
    raw.birth_year = birth_year.map(str::to_string);
    derive_record(raw)
}

/// Create a test record with a given duration in seconds
pub fn create_duration(secs: Option<f64>) -> TripRecord {
    let mut raw = raw_trip();
    raw.duration_secs = secs;
    derive_record(raw)
}

/// Base row: Monday 2017-01-02 08:00, A to B, Subscriber
fn raw_trip() -> RawTrip {
    RawTrip {
        start_time: NaiveDate::from_ymd_opt(2017, 1, 2)
            .and_then(|date| date.and_hms_opt(8, 0, 0))
            .unwrap(),
        end_time: None,
        duration_secs: Some(600.0),
        start_station: Some("A".to_string()),
        end_station: Some("B".to_string()),
        user_type: Some("Subscriber".to_string()),
        gender: None,
        birth_year: None,
    }
}

/// Table with every optional column present
pub fn create_test_table(records: Vec<TripRecord>) -> TripTable {
    TripTable::new(
        City::Chicago,
        TableSchema::from_columns([
            "Start Time",
            "End Time",
            "Trip Duration",
            "Start Station",
            "End Station",
            "User Type",
            "Gender",
            "Birth Year",
        ]),
        records,
    )
}

/// Table without gender or birth year columns
pub fn create_washington_table(records: Vec<TripRecord>) -> TripTable {
    TripTable::new(
        City::Washington,
        TableSchema::from_columns([
            "Start Time",
            "End Time",
            "Trip Duration",
            "Start Station",
            "End Station",
            "User Type",
        ]),
        records,
    )
}

/// Table with a gender column but no birth year column
pub fn create_gender_only_table(records: Vec<TripRecord>) -> TripTable {
    TripTable::new(
        City::NewYorkCity,
        TableSchema::from_columns([
            "Start Time",
            "End Time",
            "Trip Duration",
            "Start Station",
            "End Station",
            "User Type",
            "Gender",
        ]),
        records,
    )
}
