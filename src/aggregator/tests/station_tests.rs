//! Tests for station popularity statistics

use super::*;
use crate::aggregator::station::{TRIPS_TABLE, station_stats};
use crate::constants::columns::{END_STATION, START_STATION};
use crate::models::FilterSpec;
use crate::stats::{MetricValue, Outcome};

#[test]
fn test_modal_trip_count_and_range() {
    let table = create_test_table(vec![
        create_trip("A", "B"),
        create_trip("A", "B"),
        create_trip("A", "C"),
    ]);

    let tables = station_stats(&table, &FilterSpec::all());
    let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec![START_STATION, END_STATION, TRIPS_TABLE]);

    let trips = tables[2].overall().and_then(Outcome::metrics).unwrap();
    assert_eq!(trips.get("Mode"), Some(&MetricValue::Text("A->B".to_string())));
    assert_eq!(trips.get("Count"), Some(&MetricValue::Count(2)));
    assert_eq!(trips.get("Range"), Some(&MetricValue::Count(2)));

    let start = tables[0].overall().and_then(Outcome::metrics).unwrap();
    assert_eq!(start.get("Mode"), Some(&MetricValue::Text("A".to_string())));
    assert_eq!(start.get("Count"), Some(&MetricValue::Count(3)));
    assert_eq!(start.get("Range"), Some(&MetricValue::Count(1)));
}

#[test]
fn test_station_tie_goes_to_alphabetically_first() {
    let table = create_test_table(vec![create_trip("Zoo", "Park"), create_trip("Art", "Park")]);

    let tables = station_stats(&table, &FilterSpec::all());
    let start = tables[0].overall().and_then(Outcome::metrics).unwrap();
    assert_eq!(start.get("Mode"), Some(&MetricValue::Text("Art".to_string())));
    assert_eq!(start.get("Range"), Some(&MetricValue::Count(2)));
}

#[test]
fn test_missing_stations_are_ignored() {
    let mut partial = create_trip("A", "B");
    partial.end_station = None;
    partial.trip = None;

    let table = create_test_table(vec![partial, create_trip("C", "D")]);
    let tables = station_stats(&table, &FilterSpec::all());

    let end = tables[1].overall().and_then(Outcome::metrics).unwrap();
    assert_eq!(end.get("Mode"), Some(&MetricValue::Text("D".to_string())));
    assert_eq!(end.get("Count"), Some(&MetricValue::Count(1)));
    let trips = tables[2].overall().and_then(Outcome::metrics).unwrap();
    assert_eq!(trips.get("Range"), Some(&MetricValue::Count(1)));
}
