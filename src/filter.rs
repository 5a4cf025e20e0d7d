//! Filter engine: narrow a trip table to one month and/or one weekday.

use crate::error::Result;
use crate::models::{FilterSpec, Month, Selection, TripRecord, TripTable};
use tracing::debug;

impl FilterSpec {
    /// Validate month and day text, either of which may be `all`
    pub fn parse(month: &str, day: &str) -> Result<Self> {
        Ok(Self {
            month: month.parse()?,
            day: day.parse()?,
        })
    }

    /// Whether a record passes both axes
    pub fn matches(&self, record: &TripRecord) -> bool {
        month_admits(&self.month, record) && self.day.admits(&record.day_of_week)
    }

    pub fn is_unfiltered(&self) -> bool {
        self.month.is_all() && self.day.is_all()
    }
}

fn month_admits(selection: &Selection<Month>, record: &TripRecord) -> bool {
    match selection {
        Selection::All => true,
        Selection::Only(month) => record.month == month.number(),
    }
}

/// Records of `table` matching both axes of `spec`, in source order
pub fn apply_filter(table: &TripTable, spec: &FilterSpec) -> TripTable {
    if spec.is_unfiltered() {
        return table.clone();
    }

    let records: Vec<TripRecord> = table
        .iter()
        .filter(|record| spec.matches(record))
        .cloned()
        .collect();

    debug!(
        "Filter month={} day={} kept {} of {} records",
        spec.month,
        spec.day,
        records.len(),
        table.len()
    );

    table.with_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deriver::{RawTrip, derive_record};
    use crate::error::BikeshareError;
    use crate::models::{City, DayOfWeek, TableSchema};
    use chrono::NaiveDate;

    fn record_at(month: u32, day: u32, hour: u32) -> TripRecord {
        let start_time = NaiveDate::from_ymd_opt(2017, month, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .unwrap();
        derive_record(RawTrip {
            start_time,
            end_time: None,
            duration_secs: Some(60.0),
            start_station: Some("A".to_string()),
            end_station: Some("B".to_string()),
            user_type: Some("Subscriber".to_string()),
            gender: None,
            birth_year: None,
        })
    }

    fn sample_table() -> TripTable {
        // 2017-01-02 Monday, 2017-01-06 Friday, 2017-03-06 Monday, 2017-06-30 Friday
        let records = vec![
            record_at(1, 2, 8),
            record_at(1, 6, 9),
            record_at(3, 6, 17),
            record_at(6, 30, 23),
        ];
        TripTable::new(City::Chicago, TableSchema::default(), records)
    }

    #[test]
    fn test_all_all_is_identity() {
        let table = sample_table();
        assert_eq!(apply_filter(&table, &FilterSpec::all()), table);
    }

    #[test]
    fn test_filter_by_month_and_day() {
        let table = sample_table();
        let spec = FilterSpec::parse("january", "Monday").unwrap();
        let view = apply_filter(&table, &spec);

        assert_eq!(view.len(), 1);
        assert_eq!(view.records[0].month, 1);
        assert_eq!(view.records[0].day_of_week, DayOfWeek::Monday);
    }

    #[test]
    fn test_month_then_day_equals_day_then_month() {
        let table = sample_table();
        let month = FilterSpec::new(Selection::Only(Month::January), Selection::All);
        let day = FilterSpec::new(Selection::All, Selection::Only(DayOfWeek::Friday));

        let month_first = apply_filter(&apply_filter(&table, &month), &day);
        let day_first = apply_filter(&apply_filter(&table, &day), &month);
        assert_eq!(month_first, day_first);
        assert_eq!(month_first.len(), 1);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let table = sample_table();
        let spec = FilterSpec::parse("all", "friday").unwrap();
        let once = apply_filter(&table, &spec);
        let twice = apply_filter(&once, &spec);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_empty_result_is_valid() {
        let table = sample_table();
        let view = apply_filter(&table, &FilterSpec::parse("February", "all").unwrap());
        assert!(view.is_empty());
        assert_eq!(view.city, City::Chicago);
    }

    #[test]
    fn test_invalid_filter_text() {
        let err = FilterSpec::parse("July", "all").unwrap_err();
        assert!(matches!(err, BikeshareError::InvalidFilter { axis: "month", .. }));

        let err = FilterSpec::parse("all", "Someday").unwrap_err();
        assert!(matches!(err, BikeshareError::InvalidFilter { axis: "day", .. }));
    }
}
