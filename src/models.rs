//! Core data structures for bikeshare exploration.
//!
//! Defines the supported cities, calendar buckets, filter specifications,
//! trip records and the per-city trip table with its schema.

use crate::constants::{ALL_FILTER, CITY_DATA, DAY_NAMES, MONTH_NAMES};
use crate::error::{BikeshareError, Result};
use chrono::{NaiveDateTime, Weekday};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Cities with a trip dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Registry key, e.g. `new york city`
    pub fn key(&self) -> &'static str {
        CITY_DATA[self.index()].0
    }

    /// Default source file name for this city
    pub fn default_file(&self) -> &'static str {
        CITY_DATA[self.index()].1
    }

    /// Title-cased name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    fn index(&self) -> usize {
        match self {
            City::Chicago => 0,
            City::NewYorkCity => 1,
            City::Washington => 2,
        }
    }

    /// Normalize user input into the registry key form
    fn normalize(input: &str) -> String {
        input
            .trim()
            .to_lowercase()
            .replace(['_', '-'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = Self::normalize(s);
        City::ALL
            .into_iter()
            .find(|city| city.key() == normalized)
            .ok_or_else(|| {
                let available: Vec<&str> = CITY_DATA.iter().map(|(key, _)| *key).collect();
                BikeshareError::dataset_not_found(s.trim(), &available)
            })
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Months covered by the datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// 1-based calendar number
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[*self as usize]
    }

    /// Month for a 1-based calendar number, if it is in the dataset range
    pub fn from_number(number: u32) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|index| Month::ALL.get(index as usize).copied())
    }
}

impl FromStr for Month {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Month::ALL
            .into_iter()
            .find(|month| month.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BikeshareError::invalid_filter("month", wanted, MONTH_NAMES))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical day-of-week, Sunday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub fn name(&self) -> &'static str {
        DAY_NAMES[*self as usize]
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        DayOfWeek::ALL[weekday.num_days_from_sunday() as usize]
    }
}

impl FromStr for DayOfWeek {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BikeshareError::invalid_filter("day", wanted, DAY_NAMES))
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One axis of a filter: either every value or a single concrete one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Whether a value passes this selection
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

impl<T: FromStr<Err = BikeshareError>> FromStr for Selection<T> {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case(ALL_FILTER) {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("All"),
            Selection::Only(value) => value.fmt(f),
        }
    }
}

impl<T: fmt::Display> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Month/day filter requested for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FilterSpec {
    pub month: Selection<Month>,
    pub day: Selection<DayOfWeek>,
}

impl FilterSpec {
    pub fn new(month: Selection<Month>, day: Selection<DayOfWeek>) -> Self {
        Self { month, day }
    }

    /// No filtering on either axis
    pub fn all() -> Self {
        Self::default()
    }
}

/// One trip with its derived calendar fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    /// Seconds; provided by the source or derived from end - start
    pub duration_secs: Option<f64>,
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<String>,

    // Derived fields
    /// 1-based calendar month
    pub month: u32,
    pub day_of_week: DayOfWeek,
    pub hour: u32,
    pub year: i32,
    /// `start->end`, present when both stations are known
    pub trip: Option<String>,
    pub year_of_birth: Option<i32>,
}

impl TripRecord {
    /// Dataset month bucket, if the trip falls in the covered range
    pub fn month_bucket(&self) -> Option<Month> {
        Month::from_number(self.month)
    }
}

/// Column layout of a loaded dataset
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TableSchema {
    /// Source column names, sorted case-insensitively
    pub columns: Vec<String>,
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl TableSchema {
    pub fn from_columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        use crate::constants::columns::{BIRTH_YEAR, GENDER};

        let mut columns: Vec<String> = names.into_iter().map(Into::into).collect();
        columns.sort_by_key(|name| name.to_lowercase());

        let has_gender = columns.iter().any(|name| name == GENDER);
        let has_birth_year = columns.iter().any(|name| name == BIRTH_YEAR);

        Self {
            columns,
            has_gender,
            has_birth_year,
        }
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }
}

/// Row accounting for a single load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LoadSummary {
    pub rows_read: usize,
    pub rows_kept: usize,
    /// Rows dropped because the start time was missing or unparseable
    pub rows_skipped: usize,
}

/// Trips for one city sharing a uniform schema
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    pub city: City,
    pub schema: TableSchema,
    pub records: Vec<TripRecord>,
}

impl TripTable {
    pub fn new(city: City, schema: TableSchema, records: Vec<TripRecord>) -> Self {
        Self {
            city,
            schema,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }

    /// Same city and schema, different rows
    pub fn with_records(&self, records: Vec<TripRecord>) -> Self {
        Self {
            city: self.city,
            schema: self.schema.clone(),
            records,
        }
    }
}
