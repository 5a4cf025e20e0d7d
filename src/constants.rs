//! Application constants for the bikeshare explorer
//!
//! City datasets, calendar names, source column headings and display
//! defaults used throughout the crate.

// =============================================================================
// City Datasets
// =============================================================================

/// Supported city keys and their default source files
pub const CITY_DATA: &[(&str, &str)] = &[
    ("chicago", "chicago.csv"),
    ("new york city", "new_york_city.csv"),
    ("washington", "washington.csv"),
];

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "data";

/// Application directory name under the user's data/config dirs
pub const APP_DIR_NAME: &str = "bikeshare";

/// Configuration file name looked up in the user's config dir
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "BIKESHARE_DATA_DIR";

// =============================================================================
// Calendar
// =============================================================================

/// Months covered by the datasets, in calendar order (1-based)
pub const MONTH_NAMES: &[&str] = &["January", "February", "March", "April", "May", "June"];

/// Canonical day-of-week names, Sunday first
pub const DAY_NAMES: &[&str] = &[
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Sentinel meaning "no filtering on this axis"
pub const ALL_FILTER: &str = "all";

// =============================================================================
// Source Columns
// =============================================================================

/// Column headings as they appear in the city CSV files
pub mod columns {
    pub const START_TIME: &str = "Start Time";
    pub const END_TIME: &str = "End Time";
    pub const TRIP_DURATION: &str = "Trip Duration";
    pub const START_STATION: &str = "Start Station";
    pub const END_STATION: &str = "End Station";
    pub const USER_TYPE: &str = "User Type";
    pub const GENDER: &str = "Gender";
    pub const BIRTH_YEAR: &str = "Birth Year";

    /// Columns every dataset must carry
    pub const REQUIRED: &[&str] = &[START_TIME, START_STATION, END_STATION, USER_TYPE];
}

/// Timestamp formats accepted for start and end times
pub const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Separator used in the synthetic trip identifier
pub const TRIP_SEPARATOR: &str = "->";

// =============================================================================
// Display Defaults
// =============================================================================

/// Raw records shown per page
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Maximum width of a rendered table cell
pub const MAX_COLUMN_WIDTH: usize = 50;

