//! Bikeshare Explorer Library
//!
//! Tools for exploring US bike-share trip data for Chicago, New York City
//! and Washington:
//! - Loading city CSV files into typed trip tables with derived calendar fields
//! - Filtering by month and day of week
//! - Time, station, trip duration and user statistics, overall and broken
//!   down per month and per weekday
//! - An interactive terminal explorer and one-shot report commands

pub mod aggregator;
pub mod config;
pub mod constants;
pub mod deriver;
pub mod error;
pub mod filter;
pub mod models;
pub mod registry;
pub mod session;
pub mod stats;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
    pub mod render;
}

// Re-export commonly used types
pub use config::Config;
pub use error::{BikeshareError, Result};
pub use filter::apply_filter;
pub use models::{City, DayOfWeek, FilterSpec, Month, Selection, TableSchema, TripRecord, TripTable};
pub use registry::DatasetRegistry;
pub use session::Session;
pub use stats::{Bucket, MetricValue, NoData, Outcome, StatisticFamily, StatisticReport};
