//! Error handling for bikeshare loading and filtering.
//!
//! Load-time failures (unknown city, unreadable source) are errors. Missing
//! optional columns and empty breakdown buckets are not: they surface as
//! no-data markers inside a [`crate::stats::StatisticReport`].

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BikeshareError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Unknown city '{city}'. Available cities: {available}")]
    DatasetNotFound { city: String, available: String },

    #[error("Dataset unreadable: {path} - {reason}")]
    DatasetUnreadable { path: PathBuf, reason: String },

    #[error("Invalid {axis} filter '{value}'. Expected 'all' or one of: {expected}")]
    InvalidFilter {
        axis: &'static str,
        value: String,
        expected: String,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl BikeshareError {
    /// Create a dataset not found error for an unknown city key
    pub fn dataset_not_found(city: impl Into<String>, available: &[&str]) -> Self {
        Self::DatasetNotFound {
            city: city.into(),
            available: available.join(", "),
        }
    }

    /// Create a dataset unreadable error with context
    pub fn dataset_unreadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DatasetUnreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid filter error
    pub fn invalid_filter(axis: &'static str, value: impl Into<String>, expected: &[&str]) -> Self {
        Self::InvalidFilter {
            axis,
            value: value.into(),
            expected: expected.join(", "),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the caller can recover by asking the user for different input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DatasetNotFound { .. } | Self::InvalidFilter { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BikeshareError>;
