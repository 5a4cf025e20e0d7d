//! Command-line argument definitions for the bikeshare explorer
//!
//! This module defines the CLI interface using the clap derive API. With no
//! subcommand the interactive explorer starts.

use crate::constants::ALL_FILTER;
use crate::error::Result;
use crate::models::FilterSpec;
use crate::stats::StatisticFamily;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the bikeshare explorer
///
/// Explore US bike-share trip data for Chicago, New York City and
/// Washington, filtered by month and day of week.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bikeshare",
    version,
    about = "Explore US bike-share trip data by city, month and day",
    long_about = "Loads bike-share trip datasets for Chicago, New York City and Washington \
                  and reports the most frequent travel times, popular stations, trip \
                  durations and rider demographics, overall and broken down by month \
                  and day of week. Run without a subcommand for the interactive explorer."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory containing the city CSV files
    ///
    /// Overrides the configuration file and the BIKESHARE_DATA_DIR
    /// environment variable.
    #[arg(
        long = "data-dir",
        value_name = "PATH",
        global = true,
        help = "Directory containing the city CSV files"
    )]
    pub data_dir: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ~/.config/bikeshare/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Raw records shown per page, overriding the configuration file
    #[arg(long = "page-size", value_name = "N", global = true)]
    pub page_size: Option<usize>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress log output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Interactive menu-driven exploration (default command)
    Explore,
    /// Print statistic reports for one city and filter
    Stats(StatsArgs),
    /// Print a page of raw trip records
    Raw(RawArgs),
}

/// City and filter selection shared by the one-shot commands
#[derive(Debug, Clone, ClapArgs)]
pub struct SelectionArgs {
    /// City to load: chicago, "new york city" or washington
    #[arg(long = "city", value_name = "CITY")]
    pub city: String,

    /// Month to filter on (January-June), or "all"
    #[arg(long = "month", value_name = "MONTH", default_value = ALL_FILTER)]
    pub month: String,

    /// Day of week to filter on, or "all"
    #[arg(long = "day", value_name = "DAY", default_value = ALL_FILTER)]
    pub day: String,
}

impl SelectionArgs {
    pub fn filter(&self) -> Result<FilterSpec> {
        FilterSpec::parse(&self.month, &self.day)
    }
}

/// Arguments for the stats command
#[derive(Debug, Clone, ClapArgs)]
pub struct StatsArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Statistic family to compute
    #[arg(long = "family", value_enum, default_value = "all")]
    pub family: FamilyChoice,

    /// Output format for the reports
    #[arg(long = "format", value_enum, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for the raw command
#[derive(Debug, Clone, ClapArgs)]
pub struct RawArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Index of the first record to show
    #[arg(long = "offset", value_name = "N", default_value_t = 0)]
    pub offset: usize,

    /// Number of records to show (defaults to the configured page size)
    #[arg(long = "rows", value_name = "N")]
    pub rows: Option<usize>,

    /// Output format for the records
    #[arg(long = "format", value_enum, default_value = "human")]
    pub format: OutputFormat,
}

/// Statistic family selection, including every family at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FamilyChoice {
    Time,
    Station,
    Duration,
    User,
    All,
}

impl FamilyChoice {
    pub fn families(&self) -> Vec<StatisticFamily> {
        match self {
            FamilyChoice::Time => vec![StatisticFamily::Time],
            FamilyChoice::Station => vec![StatisticFamily::Station],
            FamilyChoice::Duration => vec![StatisticFamily::Duration],
            FamilyChoice::User => vec![StatisticFamily::User],
            FamilyChoice::All => StatisticFamily::ALL.to_vec(),
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayOfWeek, Month, Selection};

    #[test]
    fn test_no_subcommand_defaults_to_explorer() {
        let args = Args::try_parse_from(["bikeshare"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.get_log_level(), "warn");
    }

    #[test]
    fn test_parse_stats_command() {
        let args = Args::try_parse_from([
            "bikeshare",
            "stats",
            "--city",
            "new york city",
            "--month",
            "march",
            "--family",
            "user",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.get_log_level(), "debug");
        let Some(Commands::Stats(stats)) = args.command else {
            panic!("expected stats command");
        };
        assert_eq!(stats.selection.city, "new york city");
        assert_eq!(
            stats.selection.filter().unwrap(),
            FilterSpec::new(Selection::Only(Month::March), Selection::All)
        );
        assert_eq!(stats.family.families(), vec![StatisticFamily::User]);
        assert_eq!(stats.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_raw_command_defaults() {
        let args = Args::try_parse_from([
            "bikeshare",
            "--data-dir",
            "/srv/trips",
            "raw",
            "--page-size",
            "20",
            "--city",
            "chicago",
            "--day",
            "Friday",
        ])
        .unwrap();

        assert_eq!(args.data_dir, Some(PathBuf::from("/srv/trips")));
        assert_eq!(args.page_size, Some(20));
        let Some(Commands::Raw(raw)) = args.command else {
            panic!("expected raw command");
        };
        assert_eq!(raw.offset, 0);
        assert_eq!(raw.rows, None);
        assert_eq!(
            raw.selection.filter().unwrap().day,
            Selection::Only(DayOfWeek::Friday)
        );
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["bikeshare", "-q", "-v"]).is_err());
        let args = Args::try_parse_from(["bikeshare", "-q"]).unwrap();
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn test_all_families() {
        assert_eq!(FamilyChoice::All.families().len(), 4);
    }
}
