//! Terminal rendering of reports and raw records

use crate::constants::MAX_COLUMN_WIDTH;
use crate::constants::columns::{
    BIRTH_YEAR, END_STATION, END_TIME, GENDER, START_STATION, START_TIME, TRIP_DURATION,
    USER_TYPE,
};
use crate::models::{City, FilterSpec, LoadSummary, TableSchema, TripRecord};
use crate::stats::{Outcome, StatisticFamily, StatisticReport, StatisticTable, thousands};
use colored::*;
use std::io::{self, Write};

/// Clear the terminal and move the cursor home
pub fn clear_screen() {
    print!("\x1b[2J\x1b[1;1H");
    let _ = io::stdout().flush();
}

pub fn print_welcome() {
    println!("{}", "Hello! Let's explore some US bikeshare data!".bright_green().bold());
}

/// Context line: city, filters and record count
pub fn format_inputs(city: City, filter: &FilterSpec, record_count: usize) -> String {
    format!(
        "City: {}   Month: {}   Day: {}   Number of Records: {}",
        city,
        filter.month,
        filter.day,
        thousands(record_count as u64)
    )
}

pub fn print_inputs(city: City, filter: &FilterSpec, record_count: usize) {
    println!("{}\n", format_inputs(city, filter, record_count).bright_white());
}

/// Note on rows dropped at load, if any were
pub fn format_load_notice(summary: &LoadSummary) -> Option<String> {
    (summary.rows_skipped > 0).then(|| {
        format!(
            "Skipped {} of {} rows without a usable start time",
            thousands(summary.rows_skipped as u64),
            thousands(summary.rows_read as u64)
        )
    })
}

pub fn print_load_notice(summary: &LoadSummary) {
    if let Some(notice) = format_load_notice(summary) {
        println!("{}", notice.yellow());
    }
}

/// Cut text to the display width, marking the cut with `...`
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Plain-text lines for one statistic table, one line per bucket
pub fn format_table(table: &StatisticTable) -> Vec<String> {
    let label_width = table
        .entries
        .keys()
        .map(|bucket| bucket.to_string().len())
        .max()
        .unwrap_or(0);

    table
        .entries
        .iter()
        .map(|(bucket, outcome)| {
            let body = match outcome {
                Outcome::Metrics(metrics) => metrics
                    .iter()
                    .map(|metric| {
                        format!(
                            "{}: {}",
                            metric.name,
                            truncate(&metric.value.to_string(), MAX_COLUMN_WIDTH)
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("   "),
                Outcome::NoData(reason) => reason.to_string(),
            };
            format!("  {:<width$}   {}", bucket.to_string(), body, width = label_width)
        })
        .collect()
}

/// Explanatory notes printed under a family's tables
pub fn legend(family: StatisticFamily) -> &'static [&'static str] {
    match family {
        StatisticFamily::Time => &[],
        StatisticFamily::Station => &[
            "Trips show Start Station and End Station separated by '->'.",
            "Count shows how many trips there were for that mode.",
            "Range shows how many unique values there were.",
        ],
        StatisticFamily::Duration => &[
            "Sum is the total time travelled; Mean is the average trip length.",
        ],
        StatisticFamily::User => &[
            "Percentages are of the trips with a recorded value.",
            "Birth Year: Max means youngest, Min means oldest.",
        ],
    }
}

pub fn print_report(report: &StatisticReport) {
    println!("{}", report.family.title().bright_green().bold());
    print_inputs(report.city, &report.filter, report.record_count);

    for table in &report.tables {
        println!("{}", table.name.bright_cyan().bold());
        println!("{}", "-".repeat(table.name.len()).bright_cyan());
        for line in format_table(table) {
            println!("{}", line);
        }
        println!();
    }

    let notes = legend(report.family);
    if !notes.is_empty() {
        println!("{}", "Legend:".bold());
        for note in notes {
            println!("  {}", note);
        }
        println!();
    }
}

/// Source value of a known column, as text
pub fn source_value(record: &TripRecord, column: &str) -> Option<String> {
    match column {
        START_TIME => Some(record.start_time.to_string()),
        END_TIME => record.end_time.map(|time| time.to_string()),
        TRIP_DURATION => record.duration_secs.map(|secs| secs.to_string()),
        START_STATION => record.start_station.clone(),
        END_STATION => record.end_station.clone(),
        USER_TYPE => record.user_type.clone(),
        GENDER => record.gender.clone(),
        BIRTH_YEAR => record.birth_year.clone(),
        _ => None,
    }
}

const KNOWN_COLUMNS: [&str; 8] = [
    START_TIME,
    END_TIME,
    TRIP_DURATION,
    START_STATION,
    END_STATION,
    USER_TYPE,
    GENDER,
    BIRTH_YEAR,
];

/// Plain-text lines for one raw record, in schema column order
pub fn format_record(schema: &TableSchema, record: &TripRecord) -> Vec<String> {
    let columns: Vec<&str> = schema
        .columns
        .iter()
        .map(String::as_str)
        .filter(|column| KNOWN_COLUMNS.contains(column))
        .collect();
    let width = columns.iter().map(|column| column.len()).max().unwrap_or(0);

    columns
        .into_iter()
        .map(|column| {
            let value = source_value(record, column).unwrap_or_default();
            format!(
                "  {:<width$}  {}",
                column,
                truncate(&value, MAX_COLUMN_WIDTH),
                width = width
            )
        })
        .collect()
}

/// Print records numbered from `first_index`
pub fn print_records(schema: &TableSchema, records: &[TripRecord], first_index: usize) {
    if records.is_empty() {
        println!("No records to show.");
        return;
    }

    for (i, record) in records.iter().enumerate() {
        println!("{}", format!("Record {}", first_index + i + 1).bold());
        for line in format_record(schema, record) {
            println!("{}", line);
        }
    }
    println!();
}
