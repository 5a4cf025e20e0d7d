//! Statistic result structures.
//!
//! A [`StatisticReport`] holds one [`StatisticTable`] per statistic. Each
//! table maps a bucket (the whole view, a month, or a weekday) to either a
//! list of named metric values or a no-data marker. Every value renders
//! display-ready through `Display` and serializes for JSON output.

use crate::models::{City, DayOfWeek, FilterSpec, Month};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Grouping key of a statistic result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Bucket {
    /// Every record in the view
    Overall,
    Month(Month),
    Day(DayOfWeek),
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Overall => f.write_str("Overall"),
            Bucket::Month(month) => write!(f, "{}", month),
            Bucket::Day(day) => write!(f, "{}", day),
        }
    }
}

/// Why a bucket carries no metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum NoData {
    /// No records, or no values for the field, in this bucket
    EmptyGroup,
    /// The dataset lacks the optional source column
    MissingField { field: &'static str },
}

impl fmt::Display for NoData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoData::EmptyGroup => f.write_str("No data"),
            NoData::MissingField { field } => write!(f, "No {} data available", field),
        }
    }
}

/// One display-ready statistic value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    /// Hour of day, 0-23
    Hour(u32),
    Text(String),
    Count(usize),
    /// Category count with its share of the non-missing total
    Share { count: usize, percent: f64 },
    Year(i32),
    TotalDuration { minutes: u64, seconds: u64 },
    MeanMinutes(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Hour(hour) => write!(f, "{}", format_hour(*hour)),
            MetricValue::Text(text) => f.write_str(text),
            MetricValue::Count(count) => f.write_str(&thousands(*count as u64)),
            MetricValue::Share { count, percent } => {
                write!(f, "{} ({:.1}%)", thousands(*count as u64), percent)
            }
            MetricValue::Year(year) => write!(f, "{}", year),
            MetricValue::TotalDuration { minutes, seconds } => {
                write!(f, "{} minutes {} seconds", thousands(*minutes), seconds)
            }
            MetricValue::MeanMinutes(minutes) => write!(f, "{:.2} minutes", minutes),
        }
    }
}

/// 12-hour clock rendering, e.g. `08 AM`, `12 PM`
pub fn format_hour(hour: u32) -> String {
    let suffix = if hour % 24 < 12 { "AM" } else { "PM" };
    let twelve = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{:02} {}", twelve, suffix)
}

/// Integer with comma thousands separators
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub name: String,
    pub value: MetricValue,
}

/// Named metric values in display order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Metrics(pub Vec<Metric>);

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: MetricValue) {
        self.0.push(Metric {
            name: name.into(),
            value,
        });
    }

    pub fn with(mut self, name: impl Into<String>, value: MetricValue) -> Self {
        self.push(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.0
            .iter()
            .find(|metric| metric.name == name)
            .map(|metric| &metric.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Metric> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result for one bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Metrics(Metrics),
    NoData(NoData),
}

impl Outcome {
    pub fn metrics(&self) -> Option<&Metrics> {
        match self {
            Outcome::Metrics(metrics) => Some(metrics),
            Outcome::NoData(_) => None,
        }
    }

    pub fn no_data(&self) -> Option<NoData> {
        match self {
            Outcome::Metrics(_) => None,
            Outcome::NoData(reason) => Some(*reason),
        }
    }
}

/// One statistic across its buckets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticTable {
    pub name: String,
    #[serde(serialize_with = "serialize_entries")]
    pub entries: BTreeMap<Bucket, Outcome>,
}

fn serialize_entries<S>(
    entries: &BTreeMap<Bucket, Outcome>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (bucket, outcome) in entries {
        map.serialize_entry(&bucket.to_string(), outcome)?;
    }
    map.end()
}

impl StatisticTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, bucket: Bucket, outcome: Outcome) {
        self.entries.insert(bucket, outcome);
    }

    pub fn get(&self, bucket: Bucket) -> Option<&Outcome> {
        self.entries.get(&bucket)
    }

    pub fn overall(&self) -> Option<&Outcome> {
        self.get(Bucket::Overall)
    }

    /// Buckets other than `Overall`, in month then weekday order
    pub fn breakdowns(&self) -> impl Iterator<Item = (&Bucket, &Outcome)> {
        self.entries
            .iter()
            .filter(|(bucket, _)| **bucket != Bucket::Overall)
    }
}

/// Which statistic family a report holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticFamily {
    Time,
    Station,
    Duration,
    User,
}

impl StatisticFamily {
    pub const ALL: [StatisticFamily; 4] = [
        StatisticFamily::Time,
        StatisticFamily::Station,
        StatisticFamily::Duration,
        StatisticFamily::User,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            StatisticFamily::Time => "Time Statistics",
            StatisticFamily::Station => "Station Statistics",
            StatisticFamily::Duration => "Trip Duration Statistics",
            StatisticFamily::User => "User Statistics",
        }
    }
}

impl fmt::Display for StatisticFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A full statistic family computed over one view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticReport {
    pub family: StatisticFamily,
    pub city: City,
    pub filter: FilterSpec,
    pub record_count: usize,
    pub tables: Vec<StatisticTable>,
}

impl StatisticReport {
    pub fn table(&self, name: &str) -> Option<&StatisticTable> {
        self.tables.iter().find(|table| table.name == name)
    }
}
