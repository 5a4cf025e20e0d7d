//! Dataset registry: city key to source file, source file to frame.
//!
//! Cities come from a fixed set. Each city's CSV lives under the configured
//! data directory and is read whole into a Polars `DataFrame`, every column
//! as text; typing and derivation happen in [`crate::deriver`].

use crate::config::Config;
use crate::constants::columns::{END_TIME, REQUIRED, TRIP_DURATION};
use crate::deriver::derive_table;
use crate::error::{BikeshareError, Result};
use crate::models::{City, LoadSummary, TripTable};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Registry mapping each supported city to its backing CSV file
#[derive(Debug, Clone)]
pub struct DatasetRegistry {
    data_dir: PathBuf,
    files: BTreeMap<City, String>,
}

impl DatasetRegistry {
    /// Registry using the default file name for every city
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let files = City::ALL
            .into_iter()
            .map(|city| (city, city.default_file().to_string()))
            .collect();

        Self {
            data_dir: data_dir.into(),
            files,
        }
    }

    /// Registry honouring the data directory and file overrides in `config`
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new(&config.data_dir);
        for city in City::ALL {
            registry
                .files
                .insert(city, config.dataset_file(city).to_string());
        }
        registry
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Resolve a user-supplied city key
    pub fn resolve(&self, key: &str) -> Result<City> {
        key.parse()
    }

    /// Path of the CSV file backing `city`
    pub fn path_for(&self, city: City) -> PathBuf {
        let file = self
            .files
            .get(&city)
            .map(String::as_str)
            .unwrap_or_else(|| city.default_file());
        self.data_dir.join(file)
    }

    /// Cities whose source file is present on disk
    pub fn available_cities(&self) -> Vec<City> {
        City::ALL
            .into_iter()
            .filter(|city| self.path_for(*city).is_file())
            .collect()
    }

    /// Read a city's CSV into a frame and check required columns
    pub fn load_frame(&self, city: City) -> Result<DataFrame> {
        let path = self.path_for(city);
        debug!("Reading dataset for {}: {}", city, path.display());

        if !path.is_file() {
            return Err(BikeshareError::dataset_unreadable(&path, "file not found"));
        }

        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.clone()))
            .and_then(|reader| reader.finish())
            .map_err(|e| BikeshareError::dataset_unreadable(&path, e.to_string()))?;

        check_columns(&path, &frame)?;
        Ok(frame)
    }

    /// Load a city's dataset and derive its trip table
    pub fn load(&self, city: City) -> Result<(TripTable, LoadSummary)> {
        let frame = self.load_frame(city)?;
        let (table, summary) = derive_table(city, &frame)?;

        info!(
            "Loaded {} trips for {} from {} ({} rows skipped)",
            summary.rows_kept,
            city,
            self.path_for(city).display(),
            summary.rows_skipped
        );

        Ok((table, summary))
    }
}

/// Best-effort presence check for the columns every dataset needs
fn check_columns(path: &Path, frame: &DataFrame) -> Result<()> {
    let names: Vec<&str> = frame
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();

    if let Some(missing) = REQUIRED.iter().find(|column| !names.contains(column)) {
        return Err(BikeshareError::dataset_unreadable(
            path,
            format!("missing required column '{}'", missing),
        ));
    }

    if !names.contains(&TRIP_DURATION) && !names.contains(&END_TIME) {
        return Err(BikeshareError::dataset_unreadable(
            path,
            format!(
                "needs either '{}' or '{}' to compute trip durations",
                TRIP_DURATION, END_TIME
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CHICAGO_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Subscriber,Male,1981.0
";

    fn write_dataset(dir: &TempDir, file: &str, contents: &str) {
        fs::write(dir.path().join(file), contents).unwrap();
    }

    #[test]
    fn test_path_for_uses_overrides() {
        let config = Config::default()
            .with_data_dir("/srv/trips")
            .with_dataset_file(City::Washington, "dc.csv");
        let registry = DatasetRegistry::from_config(&config);

        assert_eq!(
            registry.path_for(City::Washington),
            PathBuf::from("/srv/trips/dc.csv")
        );
        assert_eq!(
            registry.path_for(City::NewYorkCity),
            PathBuf::from("/srv/trips/new_york_city.csv")
        );
    }

    #[test]
    fn test_path_for_toml_override_with_display_name_key() {
        let config = Config::from_toml(
            r#"
data_dir = "/srv/trips"

[datasets]
"New York City" = "nyc_2017.csv"
"#,
        )
        .unwrap();
        let registry = DatasetRegistry::from_config(&config);

        assert_eq!(
            registry.path_for(City::NewYorkCity),
            PathBuf::from("/srv/trips/nyc_2017.csv")
        );
    }

    #[test]
    fn test_resolve_unknown_city() {
        let registry = DatasetRegistry::new("/srv/trips");
        assert_eq!(registry.resolve("Chicago").unwrap(), City::Chicago);
        assert!(matches!(
            registry.resolve("paris"),
            Err(BikeshareError::DatasetNotFound { .. })
        ));
    }

    #[test]
    fn test_available_cities() {
        let temp_dir = TempDir::new().unwrap();
        write_dataset(&temp_dir, "chicago.csv", CHICAGO_CSV);

        let registry = DatasetRegistry::new(temp_dir.path());
        assert_eq!(registry.available_cities(), vec![City::Chicago]);
    }

    #[test]
    fn test_load_frame_reads_all_rows() {
        let temp_dir = TempDir::new().unwrap();
        write_dataset(&temp_dir, "chicago.csv", CHICAGO_CSV);

        let registry = DatasetRegistry::new(temp_dir.path());
        let frame = registry.load_frame(City::Chicago).unwrap();
        assert_eq!(frame.height(), 3);
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let registry = DatasetRegistry::new(temp_dir.path());

        let err = registry.load(City::Washington).unwrap_err();
        assert!(matches!(err, BikeshareError::DatasetUnreadable { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_missing_required_column_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        write_dataset(
            &temp_dir,
            "chicago.csv",
            "Start Time,End Time,Start Station,End Station\n\
             2017-01-01 00:07:57,2017-01-01 00:20:53,A,B\n",
        );

        let registry = DatasetRegistry::new(temp_dir.path());
        let err = registry.load_frame(City::Chicago).unwrap_err();
        match err {
            BikeshareError::DatasetUnreadable { reason, .. } => {
                assert!(reason.contains("User Type"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_derives_table() {
        let temp_dir = TempDir::new().unwrap();
        write_dataset(&temp_dir, "chicago.csv", CHICAGO_CSV);

        let registry = DatasetRegistry::new(temp_dir.path());
        let (table, summary) = registry.load(City::Chicago).unwrap();

        assert_eq!(table.city, City::Chicago);
        assert_eq!(table.len(), 3);
        assert_eq!(summary.rows_read, 3);
        assert_eq!(summary.rows_skipped, 0);
        assert!(table.schema.has_gender);
        assert!(table.schema.has_birth_year);
    }
}
