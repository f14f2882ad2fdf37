use std::path::PathBuf;

use serde::Deserialize;

/// Locations of the two datasets a session is built from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetConfig {
    /// Station list, CSV or JSON (plain array or GBFS `station_information`)
    pub stations_path: PathBuf,
    /// Trip log, CSV
    pub trips_path: PathBuf,
}

impl DatasetConfig {
    pub fn new(stations_path: impl Into<PathBuf>, trips_path: impl Into<PathBuf>) -> Self {
        Self {
            stations_path: stations_path.into(),
            trips_path: trips_path.into(),
        }
    }
}
