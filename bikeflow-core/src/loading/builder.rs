use std::path::Path;

use log::{info, warn};

use super::config::DatasetConfig;
use super::dataset::{
    StationFormat, deserialize_csv_file, deserialize_station_json_file, stations_from_feed,
    trips_from_feed,
};
use crate::{Error, StationRegistry, TripDataset};

/// Loads both datasets. Any failure here is fatal for the session.
///
/// # Errors
///
/// Returns an error if a file is missing or unreadable, lacks the required
/// columns, or if no usable station remains.
pub fn load_datasets(config: &DatasetConfig) -> Result<(StationRegistry, TripDataset), Error> {
    validate_config(config)?;

    info!("Loading stations: {}", config.stations_path.display());
    let registry = load_stations(&config.stations_path)?;

    info!("Loading trips: {}", config.trips_path.display());
    let trips = load_trips(&config.trips_path)?;

    validate_trip_station_overlap(&registry, &trips);

    info!(
        "Datasets loaded: {} stations, {} trips",
        registry.len(),
        trips.len()
    );
    Ok((registry, trips))
}

/// Loads the station list, choosing the format from the file extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds no usable station.
pub fn load_stations(path: &Path) -> Result<StationRegistry, Error> {
    let parsed = match StationFormat::from_path(path) {
        StationFormat::Csv => deserialize_csv_file(path, &["short_name", "lon", "lat"])?,
        StationFormat::Json => deserialize_station_json_file(path)?,
    };
    if parsed.skipped > 0 {
        warn!(
            "Skipped {} malformed station records in {}",
            parsed.skipped,
            path.display()
        );
    }

    let registry = StationRegistry::new(stations_from_feed(parsed.records));
    if registry.is_empty() {
        return Err(Error::EmptyDataset(format!(
            "no usable stations in {}",
            path.display()
        )));
    }
    Ok(registry)
}

/// Loads the trip log.
///
/// # Errors
///
/// Returns an error if the file cannot be read or lacks the trip columns.
pub fn load_trips(path: &Path) -> Result<TripDataset, Error> {
    let parsed = deserialize_csv_file(
        path,
        &["start_station_id", "end_station_id", "started_at", "ended_at"],
    )?;
    if parsed.skipped > 0 {
        warn!(
            "Skipped {} malformed trip records in {}",
            parsed.skipped,
            path.display()
        );
    }

    let trips = trips_from_feed(parsed.records);
    if trips.is_empty() {
        warn!("Trip log {} holds no usable trips", path.display());
    }
    Ok(trips)
}

fn validate_config(config: &DatasetConfig) -> Result<(), Error> {
    for path in [&config.stations_path, &config.trips_path] {
        if !path.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Dataset not found: {}", path.display()),
            )));
        }
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn validate_trip_station_overlap(registry: &StationRegistry, trips: &TripDataset) {
    let unmatched = trips
        .iter()
        .filter(|trip| {
            !registry.contains(trip.start_station_id.as_str())
                && !registry.contains(trip.end_station_id.as_str())
        })
        .count();

    if unmatched > 0 {
        let percentage = (unmatched as f64 / trips.len() as f64) * 100.0;
        warn!(
            "{unmatched} of {} trips ({percentage:.1}%) reference no known station at either end. \
            They will not contribute to any station's traffic.",
            trips.len()
        );
    }
}
