use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::de::DeserializeOwned;

use super::raw_types::{FeedStation, GbfsEnvelope};
use crate::Error;

/// Records that deserialized, and how many rows did not
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

impl<T> Parsed<T> {
    fn from_results<E>(results: impl IntoIterator<Item = Result<T, E>>) -> Self {
        let mut records = Vec::new();
        let mut skipped = 0;
        for result in results {
            match result {
                Ok(record) => records.push(record),
                Err(_) => skipped += 1,
            }
        }
        records.shrink_to_fit();
        Self { records, skipped }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationFormat {
    Csv,
    Json,
}

impl StationFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

fn open(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|e| {
        Error::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        ))
    })
}

/// Deserializes a CSV file, skipping rows that do not fit `T`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a required column is
/// missing from the header.
pub fn deserialize_csv_file<T>(path: &Path, required: &[&str]) -> Result<Parsed<T>, Error>
where
    T: DeserializeOwned,
{
    deserialize_csv_reader(BufReader::new(open(path)?), required)
}

/// Same as [`deserialize_csv_file`], from any reader.
///
/// # Errors
///
/// Returns an error if the header cannot be read or lacks a required column.
pub fn deserialize_csv_reader<T, R>(reader: R, required: &[&str]) -> Result<Parsed<T>, Error>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(Error::InvalidData(format!(
            "missing columns: {}",
            missing.join(", ")
        )));
    }

    Ok(Parsed::from_results(reader.deserialize::<T>()))
}

/// Deserializes stations from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a station list.
pub fn deserialize_station_json_file(path: &Path) -> Result<Parsed<FeedStation>, Error> {
    deserialize_station_json(BufReader::new(open(path)?))
}

/// Accepts either a plain array of station records or a GBFS
/// `station_information` document.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON or has neither shape.
pub fn deserialize_station_json<R: Read>(reader: R) -> Result<Parsed<FeedStation>, Error> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;

    let entries = match value {
        serde_json::Value::Array(entries) => entries,
        other => {
            serde_json::from_value::<GbfsEnvelope>(other)
                .map_err(|e| Error::InvalidData(format!("unrecognized station document: {e}")))?
                .data
                .stations
        }
    };

    Ok(Parsed::from_results(
        entries.into_iter().map(serde_json::from_value::<FeedStation>),
    ))
}
