use chrono::NaiveDateTime;
use serde::Deserialize;

use super::de::deserialize_timestamp;

/// Station record; `short_name` is the key trips refer to
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FeedStation {
    pub short_name: String,
    pub lon: f64,
    pub lat: f64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Trip record; extra columns of the trip log are ignored
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FeedTrip {
    #[serde(default)]
    pub start_station_id: String,
    #[serde(default)]
    pub end_station_id: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub started_at: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub ended_at: NaiveDateTime,
}

/// `{"data": {"stations": [...]}}` of a GBFS `station_information` feed
#[derive(Debug, Deserialize)]
pub(super) struct GbfsEnvelope {
    pub data: GbfsStations,
}

#[derive(Debug, Deserialize)]
pub(super) struct GbfsStations {
    pub stations: Vec<serde_json::Value>,
}
