use log::warn;

use super::raw_types::{FeedStation, FeedTrip};
use crate::{Station, Trip, TripDataset};

/// Converts raw station records, dropping those without a key or with
/// coordinates outside the valid range.
pub fn stations_from_feed(stations: Vec<FeedStation>) -> Vec<Station> {
    let total = stations.len();
    let stations: Vec<Station> = stations
        .into_iter()
        .filter_map(|feed_station| {
            let short_name = feed_station.short_name.trim();
            if short_name.is_empty() || !valid_position(feed_station.lon, feed_station.lat) {
                return None;
            }
            let station = Station::new(short_name, feed_station.lon, feed_station.lat);
            Some(match feed_station.name {
                Some(name) if !name.is_empty() => station.with_name(name),
                _ => station,
            })
        })
        .collect();

    let dropped = total - stations.len();
    if dropped > 0 {
        warn!("Dropped {dropped} stations without a short_name or with invalid coordinates");
    }
    stations
}

fn valid_position(lon: f64, lat: f64) -> bool {
    lon.is_finite()
        && lat.is_finite()
        && (-180.0..=180.0).contains(&lon)
        && (-90.0..=90.0).contains(&lat)
}

/// Converts raw trip records; station ids are kept as-is, including ids no
/// station carries.
pub fn trips_from_feed(trips: Vec<FeedTrip>) -> TripDataset {
    trips
        .into_iter()
        .map(|feed_trip| {
            Trip::new(
                feed_trip.start_station_id.trim(),
                feed_trip.end_station_id.trim(),
                feed_trip.started_at,
                feed_trip.ended_at,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(short_name: &str, lon: f64, lat: f64) -> FeedStation {
        FeedStation {
            short_name: short_name.to_string(),
            lon,
            lat,
            name: None,
        }
    }

    #[test]
    fn test_invalid_stations_are_dropped() {
        let stations = stations_from_feed(vec![
            feed("A", -87.6, 41.9),
            feed("", -87.6, 41.9),
            feed("B", f64::NAN, 41.9),
            feed("C", -87.6, 91.0),
            feed(" D ", 2.35, 48.85),
        ]);

        let ids: Vec<_> = stations.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "D"]);
    }

    #[test]
    fn test_station_names_are_kept() {
        let mut named = feed("A", 0.0, 0.0);
        named.name = Some("Alpha".to_string());
        let stations = stations_from_feed(vec![named]);

        assert_eq!(stations[0].name.as_deref(), Some("Alpha"));
    }
}
