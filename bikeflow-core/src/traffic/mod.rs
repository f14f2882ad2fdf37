//! Per-station traffic aggregation
//!
//! Every pass produces a fresh [`TrafficSnapshot`]; nothing is carried over
//! from a previous pass, so aggregating the same inputs twice yields the
//! same counts.

use hashbrown::HashMap;
use serde::Serialize;

use crate::{Station, StationId, Trip};

/// Ratio reported for stations without traffic
pub const BALANCED_FLOW_RATIO: f64 = 0.5;

/// Arrival and departure counts for one station
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationTraffic {
    pub station_id: StationId,
    pub arrivals: u64,
    pub departures: u64,
    pub total_traffic: u64,
}

impl StationTraffic {
    fn new(station_id: StationId, arrivals: u64, departures: u64) -> Self {
        Self {
            station_id,
            arrivals,
            departures,
            total_traffic: arrivals + departures,
        }
    }

    /// `departures / total_traffic`, or [`BALANCED_FLOW_RATIO`] without traffic
    #[allow(clippy::cast_precision_loss)]
    pub fn flow_ratio(&self) -> f64 {
        if self.total_traffic == 0 {
            BALANCED_FLOW_RATIO
        } else {
            self.departures as f64 / self.total_traffic as f64
        }
    }
}

/// Result of one aggregation pass, in station order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrafficSnapshot {
    stations: Vec<StationTraffic>,
    trips_considered: usize,
    max_total_traffic: u64,
}

impl TrafficSnapshot {
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StationTraffic> {
        self.stations.iter()
    }

    pub fn as_slice(&self) -> &[StationTraffic] {
        &self.stations
    }

    pub fn get(&self, id: &str) -> Option<&StationTraffic> {
        self.stations.iter().find(|t| t.station_id.as_str() == id)
    }

    /// Number of trips fed into the pass, matched or not
    pub fn trips_considered(&self) -> usize {
        self.trips_considered
    }

    /// Upper end of the radius scale domain
    pub fn max_total_traffic(&self) -> u64 {
        self.max_total_traffic
    }

    pub fn total_arrivals(&self) -> u64 {
        self.stations.iter().map(|t| t.arrivals).sum()
    }

    pub fn total_departures(&self) -> u64 {
        self.stations.iter().map(|t| t.departures).sum()
    }
}

/// Counts departures by start station and arrivals by end station.
///
/// Trips referencing unknown stations simply have no consuming station.
/// Runs in O(trips + stations) and does not assume any ordering of `trips`.
pub fn aggregate<'a, I>(stations: &[Station], trips: I) -> TrafficSnapshot
where
    I: IntoIterator<Item = &'a Trip>,
{
    let mut departures: HashMap<&str, u64> = HashMap::with_capacity(stations.len());
    let mut arrivals: HashMap<&str, u64> = HashMap::with_capacity(stations.len());
    let mut trips_considered = 0usize;

    for trip in trips {
        *departures
            .entry(trip.start_station_id.as_str())
            .or_default() += 1;
        *arrivals.entry(trip.end_station_id.as_str()).or_default() += 1;
        trips_considered += 1;
    }

    let stations: Vec<StationTraffic> = stations
        .iter()
        .map(|station| {
            let id = station.id.as_str();
            StationTraffic::new(
                station.id.clone(),
                arrivals.get(id).copied().unwrap_or(0),
                departures.get(id).copied().unwrap_or(0),
            )
        })
        .collect();

    let max_total_traffic = stations.iter().map(|t| t.total_traffic).max().unwrap_or(0);

    TrafficSnapshot {
        stations,
        trips_considered,
        max_total_traffic,
    }
}
