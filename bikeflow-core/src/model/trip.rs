use chrono::NaiveDateTime;

use super::StationId;
use crate::MinuteOfDay;
use crate::filter::minutes_of_day;

/// One rental, from a start station to an end station
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_station_id: StationId,
    pub end_station_id: StationId,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
}

impl Trip {
    pub fn new(
        start_station_id: impl Into<StationId>,
        end_station_id: impl Into<StationId>,
        started_at: NaiveDateTime,
        ended_at: NaiveDateTime,
    ) -> Self {
        Self {
            start_station_id: start_station_id.into(),
            end_station_id: end_station_id.into(),
            started_at,
            ended_at,
        }
    }

    pub fn start_minute(&self) -> MinuteOfDay {
        minutes_of_day(&self.started_at)
    }

    pub fn end_minute(&self) -> MinuteOfDay {
        minutes_of_day(&self.ended_at)
    }
}

/// Trip log, loaded once per session
#[derive(Debug, Clone, Default)]
pub struct TripDataset {
    trips: Vec<Trip>,
}

impl TripDataset {
    pub fn new(trips: Vec<Trip>) -> Self {
        Self { trips }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn as_slice(&self) -> &[Trip] {
        &self.trips
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trip> {
        self.trips.iter()
    }
}

impl From<Vec<Trip>> for TripDataset {
    fn from(trips: Vec<Trip>) -> Self {
        Self::new(trips)
    }
}

impl FromIterator<Trip> for TripDataset {
    fn from_iter<I: IntoIterator<Item = Trip>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
