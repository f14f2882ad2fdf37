//! Time-of-day filter and trip selection
//!
//! A trip is selected by `AtMinute(m)` when either of its endpoints falls
//! within [`WINDOW_MINUTES`] of `m`. Only the time of day is compared; the
//! window does not wrap across midnight.

mod label;

use std::fmt;

use chrono::Timelike;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{MINUTES_PER_DAY, MinuteOfDay, Trip, WINDOW_MINUTES};

pub use label::{UNFILTERED_LABEL, time_label};

/// Signal value meaning "no filter"
pub const UNFILTERED_SIGNAL: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(
    tag = "kind",
    content = "minute",
    rename_all = "snake_case",
    from = "RawTimeFilter"
)]
pub enum TimeFilter {
    #[default]
    Unfiltered,
    AtMinute(MinuteOfDay),
}

/// Wire form of [`TimeFilter`] before the minute is range-checked
#[derive(Deserialize)]
#[serde(tag = "kind", content = "minute", rename_all = "snake_case")]
enum RawTimeFilter {
    Unfiltered,
    AtMinute(i64),
}

impl From<RawTimeFilter> for TimeFilter {
    fn from(raw: RawTimeFilter) -> Self {
        match raw {
            RawTimeFilter::Unfiltered => Self::Unfiltered,
            RawTimeFilter::AtMinute(minute) => Self::from_signal(minute),
        }
    }
}

impl TimeFilter {
    /// `AtMinute` for a valid minute of day, `None` otherwise
    pub fn at_minute(minute: MinuteOfDay) -> Option<Self> {
        (minute < MINUTES_PER_DAY).then_some(Self::AtMinute(minute))
    }

    /// Interprets a slider value: `-1` and anything outside `0..=1439`
    /// are `Unfiltered`.
    pub fn from_signal(value: i64) -> Self {
        MinuteOfDay::try_from(value)
            .ok()
            .and_then(Self::at_minute)
            .unwrap_or(Self::Unfiltered)
    }

    /// Like [`TimeFilter::from_signal`], for missing values
    pub fn from_optional_signal(value: Option<i64>) -> Self {
        value.map_or(Self::Unfiltered, Self::from_signal)
    }

    /// Parses a raw slider value. Malformed input is `Unfiltered`.
    pub fn parse_signal(raw: &str) -> Self {
        raw.trim()
            .parse::<i64>()
            .map_or(Self::Unfiltered, Self::from_signal)
    }

    /// Slider value for this filter, the inverse of [`TimeFilter::from_signal`]
    pub fn to_signal(self) -> i64 {
        match self {
            Self::Unfiltered => UNFILTERED_SIGNAL,
            Self::AtMinute(minute) => i64::from(minute),
        }
    }

    /// Same filter with an out-of-range minute replaced by `Unfiltered`
    pub fn normalized(self) -> Self {
        Self::from_signal(self.to_signal())
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::AtMinute(_))
    }

    pub fn label(self) -> String {
        time_label(self)
    }

    /// Whether `trip` falls within `window` minutes of the filter minute
    /// at either endpoint.
    pub fn matches(self, trip: &Trip, window: u16) -> bool {
        match self {
            Self::Unfiltered => true,
            Self::AtMinute(minute) => {
                within(trip.start_minute(), minute, window)
                    || within(trip.end_minute(), minute, window)
            }
        }
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn within(at: MinuteOfDay, minute: MinuteOfDay, window: u16) -> bool {
    at.abs_diff(minute) <= window
}

/// Minutes since midnight, ignoring the date
pub fn minutes_of_day<T: Timelike>(time: &T) -> MinuteOfDay {
    // hour < 24 and minute < 60, the product always fits
    #[allow(clippy::cast_possible_truncation)]
    let minutes = (time.hour() * 60 + time.minute()) as MinuteOfDay;
    minutes
}

/// Trips counted under `filter` with the default window
pub fn select_trips(trips: &[Trip], filter: TimeFilter) -> Vec<&Trip> {
    select_trips_within(trips, filter, WINDOW_MINUTES)
}

/// Trips counted under `filter`, with an explicit window half-width.
///
/// Preserves the input order.
pub fn select_trips_within(trips: &[Trip], filter: TimeFilter, window: u16) -> Vec<&Trip> {
    match filter {
        TimeFilter::Unfiltered => trips.iter().collect(),
        TimeFilter::AtMinute(_) => trips
            .par_iter()
            .filter(|trip| filter.matches(trip, window))
            .collect(),
    }
}
