//! Data model for the station overlay
//!
//! Stations and trips are immutable for the whole session; derived traffic
//! lives in [`crate::traffic::TrafficSnapshot`].

pub mod station;
pub mod trip;

pub use station::{Station, StationId, StationRegistry};
pub use trip::{Trip, TripDataset};
