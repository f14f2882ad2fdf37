//! Traffic aggregation and reactive recomputation engine for bike-share
//! station overlays.
//!
//! Stations and trips are loaded once, then every change of the time-of-day
//! filter recomputes per-station traffic from scratch, derives the visual
//! scales and reconciles the result against the previously bound elements.

pub mod controller;
mod error;
pub mod filter;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod render;
pub mod scale;
pub mod traffic;

pub use error::Error;

// Re-export of the main structures
pub use controller::{ControllerState, Frame, ReactiveController, Signal};
pub use filter::TimeFilter;
pub use model::{Station, StationId, StationRegistry, Trip, TripDataset};
pub use render::{ElementId, Projection, Reconciliation, RenderBinding, WebMercatorView};
pub use traffic::{StationTraffic, TrafficSnapshot};

/// Minutes since midnight, `0..=1439`
pub type MinuteOfDay = u16;

/// Number of minutes in a day
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Half-width of the selection window around the filter minute
pub const WINDOW_MINUTES: u16 = 60;
