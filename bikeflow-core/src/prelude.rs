pub use crate::{MINUTES_PER_DAY, MinuteOfDay, WINDOW_MINUTES};

// Re-export key components
pub use crate::controller::{ControllerState, Frame, ReactiveController, Signal, coalesce};
pub use crate::filter::{TimeFilter, minutes_of_day, select_trips, select_trips_within};
pub use crate::loading::{DatasetConfig, load_datasets, load_stations, load_trips};
pub use crate::model::{Station, StationId, StationRegistry, Trip, TripDataset};
pub use crate::render::{
    CircleElement, ElementId, Projection, Reconciliation, RenderBinding, StationDatum,
    WebMercatorView, reconcile,
};
pub use crate::scale::{FlowRatioScale, RadiusScale, derive_radius_scale};
pub use crate::traffic::{StationTraffic, TrafficSnapshot, aggregate};

pub use crate::Error;
