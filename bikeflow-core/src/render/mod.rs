//! Binding of scaled station data to persistent circle elements
//!
//! Elements are keyed by station id: persisting stations keep their element
//! identity across passes, new stations create elements and vanished
//! stations drop theirs.

mod binding;
mod projection;
mod to_geojson;

pub use binding::{
    CircleElement, ElementId, Reconciliation, RenderBinding, StationDatum, reconcile,
};
pub use projection::{MAX_MERCATOR_LATITUDE, Projection, TILE_SIZE, WebMercatorView};
