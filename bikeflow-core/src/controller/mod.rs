//! Reactive controller: filter change → selection → aggregation → scales →
//! rebind.
//!
//! Every transition runs synchronously to completion, so the state observed
//! after a call always reflects that call's signal.

mod signal;

use std::time::Instant;

use log::debug;
use serde::Serialize;

pub use signal::{Signal, coalesce};

use crate::filter::select_trips;
use crate::render::{CircleElement, Projection, Reconciliation, RenderBinding, StationDatum};
use crate::scale::{FlowRatioScale, RadiusScale, derive_radius_scale};
use crate::traffic::aggregate;
use crate::{StationRegistry, TimeFilter, TrafficSnapshot, TripDataset};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    /// View consistent with the current filter
    #[default]
    Idle,
    Recomputing,
}

/// Everything a drawing surface needs for the current view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub filter: TimeFilter,
    pub label: String,
    pub snapshot: TrafficSnapshot,
    pub radius_scale: RadiusScale,
    pub elements: Vec<CircleElement>,
}

/// Orchestrates recomputation for one session
#[derive(Debug)]
pub struct ReactiveController<P: Projection> {
    registry: StationRegistry,
    trips: TripDataset,
    projection: P,
    filter: TimeFilter,
    state: ControllerState,
    snapshot: TrafficSnapshot,
    radius_scale: RadiusScale,
    flow_scale: FlowRatioScale,
    binding: RenderBinding,
}

impl<P: Projection> ReactiveController<P> {
    /// Creates the controller and renders the unfiltered view.
    pub fn new(registry: StationRegistry, trips: TripDataset, projection: P) -> Self {
        let mut controller = Self {
            registry,
            trips,
            projection,
            filter: TimeFilter::Unfiltered,
            state: ControllerState::Idle,
            snapshot: TrafficSnapshot::default(),
            radius_scale: RadiusScale::new(0, crate::scale::UNFILTERED_RADIUS_RANGE),
            flow_scale: FlowRatioScale::default(),
            binding: RenderBinding::new(),
        };
        controller.recompute();
        controller
    }

    pub fn filter(&self) -> TimeFilter {
        self.filter
    }

    pub fn label(&self) -> String {
        self.filter.label()
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn snapshot(&self) -> &TrafficSnapshot {
        &self.snapshot
    }

    pub fn radius_scale(&self) -> &RadiusScale {
        &self.radius_scale
    }

    pub fn elements(&self) -> &[CircleElement] {
        self.binding.elements()
    }

    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    pub fn trips(&self) -> &TripDataset {
        &self.trips
    }

    pub fn projection(&self) -> &P {
        &self.projection
    }

    /// Mutable access to the view; follow up with
    /// [`ReactiveController::on_view_transform_changed`].
    pub fn projection_mut(&mut self) -> &mut P {
        &mut self.projection
    }

    pub fn frame(&self) -> Frame {
        Frame {
            filter: self.filter,
            label: self.label(),
            snapshot: self.snapshot.clone(),
            radius_scale: self.radius_scale,
            elements: self.binding.elements().to_vec(),
        }
    }

    /// Dispatches one external signal.
    pub fn handle(&mut self, signal: Signal) -> Reconciliation<CircleElement> {
        match signal {
            Signal::FilterChanged { filter } => self.set_filter(filter),
            Signal::ViewTransformChanged => self.on_view_transform_changed(),
        }
    }

    /// Dispatches a queue of pending signals, skipping superseded ones.
    pub fn handle_batch<I>(&mut self, signals: I) -> Reconciliation<CircleElement>
    where
        I: IntoIterator<Item = Signal>,
    {
        coalesce(signals).map_or_else(Reconciliation::default, |signal| self.handle(signal))
    }

    /// Switches the filter and reruns the whole pipeline. A minute outside
    /// the day is treated as `Unfiltered`.
    pub fn set_filter(&mut self, filter: TimeFilter) -> Reconciliation<CircleElement> {
        self.filter = filter.normalized();
        self.recompute()
    }

    /// Re-derives element positions after the projection changed.
    pub fn on_view_transform_changed(&mut self) -> Reconciliation<CircleElement> {
        let changes = self.binding.reproject(&self.projection);
        debug!("Repositioned {} station elements", changes.updated.len());
        changes
    }

    /// Mutates the view and repositions the elements in one step.
    pub fn update_view<F>(&mut self, update: F) -> Reconciliation<CircleElement>
    where
        F: FnOnce(&mut P),
    {
        update(&mut self.projection);
        self.on_view_transform_changed()
    }

    /// Swaps the station set and rebinds under the current filter.
    pub fn replace_registry(&mut self, registry: StationRegistry) -> Reconciliation<CircleElement> {
        self.registry = registry;
        self.recompute()
    }

    fn recompute(&mut self) -> Reconciliation<CircleElement> {
        self.state = ControllerState::Recomputing;
        let started = Instant::now();

        let selected = select_trips(self.trips.as_slice(), self.filter);
        let selected_count = selected.len();
        self.snapshot = aggregate(self.registry.as_slice(), selected);
        self.radius_scale = derive_radius_scale(&self.snapshot, self.filter.is_active());

        let data = StationDatum::encode(
            &self.registry,
            &self.snapshot,
            &self.radius_scale,
            &self.flow_scale,
        );
        let changes = self.binding.bind(&data, &self.projection);

        debug!(
            "Filter {}: {selected_count} of {} trips, max traffic {}, {} created / {} updated / {} removed in {:?}",
            self.filter,
            self.trips.len(),
            self.snapshot.max_total_traffic(),
            changes.created.len(),
            changes.updated.len(),
            changes.removed.len(),
            started.elapsed()
        );

        self.state = ControllerState::Idle;
        changes
    }
}
