use std::fmt;

use geo::Point;
use hashbrown::{HashMap, HashSet};
use serde::Serialize;

use super::Projection;
use crate::scale::{FlowRatioScale, RadiusScale};
use crate::{StationId, StationRegistry, TrafficSnapshot};

/// Identity of a bound element, stable for the element's whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ElementId(u64);

impl ElementId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "station-circle-{}", self.0)
    }
}

/// Scaled data for one station, ready to be bound
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationDatum {
    pub key: StationId,
    #[serde(skip)]
    pub geometry: Point<f64>,
    pub arrivals: u64,
    pub departures: u64,
    pub total_traffic: u64,
    pub radius: f64,
    pub flow_ratio: f64,
}

impl StationDatum {
    /// Joins a snapshot with station positions and applies both scales.
    /// Snapshot entries without a registry station are skipped.
    pub fn encode(
        registry: &StationRegistry,
        snapshot: &TrafficSnapshot,
        radius_scale: &RadiusScale,
        flow_scale: &FlowRatioScale,
    ) -> Vec<Self> {
        snapshot
            .iter()
            .filter_map(|traffic| {
                let station = registry.get(traffic.station_id.as_str())?;
                Some(Self {
                    key: traffic.station_id.clone(),
                    geometry: station.geometry,
                    arrivals: traffic.arrivals,
                    departures: traffic.departures,
                    total_traffic: traffic.total_traffic,
                    radius: radius_scale.radius(traffic.total_traffic),
                    flow_ratio: flow_scale.apply(traffic.flow_ratio()),
                })
            })
            .collect()
    }
}

/// Circle attributes as handed to the drawing surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleElement {
    pub id: ElementId,
    pub key: StationId,
    #[serde(skip)]
    pub geometry: Point<f64>,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    #[serde(rename = "flow-ratio")]
    pub flow_ratio: f64,
    pub arrivals: u64,
    pub departures: u64,
    pub total_traffic: u64,
}

impl CircleElement {
    fn assign<P: Projection>(&mut self, datum: &StationDatum, projection: &P) {
        self.geometry = datum.geometry;
        self.r = datum.radius;
        self.flow_ratio = datum.flow_ratio;
        self.arrivals = datum.arrivals;
        self.departures = datum.departures;
        self.total_traffic = datum.total_traffic;
        self.place(projection);
    }

    fn place<P: Projection>(&mut self, projection: &P) {
        let (cx, cy) = projection.project(self.geometry);
        self.cx = cx;
        self.cy = cy;
    }
}

/// Enter / update / exit partition of a keyed data join
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reconciliation<T> {
    pub created: Vec<T>,
    pub updated: Vec<T>,
    pub removed: Vec<T>,
}

impl<T> Default for Reconciliation<T> {
    fn default() -> Self {
        Self {
            created: Vec::new(),
            updated: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<T> Reconciliation<T> {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// Partitions keys into created (only in `next`), updated (in both) and
/// removed (only in `previous`). `created` and `updated` follow the order
/// of `next`, `removed` the order of `previous`. Repeated keys in `next`
/// are bound once.
pub fn reconcile<'a, P, N>(previous: P, next: N) -> Reconciliation<StationId>
where
    P: IntoIterator<Item = &'a StationId>,
    N: IntoIterator<Item = &'a StationId>,
{
    let previous: Vec<&StationId> = previous.into_iter().collect();
    let known: HashSet<&StationId> = previous.iter().copied().collect();
    let mut seen: HashSet<&StationId> = HashSet::new();
    let mut result = Reconciliation::default();

    for key in next {
        if !seen.insert(key) {
            continue;
        }
        if known.contains(key) {
            result.updated.push(key.clone());
        } else {
            result.created.push(key.clone());
        }
    }
    result.removed = previous
        .into_iter()
        .filter(|key| !seen.contains(key))
        .cloned()
        .collect();
    result
}

/// Live circle elements keyed by station id
#[derive(Debug, Clone, Default)]
pub struct RenderBinding {
    elements: Vec<CircleElement>,
    next_id: u64,
}

impl RenderBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[CircleElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&CircleElement> {
        self.elements.iter().find(|e| e.key.as_str() == key)
    }

    /// Binds `data` to the live elements and returns the applied changes.
    /// Element order afterwards follows `data`.
    pub fn bind<P: Projection>(
        &mut self,
        data: &[StationDatum],
        projection: &P,
    ) -> Reconciliation<CircleElement> {
        let plan = reconcile(
            self.elements.iter().map(|e| &e.key),
            data.iter().map(|d| &d.key),
        );

        let mut live: HashMap<StationId, CircleElement> = self
            .elements
            .drain(..)
            .map(|e| (e.key.clone(), e))
            .collect();
        let removed: Vec<CircleElement> = plan
            .removed
            .iter()
            .filter_map(|key| live.remove(key))
            .collect();

        let mut changes = Reconciliation {
            removed,
            ..Reconciliation::default()
        };
        let mut bound: HashSet<&StationId> = HashSet::with_capacity(data.len());

        for datum in data {
            if !bound.insert(&datum.key) {
                continue;
            }
            let element = if let Some(mut element) = live.remove(&datum.key) {
                element.assign(datum, projection);
                changes.updated.push(element.clone());
                element
            } else {
                let mut element = self.create(datum);
                element.assign(datum, projection);
                changes.created.push(element.clone());
                element
            };
            self.elements.push(element);
        }
        changes
    }

    /// Re-derives screen positions only; traffic and radii are untouched.
    pub fn reproject<P: Projection>(&mut self, projection: &P) -> Reconciliation<CircleElement> {
        for element in &mut self.elements {
            element.place(projection);
        }
        Reconciliation {
            updated: self.elements.clone(),
            ..Reconciliation::default()
        }
    }

    fn create(&mut self, datum: &StationDatum) -> CircleElement {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        CircleElement {
            id,
            key: datum.key.clone(),
            geometry: datum.geometry,
            cx: 0.0,
            cy: 0.0,
            r: 0.0,
            flow_ratio: 0.0,
            arrivals: 0,
            departures: 0,
            total_traffic: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(keys: &[&str]) -> Vec<StationId> {
        keys.iter().map(|k| StationId::new(k)).collect()
    }

    fn datum(key: &str, lon: f64, radius: f64) -> StationDatum {
        StationDatum {
            key: StationId::new(key),
            geometry: Point::new(lon, 0.0),
            arrivals: 1,
            departures: 1,
            total_traffic: 2,
            radius,
            flow_ratio: 0.5,
        }
    }

    fn flat(p: Point<f64>) -> (f64, f64) {
        (p.x() * 100.0, p.y() * 100.0)
    }

    #[test]
    fn test_reconcile_partitions_keys() {
        let previous = ids(&["A", "B", "C"]);
        let next = ids(&["D", "C", "A", "D"]);
        let plan = reconcile(&previous, &next);

        assert_eq!(plan.created, ids(&["D"]));
        assert_eq!(plan.updated, ids(&["C", "A"]));
        assert_eq!(plan.removed, ids(&["B"]));
    }

    #[test]
    fn test_reconcile_from_empty() {
        let next = ids(&["A", "B"]);
        let plan = reconcile(&[], &next);

        assert_eq!(plan.created, next);
        assert!(plan.updated.is_empty());
        assert!(plan.removed.is_empty());
    }

    #[test]
    fn test_bind_keeps_identity_of_persisting_stations() {
        let mut binding = RenderBinding::new();
        let first = binding.bind(&[datum("A", 1.0, 5.0), datum("B", 2.0, 5.0)], &flat);
        assert_eq!(first.created.len(), 2);

        let a_id = binding.get("A").unwrap().id;
        let b_id = binding.get("B").unwrap().id;

        let second = binding.bind(&[datum("B", 2.0, 9.0), datum("C", 3.0, 1.0)], &flat);
        assert_eq!(second.created.len(), 1);
        assert_eq!(second.updated.len(), 1);
        assert_eq!(second.removed.len(), 1);
        assert_eq!(second.removed[0].id, a_id);

        let b = binding.get("B").unwrap();
        assert_eq!(b.id, b_id);
        assert!((b.r - 9.0).abs() < f64::EPSILON);
        assert!(binding.get("A").is_none());
        assert_ne!(binding.get("C").unwrap().id, a_id);
    }

    #[test]
    fn test_bind_positions_through_projection() {
        let mut binding = RenderBinding::new();
        binding.bind(&[datum("A", 1.5, 5.0)], &flat);

        let a = binding.get("A").unwrap();
        assert!((a.cx - 150.0).abs() < 1e-9);
        assert!(a.cy.abs() < 1e-9);
    }

    #[test]
    fn test_reproject_moves_without_rescaling() {
        let mut binding = RenderBinding::new();
        binding.bind(&[datum("A", 1.0, 7.0)], &flat);
        let id = binding.get("A").unwrap().id;

        let shifted = |p: Point<f64>| (p.x() * 100.0 + 20.0, p.y() * 100.0 - 5.0);
        let changes = binding.reproject(&shifted);

        let a = binding.get("A").unwrap();
        assert_eq!(changes.updated.len(), 1);
        assert_eq!(a.id, id);
        assert!((a.cx - 120.0).abs() < 1e-9);
        assert!((a.cy + 5.0).abs() < 1e-9);
        assert!((a.r - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_element_ids_are_not_reused() {
        let mut binding = RenderBinding::new();
        binding.bind(&[datum("A", 0.0, 1.0)], &flat);
        let first = binding.get("A").unwrap().id;

        binding.bind(&[], &flat);
        assert!(binding.is_empty());

        binding.bind(&[datum("A", 0.0, 1.0)], &flat);
        assert_ne!(binding.get("A").unwrap().id, first);
    }
}
