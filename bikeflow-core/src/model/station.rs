use std::fmt;
use std::sync::Arc;

use geo::Point;
use hashbrown::HashMap;
use log::warn;
use serde::{Deserialize, Serialize};

/// Station key, the `short_name` of the station feed.
///
/// Backed by `Arc<str>` so that the snapshot, the render binding and the
/// registry index can share one allocation per station.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(Arc<str>);

impl StationId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StationId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl std::borrow::Borrow<str> for StationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Fixed-location dock point
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Join key against trip station ids
    pub id: StationId,
    /// Station coordinates (lon, lat)
    pub geometry: Point<f64>,
    /// Optional display name
    pub name: Option<String>,
}

impl Station {
    pub fn new(id: impl Into<StationId>, lon: f64, lat: f64) -> Self {
        Self {
            id: id.into(),
            geometry: Point::new(lon, lat),
            name: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn lon(&self) -> f64 {
        self.geometry.x()
    }

    pub fn lat(&self) -> f64 {
        self.geometry.y()
    }
}

/// Ordered set of stations with a lookup index by id
#[derive(Debug, Clone, Default)]
pub struct StationRegistry {
    stations: Vec<Station>,
    index: HashMap<StationId, usize>,
}

impl StationRegistry {
    /// Builds the registry, keeping the first occurrence of a duplicated id.
    pub fn new(stations: impl IntoIterator<Item = Station>) -> Self {
        let mut registry = Self::default();
        let mut duplicates = 0usize;

        for station in stations {
            if registry.index.contains_key(&station.id) {
                duplicates += 1;
                continue;
            }
            registry
                .index
                .insert(station.id.clone(), registry.stations.len());
            registry.stations.push(station);
        }

        if duplicates > 0 {
            warn!("Ignored {duplicates} stations with duplicated ids");
        }
        registry
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Station> {
        self.stations.iter()
    }

    pub fn as_slice(&self) -> &[Station] {
        &self.stations
    }

    pub fn get(&self, id: &str) -> Option<&Station> {
        self.index.get(id).map(|&idx| &self.stations[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Registry without the given station, preserving the order of the rest
    #[must_use]
    pub fn without(&self, id: &str) -> Self {
        Self::new(self.stations.iter().filter(|s| s.id.as_str() != id).cloned())
    }
}

impl<'a> IntoIterator for &'a StationRegistry {
    type Item = &'a Station;
    type IntoIter = std::slice::Iter<'a, Station>;

    fn into_iter(self) -> Self::IntoIter {
        self.stations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let registry = StationRegistry::new(vec![
            Station::new("A", -87.6, 41.9),
            Station::new("B", -87.7, 41.8),
        ]);

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("A"));
        assert_eq!(registry.get("B").map(Station::lon), Some(-87.7));
        assert!(registry.get("C").is_none());
    }

    #[test]
    fn test_registry_keeps_first_duplicate() {
        let registry = StationRegistry::new(vec![
            Station::new("A", 1.0, 1.0),
            Station::new("A", 2.0, 2.0),
            Station::new("B", 3.0, 3.0),
        ]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("A").map(Station::lon), Some(1.0));
    }

    #[test]
    fn test_registry_without_keeps_order() {
        let registry = StationRegistry::new(vec![
            Station::new("A", 0.0, 0.0),
            Station::new("B", 0.0, 0.0),
            Station::new("C", 0.0, 0.0),
        ]);
        let trimmed = registry.without("B");

        let ids: Vec<_> = trimmed.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
        assert_eq!(trimmed.get("C").map(|s| s.id.as_str()), Some("C"));
    }

    #[test]
    fn test_station_id_shares_allocation() {
        let id = StationId::new("KA1503000012");
        let copy = id.clone();
        assert!(Arc::ptr_eq(&id.0, &copy.0));
        assert_eq!(copy.to_string(), "KA1503000012");
    }
}
