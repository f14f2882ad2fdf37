//! Visual encodings derived from a traffic snapshot

use serde::Serialize;

use crate::TrafficSnapshot;

/// Radius range without a time filter
pub const UNFILTERED_RADIUS_RANGE: (f64, f64) = (0.0, 25.0);

/// Radius range while a minute filter is active; filtered counts are smaller
pub const FILTERED_RADIUS_RANGE: (f64, f64) = (3.0, 50.0);

/// Square-root scale from traffic to circle radius.
///
/// Circle area, not radius, grows linearly with traffic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadiusScale {
    domain_max: f64,
    range: (f64, f64),
}

impl RadiusScale {
    #[allow(clippy::cast_precision_loss)]
    pub fn new(domain_max: u64, range: (f64, f64)) -> Self {
        Self {
            domain_max: domain_max as f64,
            range,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        (0.0, self.domain_max)
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Maps a traffic value to a radius. A collapsed domain maps everything
    /// to the range minimum.
    pub fn apply(&self, traffic: f64) -> f64 {
        let (min, max) = self.range;
        if self.domain_max <= 0.0 || !traffic.is_finite() || traffic <= 0.0 {
            return min;
        }
        let t = traffic.sqrt() / self.domain_max.sqrt();
        min + (max - min) * t
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn radius(&self, total_traffic: u64) -> f64 {
        self.apply(total_traffic as f64)
    }
}

/// Derives the radius scale for a snapshot
pub fn derive_radius_scale(snapshot: &TrafficSnapshot, filter_active: bool) -> RadiusScale {
    let range = if filter_active {
        FILTERED_RADIUS_RANGE
    } else {
        UNFILTERED_RADIUS_RANGE
    };
    RadiusScale::new(snapshot.max_total_traffic(), range)
}

/// Quantizes a flow ratio over `[0, 1]` into three buckets
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowRatioScale {
    buckets: [f64; 3],
}

impl Default for FlowRatioScale {
    fn default() -> Self {
        Self {
            buckets: [0.0, 0.5, 1.0],
        }
    }
}

impl FlowRatioScale {
    /// Bucket for `ratio`. Thresholds sit at 1/3 and 2/3; a ratio equal to a
    /// threshold belongs to the upper bucket. Values outside `[0, 1]` fall
    /// into the outer buckets.
    pub fn apply(&self, ratio: f64) -> f64 {
        if ratio.is_nan() {
            return self.buckets[1];
        }
        let idx = self.thresholds().iter().filter(|&&t| ratio >= t).count();
        self.buckets[idx]
    }

    #[allow(clippy::cast_precision_loss)]
    fn thresholds(&self) -> [f64; 2] {
        let n = self.buckets.len() as f64;
        [1.0 / n, 2.0 / n]
    }
}
