use std::f64::consts::PI;

use geo::Point;
use serde::{Deserialize, Serialize};

/// Tile edge in pixels
pub const TILE_SIZE: f64 = 512.0;

/// Latitude bound of the square Web-Mercator world
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_78;

/// Geographic to screen projection of the current view
pub trait Projection {
    /// Screen position `(x, y)` of a `(lon, lat)` point
    fn project(&self, point: Point<f64>) -> (f64, f64);
}

impl<F> Projection for F
where
    F: Fn(Point<f64>) -> (f64, f64),
{
    fn project(&self, point: Point<f64>) -> (f64, f64) {
        self(point)
    }
}

/// Web-Mercator viewport centered on a geographic point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WebMercatorView {
    /// `[lon, lat]` at the middle of the viewport
    pub center: [f64; 2],
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for WebMercatorView {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            zoom: 1.0,
            width: 960.0,
            height: 600.0,
        }
    }
}

impl WebMercatorView {
    pub fn new(center: Point<f64>, zoom: f64, width: f64, height: f64) -> Self {
        Self {
            center: [center.x(), center.y()],
            zoom,
            width,
            height,
        }
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * self.zoom.exp2()
    }

    /// World pixel coordinates at the current zoom
    fn to_world(&self, lon: f64, lat: f64) -> (f64, f64) {
        let size = self.world_size();
        let lat = lat
            .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
            .to_radians();
        let x = (lon + 180.0) / 360.0 * size;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
        (x, y)
    }

    fn from_world(&self, x: f64, y: f64) -> Point<f64> {
        let size = self.world_size();
        let lon = x / size * 360.0 - 180.0;
        let n = PI * (1.0 - 2.0 * y / size);
        let lat = n.sinh().atan().to_degrees();
        Point::new(lon, lat)
    }

    /// Geographic point under a screen position
    pub fn unproject(&self, x: f64, y: f64) -> Point<f64> {
        let (cx, cy) = self.to_world(self.center[0], self.center[1]);
        self.from_world(cx + x - self.width / 2.0, cy + y - self.height / 2.0)
    }

    /// Moves the view by a screen offset
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let center = self.unproject(self.width / 2.0 + dx, self.height / 2.0 + dy);
        self.center = [center.x(), center.y()];
    }

    pub fn zoom_to(&mut self, zoom: f64) {
        self.zoom = zoom.max(0.0);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }
}

impl Projection for WebMercatorView {
    fn project(&self, point: Point<f64>) -> (f64, f64) {
        let (cx, cy) = self.to_world(self.center[0], self.center[1]);
        let (x, y) = self.to_world(point.x(), point.y());
        (x - cx + self.width / 2.0, y - cy + self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-6, "{a} != {b}");
    }

    #[test]
    fn test_center_projects_to_viewport_middle() {
        let view = WebMercatorView::new(Point::new(-87.63, 41.88), 12.0, 800.0, 600.0);
        let (x, y) = view.project(Point::new(-87.63, 41.88));
        assert_close(x, 400.0);
        assert_close(y, 300.0);
    }

    #[test]
    fn test_world_at_zoom_zero() {
        let view = WebMercatorView::new(Point::new(0.0, 0.0), 0.0, 512.0, 512.0);
        let (x, y) = view.project(Point::new(-180.0, 0.0));
        assert_close(x, 0.0);
        assert_close(y, 256.0);

        let (_, top) = view.project(Point::new(0.0, 90.0));
        assert_close(top, 0.0);
    }

    #[test]
    fn test_east_is_right_and_north_is_up() {
        let view = WebMercatorView::new(Point::new(-87.63, 41.88), 13.0, 800.0, 600.0);
        let (x, y) = view.project(Point::new(-87.62, 41.89));
        assert!(x > 400.0);
        assert!(y < 300.0);
    }

    #[test]
    fn test_pan_moves_points_opposite() {
        let mut view = WebMercatorView::new(Point::new(-87.63, 41.88), 12.0, 800.0, 600.0);
        let station = Point::new(-87.63, 41.88);
        view.pan_by(100.0, -50.0);

        let (x, y) = view.project(station);
        assert_close(x, 300.0);
        assert_close(y, 350.0);
    }

    #[test]
    fn test_unproject_inverts_project() {
        let view = WebMercatorView::new(Point::new(2.35, 48.85), 11.5, 1024.0, 768.0);
        let point = Point::new(2.30, 48.87);
        let (x, y) = view.project(point);
        let back = view.unproject(x, y);
        assert_close(back.x(), point.x());
        assert_close(back.y(), point.y());
    }

    #[test]
    fn test_closure_projection() {
        let flat = |p: Point<f64>| (p.x() * 10.0, p.y() * 10.0);
        assert_eq!(flat.project(Point::new(1.0, 2.0)), (10.0, 20.0));
    }
}
