//! Map viewport state and gesture handling
//!
//! Holds the center coordinate, a scalar zoom and a pixel pan offset, and
//! turns pointer gestures (drag, wheel, pinch) into state changes. Marker
//! placement projects through Web Mercator and yields percentage positions
//! clamped to the visible area.

use crate::map::projection::project;
use crate::model::GeoPoint;

/// Zoom bounds enforced after every gesture
pub const MIN_ZOOM: f64 = 0.3;
pub const MAX_ZOOM: f64 = 3.0;

/// Zoom change per wheel event
pub const WHEEL_STEP: f64 = 0.1;
/// Zoom change per +/- control press
pub const BUTTON_STEP: f64 = 0.2;

/// Screen percent covered by one Mercator unit-square unit at zoom 1.
/// Chosen so one degree of longitude spans half the view, matching the
/// original marker density.
const VIEW_SCALE: f64 = 50.0 * 360.0;

/// A projected marker position, in percent of the view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPosition {
    pub top: f64,
    pub left: f64,
}

/// Interactive map viewport
#[derive(Debug, Clone)]
pub struct Viewport {
    center: GeoPoint,
    zoom: f64,
    /// Pan offset in pixels, applied as a rendering transform
    offset: (f64, f64),
    drag_anchor: Option<(f64, f64)>,
    /// Two-finger distance and zoom recorded at pinch start
    pinch_start: Option<(f64, f64)>,
}

impl Default for Viewport {
    fn default() -> Self {
        // Moscow, the original default focus
        Self::new(GeoPoint::new(55.7558, 37.6173), 1.0)
    }
}

impl Viewport {
    pub fn new(center: GeoPoint, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            offset: (0.0, 0.0),
            drag_anchor: None,
            pinch_start: None,
        }
    }

    /// Center on the mean coordinate of `points` and pick a zoom from their
    /// spread: wider spreads zoom out, clamped to the zoom bounds. Resets
    /// the pan offset. No-op when `points` is empty.
    pub fn fit(&mut self, points: &[GeoPoint]) {
        if points.is_empty() {
            return;
        }

        let n = points.len() as f64;
        let lat = points.iter().map(|p| p.lat).sum::<f64>() / n;
        let lng = points.iter().map(|p| p.lng).sum::<f64>() / n;
        self.center = GeoPoint::new(lat, lng);

        let lat_span = span(points.iter().map(|p| p.lat));
        let lng_span = span(points.iter().map(|p| p.lng));
        let spread = lat_span.max(lng_span);

        self.zoom = if spread > 0.0 {
            (1.0 / spread).clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            MAX_ZOOM
        };
        self.offset = (0.0, 0.0);
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn offset(&self) -> (f64, f64) {
        self.offset
    }

    /// Percentage position of a coordinate relative to the view center,
    /// clamped to [0, 100] on both axes
    pub fn marker_position(&self, point: GeoPoint) -> MarkerPosition {
        let (px, py) = project(point);
        let (cx, cy) = project(self.center);

        let left = 50.0 + (px - cx) * VIEW_SCALE * self.zoom;
        let top = 50.0 + (py - cy) * VIEW_SCALE * self.zoom;

        MarkerPosition {
            top: top.clamp(0.0, 100.0),
            left: left.clamp(0.0, 100.0),
        }
    }

    /// Start a drag at a pointer position (pixels)
    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.drag_anchor = Some((x - self.offset.0, y - self.offset.1));
    }

    /// Move the drag to a new pointer position; ignored when no drag is active
    pub fn drag_to(&mut self, x: f64, y: f64) {
        if let Some((ax, ay)) = self.drag_anchor {
            self.offset = (x - ax, y - ay);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Wheel scroll: positive delta zooms out, negative zooms in
    pub fn wheel(&mut self, delta: f64) {
        let step = if delta > 0.0 { -WHEEL_STEP } else { WHEEL_STEP };
        self.zoom = (self.zoom + step).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// +/- control press
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + BUTTON_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - BUTTON_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Start a pinch with the current two-finger distance (pixels).
    /// Pinching cancels any active drag.
    pub fn begin_pinch(&mut self, distance: f64) {
        self.drag_anchor = None;
        self.pinch_start = Some((distance, self.zoom));
    }

    /// Scale the gesture-start zoom by the distance ratio, clamped
    pub fn pinch_to(&mut self, distance: f64) {
        if let Some((start_distance, start_zoom)) = self.pinch_start {
            if start_distance > 0.0 {
                let scale = distance / start_distance;
                self.zoom = (start_zoom * scale).clamp(MIN_ZOOM, MAX_ZOOM);
            }
        }
    }

    pub fn end_pinch(&mut self) {
        self.pinch_start = None;
    }
}

fn span(values: impl Iterator<Item = f64>) -> f64 {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if max > min {
        max - min
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_centers_on_mean() {
        let mut viewport = Viewport::default();
        viewport.fit(&[GeoPoint::new(55.0, 37.0), GeoPoint::new(57.0, 39.0)]);
        let center = viewport.center();
        assert!((center.lat - 56.0).abs() < 1e-9);
        assert!((center.lng - 38.0).abs() < 1e-9);
        assert_eq!(viewport.offset(), (0.0, 0.0));
    }

    #[test]
    fn test_fit_zoom_respects_bounds() {
        let mut viewport = Viewport::default();

        // Country-wide spread zooms all the way out
        viewport.fit(&[GeoPoint::new(43.58, 39.72), GeoPoint::new(59.93, 30.36)]);
        assert!((viewport.zoom() - MIN_ZOOM).abs() < 1e-9);

        // A single point zooms all the way in
        viewport.fit(&[GeoPoint::new(55.7558, 37.6173)]);
        assert!((viewport.zoom() - MAX_ZOOM).abs() < 1e-9);

        // A city-scale spread lands strictly between
        viewport.fit(&[GeoPoint::new(55.74, 37.56), GeoPoint::new(55.79, 37.70)]);
        assert!(viewport.zoom() > MIN_ZOOM && viewport.zoom() < MAX_ZOOM);
    }

    #[test]
    fn test_zoom_clamped_after_any_gesture_sequence() {
        let mut viewport = Viewport::default();

        for _ in 0..100 {
            viewport.wheel(-1.0);
        }
        assert!((viewport.zoom() - MAX_ZOOM).abs() < 1e-9);

        for _ in 0..100 {
            viewport.wheel(1.0);
        }
        assert!((viewport.zoom() - MIN_ZOOM).abs() < 1e-9);

        viewport.begin_pinch(100.0);
        viewport.pinch_to(100_000.0);
        assert!(viewport.zoom() <= MAX_ZOOM);
        viewport.pinch_to(0.001);
        assert!(viewport.zoom() >= MIN_ZOOM);
        viewport.end_pinch();

        for _ in 0..50 {
            viewport.zoom_in();
        }
        assert!(viewport.zoom() <= MAX_ZOOM);
    }

    #[test]
    fn test_pinch_scales_gesture_start_zoom() {
        let mut viewport = Viewport::new(GeoPoint::new(55.0, 37.0), 1.0);
        viewport.begin_pinch(200.0);
        viewport.pinch_to(400.0);
        assert!((viewport.zoom() - 2.0).abs() < 1e-9);

        // Ratio is against the start distance, not the previous event
        viewport.pinch_to(300.0);
        assert!((viewport.zoom() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_start_distance_is_ignored() {
        let mut viewport = Viewport::new(GeoPoint::new(55.0, 37.0), 1.2);
        viewport.begin_pinch(0.0);
        viewport.pinch_to(250.0);
        assert!((viewport.zoom() - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_drag_applies_pointer_delta() {
        let mut viewport = Viewport::default();
        viewport.begin_drag(100.0, 100.0);
        viewport.drag_to(130.0, 80.0);
        assert_eq!(viewport.offset(), (30.0, -20.0));

        // A second drag continues from the current offset
        viewport.end_drag();
        viewport.begin_drag(0.0, 0.0);
        viewport.drag_to(-10.0, 5.0);
        assert_eq!(viewport.offset(), (20.0, -15.0));
    }

    #[test]
    fn test_drag_without_anchor_is_ignored() {
        let mut viewport = Viewport::default();
        viewport.drag_to(500.0, 500.0);
        assert_eq!(viewport.offset(), (0.0, 0.0));
    }

    #[test]
    fn test_marker_positions_stay_in_bounds() {
        let centers = [
            GeoPoint::new(55.7558, 37.6173),
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(-45.0, 170.0),
        ];
        let points = [
            GeoPoint::new(55.7601, 37.6049),
            GeoPoint::new(89.0, 179.0),
            GeoPoint::new(-89.0, -179.0),
            GeoPoint::new(43.5855, 39.7231),
        ];

        for center in centers {
            for zoom in [MIN_ZOOM, 1.0, MAX_ZOOM] {
                let viewport = Viewport::new(center, zoom);
                for point in points {
                    let pos = viewport.marker_position(point);
                    assert!((0.0..=100.0).contains(&pos.top), "top {} out of range", pos.top);
                    assert!((0.0..=100.0).contains(&pos.left), "left {} out of range", pos.left);
                }
            }
        }
    }

    #[test]
    fn test_marker_orientation_around_center() {
        let viewport = Viewport::new(GeoPoint::new(55.75, 37.61), 1.0);

        let center = viewport.marker_position(GeoPoint::new(55.75, 37.61));
        assert!((center.top - 50.0).abs() < 1e-9);
        assert!((center.left - 50.0).abs() < 1e-9);

        // North of center renders above, east renders right
        let north_east = viewport.marker_position(GeoPoint::new(55.76, 37.63));
        assert!(north_east.top < 50.0);
        assert!(north_east.left > 50.0);
    }
}
