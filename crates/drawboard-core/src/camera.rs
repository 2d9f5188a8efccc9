//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Default zoom (100%).
pub const DEFAULT_ZOOM: f64 = 1.0;
/// Smallest zoom any update may produce.
pub const MIN_ZOOM: f64 = 0.2;
/// Largest zoom any update may produce.
pub const MAX_ZOOM: f64 = 5.0;
/// Zoom increment used by step zoom and each wheel notch.
pub const ZOOM_STEP: f64 = 0.1;

/// Camera manages the view transform for the canvas.
///
/// It handles panning (translation) and zooming (scaling) operations,
/// converting between screen coordinates and document coordinates.
/// `screen = document * zoom + offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen units.
    pub offset: Vec2,
    /// Current zoom level.
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
    /// Step used by `zoom_in`, `zoom_out` and the wheel.
    pub zoom_step: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: DEFAULT_ZOOM,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with custom zoom limits.
    ///
    /// Limits that are not finite, positive and ordered are replaced by the
    /// defaults, as is a non-positive step.
    pub fn with_limits(min_zoom: f64, max_zoom: f64, zoom_step: f64) -> Self {
        let mut camera = Self::default();
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if positive(min_zoom) && positive(max_zoom) && min_zoom <= max_zoom {
            camera.min_zoom = min_zoom;
            camera.max_zoom = max_zoom;
            camera.zoom = DEFAULT_ZOOM.clamp(min_zoom, max_zoom);
        } else {
            log::warn!("Ignoring zoom limits {}..{}", min_zoom, max_zoom);
        }
        if positive(zoom_step) {
            camera.zoom_step = zoom_step;
        } else {
            log::warn!("Ignoring zoom step {}", zoom_step);
        }
        camera
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts document coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Convert a screen point to document coordinates:
    /// `(screen - offset) / zoom`.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        Point::new(
            (screen_point.x - self.offset.x) / self.zoom,
            (screen_point.y - self.offset.y) / self.zoom,
        )
    }

    /// Convert a document point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        Point::new(
            world_point.x * self.zoom + self.offset.x,
            world_point.y * self.zoom + self.offset.y,
        )
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Step-zoom in by `zoom_step`. The offset is left alone.
    pub fn zoom_in(&mut self) {
        self.zoom = self.clamp_zoom(round_zoom(self.zoom + self.zoom_step));
    }

    /// Step-zoom out by `zoom_step`. The offset is left alone.
    pub fn zoom_out(&mut self) {
        self.zoom = self.clamp_zoom(round_zoom(self.zoom - self.zoom_step));
    }

    /// Set the zoom, keeping the document point under `screen_point` fixed
    /// on screen.
    pub fn zoom_at(&mut self, screen_point: Point, zoom: f64) {
        let new_zoom = self.clamp_zoom(zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let world_point = self.screen_to_world(screen_point);
        self.zoom = new_zoom;
        self.offset = Vec2::new(
            screen_point.x - world_point.x * new_zoom,
            screen_point.y - world_point.y * new_zoom,
        );
    }

    /// Wheel zoom around the cursor. Scrolling up (negative `delta_y`)
    /// zooms in by one step, scrolling down zooms out.
    pub fn wheel_zoom(&mut self, screen_point: Point, delta_y: f64) {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return;
        }
        let step = if delta_y < 0.0 { self.zoom_step } else { -self.zoom_step };
        self.zoom_at(screen_point, round_zoom(self.zoom + step));
    }

    /// Reset camera to zoom 1 (within the limits) and zero offset.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = self.clamp_zoom(DEFAULT_ZOOM);
    }
}

/// Round to two decimals so repeated steps land on exact values.
fn round_zoom(zoom: f64) -> f64 {
    (zoom * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.zoom - DEFAULT_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_offset() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(50.0, 100.0);
        let world = camera.screen_to_world(Point::new(100.0, 200.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_zoom() {
        let mut camera = Camera::new();
        camera.zoom = 2.0;
        let world = camera.screen_to_world(Point::new(100.0, 200.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(30.0, -20.0);
        camera.zoom = 1.5;

        let original = Point::new(123.0, 456.0);
        let back = camera.world_to_screen(camera.screen_to_world(original));

        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_transform_matches_world_to_screen() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(12.0, 7.0);
        camera.zoom = 2.5;
        let p = Point::new(4.0, -3.0);
        let a = camera.transform() * p;
        let b = camera.world_to_screen(p);
        assert!((a.x - b.x).abs() < 1e-10);
        assert!((a.y - b.y).abs() < 1e-10);
    }

    #[test]
    fn test_step_zoom_clamps() {
        let mut camera = Camera::new();
        for _ in 0..100 {
            camera.zoom_in();
        }
        assert!((camera.zoom - MAX_ZOOM).abs() < f64::EPSILON);
        for _ in 0..100 {
            camera.zoom_out();
        }
        assert!((camera.zoom - MIN_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bad_limits_fall_back_to_defaults() {
        let inverted = Camera::with_limits(6.0, 5.0, 0.1);
        assert!((inverted.min_zoom - MIN_ZOOM).abs() < f64::EPSILON);
        assert!((inverted.max_zoom - MAX_ZOOM).abs() < f64::EPSILON);

        let mut zero = Camera::with_limits(0.0, 5.0, 0.0);
        for _ in 0..100 {
            zero.zoom_out();
        }
        assert!((zero.zoom - MIN_ZOOM).abs() < f64::EPSILON);
        assert!((zero.zoom_step - ZOOM_STEP).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tiny_min_zoom_never_rounds_to_zero() {
        let mut camera = Camera::with_limits(0.001, 5.0, 0.1);
        for _ in 0..100 {
            camera.zoom_out();
        }
        assert!(camera.zoom > 0.0);
        let world = camera.screen_to_world(Point::new(10.0, 10.0));
        assert!(world.x.is_finite() && world.y.is_finite());
    }

    #[test]
    fn test_step_zoom_exact_values() {
        let mut camera = Camera::new();
        camera.zoom_in();
        camera.zoom_in();
        assert_eq!(camera.zoom, 1.2);
        camera.zoom_out();
        assert_eq!(camera.zoom, 1.1);
    }

    #[test]
    fn test_zoom_at_keeps_point_fixed() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(40.0, -25.0);
        camera.zoom = 1.3;
        let cursor = Point::new(320.0, 240.0);
        let before = camera.screen_to_world(cursor);

        camera.wheel_zoom(cursor, -120.0);
        assert!((camera.zoom - 1.4).abs() < 1e-12);

        let after = camera.screen_to_world(cursor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_at_clamps() {
        let mut camera = Camera::new();
        camera.zoom_at(Point::ZERO, 0.001);
        assert!((camera.zoom - MIN_ZOOM).abs() < f64::EPSILON);
        camera.zoom_at(Point::ZERO, 1000.0);
        assert!((camera.zoom - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(10.0, 20.0));
        camera.zoom_in();
        camera.reset();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(10.0, 20.0));
        assert!((camera.offset.x - 10.0).abs() < f64::EPSILON);
        assert!((camera.offset.y - 20.0).abs() < f64::EPSILON);
    }
}
