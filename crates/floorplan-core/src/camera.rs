//! Camera module for pan/zoom/scroll coordinate transforms.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.25;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 3.0;
/// Additive zoom change per wheel tick (modifier key held).
pub const WHEEL_ZOOM_STEP: f64 = 0.1;
/// Multiplicative zoom factor applied per zoom-tool click.
pub const ZOOM_TOOL_FACTOR: f64 = 1.2;

/// Camera manages the view transform for the canvas.
///
/// Client (pointer-event) coordinates pass through three independent
/// offsets before scene space: the canvas element's on-screen origin, the
/// scroll container's offsets, and the user-controlled pan, then divide by
/// zoom. All three vary independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), unconstrained.
    pub pan: Vec2,
    /// Current zoom level, clamped to [`MIN_ZOOM`]..=[`MAX_ZOOM`].
    pub zoom: f64,
    /// Top-left of the canvas element in client coordinates.
    pub viewport_origin: Point,
    /// Scroll offsets of the surrounding scroll container.
    pub scroll: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
            viewport_origin: Point::ZERO,
            scroll: Vec2::ZERO,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a client-space point to scene coordinates.
    pub fn to_scene(&self, client: Point) -> Point {
        Point::new(
            (client.x - self.viewport_origin.x + self.scroll.x - self.pan.x) / self.zoom,
            (client.y - self.viewport_origin.y + self.scroll.y - self.pan.y) / self.zoom,
        )
    }

    /// Convert a scene point back to client coordinates (exact inverse of
    /// [`Camera::to_scene`]).
    pub fn to_screen(&self, scene: Point) -> Point {
        Point::new(
            scene.x * self.zoom + self.pan.x - self.scroll.x + self.viewport_origin.x,
            scene.y * self.zoom + self.pan.y - self.scroll.y + self.viewport_origin.y,
        )
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Set the zoom level, clamped to bounds.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Apply wheel-tick zoom. Only active while the modifier key is held;
    /// each tick moves zoom by a fixed step, clamped to bounds.
    pub fn wheel_zoom(&mut self, ticks: f64, modifier_held: bool) {
        if !modifier_held {
            return;
        }
        self.set_zoom(self.zoom + ticks * WHEEL_ZOOM_STEP);
    }

    /// Zoom-tool click: multiply zoom by [`ZOOM_TOOL_FACTOR`] and adjust pan
    /// so the clicked scene point stays visually stationary.
    pub fn zoom_tool_click(&mut self, scene_point: Point) {
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom * ZOOM_TOOL_FACTOR).clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - old_zoom).abs() < f64::EPSILON {
            return;
        }
        self.pan = Vec2::new(
            scene_point.x * old_zoom - scene_point.x * new_zoom + self.pan.x,
            scene_point.y * old_zoom - scene_point.y * new_zoom + self.pan.y,
        );
        self.zoom = new_zoom;
    }

    /// Reset pan and zoom to defaults.
    pub fn reset(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
    }
}
