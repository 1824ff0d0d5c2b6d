//! Circle item.

use super::{ItemId, ItemStyle};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle, positioned by its center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ItemId,
    /// Center point.
    pub center: Point,
    /// Radius in scene units.
    pub radius: f64,
    /// Rotation angle in degrees (around center). Only visible through a
    /// rotated label, but kept so the selection handles track it.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub locked: bool,
    /// Optional caption drawn centered in the circle.
    #[serde(default)]
    pub label: Option<String>,
    /// Style properties.
    #[serde(default)]
    pub style: ItemStyle,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            rotation: 0.0,
            locked: false,
            label: None,
            style: ItemStyle::default(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    pub fn hit_test(&self, point: Point) -> bool {
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        (dx * dx + dy * dy).sqrt() <= self.radius
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }
}
