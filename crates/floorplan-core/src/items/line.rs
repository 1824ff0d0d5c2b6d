//! Line item.

use super::{point_to_segment_dist, ItemId, ItemStyle};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight line segment between two endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ItemId,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    #[serde(default)]
    pub locked: bool,
    /// Optional caption drawn at the midpoint.
    #[serde(default)]
    pub label: Option<String>,
    /// Style properties (stroke width/color apply; fill is unused).
    #[serde(default)]
    pub style: ItemStyle,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            locked: false,
            label: None,
            style: ItemStyle::default(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }

    /// Hit when the perpendicular distance to the segment (clamped to the
    /// segment) is within `tolerance`.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.start, self.end) < tolerance
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    /// Midpoint of the segment, used for label placement.
    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    pub fn length(&self) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        (dx * dx + dy * dy).sqrt()
    }
}
