//! Selection handles and resize application.

use crate::items::{Item, MIN_ITEM_SIZE, MIN_RADIUS};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Handle hit tolerance in screen pixels (callers divide by zoom).
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;

/// Distance from the bounding box's top edge to the rotate handle, in scene
/// units.
pub const ROTATE_HANDLE_OFFSET: f64 = 30.0;

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Corner handle (resizes two dimensions).
    Corner(Corner),
    /// Edge midpoint handle (resizes one dimension).
    Edge(Edge),
    /// Endpoint handle for lines (index 0 = start, 1 = end).
    Endpoint(usize),
    /// Rotation handle, offset above the bounding box.
    Rotate,
}

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Position in scene coordinates.
    pub position: Point,
    /// Handle type.
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a scene-space point hits this handle.
    /// `tolerance` should be adjusted for camera zoom.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// Get the selection handles for an item.
///
/// Box shapes get 8 resize handles (corners + edge midpoints) plus a rotate
/// handle above top-center; every position is rotated about the box center
/// by the item's rotation. Lines get two endpoint handles and no rotate
/// handle. Locked items get none: their handles are neither drawn nor
/// hit-testable.
pub fn get_handles(item: &Item) -> Vec<Handle> {
    if item.locked() {
        return Vec::new();
    }

    if let Item::Line(line) = item {
        return vec![
            Handle::new(line.start, HandleKind::Endpoint(0)),
            Handle::new(line.end, HandleKind::Endpoint(1)),
        ];
    }

    let bounds = item.bounds();
    let center = bounds.center();
    let half_w = bounds.width() / 2.0;
    let half_h = bounds.height() / 2.0;
    let radians = item.rotation().to_radians();
    let (sin_r, cos_r) = radians.sin_cos();

    // Rotate a point offset from the center by the item's rotation
    let rotate_point = |dx: f64, dy: f64| -> Point {
        Point::new(
            center.x + dx * cos_r - dy * sin_r,
            center.y + dx * sin_r + dy * cos_r,
        )
    };

    let mut handles = vec![
        Handle::new(rotate_point(-half_w, -half_h), HandleKind::Corner(Corner::TopLeft)),
        Handle::new(rotate_point(half_w, -half_h), HandleKind::Corner(Corner::TopRight)),
        Handle::new(rotate_point(-half_w, half_h), HandleKind::Corner(Corner::BottomLeft)),
        Handle::new(rotate_point(half_w, half_h), HandleKind::Corner(Corner::BottomRight)),
        Handle::new(rotate_point(0.0, -half_h), HandleKind::Edge(Edge::Top)),
        Handle::new(rotate_point(half_w, 0.0), HandleKind::Edge(Edge::Right)),
        Handle::new(rotate_point(0.0, half_h), HandleKind::Edge(Edge::Bottom)),
        Handle::new(rotate_point(-half_w, 0.0), HandleKind::Edge(Edge::Left)),
    ];
    if item.supports_rotation() {
        handles.push(Handle::new(
            rotate_point(0.0, -half_h - ROTATE_HANDLE_OFFSET),
            HandleKind::Rotate,
        ));
    }
    handles
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(item: &Item, point: Point, tolerance: f64) -> Option<HandleKind> {
    get_handles(item)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

/// Apply a resize drag to an item.
///
/// `original` is the snapshot taken at drag start and `delta` the total
/// pointer movement since then, so repeated application cannot accumulate
/// drift. Returns the resized item.
pub fn apply_resize(original: &Item, handle: HandleKind, delta: Vec2) -> Item {
    let mut item = original.clone();
    match &mut item {
        Item::Rectangle(rect) => {
            let new_bounds = resize_box(rect.bounds(), handle, delta);
            rect.position = Point::new(new_bounds.x0, new_bounds.y0);
            rect.width = new_bounds.width();
            rect.height = new_bounds.height();
        }
        Item::Text(text) => {
            let new_bounds = resize_box(text.bounds(), handle, delta);
            text.position = Point::new(new_bounds.x0, new_bounds.y0);
            text.width = new_bounds.width();
            text.height = new_bounds.height();
        }
        Item::Circle(circle) => {
            circle.radius = resize_radius(circle.radius, handle, delta);
        }
        Item::Line(line) => match handle {
            HandleKind::Endpoint(0) => line.start += delta,
            HandleKind::Endpoint(1) => line.end += delta,
            _ => {}
        },
    }
    item
}

/// Resize an axis-aligned box by moving the edges the handle controls.
/// The moved edge is clamped so width/height never drop below
/// [`MIN_ITEM_SIZE`]; the opposite edge stays fixed.
fn resize_box(bounds: Rect, handle: HandleKind, delta: Vec2) -> Rect {
    let (mut x0, mut y0, mut x1, mut y1) = (bounds.x0, bounds.y0, bounds.x1, bounds.y1);
    let (moves_x0, moves_y0, moves_x1, moves_y1) = match handle {
        HandleKind::Corner(Corner::TopLeft) => (true, true, false, false),
        HandleKind::Corner(Corner::TopRight) => (false, true, true, false),
        HandleKind::Corner(Corner::BottomLeft) => (true, false, false, true),
        HandleKind::Corner(Corner::BottomRight) => (false, false, true, true),
        HandleKind::Edge(Edge::Top) => (false, true, false, false),
        HandleKind::Edge(Edge::Right) => (false, false, true, false),
        HandleKind::Edge(Edge::Bottom) => (false, false, false, true),
        HandleKind::Edge(Edge::Left) => (true, false, false, false),
        _ => (false, false, false, false),
    };

    if moves_x0 {
        x0 = (x0 + delta.x).min(x1 - MIN_ITEM_SIZE);
    }
    if moves_x1 {
        x1 = (x1 + delta.x).max(x0 + MIN_ITEM_SIZE);
    }
    if moves_y0 {
        y0 = (y0 + delta.y).min(y1 - MIN_ITEM_SIZE);
    }
    if moves_y1 {
        y1 = (y1 + delta.y).max(y0 + MIN_ITEM_SIZE);
    }

    Rect::new(x0, y0, x1, y1)
}

/// Resize a circle's radius from a handle drag, keeping the center fixed.
///
/// Corner drags compute scale factors for both axes and take the smaller of
/// the two; edge drags scale from their own axis only. The result is
/// floored at [`MIN_RADIUS`].
fn resize_radius(radius: f64, handle: HandleKind, delta: Vec2) -> f64 {
    let diameter = radius * 2.0;
    // Sign of each axis's outward direction for the given handle
    let scale_for = |d: f64, outward_positive: bool| -> f64 {
        let grow = if outward_positive { d } else { -d };
        ((diameter + grow) / diameter).max(0.0)
    };

    let scale = match handle {
        HandleKind::Corner(corner) => {
            let (x_out, y_out) = match corner {
                Corner::TopLeft => (false, false),
                Corner::TopRight => (true, false),
                Corner::BottomLeft => (false, true),
                Corner::BottomRight => (true, true),
            };
            scale_for(delta.x, x_out).min(scale_for(delta.y, y_out))
        }
        HandleKind::Edge(Edge::Left) => scale_for(delta.x, false),
        HandleKind::Edge(Edge::Right) => scale_for(delta.x, true),
        HandleKind::Edge(Edge::Top) => scale_for(delta.y, false),
        HandleKind::Edge(Edge::Bottom) => scale_for(delta.y, true),
        _ => 1.0,
    };

    (radius * scale).max(MIN_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{Circle, Line, Rectangle, TextBox};

    #[test]
    fn test_rectangle_handles() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 50.0);
        let handles = get_handles(&Item::Rectangle(rect));

        // 4 corners + 4 edges + rotate
        assert_eq!(handles.len(), 9);
        assert!(matches!(handles[0].kind, HandleKind::Corner(Corner::TopLeft)));
        assert!(matches!(handles[8].kind, HandleKind::Rotate));

        // Rotate handle sits above the top-center
        let rotate = handles[8].position;
        assert!((rotate.x - 50.0).abs() < f64::EPSILON);
        assert!((rotate.y - (-ROTATE_HANDLE_OFFSET)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_line_handles() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        let handles = get_handles(&Item::Line(line));
        assert_eq!(handles.len(), 2);
        assert!(matches!(handles[0].kind, HandleKind::Endpoint(0)));
        assert!(matches!(handles[1].kind, HandleKind::Endpoint(1)));
        assert!(!handles.iter().any(|h| h.kind == HandleKind::Rotate));
    }

    #[test]
    fn test_locked_item_has_no_handles() {
        let mut rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 50.0);
        rect.locked = true;
        assert!(get_handles(&Item::Rectangle(rect)).is_empty());
    }

    #[test]
    fn test_handles_follow_rotation() {
        let mut rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 50.0);
        rect.rotation = 90.0;
        let handles = get_handles(&Item::Rectangle(rect));
        // Top-left (0,0) rotated 90 degrees about (50,25) lands at (75,-25)
        let tl = handles[0].position;
        assert!((tl.x - 75.0).abs() < 1e-10);
        assert!((tl.y - (-25.0)).abs() < 1e-10);
    }

    #[test]
    fn test_hit_test_handles() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 50.0);
        let item = Item::Rectangle(rect);
        assert_eq!(
            hit_test_handles(&item, Point::new(101.0, 51.0), 8.0),
            Some(HandleKind::Corner(Corner::BottomRight))
        );
        assert_eq!(hit_test_handles(&item, Point::new(50.0, 25.0), 8.0), None);
    }

    #[test]
    fn test_corner_resize_grows() {
        let rect = Rectangle::new(Point::new(50.0, 50.0), 100.0, 70.0);
        let item = Item::Rectangle(rect);

        let resized = apply_resize(
            &item,
            HandleKind::Corner(Corner::BottomRight),
            Vec2::new(50.0, 50.0),
        );
        let Item::Rectangle(r) = resized else {
            panic!("expected rectangle");
        };
        assert!((r.position.x - 50.0).abs() < f64::EPSILON);
        assert!((r.position.y - 50.0).abs() < f64::EPSILON);
        assert!((r.width - 150.0).abs() < f64::EPSILON);
        assert!((r.height - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_top_left_resize_moves_position() {
        let rect = Rectangle::new(Point::new(50.0, 50.0), 100.0, 100.0);
        let resized = apply_resize(
            &Item::Rectangle(rect),
            HandleKind::Corner(Corner::TopLeft),
            Vec2::new(10.0, 20.0),
        );
        let Item::Rectangle(r) = resized else {
            panic!("expected rectangle");
        };
        assert!((r.position.x - 60.0).abs() < f64::EPSILON);
        assert!((r.position.y - 70.0).abs() < f64::EPSILON);
        assert!((r.width - 90.0).abs() < f64::EPSILON);
        assert!((r.height - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_floors_at_minimum() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0);
        let resized = apply_resize(
            &Item::Rectangle(rect),
            HandleKind::Corner(Corner::BottomRight),
            Vec2::new(-500.0, -500.0),
        );
        let Item::Rectangle(r) = resized else {
            panic!("expected rectangle");
        };
        assert!((r.width - MIN_ITEM_SIZE).abs() < f64::EPSILON);
        assert!((r.height - MIN_ITEM_SIZE).abs() < f64::EPSILON);
        // Opposite corner stays anchored
        assert!((r.position.x).abs() < f64::EPSILON);
        assert!((r.position.y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_edge_resize_affects_one_dimension() {
        let text = TextBox::new(Point::new(0.0, 0.0), "room".to_string());
        let (w, h) = (text.width, text.height);
        let resized = apply_resize(
            &Item::Text(text),
            HandleKind::Edge(Edge::Right),
            Vec2::new(25.0, 40.0),
        );
        let Item::Text(t) = resized else {
            panic!("expected text");
        };
        assert!((t.width - (w + 25.0)).abs() < f64::EPSILON);
        assert!((t.height - h).abs() < f64::EPSILON);
    }

    #[test]
    fn test_circle_corner_resize_takes_smaller_scale() {
        let circle = Circle::new(Point::new(100.0, 100.0), 50.0);
        // Dragging the bottom-right corner +100 in x but only +20 in y:
        // x scale = 2.0, y scale = 1.2, so the smaller factor wins.
        let resized = apply_resize(
            &Item::Circle(circle),
            HandleKind::Corner(Corner::BottomRight),
            Vec2::new(100.0, 20.0),
        );
        let Item::Circle(c) = resized else {
            panic!("expected circle");
        };
        assert!((c.radius - 60.0).abs() < 1e-10);
        // Center never moves during a circle resize
        assert!((c.center.x - 100.0).abs() < f64::EPSILON);
        assert!((c.center.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_circle_resize_floors_at_min_radius() {
        let circle = Circle::new(Point::new(100.0, 100.0), 50.0);
        let resized = apply_resize(
            &Item::Circle(circle),
            HandleKind::Corner(Corner::BottomRight),
            Vec2::new(-400.0, -400.0),
        );
        let Item::Circle(c) = resized else {
            panic!("expected circle");
        };
        assert!((c.radius - MIN_RADIUS).abs() < f64::EPSILON);
    }

    #[test]
    fn test_line_endpoint_resize() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let resized = apply_resize(
            &Item::Line(line),
            HandleKind::Endpoint(1),
            Vec2::new(20.0, 30.0),
        );
        let Item::Line(l) = resized else {
            panic!("expected line");
        };
        assert!((l.start.x).abs() < f64::EPSILON);
        assert!((l.end.x - 120.0).abs() < f64::EPSILON);
        assert!((l.end.y - 30.0).abs() < f64::EPSILON);
    }
}
