//! Drawing tools and provisional-item construction.

use crate::items::{Circle, Item, ItemStyle, Line, Rectangle, TextBox};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    Rectangle,
    Circle,
    Line,
    Text,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Line => "line",
            Tool::Text => "text",
        }
    }
}

/// Seed a provisional item at the drag anchor. The item has zero extent
/// until the first pointer move; text boxes are the exception and place at
/// their default size immediately.
pub fn seed_provisional(tool: Tool, anchor: Point, style: &ItemStyle) -> Item {
    match tool {
        Tool::Rectangle => {
            let mut rect = Rectangle::new(anchor, 0.0, 0.0);
            rect.style = style.clone();
            Item::Rectangle(rect)
        }
        Tool::Circle => {
            let mut circle = Circle::new(anchor, 0.0);
            circle.style = style.clone();
            Item::Circle(circle)
        }
        Tool::Line => {
            let mut line = Line::new(anchor, anchor);
            line.style = style.clone();
            Item::Line(line)
        }
        Tool::Text => {
            let mut text = TextBox::new(anchor, String::new());
            text.style = style.clone();
            Item::Text(text)
        }
    }
}

/// Update a provisional item as the pointer moves during a drawing drag.
///
/// Rectangles are re-derived from the anchor/pointer corner pair so dragging
/// in any direction yields normalized (positive) dimensions. Circles keep
/// their center at the anchor with the radius tracking the pointer distance.
/// Lines pin their start at the anchor and follow the pointer with their end.
pub fn update_provisional(item: &mut Item, anchor: Point, current: Point) {
    match item {
        Item::Rectangle(rect) => {
            let normalized = Rectangle::from_corners(anchor, current);
            rect.position = normalized.position;
            rect.width = normalized.width;
            rect.height = normalized.height;
        }
        Item::Circle(circle) => {
            circle.center = anchor;
            circle.radius = anchor.distance(current);
        }
        Item::Line(line) => {
            line.start = anchor;
            line.end = current;
        }
        Item::Text(_) => {}
    }
}

/// Whether a provisional item is too small to commit. Degenerate items are
/// discarded on pointer release instead of being added to the scene.
pub fn is_degenerate(item: &Item) -> bool {
    match item {
        Item::Rectangle(rect) => rect.width <= 0.0 || rect.height <= 0.0,
        Item::Circle(circle) => circle.radius <= 0.0,
        Item::Line(line) => line.length() <= 0.0,
        Item::Text(text) => text.width <= 0.0 || text.height <= 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_degenerate() {
        let style = ItemStyle::default();
        let anchor = Point::new(50.0, 50.0);
        for tool in [Tool::Rectangle, Tool::Circle, Tool::Line] {
            assert!(is_degenerate(&seed_provisional(tool, anchor, &style)));
        }
        // Text places at its default size and commits immediately
        assert!(!is_degenerate(&seed_provisional(Tool::Text, anchor, &style)));
    }

    #[test]
    fn test_rectangle_drag_normalizes() {
        let style = ItemStyle::default();
        let anchor = Point::new(100.0, 100.0);
        let mut item = seed_provisional(Tool::Rectangle, anchor, &style);

        // Drag up and to the left
        update_provisional(&mut item, anchor, Point::new(40.0, 30.0));
        let Item::Rectangle(rect) = &item else {
            panic!("expected rectangle");
        };
        assert!((rect.position.x - 40.0).abs() < f64::EPSILON);
        assert!((rect.position.y - 30.0).abs() < f64::EPSILON);
        assert!((rect.width - 60.0).abs() < f64::EPSILON);
        assert!((rect.height - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_circle_radius_tracks_pointer() {
        let style = ItemStyle::default();
        let anchor = Point::new(0.0, 0.0);
        let mut item = seed_provisional(Tool::Circle, anchor, &style);
        update_provisional(&mut item, anchor, Point::new(30.0, 40.0));
        let Item::Circle(circle) = &item else {
            panic!("expected circle");
        };
        assert_eq!(circle.center, anchor);
        assert!((circle.radius - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_line_follows_pointer() {
        let style = ItemStyle::default();
        let anchor = Point::new(10.0, 10.0);
        let mut item = seed_provisional(Tool::Line, anchor, &style);
        update_provisional(&mut item, anchor, Point::new(90.0, 10.0));
        let Item::Line(line) = &item else {
            panic!("expected line");
        };
        assert_eq!(line.start, anchor);
        assert_eq!(line.end, Point::new(90.0, 10.0));
        assert!(!is_degenerate(&item));
    }

    #[test]
    fn test_click_without_drag_stays_degenerate() {
        let style = ItemStyle::default();
        let anchor = Point::new(10.0, 10.0);
        let mut item = seed_provisional(Tool::Rectangle, anchor, &style);
        update_provisional(&mut item, anchor, anchor);
        assert!(is_degenerate(&item));
    }
}
