//! Item definitions for the floor-plan scene.

mod circle;
mod line;
mod rectangle;
mod text;

pub use circle::Circle;
pub use line::Line;
pub use rectangle::Rectangle;
pub use text::TextBox;

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for items.
pub type ItemId = Uuid;

/// Minimum width/height an item can be resized to.
pub const MIN_ITEM_SIZE: f64 = 10.0;

/// Minimum radius a circle can be resized to.
pub const MIN_RADIUS: f64 = 5.0;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style properties shared by every item.
///
/// Missing fields deserialize to the same defaults the renderer falls back
/// to, so partially-specified items never fail to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStyle {
    /// Fill color for closed shapes.
    #[serde(default = "default_fill")]
    pub fill_color: Rgba,
    /// Stroke color.
    #[serde(default = "Rgba::black")]
    pub stroke_color: Rgba,
    /// Stroke width in scene units.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Color used for labels and text content.
    #[serde(default = "Rgba::black")]
    pub text_color: Rgba,
    /// Font size in scene units.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Font family name, passed through to the rendering backend.
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

fn default_fill() -> Rgba {
    Rgba::new(229, 231, 235, 255)
}

fn default_stroke_width() -> f64 {
    2.0
}

fn default_font_size() -> f64 {
    14.0
}

fn default_font_family() -> String {
    "sans-serif".to_string()
}

impl Default for ItemStyle {
    fn default() -> Self {
        Self {
            fill_color: default_fill(),
            stroke_color: Rgba::black(),
            stroke_width: default_stroke_width(),
            text_color: Rgba::black(),
            font_size: default_font_size(),
            font_family: default_font_family(),
        }
    }
}

/// Distance from a point to a line segment (a->b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Enum wrapper for all item types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Item {
    Rectangle(Rectangle),
    Circle(Circle),
    Line(Line),
    Text(TextBox),
}

impl Item {
    /// The item type name, for logging and save payloads.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Item::Rectangle(_) => "rectangle",
            Item::Circle(_) => "circle",
            Item::Line(_) => "line",
            Item::Text(_) => "text",
        }
    }

    pub fn id(&self) -> ItemId {
        match self {
            Item::Rectangle(i) => i.id,
            Item::Circle(i) => i.id,
            Item::Line(i) => i.id,
            Item::Text(i) => i.id,
        }
    }

    /// Assign a fresh unique identifier (used when duplicating).
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Item::Rectangle(i) => i.id = new_id,
            Item::Circle(i) => i.id = new_id,
            Item::Line(i) => i.id = new_id,
            Item::Text(i) => i.id = new_id,
        }
    }

    /// Get the axis-aligned bounding box (ignoring rotation).
    pub fn bounds(&self) -> Rect {
        match self {
            Item::Rectangle(i) => i.bounds(),
            Item::Circle(i) => i.bounds(),
            Item::Line(i) => i.bounds(),
            Item::Text(i) => i.bounds(),
        }
    }

    /// Center of the bounding box; rotation pivots around this point.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Check whether a scene-space point hits this item.
    ///
    /// `tolerance` only matters for lines, where it should be constant in
    /// screen pixels (callers divide by the current zoom).
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Item::Rectangle(i) => i.hit_test(point),
            Item::Circle(i) => i.hit_test(point),
            Item::Line(i) => i.hit_test(point, tolerance),
            Item::Text(i) => i.hit_test(point),
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Item::Rectangle(i) => i.translate(delta),
            Item::Circle(i) => i.translate(delta),
            Item::Line(i) => i.translate(delta),
            Item::Text(i) => i.translate(delta),
        }
    }

    pub fn style(&self) -> &ItemStyle {
        match self {
            Item::Rectangle(i) => &i.style,
            Item::Circle(i) => &i.style,
            Item::Line(i) => &i.style,
            Item::Text(i) => &i.style,
        }
    }

    pub fn style_mut(&mut self) -> &mut ItemStyle {
        match self {
            Item::Rectangle(i) => &mut i.style,
            Item::Circle(i) => &mut i.style,
            Item::Line(i) => &mut i.style,
            Item::Text(i) => &mut i.style,
        }
    }

    /// Rotation in degrees. Lines do not rotate (moving an endpoint is the
    /// equivalent operation) and always report 0.
    pub fn rotation(&self) -> f64 {
        match self {
            Item::Rectangle(i) => i.rotation,
            Item::Circle(i) => i.rotation,
            Item::Text(i) => i.rotation,
            Item::Line(_) => 0.0,
        }
    }

    /// Set the rotation angle in degrees. No-op for lines.
    pub fn set_rotation(&mut self, degrees: f64) {
        match self {
            Item::Rectangle(i) => i.rotation = degrees,
            Item::Circle(i) => i.rotation = degrees,
            Item::Text(i) => i.rotation = degrees,
            Item::Line(_) => {}
        }
    }

    pub fn supports_rotation(&self) -> bool {
        !matches!(self, Item::Line(_))
    }

    pub fn locked(&self) -> bool {
        match self {
            Item::Rectangle(i) => i.locked,
            Item::Circle(i) => i.locked,
            Item::Line(i) => i.locked,
            Item::Text(i) => i.locked,
        }
    }

    pub fn set_locked(&mut self, locked: bool) {
        match self {
            Item::Rectangle(i) => i.locked = locked,
            Item::Circle(i) => i.locked = locked,
            Item::Line(i) => i.locked = locked,
            Item::Text(i) => i.locked = locked,
        }
    }

    /// The display label: a shape's optional caption, or a text box's content.
    pub fn label(&self) -> Option<&str> {
        match self {
            Item::Rectangle(i) => i.label.as_deref(),
            Item::Circle(i) => i.label.as_deref(),
            Item::Line(i) => i.label.as_deref(),
            Item::Text(i) => Some(&i.content),
        }
    }

    /// Set the display label / text content.
    pub fn set_label(&mut self, value: String) {
        match self {
            Item::Rectangle(i) => i.label = Some(value),
            Item::Circle(i) => i.label = Some(value),
            Item::Line(i) => i.label = Some(value),
            Item::Text(i) => i.content = value,
        }
    }
}
