//! Text box item.

use super::{ItemId, ItemStyle, Rgba};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default width of a freshly-placed text box.
pub const DEFAULT_TEXT_WIDTH: f64 = 140.0;
/// Default height of a freshly-placed text box.
pub const DEFAULT_TEXT_HEIGHT: f64 = 28.0;

/// A text box, positioned by its top-left corner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    pub(crate) id: ItemId,
    /// Top-left corner position.
    pub position: Point,
    /// Width of the text box.
    pub width: f64,
    /// Height of the text box.
    pub height: f64,
    /// The text content.
    #[serde(default)]
    pub content: String,
    /// Rotation angle in degrees (around center).
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub locked: bool,
    /// Optional background fill behind the text.
    #[serde(default)]
    pub background: Option<Rgba>,
    /// Whether to stroke an outline around the box.
    #[serde(default)]
    pub outlined: bool,
    /// Style properties (text color, font size/family).
    #[serde(default)]
    pub style: ItemStyle,
}

impl TextBox {
    /// Create a new text box at the default placement size.
    pub fn new(position: Point, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width: DEFAULT_TEXT_WIDTH,
            height: DEFAULT_TEXT_HEIGHT,
            content,
            rotation: 0.0,
            locked: false,
            background: None,
            outlined: false,
            style: ItemStyle::default(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Point-in-box test, inclusive on all four edges.
    pub fn hit_test(&self, point: Point) -> bool {
        point.x >= self.position.x
            && point.x <= self.position.x + self.width
            && point.y >= self.position.y
            && point.y <= self.position.y + self.height
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
