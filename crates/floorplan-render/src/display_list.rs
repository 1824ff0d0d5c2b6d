//! Backend-agnostic draw commands.
//!
//! The renderer emits a flat command list instead of touching a drawing
//! surface, so frames can be asserted on in tests and replayed against any
//! 2D backend.

use kurbo::{Affine, Point, Rect};
use peniko::Color;

/// Horizontal text alignment relative to the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Stroke style for outlines and segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    /// Dash length for dashed strokes (on/off intervals are equal).
    pub dash: Option<f64>,
}

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Color, width: f64, dash: f64) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }
}

/// A single draw command. Commands execute in list order; transforms nest
/// via push/pop.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface.
    Clear { color: Color },
    /// Push a transform onto the stack (composed with the current one).
    PushTransform(Affine),
    /// Pop the innermost transform.
    PopTransform,
    Rect {
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Segment {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Text {
        origin: Point,
        content: String,
        size: f64,
        font_family: String,
        color: Color,
        align: TextAlign,
        /// Clip rect for the glyphs, in the current transform's space.
        /// Text box content clips to its box; free-floating labels do not.
        clip: Option<Rect>,
    },
}

/// An ordered frame of draw commands.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Verify every push has a matching pop, in order.
    pub fn transforms_balanced(&self) -> bool {
        let mut depth: i32 = 0;
        for command in &self.commands {
            match command {
                DrawCommand::PushTransform(_) => depth += 1,
                DrawCommand::PopTransform => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }
}
