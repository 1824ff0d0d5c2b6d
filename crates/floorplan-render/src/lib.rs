//! Floorplan Render Library
//!
//! Pure display-list renderer and text-overlay support for the floor-plan
//! editor. Frames are flat command lists replayable against any 2D backend.

mod display_list;
mod renderer;
pub mod text_overlay;

pub use display_list::{DisplayList, DrawCommand, Stroke, TextAlign};
pub use renderer::{
    build_display_list, RenderContext, GRID_SIZE, HANDLE_SIZE, RULER_TICK, RULER_WIDTH,
};
pub use text_overlay::{overlay_layout, OverlayLayout, TextEditResult, TextEditSession, TextKey};
