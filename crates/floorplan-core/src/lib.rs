//! Floorplan Core Library
//!
//! Platform-agnostic scene model and interaction logic for the floor-plan
//! canvas editor.

pub mod autosave;
pub mod camera;
pub mod context_menu;
pub mod editor;
pub mod handles;
pub mod input;
pub mod items;
pub mod scene;
pub mod tools;

pub use autosave::{SaveDebouncer, SAVE_DEBOUNCE};
pub use camera::{Camera, MAX_ZOOM, MIN_ZOOM};
pub use context_menu::{ContextMenu, MenuAction};
pub use editor::{Editor, EditorEvent, InteractionState};
pub use handles::{get_handles, hit_test_handles, Corner, Edge, Handle, HandleKind};
pub use input::{Modifiers, MouseButton};
pub use items::{Item, ItemId, ItemStyle, Rgba};
pub use scene::{Scene, SceneError};
pub use tools::Tool;
