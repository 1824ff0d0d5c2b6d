//! Text-edit overlay: positioning and key handling for the in-place input.

use floorplan_core::camera::Camera;
use floorplan_core::items::{Item, ItemId};
use kurbo::{Point, Size};

/// Keyboard key for the overlay input.
#[derive(Debug, Clone, PartialEq)]
pub enum TextKey {
    Character(String),
    Backspace,
    Enter,
    Escape,
}

/// Result of handling an overlay event.
#[derive(Debug, Clone, PartialEq)]
pub enum TextEditResult {
    /// Event was handled, text may have changed.
    Handled,
    /// Event was handled, editing should end.
    ExitEdit,
    /// Event was not handled (pass to other handlers).
    NotHandled,
}

/// Geometry for the overlay input, in screen coordinates.
///
/// The overlay sits exactly over the item's on-screen bounds and mirrors
/// the item's rotation about the same center, so the input visually
/// replaces the item while it is hidden from the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayout {
    /// Top-left corner of the input in screen coordinates.
    pub origin: Point,
    /// Input size in screen pixels.
    pub size: Size,
    /// Rotation in degrees, applied about the input's center.
    pub rotation: f64,
    /// Font size scaled to the current zoom.
    pub font_size: f64,
    /// Font family of the underlying item.
    pub font_family: String,
}

/// Compute the overlay geometry for an item under edit. Only text boxes
/// take the overlay input; shape labels edit through other controls, so
/// other item kinds return None.
pub fn overlay_layout(item: &Item, camera: &Camera) -> Option<OverlayLayout> {
    let Item::Text(_) = item else {
        return None;
    };
    let bounds = item.bounds();
    let style = item.style();
    Some(OverlayLayout {
        origin: camera.to_screen(Point::new(bounds.x0, bounds.y0)),
        size: Size::new(bounds.width() * camera.zoom, bounds.height() * camera.zoom),
        rotation: item.rotation(),
        font_size: style.font_size * camera.zoom,
        font_family: style.font_family.clone(),
    })
}

/// Live editing state for one item's text.
#[derive(Debug, Clone)]
pub struct TextEditSession {
    /// The item under edit.
    pub item_id: ItemId,
    /// Current input contents; pushed to the item on every change.
    pub draft: String,
}

impl TextEditSession {
    pub fn new(item_id: ItemId, initial: &str) -> Self {
        Self {
            item_id,
            draft: initial.to_string(),
        }
    }

    /// Handle a key event. Character and backspace edits mutate the draft
    /// and report [`TextEditResult::Handled`]; the caller then pushes the
    /// draft to the item. Enter and Escape both end editing, since every
    /// keystroke is already committed.
    pub fn handle_key(&mut self, key: TextKey) -> TextEditResult {
        match key {
            TextKey::Character(text) => {
                self.draft.push_str(&text);
                TextEditResult::Handled
            }
            TextKey::Backspace => {
                self.draft.pop();
                TextEditResult::Handled
            }
            TextKey::Enter | TextKey::Escape => TextEditResult::ExitEdit,
        }
    }

    /// Whether a focus loss should end editing. Focus moving into a text
    /// styling control keeps the session alive so users can adjust the
    /// font without the overlay closing under them.
    pub fn should_close_on_blur(&self, focus_in_text_controls: bool) -> bool {
        !focus_in_text_controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_core::items::TextBox;
    use kurbo::Vec2;

    #[test]
    fn test_overlay_matches_screen_bounds() {
        let mut text = TextBox::new(Point::new(100.0, 50.0), "Lobby".to_string());
        text.rotation = 30.0;
        let mut camera = Camera::new();
        camera.zoom = 2.0;
        camera.pan = Vec2::new(10.0, 20.0);

        let layout = overlay_layout(&Item::Text(text.clone()), &camera).unwrap();
        assert_eq!(layout.origin, camera.to_screen(text.position));
        assert!((layout.size.width - text.width * 2.0).abs() < f64::EPSILON);
        assert!((layout.size.height - text.height * 2.0).abs() < f64::EPSILON);
        assert!((layout.rotation - 30.0).abs() < f64::EPSILON);
        assert!((layout.font_size - text.style.font_size * 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_only_text_items_get_an_overlay() {
        use floorplan_core::items::Rectangle;
        let camera = Camera::new();
        let rect = Item::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 50.0, 50.0));
        assert!(overlay_layout(&rect, &camera).is_none());
    }

    #[test]
    fn test_key_handling() {
        let mut session = TextEditSession::new(ItemId::new_v4(), "Roo");
        assert_eq!(
            session.handle_key(TextKey::Character("m".to_string())),
            TextEditResult::Handled
        );
        assert_eq!(session.draft, "Room");

        assert_eq!(session.handle_key(TextKey::Backspace), TextEditResult::Handled);
        assert_eq!(session.draft, "Roo");

        assert_eq!(session.handle_key(TextKey::Enter), TextEditResult::ExitEdit);
        assert_eq!(
            session.handle_key(TextKey::Escape),
            TextEditResult::ExitEdit
        );
    }

    #[test]
    fn test_blur_suppressed_in_text_controls() {
        let session = TextEditSession::new(ItemId::new_v4(), "");
        assert!(session.should_close_on_blur(false));
        assert!(!session.should_close_on_blur(true));
    }
}
