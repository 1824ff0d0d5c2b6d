//! Right-click context menu model.

use crate::items::ItemId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Actions offered by the item context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuAction {
    Duplicate,
    ToggleLock,
    Group,
    SendToBack,
    BringToFront,
    Delete,
}

/// An open context menu targeting one item.
///
/// The menu anchors at the click position in screen coordinates so the host
/// can place it without knowing the camera transform. Opening a menu also
/// selects the target.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    /// The item the menu acts on.
    pub target: ItemId,
    /// Anchor position in screen coordinates.
    pub position: Point,
    /// Lock state of the target when the menu opened, used for the
    /// lock/unlock entry label.
    pub target_locked: bool,
}

impl ContextMenu {
    pub fn new(target: ItemId, position: Point, target_locked: bool) -> Self {
        Self {
            target,
            position,
            target_locked,
        }
    }

    /// Menu entries in display order, with their labels.
    pub fn entries(&self) -> Vec<(MenuAction, &'static str)> {
        vec![
            (MenuAction::Duplicate, "Duplicate"),
            (
                MenuAction::ToggleLock,
                if self.target_locked { "Unlock" } else { "Lock" },
            ),
            (MenuAction::Group, "Group"),
            (MenuAction::SendToBack, "Send to back"),
            (MenuAction::BringToFront, "Bring to front"),
            (MenuAction::Delete, "Delete"),
        ]
    }
}
