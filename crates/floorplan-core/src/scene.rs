//! Scene document: the ordered item list plus floor metadata.

use crate::items::{Item, ItemId};
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Offset applied to duplicated items so the copy is visible.
const DUPLICATE_OFFSET: Vec2 = Vec2::new(16.0, 16.0);

/// Scene (de)serialization errors.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A floor-plan scene. List order defines z-order: the last item draws on
/// top. Layer changes are list splices, not a z-index field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Floor name, used as a save-payload label by the host.
    pub floor_name: String,
    /// All items, back to front.
    pub items: Vec<Item>,
    /// Scene-space canvas size.
    pub canvas_size: Size,
    /// Last-updated timestamp (epoch milliseconds), maintained by the host.
    #[serde(default)]
    pub last_updated: u64,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(floor_name: impl Into<String>, canvas_size: Size) -> Self {
        Self {
            floor_name: floor_name.into(),
            items: Vec::new(),
            canvas_size,
            last_updated: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Get an item by ID.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Get a mutable reference to an item by ID.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Append an item at the front of the z-order.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove an item, returning it if present.
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let pos = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(pos))
    }

    /// Replace an item in place, keeping its z-order slot. Returns false if
    /// no item with the replacement's ID exists.
    pub fn replace_item(&mut self, item: Item) -> bool {
        match self.item_mut(item.id()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Duplicate an item: fresh ID, unlocked, offset slightly, placed at the
    /// front. Returns the new item's ID.
    pub fn duplicate_item(&mut self, id: ItemId) -> Option<ItemId> {
        let mut copy = self.item(id)?.clone();
        copy.regenerate_id();
        copy.set_locked(false);
        copy.translate(DUPLICATE_OFFSET);
        let new_id = copy.id();
        self.items.push(copy);
        Some(new_id)
    }

    /// Toggle an item's lock flag. Returns the new state.
    pub fn toggle_lock(&mut self, id: ItemId) -> Option<bool> {
        let item = self.item_mut(id)?;
        let locked = !item.locked();
        item.set_locked(locked);
        Some(locked)
    }

    /// Move an item to the front of the z-order (end of the list).
    pub fn bring_to_front(&mut self, id: ItemId) {
        if let Some(item) = self.remove_item(id) {
            self.items.push(item);
        }
    }

    /// Move an item to the back of the z-order (head of the list).
    pub fn send_to_back(&mut self, id: ItemId) {
        if let Some(item) = self.remove_item(id) {
            self.items.insert(0, item);
        }
    }

    /// Find the topmost item at a scene-space point.
    ///
    /// Scans front to back (reverse list order) so the visually topmost item
    /// wins when items overlap. `tolerance` is the line pick distance in
    /// scene units.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> Option<&Item> {
        self.items
            .iter()
            .rev()
            .find(|item| item.hit_test(point, tolerance))
    }

    /// Serialize the scene to JSON.
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a scene from JSON.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }
}
