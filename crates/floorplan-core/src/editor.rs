//! Interaction state machine: pointer events in, scene mutations out.
//!
//! The editor never owns the scene. Handlers read the host's [`Scene`] and
//! return [`EditorEvent`] values describing the mutations to apply; the host
//! applies them and re-renders. The only item state kept here is the
//! transient snapshot a drag in progress needs.

use crate::camera::Camera;
use crate::context_menu::{ContextMenu, MenuAction};
use crate::handles::{hit_test_handles, HandleKind, HANDLE_HIT_TOLERANCE};
use crate::input::{Modifiers, MouseButton};
use crate::items::{Item, ItemId, ItemStyle};
use crate::scene::Scene;
use crate::tools::{is_degenerate, seed_provisional, update_provisional, Tool};
use kurbo::{Point, Vec2};

/// Pick distance for line hit-testing, in screen pixels (divided by zoom).
pub const PICK_TOLERANCE: f64 = 6.0;

/// Scene mutations and notifications emitted by the editor. The host owns
/// the scene and applies these in order.
#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// Add a new item to the scene.
    ItemCreated(Item),
    /// Replace an existing item (same ID) with updated geometry or text.
    ItemUpdated(Item),
    /// Remove an item.
    ItemDeleted(ItemId),
    /// Duplicate an item (fresh ID, slight offset, placed at the front).
    ItemDuplicated(ItemId),
    /// Toggle an item's lock flag.
    LockToggled(ItemId),
    /// Move an item to the front or back of the z-order.
    LayerChanged { id: ItemId, to_front: bool },
    /// The selection changed.
    SelectionChanged(Option<ItemId>),
    /// An item entered text editing; the host shows the overlay input.
    TextEditStarted(ItemId),
    /// Text editing finished; the host removes the overlay.
    TextEditFinished(ItemId),
}

/// The mutually exclusive interaction modes. Each drag-like mode carries the
/// anchor data its pointer-move handler needs, so an impossible combination
/// of anchors cannot exist.
#[derive(Debug, Clone)]
pub enum InteractionState {
    Idle,
    /// Panning the camera. `grab` is pan minus the pointer position at
    /// drag start, so pan follows the pointer without a jump.
    Panning { grab: Vec2 },
    /// Drawing a new shape. The provisional item is not yet in the scene.
    DrawingShape { anchor: Point, provisional: Item },
    /// Dragging an item. Position updates are incremental: `last_pointer`
    /// is re-tracked every move so deltas never compound.
    DraggingItem {
        id: ItemId,
        item: Item,
        last_pointer: Point,
    },
    /// Resizing via a handle. `original` is the snapshot at drag start and
    /// each move applies the total delta to it, so resizes are drift-free.
    ResizingItem {
        id: ItemId,
        handle: HandleKind,
        original: Item,
        anchor_pointer: Point,
    },
    /// Rotating via the rotate handle. The center is fixed at rotation
    /// start; angular deltas are incremental like drag deltas.
    RotatingItem {
        id: ItemId,
        item: Item,
        center: Point,
        last_pointer: Point,
    },
    /// In-place text editing of one item.
    EditingText { id: ItemId },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Panning { .. } => "panning",
            InteractionState::DrawingShape { .. } => "drawing",
            InteractionState::DraggingItem { .. } => "dragging",
            InteractionState::ResizingItem { .. } => "resizing",
            InteractionState::RotatingItem { .. } => "rotating",
            InteractionState::EditingText { .. } => "editing-text",
        }
    }
}

/// The canvas editor. One instance per open floor plan.
#[derive(Debug)]
pub struct Editor {
    pub camera: Camera,
    pub state: InteractionState,
    /// Active drawing tool, or None for the select tool.
    pub tool: Option<Tool>,
    /// Whether the zoom tool is active (clicks zoom in, centered on the
    /// click point).
    pub zoom_tool: bool,
    pub selected: Option<ItemId>,
    /// Handle under the cursor while idle, for cursor feedback.
    pub hovered_handle: Option<HandleKind>,
    pub context_menu: Option<ContextMenu>,
    /// Style applied to newly drawn items.
    pub style: ItemStyle,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self {
            camera: Camera::new(),
            state: InteractionState::Idle,
            tool: None,
            zoom_tool: false,
            selected: None,
            hovered_handle: None,
            context_menu: None,
            style: ItemStyle::default(),
        }
    }

    /// Select a drawing tool, or None for the select tool. Switching tools
    /// deactivates the zoom tool.
    pub fn set_tool(&mut self, tool: Option<Tool>) {
        self.tool = tool;
        self.zoom_tool = false;
    }

    pub fn set_zoom_tool(&mut self, active: bool) {
        self.zoom_tool = active;
        if active {
            self.tool = None;
        }
    }

    fn transition(&mut self, next: InteractionState) {
        log::debug!("interaction: {} -> {}", self.state.name(), next.name());
        self.state = next;
    }

    fn select(&mut self, id: Option<ItemId>, events: &mut Vec<EditorEvent>) {
        if self.selected != id {
            self.selected = id;
            events.push(EditorEvent::SelectionChanged(id));
        }
    }

    /// Line pick tolerance in scene units at the current zoom.
    fn pick_tolerance(&self) -> f64 {
        PICK_TOLERANCE / self.camera.zoom
    }

    /// Handle hit tolerance in scene units at the current zoom.
    fn handle_tolerance(&self) -> f64 {
        HANDLE_HIT_TOLERANCE / self.camera.zoom
    }

    /// Handle a pointer-down event. `client` is in client coordinates.
    pub fn pointer_down(
        &mut self,
        scene: &Scene,
        client: Point,
        button: MouseButton,
        modifiers: Modifiers,
    ) -> Vec<EditorEvent> {
        let mut events = Vec::new();

        if button == MouseButton::Left {
            self.context_menu = None;
        }

        if !self.state.is_idle() {
            return events;
        }

        // Middle button, or modifier-click with no drawing tool, pans.
        let pan_gesture = button == MouseButton::Middle
            || (button == MouseButton::Left && modifiers.command() && self.tool.is_none());
        if pan_gesture {
            self.transition(InteractionState::Panning {
                grab: self.camera.pan - client.to_vec2(),
            });
            return events;
        }

        if button != MouseButton::Left {
            return events;
        }

        let scene_point = self.camera.to_scene(client);

        // Zoom tool: instantaneous, no sustained state.
        if self.zoom_tool {
            self.camera.zoom_tool_click(scene_point);
            return events;
        }

        if let Some(tool) = self.tool {
            if tool == Tool::Text {
                // Text places immediately and opens the editor overlay.
                let item = seed_provisional(Tool::Text, scene_point, &self.style);
                let id = item.id();
                events.push(EditorEvent::ItemCreated(item));
                self.select(Some(id), &mut events);
                self.transition(InteractionState::EditingText { id });
                events.push(EditorEvent::TextEditStarted(id));
            } else {
                let provisional = seed_provisional(tool, scene_point, &self.style);
                self.transition(InteractionState::DrawingShape {
                    anchor: scene_point,
                    provisional,
                });
            }
            return events;
        }

        // Handles of the selected, unlocked item take priority over bodies.
        if let Some(selected) = self.selected.and_then(|id| scene.item(id)) {
            if !selected.locked() {
                if let Some(handle) =
                    hit_test_handles(selected, scene_point, self.handle_tolerance())
                {
                    let id = selected.id();
                    if handle == HandleKind::Rotate {
                        self.transition(InteractionState::RotatingItem {
                            id,
                            item: selected.clone(),
                            center: selected.center(),
                            last_pointer: scene_point,
                        });
                    } else {
                        self.transition(InteractionState::ResizingItem {
                            id,
                            handle,
                            original: selected.clone(),
                            anchor_pointer: scene_point,
                        });
                    }
                    return events;
                }

                if selected.hit_test(scene_point, self.pick_tolerance()) {
                    self.transition(InteractionState::DraggingItem {
                        id: selected.id(),
                        item: selected.clone(),
                        last_pointer: scene_point,
                    });
                    return events;
                }
            }
        }

        // Plain click: select the topmost hit, or deselect on empty canvas.
        match scene.hit_test(scene_point, self.pick_tolerance()) {
            Some(hit) => self.select(Some(hit.id()), &mut events),
            None => self.select(None, &mut events),
        }
        events
    }

    /// Handle a pointer-move event.
    pub fn pointer_move(&mut self, scene: &Scene, client: Point) -> Vec<EditorEvent> {
        let mut events = Vec::new();
        let scene_point = self.camera.to_scene(client);

        match &mut self.state {
            InteractionState::Idle => {
                self.hovered_handle = self
                    .selected
                    .and_then(|id| scene.item(id))
                    .and_then(|item| {
                        hit_test_handles(item, scene_point, HANDLE_HIT_TOLERANCE / self.camera.zoom)
                    });
            }
            InteractionState::Panning { grab } => {
                self.camera.pan = client.to_vec2() + *grab;
            }
            InteractionState::DrawingShape {
                anchor,
                provisional,
            } => {
                update_provisional(provisional, *anchor, scene_point);
            }
            InteractionState::DraggingItem {
                item, last_pointer, ..
            } => {
                let delta = scene_point - *last_pointer;
                item.translate(delta);
                *last_pointer = scene_point;
                events.push(EditorEvent::ItemUpdated(item.clone()));
            }
            InteractionState::ResizingItem {
                handle,
                original,
                anchor_pointer,
                ..
            } => {
                let delta = scene_point - *anchor_pointer;
                let updated = crate::handles::apply_resize(original, *handle, delta);
                events.push(EditorEvent::ItemUpdated(updated));
            }
            InteractionState::RotatingItem {
                item,
                center,
                last_pointer,
                ..
            } => {
                let previous = angle_deg(*center, *last_pointer);
                let current = angle_deg(*center, scene_point);
                let delta = normalize_deg(current - previous);
                item.set_rotation(normalize_deg(item.rotation() + delta));
                *last_pointer = scene_point;
                events.push(EditorEvent::ItemUpdated(item.clone()));
            }
            InteractionState::EditingText { .. } => {}
        }
        events
    }

    /// Handle a pointer-up event.
    pub fn pointer_up(&mut self, _scene: &Scene) -> Vec<EditorEvent> {
        let mut events = Vec::new();
        match &self.state {
            InteractionState::DrawingShape { provisional, .. } => {
                if !is_degenerate(provisional) {
                    let id = provisional.id();
                    events.push(EditorEvent::ItemCreated(provisional.clone()));
                    self.transition(InteractionState::Idle);
                    self.select(Some(id), &mut events);
                } else {
                    log::debug!("discarding degenerate {}", provisional.kind_name());
                    self.transition(InteractionState::Idle);
                }
            }
            InteractionState::EditingText { .. } | InteractionState::Idle => {}
            _ => self.transition(InteractionState::Idle),
        }
        events
    }

    /// The pointer left the canvas; treated like a release.
    pub fn pointer_leave(&mut self, scene: &Scene) -> Vec<EditorEvent> {
        self.hovered_handle = None;
        self.pointer_up(scene)
    }

    /// Handle a wheel event. Zoom only engages while the command modifier
    /// is held; otherwise the host's scroll container consumes the event.
    pub fn wheel(&mut self, ticks: f64, modifiers: Modifiers) {
        self.camera.wheel_zoom(ticks, modifiers.command());
    }

    /// Handle a right-click: open the context menu on a hit item, close it
    /// otherwise.
    pub fn context_click(&mut self, scene: &Scene, client: Point) -> Vec<EditorEvent> {
        let mut events = Vec::new();
        let scene_point = self.camera.to_scene(client);
        match scene.hit_test(scene_point, self.pick_tolerance()) {
            Some(hit) => {
                self.select(Some(hit.id()), &mut events);
                self.context_menu = Some(ContextMenu::new(hit.id(), client, hit.locked()));
            }
            None => self.context_menu = None,
        }
        events
    }

    /// Execute a context-menu action against its target, then close the
    /// menu.
    pub fn menu_action(&mut self, action: MenuAction) -> Vec<EditorEvent> {
        let mut events = Vec::new();
        let Some(menu) = self.context_menu.take() else {
            return events;
        };
        let target = menu.target;
        match action {
            MenuAction::Duplicate => events.push(EditorEvent::ItemDuplicated(target)),
            MenuAction::ToggleLock => events.push(EditorEvent::LockToggled(target)),
            // Grouping is not implemented; the entry is a placeholder.
            MenuAction::Group => log::debug!("group action ignored"),
            MenuAction::SendToBack => events.push(EditorEvent::LayerChanged {
                id: target,
                to_front: false,
            }),
            MenuAction::BringToFront => events.push(EditorEvent::LayerChanged {
                id: target,
                to_front: true,
            }),
            MenuAction::Delete => {
                events.push(EditorEvent::ItemDeleted(target));
                if self.selected == Some(target) {
                    self.select(None, &mut events);
                }
            }
        }
        events
    }

    /// Double-click starts text editing on the hit item, unless locked.
    pub fn double_click(&mut self, scene: &Scene, client: Point) -> Vec<EditorEvent> {
        let mut events = Vec::new();
        if !self.state.is_idle() {
            return events;
        }
        let scene_point = self.camera.to_scene(client);
        if let Some(hit) = scene.hit_test(scene_point, self.pick_tolerance()) {
            if !hit.locked() {
                let id = hit.id();
                self.select(Some(id), &mut events);
                self.transition(InteractionState::EditingText { id });
                events.push(EditorEvent::TextEditStarted(id));
            }
        }
        events
    }

    /// A keystroke in the text overlay: push the new text to the item
    /// immediately so the canvas stays in sync.
    pub fn text_input(&mut self, scene: &Scene, text: &str) -> Vec<EditorEvent> {
        let mut events = Vec::new();
        if let InteractionState::EditingText { id } = self.state {
            if let Some(item) = scene.item(id) {
                let mut updated = item.clone();
                updated.set_label(text.to_string());
                events.push(EditorEvent::ItemUpdated(updated));
            }
        }
        events
    }

    /// Finish text editing (blur, Enter, or Escape). The text was already
    /// committed keystroke by keystroke.
    pub fn finish_text_edit(&mut self) -> Vec<EditorEvent> {
        let mut events = Vec::new();
        if let InteractionState::EditingText { id } = self.state {
            self.transition(InteractionState::Idle);
            events.push(EditorEvent::TextEditFinished(id));
        }
        events
    }
}

/// Angle in degrees from `center` to `point`.
fn angle_deg(center: Point, point: Point) -> f64 {
    (point.y - center.y).atan2(point.x - center.x).to_degrees()
}

/// Normalize an angle in degrees to [-180, 180].
pub fn normalize_deg(mut degrees: f64) -> f64 {
    while degrees > 180.0 {
        degrees -= 360.0;
    }
    while degrees < -180.0 {
        degrees += 360.0;
    }
    degrees
}
