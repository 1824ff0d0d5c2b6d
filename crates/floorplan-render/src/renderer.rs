//! Pure scene renderer: editor state in, display list out.

use crate::display_list::{DisplayList, DrawCommand, Stroke, TextAlign};
use floorplan_core::camera::Camera;
use floorplan_core::handles::{get_handles, HandleKind};
use floorplan_core::items::{Item, ItemId};
use floorplan_core::scene::Scene;
use kurbo::{Affine, Point, Size};
use peniko::Color;

/// Grid spacing in scene units.
pub const GRID_SIZE: f64 = 20.0;
/// Ruler tick spacing in scene units.
pub const RULER_TICK: f64 = 50.0;
/// Ruler band thickness in screen pixels.
pub const RULER_WIDTH: f64 = 24.0;
/// Resize handle square size in screen pixels (divided by zoom).
pub const HANDLE_SIZE: f64 = 8.0;

/// Context for a single frame.
pub struct RenderContext<'a> {
    /// The scene to render.
    pub scene: &'a Scene,
    /// Camera transform for the frame.
    pub camera: &'a Camera,
    /// Viewport size in pixels.
    pub viewport_size: Size,
    /// Background color.
    pub background_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Currently selected item, if any.
    pub selected: Option<ItemId>,
    /// Item being text-edited; skipped so the overlay input is the only
    /// visible copy.
    pub editing_item: Option<ItemId>,
    /// In-progress shape not yet committed to the scene.
    pub provisional: Option<&'a Item>,
    /// Whether to draw the background grid.
    pub show_grid: bool,
    /// Whether to draw the edge rulers.
    pub show_rulers: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(scene: &'a Scene, camera: &'a Camera, viewport_size: Size) -> Self {
        Self {
            scene,
            camera,
            viewport_size,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255),
            selected: None,
            editing_item: None,
            provisional: None,
            show_grid: true,
            show_rulers: true,
        }
    }

    pub fn with_selected(mut self, selected: Option<ItemId>) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_editing_item(mut self, editing: Option<ItemId>) -> Self {
        self.editing_item = editing;
        self
    }

    pub fn with_provisional(mut self, provisional: Option<&'a Item>) -> Self {
        self.provisional = provisional;
        self
    }

    pub fn with_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    pub fn with_rulers(mut self, show: bool) -> Self {
        self.show_rulers = show;
        self
    }
}

/// Build the frame's display list.
///
/// Draw order: clear, camera transform, grid, items back to front, selection
/// treatment, provisional shape, then rulers in screen space after the
/// transform pops. Items under text edit are skipped so the overlay input
/// is the only visible rendition.
pub fn build_display_list(ctx: &RenderContext) -> DisplayList {
    let mut list = DisplayList::new();
    list.push(DrawCommand::Clear {
        color: ctx.background_color,
    });

    let camera = ctx.camera;
    list.push(DrawCommand::PushTransform(
        Affine::translate(camera.pan - camera.scroll) * Affine::scale(camera.zoom),
    ));

    if ctx.show_grid {
        draw_grid(&mut list, ctx.scene.canvas_size);
    }

    for item in &ctx.scene.items {
        if ctx.editing_item == Some(item.id()) {
            continue;
        }
        draw_item(&mut list, item);
    }

    if let Some(selected) = ctx.selected.and_then(|id| ctx.scene.item(id)) {
        if ctx.editing_item != Some(selected.id()) {
            draw_selection(&mut list, selected, ctx.selection_color, camera.zoom);
        }
    }

    if let Some(provisional) = ctx.provisional {
        draw_item(&mut list, provisional);
    }

    list.push(DrawCommand::PopTransform);

    if ctx.show_rulers {
        draw_rulers(&mut list, camera, ctx.viewport_size);
    }

    log::trace!("frame: {} commands", list.len());
    list
}

fn grid_stroke() -> Stroke {
    Stroke::solid(Color::from_rgba8(229, 231, 235, 255), 1.0)
}

fn draw_grid(list: &mut DisplayList, canvas_size: Size) {
    let stroke = grid_stroke();
    let mut x = 0.0;
    while x <= canvas_size.width {
        list.push(DrawCommand::Segment {
            from: Point::new(x, 0.0),
            to: Point::new(x, canvas_size.height),
            stroke,
        });
        x += GRID_SIZE;
    }
    let mut y = 0.0;
    while y <= canvas_size.height {
        list.push(DrawCommand::Segment {
            from: Point::new(0.0, y),
            to: Point::new(canvas_size.width, y),
            stroke,
        });
        y += GRID_SIZE;
    }
}

/// Rotation transform about an item's center, or None when unrotated.
fn rotation_transform(item: &Item) -> Option<Affine> {
    let degrees = item.rotation();
    if degrees == 0.0 {
        return None;
    }
    let center = item.center();
    Some(Affine::rotate_about(
        degrees.to_radians(),
        center,
    ))
}

fn draw_item(list: &mut DisplayList, item: &Item) {
    let rotated = rotation_transform(item);
    if let Some(transform) = rotated {
        list.push(DrawCommand::PushTransform(transform));
    }

    let style = item.style();
    let stroke = Stroke::solid(style.stroke_color.into(), style.stroke_width);

    match item {
        Item::Rectangle(rect) => {
            list.push(DrawCommand::Rect {
                rect: rect.bounds(),
                fill: Some(style.fill_color.into()),
                stroke: Some(stroke),
            });
            if let Some(label) = &rect.label {
                draw_label(list, item, label);
            }
        }
        Item::Circle(circle) => {
            list.push(DrawCommand::Circle {
                center: circle.center,
                radius: circle.radius,
                fill: Some(style.fill_color.into()),
                stroke: Some(stroke),
            });
            if let Some(label) = &circle.label {
                draw_label(list, item, label);
            }
        }
        Item::Line(line) => {
            list.push(DrawCommand::Segment {
                from: line.start,
                to: line.end,
                stroke,
            });
            if let Some(label) = &line.label {
                list.push(DrawCommand::Text {
                    origin: line.midpoint(),
                    content: label.clone(),
                    size: style.font_size,
                    font_family: style.font_family.clone(),
                    color: style.text_color.into(),
                    align: TextAlign::Center,
                    clip: None,
                });
            }
        }
        Item::Text(text) => {
            if text.background.is_some() || text.outlined {
                list.push(DrawCommand::Rect {
                    rect: text.bounds(),
                    fill: text.background.map(Into::into),
                    stroke: text.outlined.then_some(stroke),
                });
            }
            // Content must not overflow the box
            list.push(DrawCommand::Text {
                origin: Point::new(text.position.x, text.position.y + style.font_size),
                content: text.content.clone(),
                size: style.font_size,
                font_family: style.font_family.clone(),
                color: style.text_color.into(),
                align: TextAlign::Left,
                clip: Some(text.bounds()),
            });
        }
    }

    if rotated.is_some() {
        list.push(DrawCommand::PopTransform);
    }
}

fn draw_label(list: &mut DisplayList, item: &Item, label: &str) {
    let style = item.style();
    list.push(DrawCommand::Text {
        origin: item.center(),
        content: label.to_string(),
        size: style.font_size,
        font_family: style.font_family.clone(),
        color: style.text_color.into(),
        align: TextAlign::Center,
        clip: None,
    });
}

/// Selection treatment: handles for editable items, a dashed red outline
/// for locked ones. Handle positions come pre-rotated, so no transform
/// push is needed here.
fn draw_selection(list: &mut DisplayList, item: &Item, color: Color, zoom: f64) {
    if item.locked() {
        list.push(DrawCommand::Rect {
            rect: item.bounds().inflate(2.0 / zoom, 2.0 / zoom),
            fill: None,
            stroke: Some(Stroke::dashed(
                Color::from_rgba8(239, 68, 68, 255),
                1.5 / zoom,
                4.0 / zoom,
            )),
        });
        return;
    }

    let handles = get_handles(item);
    let size = HANDLE_SIZE / zoom;
    let white = Color::from_rgba8(255, 255, 255, 255);

    // Guide line connecting the rotate handle to the item center
    if let Some(rotate) = handles.iter().find(|h| h.kind == HandleKind::Rotate) {
        list.push(DrawCommand::Segment {
            from: item.center(),
            to: rotate.position,
            stroke: Stroke::solid(color, 1.0 / zoom),
        });
    }

    for handle in &handles {
        match handle.kind {
            HandleKind::Rotate => list.push(DrawCommand::Circle {
                center: handle.position,
                radius: size / 2.0,
                fill: Some(white),
                stroke: Some(Stroke::solid(color, 1.5 / zoom)),
            }),
            _ => list.push(DrawCommand::Rect {
                rect: kurbo::Rect::from_center_size(handle.position, Size::new(size, size)),
                fill: Some(white),
                stroke: Some(Stroke::solid(color, 1.5 / zoom)),
            }),
        }
    }
}

/// Rulers draw in screen space along the top and left edges, with ticks at
/// scene-coordinate multiples of [`RULER_TICK`] projected through the
/// camera.
fn draw_rulers(list: &mut DisplayList, camera: &Camera, viewport: Size) {
    let band = Color::from_rgba8(249, 250, 251, 255);
    let tick_stroke = Stroke::solid(Color::from_rgba8(156, 163, 175, 255), 1.0);
    let label_color = Color::from_rgba8(107, 114, 128, 255);

    list.push(DrawCommand::Rect {
        rect: kurbo::Rect::new(0.0, 0.0, viewport.width, RULER_WIDTH),
        fill: Some(band),
        stroke: None,
    });
    list.push(DrawCommand::Rect {
        rect: kurbo::Rect::new(0.0, 0.0, RULER_WIDTH, viewport.height),
        fill: Some(band),
        stroke: None,
    });

    let offset = camera.pan - camera.scroll;

    // Horizontal ticks
    let scene_min = (-offset.x) / camera.zoom;
    let mut t = (scene_min / RULER_TICK).floor() * RULER_TICK;
    loop {
        let x = t * camera.zoom + offset.x;
        if x > viewport.width {
            break;
        }
        if x >= RULER_WIDTH {
            list.push(DrawCommand::Segment {
                from: Point::new(x, RULER_WIDTH - 6.0),
                to: Point::new(x, RULER_WIDTH),
                stroke: tick_stroke,
            });
            list.push(DrawCommand::Text {
                origin: Point::new(x + 2.0, RULER_WIDTH - 8.0),
                content: format!("{}", t as i64),
                size: 9.0,
                font_family: "sans-serif".to_string(),
                color: label_color,
                align: TextAlign::Left,
                clip: None,
            });
        }
        t += RULER_TICK;
    }

    // Vertical ticks
    let scene_min = (-offset.y) / camera.zoom;
    let mut t = (scene_min / RULER_TICK).floor() * RULER_TICK;
    loop {
        let y = t * camera.zoom + offset.y;
        if y > viewport.height {
            break;
        }
        if y >= RULER_WIDTH {
            list.push(DrawCommand::Segment {
                from: Point::new(RULER_WIDTH - 6.0, y),
                to: Point::new(RULER_WIDTH, y),
                stroke: tick_stroke,
            });
            list.push(DrawCommand::Text {
                origin: Point::new(2.0, y - 2.0),
                content: format!("{}", t as i64),
                size: 9.0,
                font_family: "sans-serif".to_string(),
                color: label_color,
                align: TextAlign::Left,
                clip: None,
            });
        }
        t += RULER_TICK;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_core::items::{Rectangle, TextBox};

    fn scene_with_rect() -> (Scene, ItemId) {
        let mut scene = Scene::new("Floor 1", Size::new(200.0, 100.0));
        let item = Item::Rectangle(Rectangle::new(Point::new(20.0, 20.0), 60.0, 40.0));
        let id = item.id();
        scene.add_item(item);
        (scene, id)
    }

    #[test]
    fn test_frame_starts_with_clear_and_is_balanced() {
        let (scene, _) = scene_with_rect();
        let camera = Camera::new();
        let ctx = RenderContext::new(&scene, &camera, Size::new(800.0, 600.0));
        let list = build_display_list(&ctx);

        assert!(matches!(list.commands[0], DrawCommand::Clear { .. }));
        assert!(matches!(list.commands[1], DrawCommand::PushTransform(_)));
        assert!(list.transforms_balanced());
    }

    #[test]
    fn test_grid_line_count() {
        let (scene, _) = scene_with_rect();
        let camera = Camera::new();
        let ctx = RenderContext::new(&scene, &camera, Size::new(800.0, 600.0))
            .with_rulers(false);
        let list = build_display_list(&ctx);

        // Canvas 200x100 at 20-unit spacing: 11 vertical + 6 horizontal
        let segments = list
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Segment { .. }))
            .count();
        assert_eq!(segments, 17);
    }

    #[test]
    fn test_selected_item_gets_handles() {
        let (scene, id) = scene_with_rect();
        let camera = Camera::new();
        let ctx = RenderContext::new(&scene, &camera, Size::new(800.0, 600.0))
            .with_grid(false)
            .with_rulers(false)
            .with_selected(Some(id));
        let list = build_display_list(&ctx);

        // 8 square handles plus the item rect itself
        let rects = list
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count();
        assert_eq!(rects, 9);
        // Rotate handle is a circle
        assert!(list
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Circle { .. })));
    }

    #[test]
    fn test_locked_selection_draws_dashed_outline() {
        let (mut scene, id) = scene_with_rect();
        scene.toggle_lock(id);
        let camera = Camera::new();
        let ctx = RenderContext::new(&scene, &camera, Size::new(800.0, 600.0))
            .with_grid(false)
            .with_rulers(false)
            .with_selected(Some(id));
        let list = build_display_list(&ctx);

        let dashed = list.commands.iter().any(|c| {
            matches!(
                c,
                DrawCommand::Rect {
                    stroke: Some(Stroke { dash: Some(_), .. }),
                    ..
                }
            )
        });
        assert!(dashed);
        // No handles on a locked item
        let circles = list
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count();
        assert_eq!(circles, 0);
    }

    #[test]
    fn test_editing_item_is_skipped() {
        let mut scene = Scene::new("Floor 1", Size::new(200.0, 100.0));
        let item = Item::Text(TextBox::new(Point::new(10.0, 10.0), "Lobby".to_string()));
        let id = item.id();
        scene.add_item(item);
        let camera = Camera::new();

        let ctx = RenderContext::new(&scene, &camera, Size::new(800.0, 600.0))
            .with_grid(false)
            .with_rulers(false)
            .with_editing_item(Some(id));
        let list = build_display_list(&ctx);
        assert!(!list
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { .. })));
    }

    #[test]
    fn test_text_content_clips_to_its_box() {
        let mut scene = Scene::new("Floor 1", Size::new(200.0, 100.0));
        let mut text = TextBox::new(
            Point::new(10.0, 10.0),
            "a label much wider than the box it lives in".to_string(),
        );
        text.width = 40.0;
        let expected = text.bounds();
        scene.add_item(Item::Text(text));
        let camera = Camera::new();

        let ctx = RenderContext::new(&scene, &camera, Size::new(800.0, 600.0))
            .with_grid(false)
            .with_rulers(false);
        let list = build_display_list(&ctx);

        let clip = list
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text { clip, .. } => Some(*clip),
                _ => None,
            })
            .unwrap();
        assert_eq!(clip, Some(expected));
    }

    #[test]
    fn test_shape_labels_are_unclipped() {
        let mut scene = Scene::new("Floor 1", Size::new(200.0, 100.0));
        let mut rect = Rectangle::new(Point::new(20.0, 20.0), 60.0, 40.0);
        rect.label = Some("Desk".to_string());
        scene.add_item(Item::Rectangle(rect));
        let camera = Camera::new();

        let ctx = RenderContext::new(&scene, &camera, Size::new(800.0, 600.0))
            .with_grid(false)
            .with_rulers(false);
        let list = build_display_list(&ctx);

        assert!(list.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Text { clip: None, .. }
        )));
    }

    #[test]
    fn test_rotate_guide_runs_from_center() {
        let (scene, id) = scene_with_rect();
        let camera = Camera::new();
        let ctx = RenderContext::new(&scene, &camera, Size::new(800.0, 600.0))
            .with_grid(false)
            .with_rulers(false)
            .with_selected(Some(id));
        let list = build_display_list(&ctx);

        let center = scene.item(id).unwrap().center();
        let guide = list
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Segment { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .unwrap();
        assert_eq!(guide.0, center);
        // Handle sits 30 units above the top edge, on the center's x axis
        assert!((guide.1.x - center.x).abs() < f64::EPSILON);
        assert!(guide.1.y < scene.item(id).unwrap().bounds().y0);
    }

    #[test]
    fn test_rotated_item_pushes_transform() {
        let mut scene = Scene::new("Floor 1", Size::new(200.0, 100.0));
        let mut rect = Rectangle::new(Point::new(20.0, 20.0), 60.0, 40.0);
        rect.rotation = 45.0;
        scene.add_item(Item::Rectangle(rect));
        let camera = Camera::new();

        let ctx = RenderContext::new(&scene, &camera, Size::new(800.0, 600.0))
            .with_grid(false)
            .with_rulers(false);
        let list = build_display_list(&ctx);

        let pushes = list
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::PushTransform(_)))
            .count();
        // Camera transform plus the item rotation
        assert_eq!(pushes, 2);
        assert!(list.transforms_balanced());
    }

    #[test]
    fn test_provisional_draws_after_items() {
        let (scene, _) = scene_with_rect();
        let camera = Camera::new();
        let provisional = Item::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 30.0, 30.0));
        let ctx = RenderContext::new(&scene, &camera, Size::new(800.0, 600.0))
            .with_grid(false)
            .with_rulers(false)
            .with_provisional(Some(&provisional));
        let list = build_display_list(&ctx);

        let rects = list
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count();
        assert_eq!(rects, 2);
    }

    #[test]
    fn test_rulers_draw_in_screen_space() {
        let scene = Scene::new("Floor 1", Size::new(200.0, 100.0));
        let camera = Camera::new();
        let ctx = RenderContext::new(&scene, &camera, Size::new(400.0, 300.0))
            .with_grid(false);
        let list = build_display_list(&ctx);

        // Ruler commands come after the PopTransform
        let pop_index = list
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::PopTransform))
            .unwrap();
        let ruler_labels = list.commands[pop_index..]
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
            .count();
        // Ticks at 50/100/150/200/250/300/350 horizontally (50..=350) and
        // 50..=250 vertically, excluding positions inside the corner band
        assert!(ruler_labels > 0);
    }
}
