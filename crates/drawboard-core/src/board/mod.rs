//! Interaction controller.
//!
//! [`Board`] turns pointer, touch and wheel events into scene mutations and
//! history entries, and answers the state queries a UI needs.

mod gesture;

pub use gesture::Gesture;

use crate::camera::Camera;
use crate::config::BoardConfig;
use crate::error::BoardResult;
use crate::geometry::group_bounds;
use crate::history::History;
use crate::input::{Modifiers, PointerEvent, TouchEvent};
use crate::scene::Scene;
use crate::selection::{DragSession, ResizeSession, Selection, hit_test_handles};
use crate::shapes::{ApproxTextMeasure, DrawingObject, SerializableColor, TextMeasure, TextObject};
use crate::tools::{ToolCategory, ToolKind, ToolSettings};
use kurbo::{Point, Rect, Size};
use std::fmt;

/// The drawing-and-editing engine behind one canvas.
pub struct Board {
    scene: Scene,
    history: History,
    selection: Selection,
    camera: Camera,
    settings: ToolSettings,
    config: BoardConfig,
    gesture: Gesture,
    surface: Option<Size>,
    render_requested: bool,
    last_pointer: Point,
    measure: Box<dyn TextMeasure>,
}

impl Default for Board {
    fn default() -> Self {
        Self::with_config(BoardConfig::default())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("objects", &self.scene.len())
            .field("history", &(self.history.index(), self.history.len()))
            .field("selection", &self.selection)
            .field("camera", &self.camera)
            .field("settings", &self.settings)
            .field("gesture", &self.gesture.name())
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}

impl Board {
    /// Create a board with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board with `config`. An invalid configuration is replaced
    /// by the defaults.
    pub fn with_config(config: BoardConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("{}; using default configuration", err);
                BoardConfig::default()
            }
        };
        Self {
            scene: Scene::new(),
            history: History::new(),
            selection: Selection::new(),
            camera: Camera::with_limits(config.min_zoom, config.max_zoom, config.zoom_step),
            settings: ToolSettings::default(),
            config,
            gesture: Gesture::Idle,
            surface: None,
            render_requested: false,
            last_pointer: Point::ZERO,
            measure: Box::new(ApproxTextMeasure),
        }
    }

    /// Use a font-backed text measure for text bounds.
    pub fn set_text_measure(&mut self, measure: Box<dyn TextMeasure>) {
        self.measure = measure;
        self.request_render();
    }

    // --- surface ---

    /// Attach the drawing surface. Until a surface is attached every
    /// interaction is ignored.
    pub fn attach_surface(&mut self, size: Size) {
        log::debug!("Surface attached: {}x{}", size.width, size.height);
        self.surface = Some(size);
        self.request_render();
    }

    pub fn detach_surface(&mut self) {
        self.cancel_gesture();
        self.surface = None;
        self.render_requested = false;
        log::debug!("Surface detached");
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface_size(&self) -> Option<Size> {
        self.surface
    }

    fn ready(&self, operation: &str) -> bool {
        if self.surface.is_none() {
            log::trace!("Ignoring {} without a surface", operation);
            return false;
        }
        true
    }

    // --- settings ---

    /// Switch tools. Any active gesture is discarded.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.settings.tool == tool {
            return;
        }
        self.cancel_gesture();
        log::debug!("Tool: {}", tool.name());
        self.settings.tool = tool;
        self.request_render();
    }

    /// Set the brush color. An object being drawn takes it immediately.
    pub fn set_color(&mut self, color: SerializableColor) {
        self.settings.color = color;
        self.restyle_draft();
        self.request_render();
    }

    /// Set the brush size. Non-positive or non-finite sizes are ignored.
    pub fn set_size(&mut self, size: f64) {
        if !size.is_finite() || size <= 0.0 {
            log::trace!("Ignoring brush size {}", size);
            return;
        }
        self.settings.size = size;
        self.restyle_draft();
        self.request_render();
    }

    fn restyle_draft(&mut self) {
        if let Gesture::Drawing(object) = &mut self.gesture {
            self.settings.restyle_object(object);
        }
    }

    /// Set the background color. Eraser strokes repaint in this color.
    pub fn set_background(&mut self, background: SerializableColor) {
        self.settings.background = background;
        self.request_render();
    }

    // --- pointer input ---

    /// Dispatch a typed pointer event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        match *event {
            PointerEvent::Down { position, modifiers } => self.pointer_down(position, modifiers),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position } => self.pointer_up(position),
            PointerEvent::Leave { position } => self.pointer_leave(position),
            PointerEvent::Wheel { position, delta_y } => self.wheel(position, delta_y),
        }
    }

    /// Dispatch a touch event through the first touch point.
    pub fn handle_touch_event(&mut self, event: &TouchEvent) {
        if let Some(pointer) = event.to_pointer_event(self.last_pointer) {
            self.handle_pointer_event(&pointer);
        }
    }

    /// Press at `screen` (surface coordinates).
    pub fn pointer_down(&mut self, screen: Point, modifiers: Modifiers) {
        self.last_pointer = screen;
        if !self.ready("pointer down") {
            return;
        }
        match self.gesture {
            Gesture::Idle | Gesture::EditingText { .. } => {}
            _ => {
                log::trace!("Ignoring pointer down during {}", self.gesture.name());
                return;
            }
        }

        let world = self.camera.screen_to_world(screen);
        self.gesture = match self.settings.tool.category() {
            ToolCategory::Freehand | ToolCategory::Figure => self
                .settings
                .begin_object(world)
                .map_or(Gesture::Idle, Gesture::Drawing),
            ToolCategory::Text => Gesture::EditingText { anchor: world },
            ToolCategory::Hand => Gesture::Panning { last_screen: screen },
            ToolCategory::Select => self.select_down(world, modifiers),
        };
        self.request_render();
    }

    fn select_down(&mut self, world: Point, modifiers: Modifiers) -> Gesture {
        if let Some(bounds) = self.selection_bounds() {
            if let Some(corner) = hit_test_handles(bounds, world, &self.config) {
                log::debug!("Resize from {:?}", corner);
                return Gesture::Resizing(ResizeSession::begin(
                    &self.scene,
                    &self.selection,
                    corner,
                    world,
                    bounds,
                ));
            }
        }

        let hit = self
            .scene
            .hit_test(world, self.config.hit_tolerance, self.measure.as_ref());
        match hit {
            Some(index) if modifiers.shift => {
                self.selection.toggle(index);
                Gesture::Idle
            }
            Some(index) => {
                if !self.selection.contains(index) {
                    self.selection.replace([index]);
                }
                DragSession::begin(&self.scene, &self.selection, index, world)
                    .map_or(Gesture::Idle, Gesture::Dragging)
            }
            None => {
                self.selection.clear();
                Gesture::SelectingBox {
                    origin: world,
                    current: world,
                }
            }
        }
    }

    /// Pointer moved to `screen`.
    pub fn pointer_move(&mut self, screen: Point) {
        self.last_pointer = screen;
        if !self.ready("pointer move") {
            return;
        }
        let world = self.camera.screen_to_world(screen);
        match &mut self.gesture {
            Gesture::Idle | Gesture::EditingText { .. } => return,
            Gesture::Drawing(object) => ToolSettings::extend_object(object, world),
            Gesture::SelectingBox { current, .. } => *current = world,
            Gesture::Dragging(session) => session.apply(&mut self.scene, world),
            Gesture::Resizing(session) => session.apply(&mut self.scene, world, &self.config),
            Gesture::Panning { last_screen } => {
                self.camera.pan(screen - *last_screen);
                *last_screen = screen;
            }
        }
        self.request_render();
    }

    /// Release at `screen`: commits the active gesture.
    pub fn pointer_up(&mut self, screen: Point) {
        self.last_pointer = screen;
        if !self.ready("pointer up") {
            return;
        }
        let world = self.camera.screen_to_world(screen);
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => return,
            Gesture::Drawing(object) => self.commit_drawing(object),
            Gesture::SelectingBox { origin, .. } => {
                let rect = Rect::from_points(origin, world);
                let indices = self.scene.indices_in_rect(rect, self.measure.as_ref());
                log::debug!("Box selected {} objects", indices.len());
                self.selection.replace(indices);
            }
            Gesture::Dragging(mut session) => {
                session.apply(&mut self.scene, world);
                if session.moved {
                    self.commit("move");
                }
            }
            Gesture::Resizing(mut session) => {
                session.apply(&mut self.scene, world, &self.config);
                if session.resized {
                    self.commit("resize");
                }
            }
            Gesture::Panning { .. } => {}
            editing @ Gesture::EditingText { .. } => {
                self.gesture = editing;
                return;
            }
        }
        self.request_render();
    }

    /// Pointer left the surface; same as a release.
    pub fn pointer_leave(&mut self, screen: Point) {
        self.pointer_up(screen);
    }

    /// Wheel zoom around `screen`.
    pub fn wheel(&mut self, screen: Point, delta_y: f64) {
        self.last_pointer = screen;
        if !self.ready("wheel") {
            return;
        }
        self.camera.wheel_zoom(screen, delta_y);
        self.request_render();
    }

    fn commit_drawing(&mut self, object: DrawingObject) {
        let auto_select = match &object {
            DrawingObject::Stroke(stroke) => {
                if stroke.is_empty() {
                    log::trace!("Skipping empty stroke");
                    return;
                }
                !stroke.is_eraser()
            }
            DrawingObject::Figure(_) => true,
            DrawingObject::Text(_) => false,
        };
        self.scene.append_object(object);
        self.commit("draw");
        if self.config.auto_select && auto_select {
            self.selection.replace([self.scene.len() - 1]);
        }
    }

    /// Push the live scene unless it already matches the current snapshot.
    fn commit(&mut self, action: &str) {
        if self.scene == *self.history.current() {
            log::trace!("Nothing to commit for {}", action);
            return;
        }
        log::debug!("Commit {} ({} objects)", action, self.scene.len());
        self.history.push(self.scene.snapshot());
    }

    // --- text ---

    /// Commit `text` at the pending anchor.
    ///
    /// Text that is empty after trimming just leaves edit mode. Without a
    /// pending anchor nothing happens.
    pub fn add_text(&mut self, text: &str, font_family: &str) {
        if !self.ready("add text") {
            return;
        }
        let Some(anchor) = self.gesture.text_anchor() else {
            log::trace!("No text anchor; ignoring text");
            return;
        };
        self.gesture = Gesture::Idle;
        self.request_render();

        let content = text.trim();
        if content.is_empty() {
            log::trace!("Skipping empty text");
            return;
        }
        let font_size = self.settings.text_size(self.config.text_size_factor);
        self.scene.append_object(
            TextObject::new(
                content.to_string(),
                anchor,
                self.settings.color,
                font_size,
                font_family.to_string(),
            )
            .into(),
        );
        self.commit("text");
    }

    /// Leave text edit mode without adding anything.
    pub fn cancel_text(&mut self) {
        if self.gesture.text_anchor().is_some() {
            self.gesture = Gesture::Idle;
            self.request_render();
        }
    }

    /// Abandon the active gesture. Uncommitted moves and resizes are rolled
    /// back.
    pub fn cancel_gesture(&mut self) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => return,
            Gesture::Dragging(session) => session.restore(&mut self.scene),
            Gesture::Resizing(session) => session.restore(&mut self.scene),
            other => log::trace!("Cancelled {}", other.name()),
        }
        self.request_render();
    }

    // --- commands ---

    pub fn undo(&mut self) {
        if !self.ready("undo") {
            return;
        }
        if let Some(snapshot) = self.history.undo() {
            self.restore_snapshot(snapshot);
        }
    }

    pub fn redo(&mut self) {
        if !self.ready("redo") {
            return;
        }
        if let Some(snapshot) = self.history.redo() {
            self.restore_snapshot(snapshot);
        }
    }

    fn restore_snapshot(&mut self, snapshot: Scene) {
        self.gesture = Gesture::Idle;
        self.scene = snapshot;
        self.selection.clear();
        self.request_render();
    }

    /// Remove everything. A no-op on an empty scene.
    pub fn clear(&mut self) {
        if !self.ready("clear") {
            return;
        }
        if self.scene.is_empty() {
            log::trace!("Scene already empty");
            return;
        }
        self.gesture = Gesture::Idle;
        self.scene.replace_all(Vec::new());
        self.selection.clear();
        self.commit("clear");
        self.request_render();
    }

    pub fn delete_selected(&mut self) {
        if !self.ready("delete") || self.selection.is_empty() {
            return;
        }
        self.cancel_gesture();
        self.scene.remove_at(self.selection.as_slice());
        self.selection.clear();
        self.commit("delete");
        self.request_render();
    }

    pub fn select_all(&mut self) {
        if !self.ready("select all") {
            return;
        }
        self.selection.set_all(self.scene.len());
        self.request_render();
    }

    pub fn zoom_in(&mut self) {
        if self.ready("zoom in") {
            self.camera.zoom_in();
            self.request_render();
        }
    }

    pub fn zoom_out(&mut self) {
        if self.ready("zoom out") {
            self.camera.zoom_out();
            self.request_render();
        }
    }

    pub fn reset_zoom(&mut self) {
        if self.ready("reset zoom") {
            self.camera.reset();
            self.request_render();
        }
    }

    /// Replace the board contents with `scene`. History restarts with the
    /// empty scene followed by the loaded one.
    pub fn load_scene(&mut self, scene: Scene) {
        log::debug!("Loading scene with {} objects", scene.len());
        self.gesture = Gesture::Idle;
        self.history = History::with_scene(scene.clone());
        self.scene = scene;
        self.selection.clear();
        self.request_render();
    }

    /// Load a scene from JSON produced by [`Board::save_json`].
    pub fn load_json(&mut self, json: &str) -> BoardResult<()> {
        let scene = Scene::from_json(json)?;
        self.load_scene(scene);
        Ok(())
    }

    pub fn save_json(&self) -> BoardResult<String> {
        self.scene.to_json()
    }

    // --- render scheduling ---

    /// Ask for a repaint on the next animation frame.
    pub fn request_render(&mut self) {
        if self.surface.is_some() {
            self.render_requested = true;
        }
    }

    pub fn needs_render(&self) -> bool {
        self.render_requested
    }

    /// Consume the pending render request.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    // --- queries ---

    pub fn is_blank(&self) -> bool {
        self.scene.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn zoom(&self) -> f64 {
        self.camera.zoom
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn selected(&self) -> &[usize] {
        self.selection.as_slice()
    }

    /// Bounds of the selection: the object's own box for one object, the
    /// group box for several.
    pub fn selection_bounds(&self) -> Option<Rect> {
        group_bounds(
            self.selection
                .iter()
                .filter_map(|index| self.scene.get(index))
                .map(|object| object.bounds(self.measure.as_ref())),
        )
    }

    pub fn is_editing_text(&self) -> bool {
        self.gesture.text_anchor().is_some()
    }

    /// Pending text anchor in document coordinates.
    pub fn text_anchor(&self) -> Option<Point> {
        self.gesture.text_anchor()
    }

    /// Pending text anchor mapped to surface coordinates, for placing an
    /// input box.
    pub fn text_anchor_on_screen(&self) -> Option<Point> {
        self.text_anchor().map(|p| self.camera.world_to_screen(p))
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// The object being drawn, if any.
    pub fn draft(&self) -> Option<&DrawingObject> {
        self.gesture.draft()
    }

    /// The rubber-band rectangle, if box-selecting.
    pub fn selection_rect(&self) -> Option<Rect> {
        self.gesture.selection_rect()
    }

    pub fn text_measure(&self) -> &dyn TextMeasure {
        self.measure.as_ref()
    }
}
