//! Frame painting and animation-frame scheduling.

use crate::paint::{paint_object, paint_selection_overlay, paint_selection_rect};
use crate::surface::Surface;
use drawboard_core::Board;
use peniko::Color;

/// Colors and strokes for the selection overlay and rubber band.
#[derive(Debug, Clone)]
pub struct FrameStyle {
    /// Selection highlight color.
    pub selection_color: Color,
    /// Fill of the resize handles.
    pub handle_fill: Color,
    /// Fill of the rubber-band rectangle.
    pub selection_fill: Color,
    /// Dash pattern of the selection box.
    pub dash: Vec<f64>,
    /// Line width of the selection box and handle borders.
    pub overlay_width: f64,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            handle_fill: Color::from_rgba8(255, 255, 255, 255),
            selection_fill: Color::from_rgba8(59, 130, 246, 25),
            dash: vec![5.0, 5.0],
            overlay_width: 1.0,
        }
    }
}

impl FrameStyle {
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    pub fn with_dash(mut self, dash: Vec<f64>) -> Self {
        self.dash = dash;
        self
    }
}

/// Paint one full frame of `board`.
///
/// Order: clear, viewport transform, committed objects in scene order,
/// selection overlay, rubber band, in-progress object. The transform is
/// restored and alpha reset to 1 afterwards.
pub fn render_frame(surface: &mut dyn Surface, board: &Board, style: &FrameStyle) {
    let background = board.settings().background;

    surface.clear();
    surface.save();
    surface.set_transform(board.camera().transform());

    for object in board.scene().iter() {
        paint_object(surface, object, background);
    }

    if let Some(bounds) = board.selection_bounds() {
        paint_selection_overlay(surface, bounds, board.config(), style);
    }
    if let Some(rect) = board.selection_rect() {
        paint_selection_rect(surface, rect, style);
    }
    if let Some(draft) = board.draft() {
        paint_object(surface, draft, background);
    }

    surface.restore();
    surface.set_alpha(1.0);
}

/// Paints at most once per animation frame, and only when the board asked
/// for it.
#[derive(Debug)]
pub struct RenderLoop<S: Surface> {
    surface: S,
    style: FrameStyle,
    frames: u64,
}

impl<S: Surface> RenderLoop<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            style: FrameStyle::default(),
            frames: 0,
        }
    }

    pub fn with_style(mut self, style: FrameStyle) -> Self {
        self.style = style;
        self
    }

    /// Animation-frame callback. Returns whether a frame was painted.
    pub fn on_animation_frame(&mut self, board: &mut Board) -> bool {
        if !board.take_render_request() {
            return false;
        }
        render_frame(&mut self.surface, board, &self.style);
        self.frames += 1;
        log::trace!("Painted frame {}", self.frames);
        true
    }

    /// Number of frames painted so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DisplayList, DrawCommand};
    use drawboard_core::{Modifiers, SerializableColor, ToolKind};
    use kurbo::{Affine, Point, Size};

    fn board() -> Board {
        let mut board = Board::new();
        board.attach_surface(Size::new(200.0, 200.0));
        board
    }

    fn draw(board: &mut Board, tool: ToolKind, from: Point, to: Point) {
        board.set_tool(tool);
        board.pointer_down(from, Modifiers::NONE);
        board.pointer_move(to);
        board.pointer_up(to);
    }

    #[test]
    fn test_frame_paint_order() {
        let mut board = board();
        draw(&mut board, ToolKind::Rectangle, Point::new(10.0, 10.0), Point::new(50.0, 50.0));
        board.set_tool(ToolKind::Pen);
        board.pointer_down(Point::new(100.0, 100.0), Modifiers::NONE);
        board.pointer_move(Point::new(120.0, 110.0));

        let mut surface = DisplayList::new(Size::new(200.0, 200.0));
        render_frame(&mut surface, &board, &FrameStyle::default());
        let commands = surface.commands();

        assert!(matches!(commands[0], DrawCommand::Clear));
        // Rectangle, then 9 overlay commands, then the draft stroke.
        assert_eq!(commands.len(), 1 + 1 + 9 + 1);
        assert!(matches!(commands[1], DrawCommand::Stroke { .. }));
        match commands.last() {
            Some(DrawCommand::Stroke { path, .. }) => assert_eq!(path.elements().len(), 2),
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(surface.save_depth(), 0);
        assert_eq!(surface.transform(), Affine::IDENTITY);
        assert!((surface.alpha() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_viewport_transform_applied() {
        let mut board = board();
        draw(&mut board, ToolKind::Line, Point::new(10.0, 10.0), Point::new(50.0, 50.0));
        board.zoom_in();

        let mut surface = DisplayList::new(Size::new(200.0, 200.0));
        render_frame(&mut surface, &board, &FrameStyle::default());
        match &surface.commands()[1] {
            DrawCommand::Stroke { transform, .. } => {
                assert_eq!(*transform, board.camera().transform());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_draft_painted_with_live_color() {
        let mut board = board();
        board.set_tool(ToolKind::Pen);
        board.pointer_down(Point::new(10.0, 10.0), Modifiers::NONE);
        board.pointer_move(Point::new(30.0, 30.0));
        board.set_color(SerializableColor::new(0, 160, 0, 255));

        let mut surface = DisplayList::new(Size::new(200.0, 200.0));
        render_frame(&mut surface, &board, &FrameStyle::default());
        match surface.commands().last() {
            Some(DrawCommand::Stroke { color, .. }) => {
                assert_eq!(SerializableColor::from(*color), SerializableColor::new(0, 160, 0, 255));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rubber_band_painted() {
        let mut board = board();
        board.set_tool(ToolKind::Select);
        board.pointer_down(Point::new(10.0, 10.0), Modifiers::NONE);
        board.pointer_move(Point::new(60.0, 40.0));

        let mut surface = DisplayList::new(Size::new(200.0, 200.0));
        render_frame(&mut surface, &board, &FrameStyle::default());
        // Clear, band fill, band outline.
        assert_eq!(surface.commands().len(), 3);
        assert!(matches!(surface.commands()[1], DrawCommand::Fill { .. }));
    }

    #[test]
    fn test_render_loop_coalesces() {
        let mut board = board();
        let mut render_loop = RenderLoop::new(DisplayList::new(Size::new(200.0, 200.0)));

        assert!(render_loop.on_animation_frame(&mut board));
        assert!(!render_loop.on_animation_frame(&mut board));

        board.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE);
        for i in 1..50 {
            board.pointer_move(Point::new(i as f64, i as f64));
        }
        assert!(render_loop.on_animation_frame(&mut board));
        assert!(!render_loop.on_animation_frame(&mut board));
        assert_eq!(render_loop.frame_count(), 2);
    }

    #[test]
    fn test_render_loop_idle_without_surface() {
        let mut board = Board::new();
        let mut render_loop = RenderLoop::new(DisplayList::new(Size::new(10.0, 10.0)));
        board.zoom_in();
        assert!(!render_loop.on_animation_frame(&mut board));
        assert_eq!(render_loop.frame_count(), 0);
    }
}
