//! Painting drawing objects and the selection overlay onto a [`Surface`].

use crate::frame::FrameStyle;
use crate::surface::Surface;
use drawboard_core::selection::selection_handles;
use drawboard_core::shapes::{DrawingObject, Figure, FigureKind, SerializableColor, Stroke, StrokeTool, TextObject};
use drawboard_core::BoardConfig;
use kurbo::{BezPath, Cap, Join, Rect, Shape};
use peniko::Color;

/// Opacity, width and cap used to paint a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeAppearance {
    pub alpha: f64,
    pub width: f64,
    pub cap: Cap,
}

/// Per-tool stroke styling.
///
/// Pencil is translucent and thinner, highlighter is wide with square caps.
pub fn stroke_appearance(tool: StrokeTool, size: f64) -> StrokeAppearance {
    match tool {
        StrokeTool::Pen | StrokeTool::Eraser => StrokeAppearance {
            alpha: 1.0,
            width: size,
            cap: Cap::Round,
        },
        StrokeTool::Pencil => StrokeAppearance {
            alpha: 0.7,
            width: (size * 0.7).max(1.0),
            cap: Cap::Round,
        },
        StrokeTool::Highlighter => StrokeAppearance {
            alpha: 0.3,
            width: size * 2.0,
            cap: Cap::Square,
        },
    }
}

/// Paint any drawing object. `background` is the eraser color.
pub fn paint_object(surface: &mut dyn Surface, object: &DrawingObject, background: SerializableColor) {
    match object {
        DrawingObject::Stroke(stroke) => paint_stroke(surface, stroke, background),
        DrawingObject::Figure(figure) => paint_figure(surface, figure),
        DrawingObject::Text(text) => paint_text(surface, text),
    }
}

/// Paint a freehand stroke. Eraser strokes paint in `background`.
pub fn paint_stroke(surface: &mut dyn Surface, stroke: &Stroke, background: SerializableColor) {
    if stroke.is_empty() {
        return;
    }
    let appearance = stroke_appearance(stroke.tool, stroke.size);
    let color = if stroke.is_eraser() { background } else { stroke.color };
    let style = kurbo::Stroke::new(appearance.width)
        .with_caps(appearance.cap)
        .with_join(Join::Round);

    let previous = surface.alpha();
    surface.set_alpha(previous * appearance.alpha);
    surface.stroke_path(&stroke.to_path(), &style, color.into());
    surface.set_alpha(previous);
}

/// Paint a figure outline; arrows also get a filled head.
pub fn paint_figure(surface: &mut dyn Surface, figure: &Figure) {
    let color: Color = figure.color.into();
    let style = kurbo::Stroke::new(figure.size)
        .with_caps(Cap::Round)
        .with_join(Join::Round);
    surface.stroke_path(&figure.to_path(), &style, color);

    if figure.kind == FigureKind::Arrow {
        if let Some(head) = arrow_head(figure) {
            surface.fill_path(&head, color);
        }
    }
}

/// Closed arrowhead triangle for an arrow figure.
pub fn arrow_head(figure: &Figure) -> Option<BezPath> {
    let [tip, left, right] = figure.arrow_head()?;
    let mut path = BezPath::new();
    path.move_to(tip);
    path.line_to(left);
    path.line_to(right);
    path.close_path();
    Some(path)
}

pub fn paint_text(surface: &mut dyn Surface, text: &TextObject) {
    surface.fill_text(
        &text.content,
        text.position,
        text.font_size,
        &text.font_family,
        text.color.into(),
    );
}

/// Dashed box around `bounds` with a square handle on each corner.
pub fn paint_selection_overlay(
    surface: &mut dyn Surface,
    bounds: Rect,
    config: &BoardConfig,
    style: &FrameStyle,
) {
    let outline = bounds.inflate(config.handle_margin, config.handle_margin);
    let dashed = kurbo::Stroke::new(style.overlay_width).with_dashes(0.0, style.dash.iter().copied());
    surface.stroke_path(&outline.to_path(0.1), &dashed, style.selection_color);

    let border = kurbo::Stroke::new(style.overlay_width);
    for handle in selection_handles(bounds, config.handle_margin, config.handle_size) {
        let path = handle.rect.to_path(0.1);
        surface.fill_path(&path, style.handle_fill);
        surface.stroke_path(&path, &border, style.selection_color);
    }
}

/// Rubber-band rectangle.
pub fn paint_selection_rect(surface: &mut dyn Surface, rect: Rect, style: &FrameStyle) {
    let path = rect.to_path(0.1);
    surface.fill_path(&path, style.selection_fill);
    let dashed = kurbo::Stroke::new(style.overlay_width).with_dashes(0.0, style.dash.iter().copied());
    surface.stroke_path(&path, &dashed, style.selection_color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DisplayList, DrawCommand};
    use kurbo::{Point, Size};

    fn list() -> DisplayList {
        DisplayList::new(Size::new(100.0, 100.0))
    }

    fn stroke_with(tool: StrokeTool, size: f64) -> Stroke {
        Stroke::from_points(
            vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
            SerializableColor::new(200, 0, 0, 255),
            size,
            tool,
        )
    }

    #[test]
    fn test_stroke_appearance_rules() {
        let pen = stroke_appearance(StrokeTool::Pen, 4.0);
        assert_eq!(pen, StrokeAppearance { alpha: 1.0, width: 4.0, cap: Cap::Round });

        let pencil = stroke_appearance(StrokeTool::Pencil, 4.0);
        assert!((pencil.alpha - 0.7).abs() < f64::EPSILON);
        assert!((pencil.width - 2.8).abs() < 1e-12);
        assert!((stroke_appearance(StrokeTool::Pencil, 1.0).width - 1.0).abs() < f64::EPSILON);

        let highlighter = stroke_appearance(StrokeTool::Highlighter, 4.0);
        assert!((highlighter.alpha - 0.3).abs() < f64::EPSILON);
        assert!((highlighter.width - 8.0).abs() < f64::EPSILON);
        assert_eq!(highlighter.cap, Cap::Square);
    }

    #[test]
    fn test_highlighter_alpha_is_restored() {
        let mut surface = list();
        paint_stroke(&mut surface, &stroke_with(StrokeTool::Highlighter, 5.0), SerializableColor::white());
        assert!((surface.alpha() - 1.0).abs() < f64::EPSILON);
        match &surface.commands()[0] {
            DrawCommand::Stroke { style, alpha, .. } => {
                assert!((alpha - 0.3).abs() < f64::EPSILON);
                assert!((style.width - 10.0).abs() < f64::EPSILON);
                assert_eq!(style.start_cap, Cap::Square);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_eraser_paints_background() {
        let mut surface = list();
        let background = SerializableColor::new(30, 40, 50, 255);
        paint_stroke(&mut surface, &stroke_with(StrokeTool::Eraser, 6.0), background);
        match &surface.commands()[0] {
            DrawCommand::Stroke { color, .. } => {
                assert_eq!(SerializableColor::from(*color), background);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_arrow_has_filled_head() {
        let mut surface = list();
        let arrow = Figure::between(
            FigureKind::Arrow,
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            SerializableColor::black(),
            3.0,
        );
        paint_figure(&mut surface, &arrow);
        assert_eq!(surface.commands().len(), 2);
        assert!(matches!(surface.commands()[1], DrawCommand::Fill { .. }));

        let mut line_surface = list();
        let line = Figure { kind: FigureKind::Line, ..arrow };
        paint_figure(&mut line_surface, &line);
        assert_eq!(line_surface.commands().len(), 1);
    }

    #[test]
    fn test_text_uses_object_font() {
        let mut surface = list();
        let text = TextObject::new(
            "Hi".to_string(),
            Point::new(5.0, 20.0),
            SerializableColor::black(),
            18.0,
            "serif".to_string(),
        );
        paint_object(&mut surface, &text.into(), SerializableColor::white());
        match &surface.commands()[0] {
            DrawCommand::Text { text, origin, font_size, font_family, .. } => {
                assert_eq!(text, "Hi");
                assert_eq!(*origin, Point::new(5.0, 20.0));
                assert!((font_size - 18.0).abs() < f64::EPSILON);
                assert_eq!(font_family, "serif");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_selection_overlay_has_box_and_four_handles() {
        let mut surface = list();
        paint_selection_overlay(
            &mut surface,
            Rect::new(10.0, 10.0, 50.0, 40.0),
            &BoardConfig::default(),
            &FrameStyle::default(),
        );
        // Dashed box, then fill + border per handle.
        assert_eq!(surface.commands().len(), 9);
        match &surface.commands()[0] {
            DrawCommand::Stroke { style, path, .. } => {
                assert!(!style.dash_pattern.is_empty());
                assert_eq!(path.bounding_box(), Rect::new(5.0, 5.0, 55.0, 45.0));
            }
            other => panic!("unexpected command {:?}", other),
        }
        match &surface.commands()[1] {
            DrawCommand::Fill { path, .. } => {
                assert_eq!(path.bounding_box(), Rect::new(1.0, 1.0, 9.0, 9.0));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
