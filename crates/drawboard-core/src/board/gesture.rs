//! The single in-progress interaction.

use crate::selection::{DragSession, ResizeSession};
use crate::shapes::DrawingObject;
use kurbo::{Point, Rect};

/// What the pointer is currently doing. Exactly one gesture is active at a
/// time; every active state except text editing ends on pointer release.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// Freehand stroke or figure being drawn.
    Drawing(DrawingObject),
    /// Rubber-band selection, in document coordinates.
    SelectingBox { origin: Point, current: Point },
    Dragging(DragSession),
    Resizing(ResizeSession),
    /// Viewport pan; `last_screen` is the previous pointer in screen space.
    Panning { last_screen: Point },
    /// Waiting for the host to commit or cancel text at `anchor`.
    EditingText { anchor: Point },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Idle => "idle",
            Gesture::Drawing(_) => "drawing",
            Gesture::SelectingBox { .. } => "selecting-box",
            Gesture::Dragging(_) => "dragging",
            Gesture::Resizing(_) => "resizing",
            Gesture::Panning { .. } => "panning",
            Gesture::EditingText { .. } => "editing-text",
        }
    }

    /// The in-progress object, if drawing.
    pub fn draft(&self) -> Option<&DrawingObject> {
        match self {
            Gesture::Drawing(object) => Some(object),
            _ => None,
        }
    }

    /// Normalized rubber-band rectangle, if box-selecting.
    pub fn selection_rect(&self) -> Option<Rect> {
        match self {
            Gesture::SelectingBox { origin, current } => Some(Rect::from_points(*origin, *current)),
            _ => None,
        }
    }

    pub fn text_anchor(&self) -> Option<Point> {
        match self {
            Gesture::EditingText { anchor } => Some(*anchor),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_rect_normalized() {
        let gesture = Gesture::SelectingBox {
            origin: Point::new(10.0, 10.0),
            current: Point::new(0.0, 20.0),
        };
        assert_eq!(gesture.selection_rect(), Some(Rect::new(0.0, 10.0, 10.0, 20.0)));
        assert!(Gesture::Idle.selection_rect().is_none());
    }

    #[test]
    fn test_text_anchor() {
        let gesture = Gesture::EditingText {
            anchor: Point::new(3.0, 4.0),
        };
        assert_eq!(gesture.text_anchor(), Some(Point::new(3.0, 4.0)));
        assert_eq!(gesture.name(), "editing-text");
        assert!(Gesture::default().is_idle());
    }
}
