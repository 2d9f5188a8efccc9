//! Tool system for the whiteboard.

use crate::shapes::{DrawingObject, Figure, FigureKind, SerializableColor, Stroke, StrokeTool};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Pencil,
    Highlighter,
    Eraser,
    Rectangle,
    Circle,
    Line,
    Arrow,
    Text,
    Select,
    Hand,
}

/// What a pointer-down does for a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolCategory {
    Freehand,
    Figure,
    Text,
    Select,
    Hand,
}

impl ToolKind {
    pub fn category(self) -> ToolCategory {
        match self {
            ToolKind::Pen | ToolKind::Pencil | ToolKind::Highlighter | ToolKind::Eraser => {
                ToolCategory::Freehand
            }
            ToolKind::Rectangle | ToolKind::Circle | ToolKind::Line | ToolKind::Arrow => {
                ToolCategory::Figure
            }
            ToolKind::Text => ToolCategory::Text,
            ToolKind::Select => ToolCategory::Select,
            ToolKind::Hand => ToolCategory::Hand,
        }
    }

    /// Stroke tag for freehand tools.
    pub fn stroke_tool(self) -> Option<StrokeTool> {
        match self {
            ToolKind::Pen => Some(StrokeTool::Pen),
            ToolKind::Pencil => Some(StrokeTool::Pencil),
            ToolKind::Highlighter => Some(StrokeTool::Highlighter),
            ToolKind::Eraser => Some(StrokeTool::Eraser),
            _ => None,
        }
    }

    /// Figure kind for figure tools.
    pub fn figure_kind(self) -> Option<FigureKind> {
        match self {
            ToolKind::Rectangle => Some(FigureKind::Rectangle),
            ToolKind::Circle => Some(FigureKind::Circle),
            ToolKind::Line => Some(FigureKind::Line),
            ToolKind::Arrow => Some(FigureKind::Arrow),
            _ => None,
        }
    }

    /// Get the display name for this tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "Pen",
            ToolKind::Pencil => "Pencil",
            ToolKind::Highlighter => "Highlighter",
            ToolKind::Eraser => "Eraser",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Line => "Line",
            ToolKind::Arrow => "Arrow",
            ToolKind::Text => "Text",
            ToolKind::Select => "Select",
            ToolKind::Hand => "Hand",
        }
    }
}

/// Per-session parameters supplied by the host before each interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    pub tool: ToolKind,
    pub color: SerializableColor,
    /// Brush size / line width.
    pub size: f64,
    /// Canvas background, also the eraser's paint color.
    pub background: SerializableColor,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: ToolKind::default(),
            color: SerializableColor::black(),
            size: 4.0,
            background: SerializableColor::white(),
        }
    }
}

impl ToolSettings {
    /// Start the in-progress object for a freehand or figure tool at `point`.
    ///
    /// Returns `None` for tools that do not draw.
    pub fn begin_object(&self, point: Point) -> Option<DrawingObject> {
        if let Some(tool) = self.tool.stroke_tool() {
            return Some(Stroke::new(point, self.color, self.size, tool).into());
        }
        self.tool
            .figure_kind()
            .map(|kind| Figure::new(kind, point, self.color, self.size).into())
    }

    /// Extend an in-progress object: strokes gain a point, figures move `end`.
    pub fn extend_object(object: &mut DrawingObject, point: Point) {
        match object {
            DrawingObject::Stroke(stroke) => stroke.add_point(point),
            DrawingObject::Figure(figure) => figure.end = point,
            DrawingObject::Text(_) => {}
        }
    }

    /// Apply the current color and size to an in-progress object.
    pub fn restyle_object(&self, object: &mut DrawingObject) {
        match object {
            DrawingObject::Stroke(stroke) => {
                stroke.color = self.color;
                stroke.size = self.size;
            }
            DrawingObject::Figure(figure) => {
                figure.color = self.color;
                figure.size = self.size;
            }
            DrawingObject::Text(_) => {}
        }
    }

    /// Font size for new text objects.
    pub fn text_size(&self, factor: f64) -> f64 {
        self.size * factor
    }
}
