//! Freehand stroke.

use super::SerializableColor;
use crate::geometry;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// Freehand tool that produced a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeTool {
    #[default]
    Pen,
    Pencil,
    Highlighter,
    Eraser,
}

/// A freehand drawing (series of points in drawing order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Points in the order they were drawn. Never empty once created.
    pub points: Vec<Point>,
    /// Stroke color.
    pub color: SerializableColor,
    /// Brush width basis.
    pub size: f64,
    /// Tool the stroke was drawn with.
    pub tool: StrokeTool,
}

impl Stroke {
    /// Start a new stroke with a single point.
    pub fn new(start: Point, color: SerializableColor, size: f64, tool: StrokeTool) -> Self {
        Self {
            points: vec![start],
            color,
            size,
            tool,
        }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>, color: SerializableColor, size: f64, tool: StrokeTool) -> Self {
        Self {
            points,
            color,
            size,
            tool,
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_eraser(&self) -> bool {
        self.tool == StrokeTool::Eraser
    }

    /// Min/max over all points; a single point yields a 0×0 box.
    pub fn bounds(&self) -> Rect {
        geometry::points_bounds(&self.points).unwrap_or(Rect::ZERO)
    }

    pub(crate) fn map_points(&mut self, f: impl Fn(Point) -> Point) {
        for point in &mut self.points {
            *point = f(*point);
        }
    }

    /// Polyline through the points. A single point becomes a zero-length
    /// segment so round caps still paint a dot.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some(first) = self.points.first() else {
            return path;
        };

        path.move_to(*first);
        if self.points.len() == 1 {
            path.line_to(*first);
            return path;
        }
        for point in self.points.iter().skip(1) {
            path.line_to(*point);
        }
        path
    }
}
