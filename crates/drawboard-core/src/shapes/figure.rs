//! Geometric figures defined by a drag anchor and the current pointer.

use super::SerializableColor;
use crate::geometry;
use kurbo::{BezPath, Circle, Line, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// Maximum arrowhead length in document units.
pub const MAX_ARROW_HEAD: f64 = 30.0;

/// Figure variants. The kind never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureKind {
    Rectangle,
    Circle,
    Line,
    Arrow,
}

/// A rectangle, circle, line or arrow.
///
/// Circles are centred at `start` with radius `|end - start|`; they stay
/// circular even when dragged non-uniformly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub kind: FigureKind,
    /// Drag anchor.
    pub start: Point,
    /// Current pointer / far end.
    pub end: Point,
    pub color: SerializableColor,
    /// Line width.
    pub size: f64,
}

impl Figure {
    /// Start a figure with `start == end`.
    pub fn new(kind: FigureKind, start: Point, color: SerializableColor, size: f64) -> Self {
        Self {
            kind,
            start,
            end: start,
            color,
            size,
        }
    }

    /// Create a figure spanning two points.
    pub fn between(kind: FigureKind, start: Point, end: Point, color: SerializableColor, size: f64) -> Self {
        Self {
            kind,
            start,
            end,
            color,
            size,
        }
    }

    /// Circle radius: the distance from `start` to `end`.
    pub fn radius(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn bounds(&self) -> Rect {
        match self.kind {
            FigureKind::Circle => geometry::circle_bounds(self.start, self.radius()),
            FigureKind::Rectangle | FigureKind::Line | FigureKind::Arrow => {
                geometry::segment_bounds(self.start, self.end)
            }
        }
    }

    pub(crate) fn map_points(&mut self, f: impl Fn(Point) -> Point) {
        self.start = f(self.start);
        self.end = f(self.end);
    }

    /// Outline path. Arrows return only the shaft; see [`Figure::arrow_head`].
    pub fn to_path(&self) -> BezPath {
        match self.kind {
            FigureKind::Rectangle => geometry::segment_bounds(self.start, self.end).to_path(0.1),
            FigureKind::Circle => Circle::new(self.start, self.radius()).to_path(0.1),
            FigureKind::Line | FigureKind::Arrow => Line::new(self.start, self.end).to_path(0.1),
        }
    }

    /// Filled arrowhead triangle `[tip, left, right]` for arrows.
    ///
    /// Head length is `min(size * 3, 30)` and half-width `0.6 * length`,
    /// oriented along the shaft.
    pub fn arrow_head(&self) -> Option<[Point; 3]> {
        if self.kind != FigureKind::Arrow {
            return None;
        }
        let head_length = (self.size * 3.0).min(MAX_ARROW_HEAD);
        let half_width = head_length * 0.6;
        let angle = (self.end.y - self.start.y).atan2(self.end.x - self.start.x);
        let (sin, cos) = angle.sin_cos();

        let back = Point::new(self.end.x - head_length * cos, self.end.y - head_length * sin);
        let left = Point::new(back.x - half_width * sin, back.y + half_width * cos);
        let right = Point::new(back.x + half_width * sin, back.y - half_width * cos);
        Some([self.end, left, right])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure(kind: FigureKind, start: (f64, f64), end: (f64, f64), size: f64) -> Figure {
        Figure::between(
            kind,
            Point::new(start.0, start.1),
            Point::new(end.0, end.1),
            SerializableColor::black(),
            size,
        )
    }

    #[test]
    fn test_circle_bounds() {
        let circle = figure(FigureKind::Circle, (50.0, 50.0), (60.0, 50.0), 2.0);
        assert!((circle.radius() - 10.0).abs() < f64::EPSILON);
        assert_eq!(circle.bounds(), Rect::new(40.0, 40.0, 60.0, 60.0));
    }

    #[test]
    fn test_rectangle_bounds_any_direction() {
        let rect = figure(FigureKind::Rectangle, (100.0, 100.0), (50.0, 20.0), 2.0);
        assert_eq!(rect.bounds(), Rect::new(50.0, 20.0, 100.0, 100.0));
    }

    #[test]
    fn test_arrow_bounds_ignore_head() {
        let arrow = figure(FigureKind::Arrow, (0.0, 0.0), (100.0, 0.0), 5.0);
        assert_eq!(arrow.bounds(), Rect::new(0.0, 0.0, 100.0, 0.0));
    }

    #[test]
    fn test_arrow_head_geometry() {
        let arrow = figure(FigureKind::Arrow, (0.0, 0.0), (100.0, 0.0), 4.0);
        let [tip, left, right] = arrow.arrow_head().unwrap();
        assert_eq!(tip, Point::new(100.0, 0.0));
        // length 12, half-width 7.2
        assert!((left.x - 88.0).abs() < 1e-9);
        assert!((right.x - 88.0).abs() < 1e-9);
        assert!((left.y - 7.2).abs() < 1e-9);
        assert!((right.y + 7.2).abs() < 1e-9);
    }

    #[test]
    fn test_arrow_head_length_capped() {
        let arrow = figure(FigureKind::Arrow, (0.0, 0.0), (0.0, 200.0), 50.0);
        let [tip, left, _] = arrow.arrow_head().unwrap();
        assert!((tip.y - left.y - MAX_ARROW_HEAD).abs() < 1e-9);
    }

    #[test]
    fn test_no_head_for_line() {
        assert!(figure(FigureKind::Line, (0.0, 0.0), (1.0, 1.0), 2.0).arrow_head().is_none());
    }
}
