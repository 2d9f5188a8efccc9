//! Bounding boxes and box tests.
//!
//! Everything here is pure; boxes are kurbo `Rect`s in document coordinates.

use crate::shapes::{DrawingObject, Figure, Stroke, TextMeasure, TextObject};
use kurbo::{Point, Rect};

/// Min/max box over a set of points. `None` when `points` is empty.
pub fn points_bounds(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let mut min_x = first.x;
    let mut min_y = first.y;
    let mut max_x = first.x;
    let mut max_y = first.y;

    for point in &points[1..] {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Some(Rect::new(min_x, min_y, max_x, max_y))
}

/// Box spanned by two points in any order.
pub fn segment_bounds(a: Point, b: Point) -> Rect {
    Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
}

/// Square of side `2 * radius` centred at `center`.
pub fn circle_bounds(center: Point, radius: f64) -> Rect {
    Rect::new(
        center.x - radius,
        center.y - radius,
        center.x + radius,
        center.y + radius,
    )
}

/// Text box for a baseline-left `anchor`: top edge `font_size` above the
/// baseline, height `1.2 * font_size`.
pub fn text_bounds(anchor: Point, width: f64, font_size: f64) -> Rect {
    let top = anchor.y - font_size;
    Rect::new(
        anchor.x,
        top,
        anchor.x + width,
        top + font_size * TextObject::LINE_HEIGHT,
    )
}

/// Stroke bounds: min/max over all points.
pub fn stroke_bounds(stroke: &Stroke) -> Rect {
    stroke.bounds()
}

/// Figure bounds. Circles use a square around `start`; the other kinds span
/// `start` and `end`.
pub fn figure_bounds(figure: &Figure) -> Rect {
    figure.bounds()
}

/// Bounds of a single object.
pub fn object_bounds(object: &DrawingObject, measure: &dyn TextMeasure) -> Rect {
    object.bounds(measure)
}

/// Union of member boxes.
///
/// Returns `None` for an empty set and when every member is degenerate
/// (a single point: zero width and zero height).
pub fn group_bounds(boxes: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    let mut result: Option<Rect> = None;
    let mut any_extent = false;

    for bounds in boxes {
        any_extent |= bounds.width() > 0.0 || bounds.height() > 0.0;
        result = Some(match result {
            Some(r) => r.union(bounds),
            None => bounds,
        });
    }

    if any_extent { result } else { None }
}

/// Inclusive point-in-box test.
pub fn point_in_box(point: Point, bounds: Rect) -> bool {
    point.x >= bounds.x0 && point.x <= bounds.x1 && point.y >= bounds.y0 && point.y <= bounds.y1
}

/// Whether two boxes overlap at all. Touching edges count, so zero-width
/// boxes (vertical lines, single points) can still be hit.
pub fn boxes_intersect(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && a.x1 >= b.x0 && a.y0 <= b.y1 && a.y1 >= b.y0
}

/// Only boxes with positive width and height can be resized.
pub fn is_resizable(bounds: Rect) -> bool {
    bounds.width() > 0.0 && bounds.height() > 0.0
}
