//! Text objects and text measurement.

use super::SerializableColor;
use crate::geometry;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Measures rendered text width.
///
/// Bounds of text objects depend on font metrics, which only a rendering
/// backend knows. The core uses [`ApproxTextMeasure`] unless a backend
/// supplies something better.
pub trait TextMeasure {
    /// Advance width of `text` at `font_size` in `font_family`.
    fn text_width(&self, text: &str, font_size: f64, font_family: &str) -> f64;
}

/// Character-count approximation (0.6 em per character).
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMeasure;

impl ApproxTextMeasure {
    pub const EM_RATIO: f64 = 0.6;
}

impl TextMeasure for ApproxTextMeasure {
    fn text_width(&self, text: &str, font_size: f64, _font_family: &str) -> f64 {
        text.chars().count() as f64 * font_size * Self::EM_RATIO
    }
}

/// A text item anchored at its baseline-left point.
///
/// Content is immutable after creation; move and resize only touch
/// `position` and `font_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextObject {
    pub content: String,
    /// Baseline-left anchor.
    pub position: Point,
    pub color: SerializableColor,
    /// Font size in document units.
    pub font_size: f64,
    /// Font family name as understood by the renderer.
    pub font_family: String,
}

impl TextObject {
    /// Line height as a multiple of the font size.
    pub const LINE_HEIGHT: f64 = 1.2;

    pub fn new(
        content: String,
        position: Point,
        color: SerializableColor,
        font_size: f64,
        font_family: String,
    ) -> Self {
        Self {
            content,
            position,
            color,
            font_size,
            font_family,
        }
    }

    /// Bounding box: measured width, `1.2 × size` tall, top edge `size`
    /// above the baseline anchor.
    pub fn bounds(&self, measure: &dyn TextMeasure) -> Rect {
        let width = measure.text_width(&self.content, self.font_size, &self.font_family);
        geometry::text_bounds(self.position, width, self.font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedMeasure(f64);

    impl TextMeasure for FixedMeasure {
        fn text_width(&self, _text: &str, _font_size: f64, _font_family: &str) -> f64 {
            self.0
        }
    }

    fn text(content: &str, size: f64) -> TextObject {
        TextObject::new(
            content.to_string(),
            Point::new(10.0, 50.0),
            SerializableColor::black(),
            size,
            "sans-serif".to_string(),
        )
    }

    #[test]
    fn test_bounds_baseline_convention() {
        let bounds = text("hello", 20.0).bounds(&FixedMeasure(80.0));
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 30.0).abs() < f64::EPSILON);
        assert!((bounds.width() - 80.0).abs() < f64::EPSILON);
        assert!((bounds.height() - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_approx_measure() {
        let width = ApproxTextMeasure.text_width("abcd", 10.0, "any");
        assert!((width - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_approx_measure_counts_chars_not_bytes() {
        let width = ApproxTextMeasure.text_width("ééé", 10.0, "any");
        assert!((width - 18.0).abs() < 1e-9);
    }
}
