//! Drawing objects stored in the scene.

mod figure;
mod stroke;
mod text;

pub use figure::{Figure, FigureKind};
pub use stroke::{Stroke, StrokeTool};
pub use text::{ApproxTextMeasure, TextMeasure, TextObject};

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Parse a CSS-style hex color (`#rgb`, `#rrggbb` or `#rrggbbaa`).
    ///
    /// Returns `None` for anything else.
    pub fn from_hex(color: &str) -> Option<Self> {
        let hex = color.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let r = channel(&hex[0..1])? * 17;
                let g = channel(&hex[1..2])? * 17;
                let b = channel(&hex[2..3])? * 17;
                Some(Self::new(r, g, b, 255))
            }
            6 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                255,
            )),
            8 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => None,
        }
    }

    /// Format as `#rrggbb` (alpha is dropped when opaque).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Discriminant of a [`DrawingObject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Stroke,
    Figure,
    Text,
}

/// The atomic unit stored in the scene and in history snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DrawingObject {
    Stroke(Stroke),
    Figure(Figure),
    Text(TextObject),
}

impl DrawingObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            DrawingObject::Stroke(_) => ObjectKind::Stroke,
            DrawingObject::Figure(_) => ObjectKind::Figure,
            DrawingObject::Text(_) => ObjectKind::Text,
        }
    }

    /// Axis-aligned bounding box in document coordinates.
    ///
    /// Text needs `measure` to compute its width; the other variants ignore it.
    pub fn bounds(&self, measure: &dyn TextMeasure) -> Rect {
        match self {
            DrawingObject::Stroke(s) => s.bounds(),
            DrawingObject::Figure(f) => f.bounds(),
            DrawingObject::Text(t) => t.bounds(measure),
        }
    }

    /// Point used as the anchor when dragging: first stroke point,
    /// figure start, or text position.
    pub fn reference_point(&self) -> Point {
        match self {
            DrawingObject::Stroke(s) => s.points.first().copied().unwrap_or(Point::ZERO),
            DrawingObject::Figure(f) => f.start,
            DrawingObject::Text(t) => t.position,
        }
    }

    /// Remap every geometric point of the object.
    pub fn map_points(&mut self, f: impl Fn(Point) -> Point) {
        match self {
            DrawingObject::Stroke(s) => s.map_points(f),
            DrawingObject::Figure(fig) => fig.map_points(f),
            DrawingObject::Text(t) => t.position = f(t.position),
        }
    }

    /// Translate the object by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.map_points(|p| p + delta);
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            DrawingObject::Stroke(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_figure(&self) -> Option<&Figure> {
        match self {
            DrawingObject::Figure(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextObject> {
        match self {
            DrawingObject::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl From<Stroke> for DrawingObject {
    fn from(stroke: Stroke) -> Self {
        DrawingObject::Stroke(stroke)
    }
}

impl From<Figure> for DrawingObject {
    fn from(figure: Figure) -> Self {
        DrawingObject::Figure(figure)
    }
}

impl From<TextObject> for DrawingObject {
    fn from(text: TextObject) -> Self {
        DrawingObject::Text(text)
    }
}
