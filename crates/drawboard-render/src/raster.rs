//! CPU raster surface backed by tiny-skia.

use crate::error::{RenderError, RenderResult};
use crate::fonts::FontBook;
use crate::surface::Surface;
use kurbo::{Affine, BezPath, Cap, Join, PathEl, Point, Size};
use peniko::Color;
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, StrokeDash, Transform,
};

/// A [`Surface`] that rasterizes into an RGBA pixmap.
#[derive(Debug, Clone)]
pub struct PixmapSurface {
    pixmap: Pixmap,
    transform: Affine,
    alpha: f64,
    stack: Vec<(Affine, f64)>,
    fonts: FontBook,
}

impl PixmapSurface {
    /// Create a transparent surface. Zero or oversized dimensions fail.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;
        Ok(Self {
            pixmap,
            transform: Affine::IDENTITY,
            alpha: 1.0,
            stack: Vec::new(),
            fonts: FontBook::new(),
        })
    }

    /// Share a font book with other surfaces or with the board's text measure.
    pub fn with_fonts(mut self, fonts: FontBook) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Consume the surface, keeping only its pixels.
    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Composite `source` over this surface pixel for pixel, ignoring the
    /// transform and global alpha.
    pub fn draw_surface(&mut self, source: &PixmapSurface) {
        self.pixmap.draw_pixmap(
            0,
            0,
            source.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Unpremultiplied RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    fn paint_for(&self, color: Color) -> Paint<'static> {
        let rgba = color.to_rgba8();
        let alpha = (f64::from(rgba.a) * self.alpha).round().clamp(0.0, 255.0) as u8;
        let mut paint = Paint::default();
        paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, alpha);
        paint.anti_alias = true;
        paint
    }

    fn current_transform(&self) -> Transform {
        to_transform(self.transform)
    }
}

impl Surface for PixmapSurface {
    fn size(&self) -> Size {
        Size::new(f64::from(self.pixmap.width()), f64::from(self.pixmap.height()))
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn fill_all(&mut self, color: Color) {
        let Some(rect) = tiny_skia::Rect::from_xywh(
            0.0,
            0.0,
            self.pixmap.width() as f32,
            self.pixmap.height() as f32,
        ) else {
            return;
        };
        let paint = self.paint_for(color);
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn save(&mut self) {
        self.stack.push((self.transform, self.alpha));
    }

    fn restore(&mut self) {
        if let Some((transform, alpha)) = self.stack.pop() {
            self.transform = transform;
            self.alpha = alpha;
        }
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn transform(&self) -> Affine {
        self.transform
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn stroke_path(&mut self, path: &BezPath, style: &kurbo::Stroke, color: Color) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let paint = self.paint_for(color);
        let stroke = to_skia_stroke(style);
        let transform = self.current_transform();
        self.pixmap.stroke_path(&path, &paint, &stroke, transform, None);
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let paint = self.paint_for(color);
        let transform = self.current_transform();
        self.pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
    }

    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, font_family: &str, color: Color) {
        if text.is_empty() {
            return;
        }
        match self.fonts.text_path(text, origin, font_size, font_family) {
            Some(outline) => self.fill_path(&outline, color),
            None => log::trace!("Skipped text '{}' without a font", text),
        }
    }
}

fn to_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32),
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn to_skia_stroke(style: &kurbo::Stroke) -> tiny_skia::Stroke {
    let line_cap = match style.start_cap {
        Cap::Butt => LineCap::Butt,
        Cap::Round => LineCap::Round,
        Cap::Square => LineCap::Square,
    };
    let line_join = match style.join {
        Join::Bevel => LineJoin::Bevel,
        Join::Miter => LineJoin::Miter,
        Join::Round => LineJoin::Round,
    };
    let dash = if style.dash_pattern.is_empty() {
        None
    } else {
        let intervals = style.dash_pattern.iter().map(|d| *d as f32).collect();
        StrokeDash::new(intervals, style.dash_offset as f32)
    };

    tiny_skia::Stroke {
        width: style.width as f32,
        miter_limit: style.miter_limit as f32,
        line_cap,
        line_join,
        dash,
    }
}
