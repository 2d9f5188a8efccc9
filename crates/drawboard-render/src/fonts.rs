//! System font lookup, glyph outlines and text measurement.

use drawboard_core::shapes::{ApproxTextMeasure, TextMeasure};
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use kurbo::{BezPath, Point};
use rusttype::{Font, OutlineBuilder, Scale, point as rt_point};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::sync::{Arc, Mutex, OnceLock};

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("Loaded {} system font faces", db.len());
        db
    })
}

type FontCache = HashMap<String, Option<Arc<Font<'static>>>>;

/// Shared cache of fonts by family name.
///
/// Clones share the cache. Families that cannot be found fall back to the
/// system sans-serif face; when even that is missing, text is skipped and
/// measurement falls back to [`ApproxTextMeasure`].
#[derive(Clone, Default)]
pub struct FontBook {
    cache: Arc<Mutex<FontCache>>,
}

impl fmt::Debug for FontBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.cache.lock().unwrap_or_else(|p| p.into_inner());
        f.debug_struct("FontBook")
            .field("families", &cache.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Font for a CSS-style family name (`sans-serif`, `serif`,
    /// `monospace` or a concrete name).
    pub fn font(&self, family: &str) -> Option<Arc<Font<'static>>> {
        let mut cache = self.cache.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(font) = cache.get(family) {
            return font.clone();
        }

        let font = load_font(family).or_else(|| load_font("sans-serif")).map(Arc::new);
        if font.is_none() {
            log::warn!("No font available for family '{}'; text will not be drawn", family);
        }
        cache.insert(family.to_string(), font.clone());
        font
    }

    /// Glyph outlines of `text` with the baseline-left corner at `origin`.
    pub fn text_path(&self, text: &str, origin: Point, font_size: f64, family: &str) -> Option<BezPath> {
        let font = self.font(family)?;
        let scale = Scale::uniform(font_size as f32);
        let start = rt_point(origin.x as f32, origin.y as f32);

        let mut sink = PathSink::default();
        for glyph in font.layout(text, scale, start) {
            glyph.build_outline(&mut sink);
        }
        Some(sink.path)
    }
}

impl TextMeasure for FontBook {
    fn text_width(&self, text: &str, font_size: f64, font_family: &str) -> f64 {
        let Some(font) = self.font(font_family) else {
            return ApproxTextMeasure.text_width(text, font_size, font_family);
        };
        let scale = Scale::uniform(font_size as f32);
        font.layout(text, scale, rt_point(0.0, 0.0))
            .last()
            .map(|glyph| {
                let advance = glyph.unpositioned().h_metrics().advance_width;
                f64::from(glyph.position().x + advance)
            })
            .unwrap_or(0.0)
    }
}

fn load_font(family: &str) -> Option<Font<'static>> {
    let families: Vec<Family<'_>> = match family.trim() {
        "" | "sans-serif" | "Sans" => vec![Family::SansSerif],
        "serif" | "Serif" => vec![Family::Serif],
        "monospace" | "Monospace" => vec![Family::Monospace],
        "cursive" => vec![Family::Cursive],
        "fantasy" => vec![Family::Fantasy],
        other => vec![Family::Name(other)],
    };

    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => Font::try_from_vec(fs::read(path).ok()?),
        fontdb::Source::SharedFile(path, _) => Font::try_from_vec(fs::read(path).ok()?),
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}

/// Collects rusttype outlines (already positioned, y down) into a kurbo path.
#[derive(Default)]
struct PathSink {
    path: BezPath,
}

impl OutlineBuilder for PathSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((f64::from(x), f64::from(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((f64::from(x), f64::from(y)));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.path
            .quad_to((f64::from(x1), f64::from(y1)), (f64::from(x), f64::from(y)));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.path.curve_to(
            (f64::from(x1), f64::from(y1)),
            (f64::from(x2), f64::from(y2)),
            (f64::from(x), f64::from(y)),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
