//! Drawboard Render Library
//!
//! Painting for the Drawboard engine: per-object renderers, the frame
//! painter and render loop, a tiny-skia raster surface and image export.

mod error;
pub mod export;
pub mod fonts;
pub mod frame;
pub mod paint;
pub mod raster;
pub mod surface;

pub use error::{RenderError, RenderResult};
pub use export::{ExportedImage, ImageFormat, export_image};
pub use fonts::FontBook;
pub use frame::{FrameStyle, RenderLoop, render_frame};
pub use paint::{
    StrokeAppearance, arrow_head, paint_figure, paint_object, paint_selection_overlay,
    paint_selection_rect, paint_stroke, paint_text, stroke_appearance,
};
pub use raster::PixmapSurface;
pub use surface::{DisplayList, DrawCommand, Surface};
