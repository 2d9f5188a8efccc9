//! Image export of a rendered surface.

use crate::error::{RenderError, RenderResult};
use crate::raster::PixmapSurface;
use crate::surface::Surface;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use peniko::Color;
use std::fs;
use std::path::{Path, PathBuf};

/// Base name of exported files.
pub const EXPORT_FILE_STEM: &str = "drawboard";

/// Supported export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Webp => "webp",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Webp => "image/webp",
        }
    }

    /// Parse a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "webp" => Some(ImageFormat::Webp),
            _ => None,
        }
    }
}

/// Encoded image ready to be handed to the user.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub file_name: String,
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ExportedImage {
    /// Write the image into `dir` under its file name and return the path.
    pub fn save_to(&self, dir: impl AsRef<Path>) -> RenderResult<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        log::debug!("Exported {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// Encode the surface composited over an opaque `background`.
///
/// Compositing happens in a separate pixmap so the live surface keeps its
/// transparent areas. `quality` in `0.0..=1.0` only affects JPEG.
pub fn export_image(
    surface: &PixmapSurface,
    background: Color,
    format: ImageFormat,
    quality: f64,
) -> RenderResult<ExportedImage> {
    let width = surface.width();
    let height = surface.height();
    let flattened = flatten(surface, background)?;

    // Every pixel is opaque now, so premultiplied data equals straight RGBA.
    let rgba = flattened.into_pixmap().take();
    let mut bytes = Vec::new();
    match format {
        ImageFormat::Png => {
            PngEncoder::new(&mut bytes).write_image(&rgba, width, height, ExtendedColorType::Rgba8)?;
        }
        ImageFormat::Jpeg => {
            let image = RgbaImage::from_raw(width, height, rgba)
                .ok_or(RenderError::InvalidSize { width, height })?;
            let rgb = DynamicImage::ImageRgba8(image).to_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, jpeg_quality(quality)).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
        ImageFormat::Webp => {
            WebPEncoder::new_lossless(&mut bytes).write_image(&rgba, width, height, ExtendedColorType::Rgba8)?;
        }
    }

    Ok(ExportedImage {
        file_name: format!("{}.{}", EXPORT_FILE_STEM, format.extension()),
        format,
        bytes,
        width,
        height,
    })
}

fn flatten(source: &PixmapSurface, background: Color) -> RenderResult<PixmapSurface> {
    let mut target = PixmapSurface::new(source.width(), source.height())?;
    let rgba = background.to_rgba8();
    target.fill_all(Color::from_rgba8(rgba.r, rgba.g, rgba.b, 255));
    target.draw_surface(source);
    Ok(target)
}

fn jpeg_quality(quality: f64) -> u8 {
    (quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
}
