// SPDX-License-Identifier: MPL-2.0
//! Decoding uploaded images (PNG, JPEG, GIF, WebP, SVG, etc.) into RGBA pixels.

use crate::domain::crop::ImageBounds;
use crate::error::{Error, Result};
use image_rs::{imageops::FilterType, RgbaImage};
use resvg::usvg;
use std::path::Path;
use std::sync::Arc;

/// A decoded source image at native resolution.
///
/// Pixels are stored in an `Arc` so the crop editor, the resampler and
/// background tasks can share one decode.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: Arc<RgbaImage>,
}

impl SourceImage {
    #[must_use]
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(image),
        }
    }

    /// Decodes raw upload bytes. SVG documents are rasterized at their
    /// intrinsic size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] when the bytes are not a supported image or
    /// decode to an empty one.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = if looks_like_svg(bytes) {
            rasterize_svg(bytes)?
        } else {
            image_rs::load_from_memory(bytes)
                .map_err(|e| Error::Decode(e.to_string()))?
                .to_rgba8()
        };

        if image.width() == 0 || image.height() == 0 {
            return Err(Error::Decode("image has empty dimensions".into()));
        }
        Ok(Self::from_rgba(image))
    }

    /// Reads and decodes an image file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Decode`]
    /// if its content is not an image.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::decode(&bytes)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    #[must_use]
    pub fn bounds(&self) -> ImageBounds {
        ImageBounds::new(self.width(), self.height())
    }

    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Takes the pixels out, copying only when other handles still exist.
    #[must_use]
    pub fn into_rgba(self) -> RgbaImage {
        Arc::unwrap_or_clone(self.pixels)
    }

    /// Scales the image down so its longer edge is at most `max_dimension`.
    ///
    /// Images already within the limit are returned as-is; uploads are never
    /// enlarged.
    #[must_use]
    pub fn normalize_upload(self, max_dimension: u32) -> Self {
        let Some((width, height)) = fit_within(self.width(), self.height(), max_dimension) else {
            return self;
        };
        log::debug!(
            "Normalizing upload from {}x{} to {}x{}",
            self.width(),
            self.height(),
            width,
            height
        );
        let resized = image_rs::imageops::resize(self.pixels(), width, height, FilterType::Lanczos3);
        Self::from_rgba(resized)
    }
}

/// Decodes on the blocking pool so large uploads don't stall the runtime.
///
/// # Errors
///
/// Same as [`SourceImage::decode`]; a panicked decode task maps to
/// [`Error::Decode`].
pub async fn decode_in_background(bytes: Vec<u8>) -> Result<SourceImage> {
    tokio::task::spawn_blocking(move || SourceImage::decode(&bytes))
        .await
        .map_err(|e| Error::Decode(format!("decode task failed: {e}")))?
}

/// Target size when `width x height` exceeds `max_dimension` on its longer
/// edge, `None` when it already fits.
pub(crate) fn fit_within(width: u32, height: u32, max_dimension: u32) -> Option<(u32, u32)> {
    let longer = width.max(height);
    if max_dimension == 0 || longer <= max_dimension {
        return None;
    }
    let factor = f64::from(max_dimension) / f64::from(longer);
    let scaled = |edge: u32| ((f64::from(edge) * factor).round() as u32).clamp(1, max_dimension);
    Some((scaled(width), scaled(height)))
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let trimmed = text.trim_start_matches('\u{feff}').trim_start();
    trimmed.starts_with("<svg") || (trimmed.starts_with("<?xml") && text.contains("<svg"))
}

fn rasterize_svg(bytes: &[u8]) -> Result<RgbaImage> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| Error::Decode(e.to_string()))?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| Error::Decode("SVG has empty dimensions".into()))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    Ok(pixmap_to_rgba(&pixmap))
}

/// Converts a premultiplied pixmap into straight-alpha RGBA.
pub(crate) fn pixmap_to_rgba(pixmap: &tiny_skia::Pixmap) -> RgbaImage {
    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();
    // Length is width * height * 4 by construction.
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .unwrap_or_else(|| RgbaImage::new(pixmap.width(), pixmap.height()))
}

/// Converts straight-alpha RGBA into a premultiplied pixmap.
pub(crate) fn rgba_to_pixmap(image: &RgbaImage) -> Option<tiny_skia::Pixmap> {
    let mut pixmap = tiny_skia::Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}
