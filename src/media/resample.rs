// SPDX-License-Identifier: MPL-2.0
//! Cropping and resampling into encoded blobs.
//!
//! The crop box is in native pixels, so a crop copies the region 1:1. Size
//! changes go through Lanczos3, the highest-quality filter the `image` crate
//! offers.

use super::image::{fit_within, SourceImage};
use crate::domain::crop::CropBox;
use crate::domain::raster::{EncodedImage, RasterFormat};
use crate::error::{Error, Result};
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::imageops::{self, FilterType};
use image_rs::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;

/// Extracts `crop` from `source` and encodes it.
///
/// The output has the crop's native size. `quality` (0.0 to 1.0) only
/// affects JPEG.
///
/// # Errors
///
/// Returns [`Error::Encode`] if the encoder fails.
pub fn crop_and_resample(
    source: &SourceImage,
    crop: &CropBox,
    format: RasterFormat,
    quality: f32,
) -> Result<EncodedImage> {
    let rect = crop.to_pixel_rect(source.bounds());
    let region =
        imageops::crop_imm(source.pixels(), rect.x, rect.y, rect.width, rect.height).to_image();
    encode(&region, format, quality)
}

/// Re-encodes `source` so its longer edge is at most `max_dimension`.
///
/// Downscale only, on purpose: an image whose longer edge is already within
/// `max_dimension` is re-encoded at its own size instead of being enlarged
/// to `max_dimension`.
///
/// # Errors
///
/// Returns [`Error::Encode`] if the encoder fails.
pub fn resize_to_max(
    source: &SourceImage,
    max_dimension: u32,
    format: RasterFormat,
    quality: f32,
) -> Result<EncodedImage> {
    match fit_within(source.width(), source.height(), max_dimension) {
        Some((width, height)) => {
            let resized = resample(source.pixels(), width, height);
            encode(&resized, format, quality)
        }
        None => encode(source.pixels(), format, quality),
    }
}

/// Resizes with Lanczos3, skipping the filter when the size is unchanged.
#[must_use]
pub fn resample(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.width() == width && image.height() == height {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::Lanczos3)
}

/// Encodes RGBA pixels. JPEG has no alpha channel, so it is dropped.
///
/// # Errors
///
/// Returns [`Error::Encode`] if the encoder fails.
pub fn encode(image: &RgbaImage, format: RasterFormat, quality: f32) -> Result<EncodedImage> {
    let mut buffer = Cursor::new(Vec::new());
    match format {
        RasterFormat::Png => {
            image
                .write_to(&mut buffer, ImageFormat::Png)
                .map_err(|e| Error::Encode(e.to_string()))?;
        }
        RasterFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            let encoder = JpegEncoder::new_with_quality(&mut buffer, jpeg_quality(quality));
            rgb.write_with_encoder(encoder)
                .map_err(|e| Error::Encode(e.to_string()))?;
        }
    }
    Ok(EncodedImage::new(
        buffer.into_inner(),
        format,
        image.width(),
        image.height(),
    ))
}

/// Maps a 0.0 to 1.0 quality onto the encoder's 1 to 100 scale.
fn jpeg_quality(quality: f32) -> u8 {
    let quality = if quality.is_finite() { quality } else { 1.0 };
    (quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_color_near, solid_image};
    use image_rs::{GenericImageView, Rgba};

    fn quadrant_image(size: u32) -> SourceImage {
        let half = size / 2;
        let image = RgbaImage::from_fn(size, size, |x, y| match (x < half, y < half) {
            (true, true) => Rgba([255, 0, 0, 255]),
            (false, true) => Rgba([0, 255, 0, 255]),
            (true, false) => Rgba([0, 0, 255, 255]),
            (false, false) => Rgba([255, 255, 255, 255]),
        });
        SourceImage::from_rgba(image)
    }

    fn decode(blob: &EncodedImage) -> DynamicImage {
        image_rs::load_from_memory(blob.bytes()).expect("blob should decode")
    }

    #[test]
    fn crop_keeps_native_size() {
        let source = quadrant_image(200);
        let blob = crop_and_resample(
            &source,
            &CropBox::new(10.0, 10.0, 100.0),
            RasterFormat::Jpeg,
            0.9,
        )
        .expect("crop should encode");

        assert_eq!((blob.width(), blob.height()), (100, 100));
        assert_eq!(blob.format(), RasterFormat::Jpeg);
        assert_eq!(decode(&blob).dimensions(), (100, 100));
    }

    #[test]
    fn crop_copies_the_selected_region() {
        let source = quadrant_image(200);
        // Entirely inside the bottom-right (white) quadrant.
        let blob = crop_and_resample(
            &source,
            &CropBox::new(120.0, 120.0, 60.0),
            RasterFormat::Png,
            1.0,
        )
        .expect("crop should encode");

        let pixels = decode(&blob).to_rgba8();
        assert_color_near(*pixels.get_pixel(0, 0), [255, 255, 255, 255], 0);
        assert_color_near(*pixels.get_pixel(59, 59), [255, 255, 255, 255], 0);
    }

    #[test]
    fn out_of_bounds_crop_is_clamped_before_sampling() {
        let source = quadrant_image(200);
        let blob = crop_and_resample(
            &source,
            &CropBox::new(150.0, -20.0, 100.0),
            RasterFormat::Png,
            1.0,
        )
        .expect("crop should encode");

        assert_eq!((blob.width(), blob.height()), (100, 100));
        let pixels = decode(&blob).to_rgba8();
        // Clamped to (100, 0): top-right quadrant is green.
        assert_color_near(*pixels.get_pixel(10, 10), [0, 255, 0, 255], 0);
    }

    #[test]
    fn jpeg_quality_changes_output_size() {
        let source = SourceImage::from_rgba(RgbaImage::from_fn(128, 128, |x, y| {
            Rgba([(x * 2) as u8, (y * 2) as u8, ((x ^ y) & 0xff) as u8, 255])
        }));
        let crop = CropBox::new(0.0, 0.0, 128.0);
        let low = crop_and_resample(&source, &crop, RasterFormat::Jpeg, 0.1).expect("low");
        let high = crop_and_resample(&source, &crop, RasterFormat::Jpeg, 1.0).expect("high");
        assert!(low.len() < high.len());
    }

    #[test]
    fn resize_to_max_downscales_longer_edge() {
        let source = SourceImage::from_rgba(solid_image(1000, 500, [40, 80, 120, 255]));
        let blob = resize_to_max(&source, 200, RasterFormat::Png, 1.0).expect("resize");
        assert_eq!((blob.width(), blob.height()), (200, 100));
        assert_eq!(decode(&blob).dimensions(), (200, 100));
    }

    #[test]
    fn resize_to_max_leaves_small_images_alone() {
        let source = SourceImage::from_rgba(solid_image(120, 80, [40, 80, 120, 255]));
        let blob = resize_to_max(&source, 200, RasterFormat::Png, 1.0).expect("resize");
        assert_eq!((blob.width(), blob.height()), (120, 80));
    }

    #[test]
    fn jpeg_quality_maps_into_encoder_range() {
        assert_eq!(jpeg_quality(0.9), 90);
        assert_eq!(jpeg_quality(0.0), 1);
        assert_eq!(jpeg_quality(7.0), 100);
        assert_eq!(jpeg_quality(f32::NAN), 100);
    }
}
