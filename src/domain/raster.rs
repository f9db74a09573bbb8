// SPDX-License-Identifier: MPL-2.0
//! Encoded raster blobs.

use std::sync::Arc;

/// Output encodings produced by the resampler and exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterFormat {
    /// Lossless, used for the exported poster.
    #[default]
    Png,
    /// Lossy, used for the committed profile photo.
    Jpeg,
}

impl RasterFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            RasterFormat::Png => "png",
            RasterFormat::Jpeg => "jpg",
        }
    }

}

/// An encoded image together with its pixel dimensions.
///
/// The bytes sit behind an `Arc` so the blob can be handed to sinks and
/// background tasks without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    bytes: Arc<Vec<u8>>,
    format: RasterFormat,
    width: u32,
    height: u32,
}

impl EncodedImage {
    #[must_use]
    pub fn new(bytes: Vec<u8>, format: RasterFormat, width: u32, height: u32) -> Self {
        Self {
            bytes: Arc::new(bytes),
            format,
            width,
            height,
        }
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn format(&self) -> RasterFormat {
        self.format
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_match_encodings() {
        assert_eq!(RasterFormat::Png.extension(), "png");
        assert_eq!(RasterFormat::Jpeg.extension(), "jpg");
        assert_eq!(RasterFormat::default(), RasterFormat::Png);
    }

    #[test]
    fn clones_share_bytes() {
        let blob = EncodedImage::new(vec![1, 2, 3], RasterFormat::Png, 1, 1);
        let copy = blob.clone();
        assert_eq!(copy.bytes().as_ptr(), blob.bytes().as_ptr());
        assert_eq!(copy.len(), 3);
    }
}
