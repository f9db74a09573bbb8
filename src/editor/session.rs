// SPDX-License-Identifier: MPL-2.0
//! Editing session: the poster fields, the committed photo and, while a
//! photo is being cropped, the source image with its crop box.

use super::pointer::{InteractionSession, PointerController, PointerEvent};
use crate::config::{Config, HANDLE_HIT_RADIUS};
use crate::domain::crop::{clamp, init_crop_box, CropBox, CropSurface};
use crate::domain::poster::{PosterModel, ProfilePhoto};
use crate::domain::raster::RasterFormat;
use crate::error::Result;
use crate::media::export::{export_poster, DownloadSink, ExportOutcome, ShareSink};
use crate::media::image::{decode_in_background, SourceImage};
use crate::media::resample::crop_and_resample;
use crate::render::Compositor;

/// A source image being cropped. Dropped on commit, on cancel, and when a
/// new upload replaces it.
#[derive(Debug, Clone)]
pub struct CropEditor {
    source: SourceImage,
    crop: CropBox,
    pointer: PointerController,
    surface: CropSurface,
}

impl CropEditor {
    fn new(source: SourceImage, handle_radius: f32) -> Self {
        let crop = init_crop_box(source.width(), source.height());
        Self {
            source,
            crop,
            pointer: PointerController::new(handle_radius),
            surface: CropSurface::default(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    #[must_use]
    pub fn crop_box(&self) -> CropBox {
        self.crop
    }

    #[must_use]
    pub fn surface(&self) -> CropSurface {
        self.surface
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionSession {
        self.pointer.session()
    }
}

/// State of one poster being edited.
#[derive(Debug, Clone)]
pub struct EditorSession {
    poster: PosterModel,
    crop: Option<CropEditor>,
    upload_max_dimension: u32,
    photo_quality: f32,
    handle_radius: f32,
}

impl EditorSession {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            poster: PosterModel::default(),
            crop: None,
            upload_max_dimension: config.upload_max_dimension(),
            photo_quality: config.photo_quality(),
            handle_radius: HANDLE_HIT_RADIUS,
        }
    }

    #[must_use]
    pub fn poster(&self) -> &PosterModel {
        &self.poster
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.poster.name = name.into();
    }

    pub fn set_specialty(&mut self, specialty: impl Into<String>) {
        self.poster.specialty = specialty.into();
    }

    #[must_use]
    pub fn crop_editor(&self) -> Option<&CropEditor> {
        self.crop.as_ref()
    }

    #[must_use]
    pub fn crop_box(&self) -> Option<CropBox> {
        self.crop.as_ref().map(CropEditor::crop_box)
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionSession {
        self.crop
            .as_ref()
            .map_or(InteractionSession::Idle, CropEditor::interaction)
    }

    /// Decodes an upload and opens it for cropping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`](crate::error::Error::Decode) for unreadable
    /// bytes. The session is left exactly as it was.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<CropBox> {
        let source = SourceImage::decode(bytes).inspect_err(|e| {
            log::warn!("Dropping upload: {e}");
        })?;
        Ok(self.open_crop(source))
    }

    /// Like [`load_image`](Self::load_image), decoding on the blocking pool.
    ///
    /// # Errors
    ///
    /// Same as [`load_image`](Self::load_image).
    pub async fn load_image_async(&mut self, bytes: Vec<u8>) -> Result<CropBox> {
        let source = decode_in_background(bytes).await.inspect_err(|e| {
            log::warn!("Dropping upload: {e}");
        })?;
        Ok(self.open_crop(source))
    }

    /// Opens an already decoded image for cropping, replacing any image that
    /// was being cropped. Returns the initial crop box.
    pub fn open_crop(&mut self, source: SourceImage) -> CropBox {
        let source = source.normalize_upload(self.upload_max_dimension);
        if self.crop.is_some() {
            log::debug!("Discarding previous crop source for a new upload");
        }
        let editor = CropEditor::new(source, self.handle_radius);
        let crop = editor.crop;
        log::debug!(
            "Crop opened on {}x{} image with box {:?}",
            editor.source.width(),
            editor.source.height(),
            crop
        );
        self.crop = Some(editor);
        crop
    }

    /// Records where the crop surface is laid out. Call on every layout pass.
    pub fn set_surface(&mut self, surface: CropSurface) {
        if let Some(editor) = self.crop.as_mut() {
            editor.surface = surface;
        }
    }

    /// Feeds a pointer event to the crop surface. Returns the updated box
    /// when the event changed it.
    pub fn pointer_event(&mut self, event: &PointerEvent) -> Option<CropBox> {
        let editor = self.crop.as_mut()?;
        let bounds = editor.source.bounds();
        let updated = editor
            .pointer
            .handle(event, &editor.crop, &editor.surface, bounds)?;
        editor.crop = updated;
        Some(updated)
    }

    /// Sets the box directly, clamped to the image.
    pub fn set_crop_box(&mut self, crop: CropBox) -> Option<CropBox> {
        let editor = self.crop.as_mut()?;
        editor.crop = clamp(crop, editor.source.bounds());
        Some(editor.crop)
    }

    /// Crops the source at the current box and makes it the profile photo.
    ///
    /// The photo is replaced only once encoding succeeded, and the crop
    /// source is released afterwards. Returns `None` if nothing was being
    /// cropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`](crate::error::Error::Encode) if the photo
    /// could not be encoded; the crop stays open and the previous photo is
    /// kept.
    pub fn commit_crop(&mut self) -> Result<Option<&ProfilePhoto>> {
        let Some(editor) = self.crop.as_ref() else {
            return Ok(None);
        };
        let blob = crop_and_resample(
            &editor.source,
            &editor.crop,
            RasterFormat::Jpeg,
            self.photo_quality,
        )?;
        log::info!(
            "Committed {}x{} profile photo ({} bytes)",
            blob.width(),
            blob.height(),
            blob.len()
        );
        self.crop = None;
        self.poster.replace_photo(ProfilePhoto::new(blob));
        Ok(self.poster.photo.as_ref())
    }

    /// Closes the crop surface without touching the committed photo.
    pub fn cancel_crop(&mut self) {
        if self.crop.take().is_some() {
            log::debug!("Crop cancelled");
        }
    }

    /// Exports the current poster.
    ///
    /// # Errors
    ///
    /// See [`export_poster`].
    pub async fn export(
        &self,
        compositor: &Compositor,
        download: &dyn DownloadSink,
        share: &dyn ShareSink,
    ) -> Result<ExportOutcome> {
        export_poster(compositor, &self.poster, download, share).await
    }
}
