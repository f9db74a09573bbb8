// SPDX-License-Identifier: MPL-2.0
//! Poster export: render, encode as PNG, hand to a download sink and
//! optionally to a share sink.
//!
//! The download always happens first. Share failures are logged and never
//! fail the export.

use super::resample::encode;
use crate::domain::poster::PosterModel;
use crate::domain::raster::{EncodedImage, RasterFormat};
use crate::error::{Error, Result};
use crate::render::Compositor;
use std::fs;
use std::path::PathBuf;

/// Prefix of downloaded poster files, followed by a millisecond timestamp.
pub const POSTER_FILE_PREFIX: &str = "Doctor_Poster_";

/// File name offered to share targets.
pub const SHARE_FILE_NAME: &str = "doctor-poster.png";

/// Title offered to share targets.
pub const SHARE_TITLE: &str = "Doctor Poster";

/// `Doctor_Poster_<epoch ms>.png`
#[must_use]
pub fn poster_file_name(epoch_millis: i64) -> String {
    format!(
        "{POSTER_FILE_PREFIX}{epoch_millis}.{}",
        RasterFormat::Png.extension()
    )
}

/// A rendered, encoded poster and the name it is downloaded under.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub image: EncodedImage,
    pub file_name: String,
}

/// Where a finished poster is downloaded to.
pub trait DownloadSink {
    /// Stores the artifact and returns where it ended up.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the artifact cannot be written.
    fn save(&self, artifact: &ExportArtifact) -> Result<PathBuf>;
}

/// Platform share target.
pub trait ShareSink {
    /// # Errors
    ///
    /// Returns [`Error::ShareUnavailable`] when sharing is not supported.
    fn share(&self, image: &EncodedImage, file_name: &str, title: &str) -> Result<()>;
}

/// Writes posters into a directory, creating it when missing.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectorySink {
    fn save(&self, artifact: &ExportArtifact) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&artifact.file_name);
        fs::write(&path, artifact.image.bytes())?;
        Ok(path)
    }
}

/// Share target for platforms without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShare;

impl ShareSink for NoShare {
    fn share(&self, _image: &EncodedImage, _file_name: &str, _title: &str) -> Result<()> {
        Err(Error::ShareUnavailable(
            "no share target on this platform".into(),
        ))
    }
}

/// What an export produced.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub artifact: ExportArtifact,
    /// Location reported by the download sink.
    pub saved_to: PathBuf,
    /// Whether the share sink accepted the poster.
    pub shared: bool,
}

/// Renders `poster`, downloads it, then offers it for sharing.
///
/// # Errors
///
/// Returns [`Error::Render`] or [`Error::Encode`] when no artifact could be
/// produced, and the download sink's error if saving fails. Nothing is
/// downloaded or shared on error. Share errors are not propagated.
pub async fn export_poster(
    compositor: &Compositor,
    poster: &PosterModel,
    download: &dyn DownloadSink,
    share: &dyn ShareSink,
) -> Result<ExportOutcome> {
    let rendered = compositor.render(poster).await?;
    let image = encode(&rendered, RasterFormat::Png, 1.0)?;
    let artifact = ExportArtifact {
        image,
        file_name: poster_file_name(chrono::Utc::now().timestamp_millis()),
    };

    let saved_to = download.save(&artifact)?;
    log::info!("Poster saved to {}", saved_to.display());

    let shared = match share.share(&artifact.image, SHARE_FILE_NAME, SHARE_TITLE) {
        Ok(()) => true,
        Err(e) if e.is_share_unavailable() => {
            log::debug!("Skipping share: {e}");
            false
        }
        Err(e) => {
            log::warn!("Sharing the poster failed: {e}");
            false
        }
    };

    Ok(ExportOutcome {
        artifact,
        saved_to,
        shared,
    })
}
