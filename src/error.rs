// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Every failure here is scoped to a single user action: a failed decode keeps
//! the previously committed photo, a failed render produces no artifact, and a
//! failed share never blocks the download. Geometry has no error variant
//! because out-of-bounds boxes are clamped instead of rejected.

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The uploaded bytes could not be decoded as an image.
    #[error("Decode Error: {0}")]
    Decode(String),

    /// Compositing or rasterization failed, or an asset never became ready.
    #[error("Render Error: {0}")]
    Render(String),

    /// The platform has no share target. Callers log and swallow this.
    #[error("Share unavailable: {0}")]
    ShareUnavailable(String),

    /// Encoding a raster into its output format failed.
    #[error("Encode Error: {0}")]
    Encode(String),

    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` for failures that only affect the optional share step.
    #[must_use]
    pub fn is_share_unavailable(&self) -> bool {
        matches!(self, Error::ShareUnavailable(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        match err {
            image_rs::ImageError::IoError(io) => Error::Io(io.to_string()),
            image_rs::ImageError::Encoding(e) => Error::Encode(e.to_string()),
            other => Error::Decode(other.to_string()),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
