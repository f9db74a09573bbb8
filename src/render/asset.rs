// SPDX-License-Identifier: MPL-2.0
//! Background template asset with an explicit readiness signal.
//!
//! The asset loads in the background; exports await [`TemplateAsset::ready`]
//! instead of sleeping for a fixed delay.

use crate::error::{Error, Result};
use crate::media::image::decode_in_background;
use image_rs::RgbaImage;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone)]
enum AssetState {
    Loading,
    /// `None` means a solid backdrop with no image.
    Ready(Option<Arc<RgbaImage>>),
    Failed(String),
}

/// Handle to the background asset. Cheap to clone; all clones observe the
/// same load.
#[derive(Debug, Clone)]
pub struct TemplateAsset {
    state: watch::Receiver<AssetState>,
}

/// Completes a [`TemplateAsset`] created with [`TemplateAsset::pending`].
#[derive(Debug)]
pub struct AssetSignal {
    state: watch::Sender<AssetState>,
}

impl AssetSignal {
    pub fn complete(self, image: RgbaImage) {
        self.finish(AssetState::Ready(Some(Arc::new(image))));
    }

    pub fn fail(self, reason: impl Into<String>) {
        self.finish(AssetState::Failed(reason.into()));
    }

    fn finish(self, state: AssetState) {
        if self.state.send(state).is_err() {
            log::debug!("Template asset finished with no one waiting");
        }
    }
}

impl TemplateAsset {
    /// Plain backdrop, ready immediately.
    #[must_use]
    pub fn solid() -> Self {
        Self::settled(AssetState::Ready(None))
    }

    /// An already decoded background image.
    #[must_use]
    pub fn from_image(image: RgbaImage) -> Self {
        Self::settled(AssetState::Ready(Some(Arc::new(image))))
    }

    /// An asset completed later through the returned [`AssetSignal`].
    #[must_use]
    pub fn pending() -> (Self, AssetSignal) {
        let (tx, rx) = watch::channel(AssetState::Loading);
        (Self { state: rx }, AssetSignal { state: tx })
    }

    /// Starts reading and decoding `path` in the background.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn load(path: PathBuf) -> Self {
        let (asset, signal) = Self::pending();
        tokio::spawn(async move {
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::warn!("Failed to read template asset {}: {e}", path.display());
                    signal.fail(format!("{}: {e}", path.display()));
                    return;
                }
            };
            match decode_in_background(bytes).await {
                Ok(image) => {
                    log::debug!(
                        "Template asset {} ready ({}x{})",
                        path.display(),
                        image.width(),
                        image.height()
                    );
                    signal.complete(image.into_rgba());
                }
                Err(e) => {
                    log::warn!("Failed to decode template asset {}: {e}", path.display());
                    signal.fail(format!("{}: {e}", path.display()));
                }
            }
        });
        asset
    }

    fn settled(state: AssetState) -> Self {
        // The receiver keeps the last value after the sender is gone.
        let (_tx, rx) = watch::channel(state);
        Self { state: rx }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(*self.state.borrow(), AssetState::Ready(_))
    }

    /// Waits until loading settles.
    ///
    /// Returns the background image, or `None` for a solid backdrop.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the asset failed to load or its loader
    /// went away without finishing.
    pub async fn ready(&self) -> Result<Option<Arc<RgbaImage>>> {
        let mut state = self.state.clone();
        let settled = state
            .wait_for(|state| !matches!(state, AssetState::Loading))
            .await
            .map_err(|_| Error::Render("template asset loader stopped".into()))?;
        match &*settled {
            AssetState::Ready(image) => Ok(image.clone()),
            AssetState::Failed(reason) => {
                Err(Error::Render(format!("template asset failed: {reason}")))
            }
            AssetState::Loading => Err(Error::Render("template asset not loaded".into())),
        }
    }
}
