// SPDX-License-Identifier: MPL-2.0
//! The poster being edited.

use super::raster::EncodedImage;

/// Text shown in place of an empty name.
pub const NAME_PLACEHOLDER: &str = "Enter your name";

/// Text shown in place of an empty specialty.
pub const SPECIALTY_PLACEHOLDER: &str = "Enter your specialty";

/// The committed, cropped profile photo.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePhoto(EncodedImage);

impl ProfilePhoto {
    #[must_use]
    pub fn new(image: EncodedImage) -> Self {
        Self(image)
    }

    #[must_use]
    pub fn image(&self) -> &EncodedImage {
        &self.0
    }
}

/// Everything that ends up on the exported poster.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PosterModel {
    pub name: String,
    pub specialty: String,
    pub photo: Option<ProfilePhoto>,
}

impl PosterModel {
    #[must_use]
    pub fn new(name: impl Into<String>, specialty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specialty: specialty.into(),
            photo: None,
        }
    }

    /// Name as rendered, falling back to the placeholder.
    #[must_use]
    pub fn display_name(&self) -> &str {
        non_blank_or(&self.name, NAME_PLACEHOLDER)
    }

    /// Specialty as rendered, falling back to the placeholder.
    #[must_use]
    pub fn display_specialty(&self) -> &str {
        non_blank_or(&self.specialty, SPECIALTY_PLACEHOLDER)
    }

    /// Replaces the photo, returning the previous one.
    pub fn replace_photo(&mut self, photo: ProfilePhoto) -> Option<ProfilePhoto> {
        self.photo.replace(photo)
    }
}

fn non_blank_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}
