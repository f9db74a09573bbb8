// SPDX-License-Identifier: MPL-2.0
//! Domain layer - pure types and rules with no framework dependencies.
//!
//! # Modules
//!
//! - [`crop`]: crop box geometry ([`CropBox`](crop::CropBox),
//!   [`DisplayScale`](crop::DisplayScale), [`CropSurface`](crop::CropSurface))
//! - [`poster`]: the poster being edited ([`PosterModel`](poster::PosterModel),
//!   [`ProfilePhoto`](poster::ProfilePhoto))
//! - [`raster`]: encoded blobs ([`EncodedImage`](raster::EncodedImage))

pub mod crop;
pub mod poster;
pub mod raster;
