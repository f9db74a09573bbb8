// SPDX-License-Identifier: MPL-2.0
//! Pixel work: decoding uploads, cropping and resampling, and exporting the
//! finished poster.
//!
//! Everything here that touches full-size pixels runs synchronously; async
//! callers go through [`image::decode_in_background`] or the compositor,
//! which move the work onto Tokio's blocking pool.

pub mod export;
pub mod image;
pub mod resample;

pub use export::{
    export_poster, DirectorySink, DownloadSink, ExportArtifact, ExportOutcome, NoShare, ShareSink,
};
pub use image::{decode_in_background, SourceImage};
pub use resample::{crop_and_resample, resize_to_max};
