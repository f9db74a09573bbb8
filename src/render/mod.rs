// SPDX-License-Identifier: MPL-2.0
//! Poster rendering: the fixed template, its background asset and the
//! compositor that rasterizes a [`PosterModel`](crate::domain::poster::PosterModel).

pub mod asset;
pub mod compositor;
pub mod template;

pub use asset::{AssetSignal, TemplateAsset};
pub use compositor::Compositor;
pub use template::TemplateLayout;
