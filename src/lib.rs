// SPDX-License-Identifier: MPL-2.0
//! `stiloz` composes a fixed-layout doctor poster from a cropped profile
//! photo, a name and a specialty, and exports it as a PNG.
//!
//! The crate is split the same way the editing flow is: pure crop geometry in
//! [`domain`], pointer handling and the editing state in [`editor`], pixel
//! work in [`media`], and the poster compositor in [`render`].

#![doc(html_root_url = "https://docs.rs/stiloz/0.1.0")]

pub mod config;
pub mod domain;
pub mod editor;
pub mod error;
pub mod media;
pub mod render;

#[cfg(test)]
pub mod test_utils;
