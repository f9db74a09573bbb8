// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and synthetic images.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

// Re-export approx macros for convenient use in tests
pub use approx::{assert_abs_diff_eq, assert_abs_diff_ne, assert_relative_eq, assert_relative_ne};

use image_rs::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Single-colour image.
pub fn solid_image(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// PNG bytes of a single-colour image, as an upload would deliver them.
pub fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    solid_image(width, height, color)
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("failed to encode test png");
    buffer.into_inner()
}

/// Checks that two colours match within `tolerance` per channel.
pub fn assert_color_near(actual: Rgba<u8>, expected: [u8; 4], tolerance: u8) {
    for (channel, (a, e)) in actual.0.iter().zip(expected.iter()).enumerate() {
        assert!(
            a.abs_diff(*e) <= tolerance,
            "channel {channel}: got {:?}, expected {:?}",
            actual.0,
            expected
        );
    }
}
