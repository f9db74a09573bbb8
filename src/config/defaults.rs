// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Photo**: Committed profile photo encoding
//! - **Upload**: Normalization of freshly uploaded images
//! - **Export**: Poster rasterization and asset readiness
//! - **Interaction**: Pointer hit areas on the crop surface

// ==========================================================================
// Photo Defaults
// ==========================================================================

/// JPEG quality for the committed profile photo (0.0 to 1.0).
pub const DEFAULT_PHOTO_QUALITY: f32 = 0.9;

/// Lowest accepted photo quality.
pub const MIN_PHOTO_QUALITY: f32 = 0.1;

/// Highest accepted photo quality.
pub const MAX_PHOTO_QUALITY: f32 = 1.0;

// ==========================================================================
// Upload Defaults
// ==========================================================================

/// Longest edge kept for uploaded images; larger uploads are scaled down.
pub const DEFAULT_UPLOAD_MAX_DIMENSION: u32 = 2048;

/// Smallest accepted upload limit.
pub const MIN_UPLOAD_MAX_DIMENSION: u32 = 256;

/// Largest accepted upload limit.
pub const MAX_UPLOAD_MAX_DIMENSION: u32 = 8192;

// ==========================================================================
// Export Defaults
// ==========================================================================

/// Upscale factor applied to the on-screen poster size when exporting.
pub const DEFAULT_EXPORT_SCALE: f32 = 2.0;

/// Smallest accepted export scale.
pub const MIN_EXPORT_SCALE: f32 = 0.5;

/// Largest accepted export scale.
pub const MAX_EXPORT_SCALE: f32 = 8.0;

/// How long an export waits for the background asset (in milliseconds).
pub const DEFAULT_ASSET_TIMEOUT_MS: u64 = 10_000;

/// Font family used for the poster text.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

// ==========================================================================
// Interaction Defaults
// ==========================================================================

/// Radius of a corner handle's hit area, in displayed pixels.
/// Larger than the drawn handle so touch input can grab it.
pub const HANDLE_HIT_RADIUS: f32 = 22.0;
