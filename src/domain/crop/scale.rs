// SPDX-License-Identifier: MPL-2.0
//! Translation between the displayed crop surface and native image pixels.

use super::NativePoint;

/// Ratio `displayed / native`, guaranteed finite and strictly positive.
///
/// Computed once per layout pass and passed into the pointer controller;
/// it is never stored as authoritative state.
///
/// # Example
///
/// ```
/// use stiloz::domain::crop::DisplayScale;
///
/// let scale = DisplayScale::from_widths(400.0, 1600);
/// assert_eq!(scale.value(), 0.25);
/// assert_eq!(scale.to_native(100.0), 400.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayScale(f32);

impl DisplayScale {
    pub const IDENTITY: DisplayScale = DisplayScale(1.0);

    /// Wraps a raw factor, falling back to 1.0 for zero, negative or
    /// non-finite input.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        if factor.is_finite() && factor > 0.0 {
            Self(factor)
        } else {
            Self::IDENTITY
        }
    }

    /// Scale of an image of `native_width` pixels shown `displayed_width` wide.
    #[must_use]
    pub fn from_widths(displayed_width: f32, native_width: u32) -> Self {
        if native_width == 0 {
            return Self::IDENTITY;
        }
        Self::new(displayed_width / native_width as f32)
    }

    /// Largest scale at which the whole image fits inside the viewport.
    #[must_use]
    pub fn fit_contain(
        native_width: u32,
        native_height: u32,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Self {
        if native_width == 0 || native_height == 0 {
            return Self::IDENTITY;
        }
        let horizontal = viewport_width / native_width as f32;
        let vertical = viewport_height / native_height as f32;
        Self::new(horizontal.min(vertical))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Converts a displayed length to native pixels.
    #[must_use]
    pub fn to_native(self, displayed: f32) -> f32 {
        displayed / self.0
    }

    /// Converts a native length to displayed pixels.
    #[must_use]
    pub fn to_display(self, native: f32) -> f32 {
        native * self.0
    }
}

impl Default for DisplayScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Placement of the crop surface in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CropSurface {
    /// Client x of the surface's top-left corner.
    pub origin_x: f32,
    /// Client y of the surface's top-left corner.
    pub origin_y: f32,
    pub scale: DisplayScale,
}

impl CropSurface {
    #[must_use]
    pub fn new(origin_x: f32, origin_y: f32, scale: DisplayScale) -> Self {
        Self {
            origin_x,
            origin_y,
            scale,
        }
    }

    /// Surface of an image contain-fitted and centered inside a viewport.
    #[must_use]
    pub fn contain(
        native_width: u32,
        native_height: u32,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Self {
        let scale =
            DisplayScale::fit_contain(native_width, native_height, viewport_width, viewport_height);
        let shown_width = scale.to_display(native_width as f32);
        let shown_height = scale.to_display(native_height as f32);
        Self::new(
            ((viewport_width - shown_width) / 2.0).max(0.0),
            ((viewport_height - shown_height) / 2.0).max(0.0),
            scale,
        )
    }

    /// `native = (client - origin) / scale`
    #[must_use]
    pub fn to_native(&self, client_x: f32, client_y: f32) -> NativePoint {
        NativePoint::new(
            self.scale.to_native(client_x - self.origin_x),
            self.scale.to_native(client_y - self.origin_y),
        )
    }

    #[must_use]
    pub fn to_client(&self, point: NativePoint) -> (f32, f32) {
        (
            self.origin_x + self.scale.to_display(point.x),
            self.origin_y + self.scale.to_display(point.y),
        )
    }
}
