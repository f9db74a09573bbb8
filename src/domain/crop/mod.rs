// SPDX-License-Identifier: MPL-2.0
//! Square crop box model.
//!
//! All coordinates are native image pixels. A box that went through
//! [`geometry::clamp`] is always square, at least [`MIN_CROP_SIZE`] wide
//! (or the image's shorter edge, for tiny images), fully inside the image,
//! and snapped to whole pixels.

pub mod geometry;
pub mod scale;

pub use geometry::{apply_drag, apply_resize, clamp, hit_test, init_crop_box};
pub use scale::{CropSurface, DisplayScale};

/// Smallest crop edge, in native pixels.
pub const MIN_CROP_SIZE: f32 = 50.0;

/// Fraction of the shorter image edge covered by a freshly initialized box.
pub const DEFAULT_CROP_FRACTION: f32 = 0.8;

/// Native pixel dimensions of the image being cropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageBounds {
    pub width: f32,
    pub height: f32,
}

impl ImageBounds {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    #[must_use]
    pub fn shorter_edge(self) -> f32 {
        self.width.min(self.height).max(0.0)
    }

    /// Lower bound for the crop edge.
    ///
    /// Images shorter than [`MIN_CROP_SIZE`] cannot hold a full-size box, so
    /// the floor drops to the shorter edge there.
    #[must_use]
    pub fn size_floor(self) -> f32 {
        MIN_CROP_SIZE.min(self.shorter_edge())
    }
}

/// A point in native image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NativePoint {
    pub x: f32,
    pub y: f32,
}

impl NativePoint {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: NativePoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Corner handles of the crop box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// nw
    TopLeft,
    /// ne
    TopRight,
    /// sw
    BottomLeft,
    /// se
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// The corner that stays fixed while this one is dragged.
    #[must_use]
    pub fn opposite(self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }

    /// Unit direction pointing from the anchor toward this corner.
    #[must_use]
    pub fn direction(self) -> (f32, f32) {
        match self {
            Corner::TopLeft => (-1.0, -1.0),
            Corner::TopRight => (1.0, -1.0),
            Corner::BottomLeft => (-1.0, 1.0),
            Corner::BottomRight => (1.0, 1.0),
        }
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// One of the four resize handles.
    Handle(Corner),
    /// The inside of the crop box.
    Body,
}

/// Crop rectangle in native pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CropBox {
    /// Creates a square box. No invariants are enforced until [`clamp`].
    #[must_use]
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self {
            x,
            y,
            width: size,
            height: size,
        }
    }

    #[must_use]
    pub fn size(&self) -> f32 {
        self.width
    }

    #[must_use]
    pub fn origin(&self) -> NativePoint {
        NativePoint::new(self.x, self.y)
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[must_use]
    pub fn corner(&self, corner: Corner) -> NativePoint {
        match corner {
            Corner::TopLeft => NativePoint::new(self.x, self.y),
            Corner::TopRight => NativePoint::new(self.right(), self.y),
            Corner::BottomLeft => NativePoint::new(self.x, self.bottom()),
            Corner::BottomRight => NativePoint::new(self.right(), self.bottom()),
        }
    }

    #[must_use]
    pub fn contains(&self, point: NativePoint) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Checks every crop invariant against `bounds`.
    #[must_use]
    pub fn is_valid_for(&self, bounds: ImageBounds) -> bool {
        self.width == self.height
            && self.width >= bounds.size_floor()
            && self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= bounds.width
            && self.bottom() <= bounds.height
    }

    /// Integer pixel rectangle for the resampler, always inside `bounds`.
    #[must_use]
    pub fn to_pixel_rect(&self, bounds: ImageBounds) -> PixelRect {
        let snapped = clamp(*self, bounds);
        PixelRect {
            x: snapped.x as u32,
            y: snapped.y as u32,
            width: snapped.width as u32,
            height: snapped.height as u32,
        }
    }
}

/// Whole-pixel rectangle inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}
