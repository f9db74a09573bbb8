// SPDX-License-Identifier: MPL-2.0
//! Pure crop-box transforms.
//!
//! Every function here is total: out-of-range input is clamped, never
//! rejected, and the returned box always satisfies the crop invariants.

use super::{
    Corner, CropBox, HitTarget, ImageBounds, NativePoint, DEFAULT_CROP_FRACTION,
};

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Centered square covering 80% of the shorter image edge.
#[must_use]
pub fn init_crop_box(image_width: u32, image_height: u32) -> CropBox {
    let bounds = ImageBounds::new(image_width, image_height);
    let size = (bounds.shorter_edge() * DEFAULT_CROP_FRACTION).round();
    let x = ((bounds.width - size) / 2.0).round();
    let y = ((bounds.height - size) / 2.0).round();
    clamp(CropBox::new(x, y, size), bounds)
}

/// Squares, sizes and shifts `crop` until it fits `bounds`.
///
/// The box keeps the shorter of its two sides, snaps to whole pixels and is
/// pushed back inside the image. Idempotent.
#[must_use]
pub fn clamp(crop: CropBox, bounds: ImageBounds) -> CropBox {
    let floor = bounds.size_floor();
    let max_side = bounds.shorter_edge();

    let side = finite_or(crop.width.min(crop.height), floor)
        .round()
        .clamp(floor, max_side);
    let x = finite_or(crop.x, 0.0)
        .round()
        .clamp(0.0, (bounds.width - side).max(0.0));
    let y = finite_or(crop.y, 0.0)
        .round()
        .clamp(0.0, (bounds.height - side).max(0.0));

    CropBox::new(x, y, side)
}

/// Moves the box by `(dx, dy)` without changing its size.
#[must_use]
pub fn apply_drag(crop: CropBox, dx: f32, dy: f32, bounds: ImageBounds) -> CropBox {
    let crop = clamp(crop, bounds);
    let moved = CropBox::new(
        crop.x + finite_or(dx, 0.0),
        crop.y + finite_or(dy, 0.0),
        crop.size(),
    );
    clamp(moved, bounds)
}

/// Resizes the box by dragging `corner` to `pointer`.
///
/// The opposite corner stays put. The new edge is the larger of the two axis
/// extents between anchor and pointer, so the box grows to cover whichever
/// axis was dragged further. It never drops under the size floor and never
/// outgrows the room left on the anchor's far side.
#[must_use]
pub fn apply_resize(
    crop: CropBox,
    corner: Corner,
    pointer: NativePoint,
    bounds: ImageBounds,
) -> CropBox {
    let crop = clamp(crop, bounds);
    let anchor = crop.corner(corner.opposite());
    let (dir_x, dir_y) = corner.direction();

    let delta_width = (pointer.x - anchor.x) * dir_x;
    let delta_height = (pointer.y - anchor.y) * dir_y;

    let room_x = if dir_x < 0.0 {
        anchor.x
    } else {
        bounds.width - anchor.x
    };
    let room_y = if dir_y < 0.0 {
        anchor.y
    } else {
        bounds.height - anchor.y
    };

    // Anchor, room and floor are whole pixels; rounding the side here leaves
    // `clamp` nothing to round on the anchor edge.
    let side = finite_or(delta_width.max(delta_height), crop.size())
        .round()
        .min(room_x.min(room_y))
        .max(bounds.size_floor());

    let x = if dir_x < 0.0 { anchor.x - side } else { anchor.x };
    let y = if dir_y < 0.0 { anchor.y - side } else { anchor.y };

    clamp(CropBox::new(x, y, side), bounds)
}

/// Finds what a pointer at `point` would grab.
///
/// Corner handles win over the body and respond within `handle_radius`
/// (native pixels) even slightly outside the box. Returns `None` when the
/// pointer misses both.
#[must_use]
pub fn hit_test(crop: &CropBox, point: NativePoint, handle_radius: f32) -> Option<HitTarget> {
    let nearest = Corner::ALL
        .iter()
        .map(|corner| (*corner, crop.corner(*corner).distance(point)))
        .filter(|(_, distance)| *distance <= handle_radius)
        .min_by(|a, b| a.1.total_cmp(&b.1));

    if let Some((corner, _)) = nearest {
        return Some(HitTarget::Handle(corner));
    }

    crop.contains(point).then_some(HitTarget::Body)
}
