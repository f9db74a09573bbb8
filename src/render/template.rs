// SPDX-License-Identifier: MPL-2.0
//! Fixed poster layout, in on-screen CSS pixels (1rem = 16px).
//!
//! The compositor multiplies every value by the export scale, so the layout
//! itself never changes with output resolution.

/// An opaque sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

    #[must_use]
    pub fn to_color(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.0, self.1, self.2, 0xff)
    }

    /// `#rrggbb`, as used in SVG attributes.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// The circular profile photo slot.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoSlot {
    /// Left edge of the circle's bounding box.
    pub x: f32,
    /// Top edge of the circle's bounding box.
    pub y: f32,
    /// Outer diameter, border included.
    pub diameter: f32,
    pub border_width: f32,
    pub border_color: Rgb,
    /// Fill behind the photo, and the whole disc when there is no photo.
    pub placeholder_color: Rgb,
    pub glyph_color: Rgb,
    /// Arm length of the "+" glyph drawn on an empty slot.
    pub glyph_size: f32,
    pub glyph_thickness: f32,
}

impl PhotoSlot {
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        let radius = self.diameter / 2.0;
        (self.x + radius, self.y + radius)
    }

    /// Radius of the area the photo covers, inside the border.
    #[must_use]
    pub fn content_radius(&self) -> f32 {
        (self.diameter / 2.0 - self.border_width).max(0.0)
    }
}

/// A single line of text, vertically centered in its line box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSlot {
    pub x: f32,
    /// Top of the line box.
    pub y: f32,
    /// Text wider than this is clipped.
    pub width: f32,
    pub font_size: f32,
    pub line_height: f32,
    pub bold: bool,
    pub color: Rgb,
}

impl TextSlot {
    /// Baseline-independent vertical center of the line box.
    #[must_use]
    pub fn center_y(&self) -> f32 {
        self.y + self.line_height / 2.0
    }
}

/// Geometry and colours of the poster.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLayout {
    pub width: f32,
    pub height: f32,
    /// Page colour under everything.
    pub page_color: Rgb,
    /// Fill used when the background asset is a solid backdrop, and under
    /// the asset otherwise.
    pub backdrop_color: Rgb,
    pub photo: PhotoSlot,
    pub name: TextSlot,
    pub specialty: TextSlot,
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self {
            width: 448.0,
            height: 384.0,
            page_color: Rgb::WHITE,
            backdrop_color: Rgb(0x1e, 0x40, 0xaf),
            photo: PhotoSlot {
                x: 16.0,
                y: 16.0,
                diameter: 59.2,
                border_width: 2.5,
                border_color: Rgb::WHITE,
                placeholder_color: Rgb(0xe5, 0xe7, 0xeb),
                glyph_color: Rgb(0x6b, 0x72, 0x80),
                glyph_size: 9.0,
                glyph_thickness: 1.5,
            },
            name: TextSlot {
                x: 83.2,
                y: 19.2,
                width: 160.0,
                font_size: 8.0,
                line_height: 32.0,
                bold: true,
                color: Rgb::WHITE,
            },
            specialty: TextSlot {
                x: 83.2,
                y: 32.96,
                width: 160.0,
                font_size: 6.32,
                line_height: 31.6,
                bold: true,
                color: Rgb::WHITE,
            },
        }
    }
}

impl TemplateLayout {
    /// Output pixel size at `scale`.
    #[must_use]
    pub fn pixel_size(&self, scale: f32) -> (u32, u32) {
        (
            (self.width * scale).round().max(1.0) as u32,
            (self.height * scale).round().max(1.0) as u32,
        )
    }
}
