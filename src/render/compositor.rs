// SPDX-License-Identifier: MPL-2.0
//! Poster compositor.
//!
//! Draws the template at the export scale with tiny-skia: page colour,
//! backdrop (or the cover-scaled background asset), the circular photo slot
//! and the two text lines. Text is laid out by resvg so it uses the system
//! fonts.

use super::asset::TemplateAsset;
use super::template::{PhotoSlot, Rgb, TemplateLayout, TextSlot};
use crate::config::Config;
use crate::domain::poster::PosterModel;
use crate::domain::raster::EncodedImage;
use crate::error::{Error, Result};
use crate::media::image::{pixmap_to_rgba, rgba_to_pixmap};
use image_rs::RgbaImage;
use resvg::usvg;
use std::sync::Arc;
use std::time::Duration;
use tiny_skia::{
    FillRule, FilterQuality, Paint, PathBuilder, Pattern, Pixmap, PixmapPaint, Rect, SpreadMode,
    Stroke, Transform,
};

/// Generic families appended after the configured one so text still renders
/// when it is missing.
const FALLBACK_FAMILIES: &str = "DejaVu Sans, Liberation Sans, Arial, sans-serif";

/// Renders [`PosterModel`]s into poster rasters.
#[derive(Debug, Clone)]
pub struct Compositor {
    layout: TemplateLayout,
    scale: f32,
    font_family: String,
    fontdb: Arc<usvg::fontdb::Database>,
    asset: TemplateAsset,
    asset_timeout: Duration,
}

impl Compositor {
    /// Builds a compositor and loads the system font database.
    #[must_use]
    pub fn new(config: &Config, layout: TemplateLayout, asset: TemplateAsset) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        log::debug!("Loaded {} font faces", fontdb.len());
        Self::with_fonts(config, layout, asset, Arc::new(fontdb))
    }

    /// Builds a compositor around an existing font database.
    #[must_use]
    pub fn with_fonts(
        config: &Config,
        layout: TemplateLayout,
        asset: TemplateAsset,
        fontdb: Arc<usvg::fontdb::Database>,
    ) -> Self {
        Self {
            layout,
            scale: config.export_scale(),
            font_family: config.font_family().to_string(),
            fontdb,
            asset,
            asset_timeout: config.asset_timeout(),
        }
    }

    /// Output size in pixels.
    #[must_use]
    pub fn output_size(&self) -> (u32, u32) {
        self.layout.pixel_size(self.scale)
    }

    /// Renders `poster` once the background asset is ready.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the asset fails or is not ready within
    /// the configured timeout, or if rasterization fails.
    pub async fn render(&self, poster: &PosterModel) -> Result<RgbaImage> {
        let background = tokio::time::timeout(self.asset_timeout, self.asset.ready())
            .await
            .map_err(|_| {
                Error::Render(format!(
                    "template asset not ready after {} ms",
                    self.asset_timeout.as_millis()
                ))
            })??;

        let job = RenderJob {
            layout: self.layout.clone(),
            scale: self.scale,
            font_family: self.font_family.clone(),
            fontdb: Arc::clone(&self.fontdb),
            name: poster.display_name().to_string(),
            specialty: poster.display_specialty().to_string(),
            photo: poster.photo.as_ref().map(|photo| photo.image().clone()),
            background,
        };

        tokio::task::spawn_blocking(move || job.rasterize())
            .await
            .map_err(|e| Error::Render(format!("render task failed: {e}")))?
    }
}

/// Owned snapshot of one render, moved onto the blocking pool.
struct RenderJob {
    layout: TemplateLayout,
    scale: f32,
    font_family: String,
    fontdb: Arc<usvg::fontdb::Database>,
    name: String,
    specialty: String,
    photo: Option<EncodedImage>,
    background: Option<Arc<RgbaImage>>,
}

impl RenderJob {
    fn rasterize(self) -> Result<RgbaImage> {
        let (width, height) = self.layout.pixel_size(self.scale);
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| Error::Render(format!("cannot allocate {width}x{height} canvas")))?;
        let transform = Transform::from_scale(self.scale, self.scale);

        pixmap.fill(self.layout.page_color.to_color());
        self.draw_backdrop(&mut pixmap, transform)?;
        self.draw_photo_slot(&mut pixmap, transform)?;
        self.draw_text(&mut pixmap, transform)?;

        Ok(pixmap_to_rgba(&pixmap))
    }

    fn draw_backdrop(&self, pixmap: &mut Pixmap, transform: Transform) -> Result<()> {
        let layout = &self.layout;
        if let Some(rect) = Rect::from_xywh(0.0, 0.0, layout.width, layout.height) {
            pixmap.fill_rect(rect, &solid_paint(layout.backdrop_color), transform, None);
        }

        let Some(background) = &self.background else {
            return Ok(());
        };
        let source = rgba_to_pixmap(background)
            .ok_or_else(|| Error::Render("background asset has empty dimensions".into()))?;

        // object-fit: cover, centered. The canvas edge clips the overflow.
        let (bw, bh) = (source.width() as f32, source.height() as f32);
        let cover = (layout.width / bw).max(layout.height / bh);
        let tx = (layout.width - bw * cover) / 2.0;
        let ty = (layout.height - bh * cover) / 2.0;
        let placement = transform.pre_concat(Transform::from_row(cover, 0.0, 0.0, cover, tx, ty));

        pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &PixmapPaint {
                quality: FilterQuality::Bicubic,
                ..PixmapPaint::default()
            },
            placement,
            None,
        );
        Ok(())
    }

    fn draw_photo_slot(&self, pixmap: &mut Pixmap, transform: Transform) -> Result<()> {
        let slot = &self.layout.photo;
        let (cx, cy) = slot.center();
        let outer_radius = slot.diameter / 2.0;

        if let Some(disc) = PathBuilder::from_circle(cx, cy, outer_radius) {
            pixmap.fill_path(
                &disc,
                &solid_paint(slot.placeholder_color),
                FillRule::Winding,
                transform,
                None,
            );
        }

        match &self.photo {
            Some(photo) => draw_photo(pixmap, slot, photo, transform)?,
            None => draw_plus_glyph(pixmap, slot, transform),
        }

        let ring_radius = outer_radius - slot.border_width / 2.0;
        if slot.border_width > 0.0 {
            if let Some(ring) = PathBuilder::from_circle(cx, cy, ring_radius) {
                let stroke = Stroke {
                    width: slot.border_width,
                    ..Stroke::default()
                };
                pixmap.stroke_path(&ring, &solid_paint(slot.border_color), &stroke, transform, None);
            }
        }
        Ok(())
    }

    fn draw_text(&self, pixmap: &mut Pixmap, transform: Transform) -> Result<()> {
        let svg = text_overlay_svg(
            &self.layout,
            &self.font_family,
            [
                (&self.layout.name, self.name.as_str()),
                (&self.layout.specialty, self.specialty.as_str()),
            ],
        );
        let options = usvg::Options {
            font_family: self.font_family.clone(),
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|e| Error::Render(format!("text layout failed: {e}")))?;
        resvg::render(&tree, transform, &mut pixmap.as_mut());
        Ok(())
    }
}

/// Fills the slot's content circle with the photo, scaled to cover it.
fn draw_photo(
    pixmap: &mut Pixmap,
    slot: &PhotoSlot,
    photo: &EncodedImage,
    transform: Transform,
) -> Result<()> {
    let decoded = image_rs::load_from_memory(photo.bytes())
        .map_err(|e| Error::Render(format!("profile photo is unreadable: {e}")))?
        .to_rgba8();
    let source = rgba_to_pixmap(&decoded)
        .ok_or_else(|| Error::Render("profile photo has empty dimensions".into()))?;

    let (cx, cy) = slot.center();
    let radius = slot.content_radius();
    let Some(circle) = PathBuilder::from_circle(cx, cy, radius) else {
        return Ok(());
    };

    let (pw, ph) = (source.width() as f32, source.height() as f32);
    let cover = (2.0 * radius / pw).max(2.0 * radius / ph);
    let placement = Transform::from_row(
        cover,
        0.0,
        0.0,
        cover,
        cx - pw * cover / 2.0,
        cy - ph * cover / 2.0,
    );

    let mut paint = Paint::default();
    paint.anti_alias = true;
    paint.shader = Pattern::new(
        source.as_ref(),
        SpreadMode::Pad,
        FilterQuality::Bicubic,
        1.0,
        placement,
    );
    pixmap.fill_path(&circle, &paint, FillRule::Winding, transform, None);
    Ok(())
}

fn draw_plus_glyph(pixmap: &mut Pixmap, slot: &PhotoSlot, transform: Transform) {
    let (cx, cy) = slot.center();
    let arm = slot.glyph_size / 2.0;
    let half = slot.glyph_thickness / 2.0;
    let paint = solid_paint(slot.glyph_color);

    let bars = [
        Rect::from_xywh(cx - arm, cy - half, slot.glyph_size, slot.glyph_thickness),
        Rect::from_xywh(cx - half, cy - arm, slot.glyph_thickness, slot.glyph_size),
    ];
    for bar in bars.into_iter().flatten() {
        pixmap.fill_rect(bar, &paint, transform, None);
    }
}

fn solid_paint(color: Rgb) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_color());
    paint.anti_alias = true;
    paint
}

/// Builds an SVG holding only the text lines, each clipped to its slot width.
fn text_overlay_svg(
    layout: &TemplateLayout,
    font_family: &str,
    lines: [(&TextSlot, &str); 2],
) -> String {
    let family = quick_xml::escape::escape(format!("{font_family}, {FALLBACK_FAMILIES}"));
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><defs>"#,
        w = layout.width,
        h = layout.height
    );
    for (index, (slot, _)) in lines.iter().enumerate() {
        svg.push_str(&format!(
            r#"<clipPath id="line-{index}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
            slot.x, slot.y, slot.width, slot.line_height
        ));
    }
    svg.push_str("</defs>");
    for (index, (slot, text)) in lines.iter().enumerate() {
        svg.push_str(&format!(
            r#"<text x="{x}" y="{y}" font-family="{family}" font-size="{size}" font-weight="{weight}" fill="{fill}" dominant-baseline="central" xml:space="preserve" clip-path="url(#line-{index})">{text}</text>"#,
            x = slot.x,
            y = slot.center_y(),
            size = slot.font_size,
            weight = if slot.bold { "bold" } else { "normal" },
            fill = slot.color.to_hex(),
            text = quick_xml::escape::escape(*text),
        ));
    }
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::poster::ProfilePhoto;
    use crate::domain::raster::RasterFormat;
    use crate::media::resample::encode;
    use crate::test_utils::{assert_color_near, solid_image};

    fn compositor(asset: TemplateAsset) -> Compositor {
        // An empty font database keeps the tests independent of the host.
        Compositor::with_fonts(
            &Config::default(),
            TemplateLayout::default(),
            asset,
            Arc::new(usvg::fontdb::Database::new()),
        )
    }

    fn red_photo() -> ProfilePhoto {
        let blob = encode(&solid_image(64, 64, [255, 0, 0, 255]), RasterFormat::Png, 1.0)
            .expect("encode photo");
        ProfilePhoto::new(blob)
    }

    #[tokio::test]
    async fn renders_at_twice_the_layout_size() {
        let image = compositor(TemplateAsset::solid())
            .render(&PosterModel::default())
            .await
            .expect("render should succeed");
        assert_eq!(image.dimensions(), (896, 768));
    }

    #[tokio::test]
    async fn solid_backdrop_fills_the_poster() {
        let image = compositor(TemplateAsset::solid())
            .render(&PosterModel::default())
            .await
            .expect("render");
        assert_color_near(*image.get_pixel(800, 700), [0x1e, 0x40, 0xaf, 0xff], 1);
    }

    #[tokio::test]
    async fn empty_slot_shows_placeholder_disc_and_border() {
        let image = compositor(TemplateAsset::solid())
            .render(&PosterModel::default())
            .await
            .expect("render");
        // 20px right of the slot center (91.2, 91.2), clear of the glyph.
        assert_color_near(*image.get_pixel(111, 91), [0xe5, 0xe7, 0xeb, 0xff], 2);
        // Glyph center.
        assert_color_near(*image.get_pixel(91, 91), [0x6b, 0x72, 0x80, 0xff], 2);
        // On the white border ring.
        assert_color_near(*image.get_pixel(148, 91), [0xff, 0xff, 0xff, 0xff], 2);
    }

    #[tokio::test]
    async fn committed_photo_fills_the_circle() {
        let mut poster = PosterModel::new("Dr. Ada Rao", "Cardiology");
        poster.replace_photo(red_photo());

        let image = compositor(TemplateAsset::solid())
            .render(&poster)
            .await
            .expect("render");
        assert_color_near(*image.get_pixel(91, 91), [255, 0, 0, 255], 2);
        assert_color_near(*image.get_pixel(111, 91), [255, 0, 0, 255], 2);
        // Outside the circle, inside its bounding box: backdrop.
        assert_color_near(*image.get_pixel(36, 36), [0x1e, 0x40, 0xaf, 0xff], 2);
    }

    #[tokio::test]
    async fn background_asset_covers_the_backdrop() {
        let asset = TemplateAsset::from_image(solid_image(100, 50, [0, 200, 0, 255]));
        let image = compositor(asset)
            .render(&PosterModel::default())
            .await
            .expect("render");
        assert_color_near(*image.get_pixel(800, 700), [0, 200, 0, 255], 2);
        assert_color_near(*image.get_pixel(0, 0), [0, 200, 0, 255], 2);
    }

    #[tokio::test]
    async fn failed_asset_is_a_render_error() {
        let (asset, signal) = TemplateAsset::pending();
        signal.fail("missing");
        let err = compositor(asset)
            .render(&PosterModel::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }

    #[tokio::test]
    async fn unready_asset_times_out() {
        let (asset, _signal) = TemplateAsset::pending();
        let config = Config {
            asset_timeout_ms: Some(20),
            ..Config::default()
        };
        let compositor = Compositor::with_fonts(
            &config,
            TemplateLayout::default(),
            asset,
            Arc::new(usvg::fontdb::Database::new()),
        );
        let err = compositor.render(&PosterModel::default()).await.unwrap_err();
        assert!(matches!(err, Error::Render(ref m) if m.contains("not ready")));
    }

    #[tokio::test]
    async fn corrupt_photo_is_a_render_error() {
        let mut poster = PosterModel::default();
        poster.replace_photo(ProfilePhoto::new(EncodedImage::new(
            vec![0, 1, 2, 3],
            RasterFormat::Jpeg,
            10,
            10,
        )));
        let err = compositor(TemplateAsset::solid())
            .render(&poster)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }

    const SPECIALTY_GREEN: Rgb = Rgb(0x00, 0xff, 0x00);

    /// Compositor using the host's fonts, with the specialty drawn in green so
    /// both lines can be told apart where their line boxes overlap. `None`
    /// when the host has no fonts at all.
    fn compositor_with_host_fonts() -> Option<Compositor> {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        let first_family = fontdb.faces().next()?.families.first()?.0.clone();
        let knows_fallback = fontdb.faces().any(|face| {
            face.families.iter().any(|(name, _)| {
                FALLBACK_FAMILIES
                    .split(", ")
                    .any(|family| family == name.as_str())
            })
        });
        let config = Config {
            font_family: (!knows_fallback).then_some(first_family),
            ..Config::default()
        };
        let mut layout = TemplateLayout::default();
        layout.specialty.color = SPECIALTY_GREEN;
        Some(Compositor::with_fonts(
            &config,
            layout,
            TemplateAsset::solid(),
            Arc::new(fontdb),
        ))
    }

    /// Pixels of `slot`'s line box at the default 2x export scale.
    fn line_box(image: &RgbaImage, slot: &TextSlot) -> Vec<image_rs::Rgba<u8>> {
        let (x0, y0) = ((slot.x * 2.0).ceil() as u32, (slot.y * 2.0).ceil() as u32);
        let (x1, y1) = (
            ((slot.x + slot.width) * 2.0) as u32,
            ((slot.y + slot.line_height) * 2.0) as u32,
        );
        (y0..y1)
            .flat_map(|y| (x0..x1).map(move |x| (x, y)))
            .map(|(x, y)| *image.get_pixel(x, y))
            .collect()
    }

    fn count_white(pixels: &[image_rs::Rgba<u8>]) -> usize {
        pixels
            .iter()
            .filter(|p| p.0[..3].iter().all(|c| *c >= 200))
            .count()
    }

    fn count_green(pixels: &[image_rs::Rgba<u8>]) -> usize {
        pixels
            .iter()
            .filter(|p| p.0[1] >= 200 && p.0[0] <= 60 && p.0[2] <= 60)
            .count()
    }

    #[tokio::test]
    async fn name_and_specialty_reach_the_raster() {
        let Some(compositor) = compositor_with_host_fonts() else {
            eprintln!("no system fonts installed, skipping text rendering check");
            return;
        };
        let layout = TemplateLayout::default();

        let filled = compositor
            .render(&PosterModel::new("Dr. Ada Rao", "Cardiology"))
            .await
            .expect("render filled poster");
        let placeholder = compositor
            .render(&PosterModel::default())
            .await
            .expect("render placeholder poster");

        for (label, image) in [("filled", &filled), ("placeholder", &placeholder)] {
            let name = line_box(image, &layout.name);
            let specialty = line_box(image, &layout.specialty);
            assert!(count_white(&name) > 20, "{label}: name line is blank");
            assert!(count_green(&specialty) > 20, "{label}: specialty line is blank");
        }

        // The typed name replaces the placeholder text.
        assert_ne!(
            line_box(&filled, &layout.name),
            line_box(&placeholder, &layout.name)
        );
        assert_ne!(
            line_box(&filled, &layout.specialty),
            line_box(&placeholder, &layout.specialty)
        );
    }

    #[tokio::test]
    async fn text_is_dropped_without_fonts() {
        let layout = TemplateLayout::default();
        let image = compositor(TemplateAsset::solid())
            .render(&PosterModel::new("Dr. Ada Rao", "Cardiology"))
            .await
            .expect("render without fonts");
        assert_eq!(count_white(&line_box(&image, &layout.name)), 0);
    }

    #[test]
    fn overlay_escapes_user_text() {
        let layout = TemplateLayout::default();
        let svg = text_overlay_svg(
            &layout,
            "sans-serif",
            [(&layout.name, "<Dr & Co>"), (&layout.specialty, "\"ENT\"")],
        );
        assert!(svg.contains("&lt;Dr &amp; Co&gt;"));
        assert!(!svg.contains("<Dr"));
        assert!(usvg::Tree::from_str(&svg, &usvg::Options::default()).is_ok());
    }
}
