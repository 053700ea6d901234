//! Rasterizer: paints a display list onto an opaque, supersampled canvas

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Pixel, Rgba, RgbaImage};
use sha2::{Digest, Sha256};

use crate::config::ExportOptions;
use crate::rendering::layout::{DisplayList, Rect};
use crate::rendering::paint::{
    Color, GlyphSource, ImageFit, PaintCommand, GLYPH_ADVANCE, GLYPH_HEIGHT,
};
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl Screenshot {
    /// Hex-encoded SHA-256 of the PNG bytes.
    pub fn sha256_hex(&self) -> String {
        hex::encode(Sha256::digest(&self.png_data))
    }
}

fn rgba(c: Color) -> Rgba<u8> {
    Rgba([c.r, c.g, c.b, c.a])
}

/// Paint `list` at `options.scale` device pixels per logical pixel.
///
/// The canvas starts filled with `options.background`; if that colour is not
/// opaque, white is used underneath it so the result never carries alpha.
pub fn rasterize(list: &DisplayList, options: &ExportOptions, glyphs: &dyn GlyphSource) -> Result<RgbaImage> {
    if list.extent.is_empty() {
        return Err(Error::TargetNotReady(format!(
            "capture region is {}x{}",
            list.extent.width, list.extent.height
        )));
    }
    let scale = options.scale.max(1);
    let width = list
        .extent
        .width
        .checked_mul(scale)
        .ok_or_else(|| Error::RasterizationFailed("canvas width overflows".into()))?;
    let height = list
        .extent
        .height
        .checked_mul(scale)
        .ok_or_else(|| Error::RasterizationFailed("canvas height overflows".into()))?;
    let pixels = u64::from(width) * u64::from(height);
    if pixels > options.max_canvas_pixels {
        return Err(Error::RasterizationFailed(format!(
            "canvas of {width}x{height} exceeds the {} pixel limit",
            options.max_canvas_pixels
        )));
    }

    let mut canvas = RgbaImage::from_pixel(width, height, rgba(Color::WHITE));
    if options.background != Color::WHITE {
        fill(&mut canvas, Rect::new(0, 0, width, height), options.background);
    }

    for cmd in &list.commands {
        match cmd {
            PaintCommand::SolidRect { rect, color } => fill(&mut canvas, scaled(*rect, scale), *color),
            PaintCommand::StrokeRect { rect, width, color } => {
                stroke(&mut canvas, scaled(*rect, scale), width * scale, *color)
            }
            PaintCommand::Ellipse { rect, color } => ellipse(&mut canvas, scaled(*rect, scale), *color),
            PaintCommand::Text {
                x,
                y,
                text,
                scale: text_scale,
                color,
            } => draw_text(&mut canvas, glyphs, *x, *y, text, text_scale * scale, scale, *color),
            PaintCommand::Image { rect, image, fit } => {
                let decoded = image.decode()?;
                draw_image(&mut canvas, &decoded, scaled(*rect, scale), *fit);
            }
        }
    }
    Ok(canvas)
}

/// Encode as PNG. Alpha is dropped: the canvas is always opaque.
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(canvas.clone()).into_rgb8();
    let mut out = Cursor::new(Vec::new());
    rgb.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Rasterize and encode in one step.
pub fn render_png(list: &DisplayList, options: &ExportOptions, glyphs: &dyn GlyphSource) -> Result<Screenshot> {
    let canvas = rasterize(list, options, glyphs)?;
    let png_data = encode_png(&canvas)?;
    Ok(Screenshot {
        width: canvas.width(),
        height: canvas.height(),
        png_data,
    })
}

fn scaled(rect: Rect, scale: u32) -> Rect {
    Rect {
        x: rect.x * scale as i32,
        y: rect.y * scale as i32,
        width: rect.width * scale,
        height: rect.height * scale,
    }
}

/// Clip `rect` to the canvas, returning (x0, y0, x1, y1) in pixel space.
fn clip(canvas: &RgbaImage, rect: Rect) -> Option<(u32, u32, u32, u32)> {
    let x0 = rect.x.max(0) as i64;
    let y0 = rect.y.max(0) as i64;
    let x1 = (rect.x as i64 + rect.width as i64).min(canvas.width() as i64);
    let y1 = (rect.y as i64 + rect.height as i64).min(canvas.height() as i64);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
}

fn put(canvas: &mut RgbaImage, x: u32, y: u32, color: Color) {
    if color.is_opaque() {
        canvas.put_pixel(x, y, rgba(color));
    } else if color.a > 0 {
        canvas.get_pixel_mut(x, y).blend(&rgba(color));
    }
}

fn fill(canvas: &mut RgbaImage, rect: Rect, color: Color) {
    let Some((x0, y0, x1, y1)) = clip(canvas, rect) else {
        return;
    };
    for y in y0..y1 {
        for x in x0..x1 {
            put(canvas, x, y, color);
        }
    }
}

fn stroke(canvas: &mut RgbaImage, rect: Rect, width: u32, color: Color) {
    let w = width.min(rect.width / 2 + 1).min(rect.height / 2 + 1).max(1);
    fill(canvas, Rect::new(rect.x, rect.y, rect.width, w), color);
    fill(canvas, Rect::new(rect.x, rect.bottom() - w as i32, rect.width, w), color);
    let inner_h = rect.height.saturating_sub(w * 2);
    fill(canvas, Rect::new(rect.x, rect.y + w as i32, w, inner_h), color);
    fill(canvas, Rect::new(rect.right() - w as i32, rect.y + w as i32, w, inner_h), color);
}

fn ellipse(canvas: &mut RgbaImage, rect: Rect, color: Color) {
    let Some((x0, y0, x1, y1)) = clip(canvas, rect) else {
        return;
    };
    let rx = rect.width as f64 / 2.0;
    let ry = rect.height as f64 / 2.0;
    let cx = rect.x as f64 + rx;
    let cy = rect.y as f64 + ry;
    for y in y0..y1 {
        for x in x0..x1 {
            let dx = (x as f64 + 0.5 - cx) / rx;
            let dy = (y as f64 + 0.5 - cy) / ry;
            if dx * dx + dy * dy <= 1.0 {
                put(canvas, x, y, color);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    canvas: &mut RgbaImage,
    glyphs: &dyn GlyphSource,
    x: i32,
    y: i32,
    text: &str,
    px: u32,
    scale: u32,
    color: Color,
) {
    let origin_x = x * scale as i32;
    let origin_y = y * scale as i32;
    for (i, ch) in text.chars().enumerate() {
        let Some(rows) = glyphs.glyph(ch) else {
            continue;
        };
        let cell_x = origin_x + (i as u32 * GLYPH_ADVANCE * px) as i32;
        for (row, bits) in rows.iter().enumerate().take(GLYPH_HEIGHT as usize) {
            for col in 0..GLYPH_ADVANCE {
                if bits & (1 << (GLYPH_ADVANCE - 1 - col)) == 0 {
                    continue;
                }
                let dot = Rect::new(
                    cell_x + (col * px) as i32,
                    origin_y + (row as u32 * px) as i32,
                    px,
                    px,
                );
                fill(canvas, dot, color);
            }
        }
    }
}

fn draw_image(canvas: &mut RgbaImage, img: &DynamicImage, rect: Rect, fit: ImageFit) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    let (fitted, x, y) = match fit {
        ImageFit::Cover => (
            img.resize_to_fill(rect.width, rect.height, FilterType::Triangle),
            rect.x,
            rect.y,
        ),
        ImageFit::Contain => {
            let fitted = img.resize(rect.width, rect.height, FilterType::Triangle);
            let x = rect.x + (rect.width.saturating_sub(fitted.width()) / 2) as i32;
            let y = rect.y + (rect.height.saturating_sub(fitted.height()) / 2) as i32;
            (fitted, x, y)
        }
    };
    imageops::overlay(canvas, &fitted.to_rgba8(), i64::from(x), i64::from(y));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::image::tests::png_bytes;
    use crate::model::{ingest_image, EmbeddedImage};
    use crate::rendering::layout::{Extent, LayoutBuilder};
    use crate::rendering::paint::BlockGlyphs;
    use std::sync::Arc;

    fn opts() -> ExportOptions {
        ExportOptions::default()
    }

    #[test]
    fn supersamples_by_scale() {
        let mut b = LayoutBuilder::new(40);
        b.fill(Rect::new(0, 0, 10, 10), Color::BLACK);
        let canvas = rasterize(&b.finish(20), &opts(), &BlockGlyphs).unwrap();
        assert_eq!(canvas.dimensions(), (80, 40));
        assert_eq!(canvas.get_pixel(19, 19), &Rgba([0, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(20, 20), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn transparent_background_stays_white() {
        let options = ExportOptions {
            background: Color::TRANSPARENT,
            ..opts()
        };
        let list = LayoutBuilder::new(4).finish(4);
        let canvas = rasterize(&list, &options, &BlockGlyphs).unwrap();
        assert!(canvas.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn translucent_paint_blends() {
        let mut b = LayoutBuilder::new(2);
        b.fill(Rect::new(0, 0, 2, 2), Color::rgba(0, 0, 0, 128));
        let canvas = rasterize(&b.finish(2), &opts(), &BlockGlyphs).unwrap();
        let p = canvas.get_pixel(0, 0);
        assert!(p[0] > 100 && p[0] < 160, "{p:?}");
        assert_eq!(p[3], 255);
    }

    #[test]
    fn text_paints_glyph_pixels() {
        let mut b = LayoutBuilder::new(20);
        b.text(0, 0, "A", 1, Color::BLACK);
        let canvas = rasterize(&b.finish(10), &opts(), &BlockGlyphs).unwrap();
        // glyph row 1, column 1 at scale 2
        assert_eq!(canvas.get_pixel(2, 2), &Rgba([0, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn empty_extent_is_not_ready() {
        let list = DisplayList {
            extent: Extent { width: 0, height: 10 },
            commands: Vec::new(),
        };
        assert!(matches!(rasterize(&list, &opts(), &BlockGlyphs), Err(Error::TargetNotReady(_))));
    }

    #[test]
    fn oversized_canvas_fails_rasterization() {
        let list = LayoutBuilder::new(100).finish(100);
        let options = ExportOptions {
            max_canvas_pixels: 1000,
            ..opts()
        };
        assert!(matches!(
            rasterize(&list, &options, &BlockGlyphs),
            Err(Error::RasterizationFailed(_))
        ));
    }

    #[test]
    fn undecodable_embedded_image_fails_rasterization() {
        let broken = EmbeddedImage {
            mime: "image/png".into(),
            bytes: Arc::from(&b"\x89PNG\r\n\x1a\n-truncated"[..]),
            width: 4,
            height: 4,
        };
        let mut b = LayoutBuilder::new(8);
        b.image(Rect::new(0, 0, 4, 4), &broken, ImageFit::Cover);
        assert!(matches!(
            rasterize(&b.finish(8), &opts(), &BlockGlyphs),
            Err(Error::RasterizationFailed(_))
        ));
    }

    #[test]
    fn embedded_image_is_painted() {
        let photo = ingest_image(&png_bytes(2, 2, [255, 0, 0, 255]), &Default::default()).unwrap();
        let mut b = LayoutBuilder::new(8);
        b.image(Rect::new(0, 0, 4, 4), &photo, ImageFit::Cover);
        let canvas = rasterize(&b.finish(8), &opts(), &BlockGlyphs).unwrap();
        let p = canvas.get_pixel(3, 3);
        assert!(p[0] > 250 && p[1] < 5 && p[2] < 5, "{p:?}");
        assert_eq!(canvas.get_pixel(12, 12), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn png_output_is_opaque_and_decodable() {
        let mut b = LayoutBuilder::new(16);
        b.disc(Rect::new(0, 0, 16, 16), Color::BLUE_900);
        let shot = render_png(&b.finish(16), &opts(), &BlockGlyphs).unwrap();
        assert_eq!(&shot.png_data[0..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&shot.png_data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 32));
        assert!(!decoded.color().has_alpha());
        assert_eq!(shot.sha256_hex().len(), 64);
    }
}
