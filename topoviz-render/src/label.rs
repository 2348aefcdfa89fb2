// Node labels drawn from the built-in 8x8 bitmap font, so no system fonts
// are needed at render time

use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};

pub const GLYPH_SIZE: u32 = 8;

/// Integer magnification that brings the 8px glyphs closest to `font_px`
pub fn glyph_scale(font_px: f64) -> u32 {
    ((font_px / GLYPH_SIZE as f64).round() as u32).max(1)
}

/// Width and height in pixels of `text` at the given magnification
pub fn text_size(text: &str, scale: u32) -> (u32, u32) {
    let chars = text.chars().count() as u32;
    let height = GLYPH_SIZE.saturating_mul(scale);
    (chars.saturating_mul(height), height)
}

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Draw `text` centered on `center`. Pixels falling outside the image are
/// dropped.
pub fn draw_text_centered(
    image: &mut RgbImage,
    center: (f64, f64),
    text: &str,
    scale: u32,
    color: Rgb<u8>,
) {
    let (width, height) = text_size(text, scale);
    let left = (center.0 - width as f64 / 2.0).round() as i64;
    let top = (center.1 - height as f64 / 2.0).round() as i64;
    let (image_w, image_h) = (image.width() as i64, image.height() as i64);
    let scale = scale as i64;
    let step = GLYPH_SIZE as i64 * scale;

    for (i, c) in text.chars().enumerate() {
        let origin_x = left + i as i64 * step;
        if origin_x >= image_w {
            break;
        }
        if origin_x + step <= 0 {
            continue;
        }
        for (row, bits) in glyph(c).iter().enumerate() {
            let cell_y = top + row as i64 * scale;
            let (y_start, y_end) = (cell_y.max(0), (cell_y + scale).min(image_h));
            for col in 0..GLYPH_SIZE as i64 {
                // Bit 0 is the leftmost column
                if (*bits >> col) & 1 == 0 {
                    continue;
                }
                let cell_x = origin_x + col * scale;
                let (x_start, x_end) = (cell_x.max(0), (cell_x + scale).min(image_w));
                for y in y_start..y_end {
                    for x in x_start..x_end {
                        image.put_pixel(x as u32, y as u32, color);
                    }
                }
            }
        }
    }
}
