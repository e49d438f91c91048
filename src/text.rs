//! Rasterizes strings into images.

use ::image::{Rgba, RgbaImage};

use crate::font::Font;
use crate::image::Image;

/// Renders `text` with `font` into a new transparent image.
///
/// Glyphs are antialiased: each pixel takes the RGB of `color` and an alpha of
/// the glyph coverage times the alpha of `color`. Every `\n` starts a new line.
/// The image is sized by [`Font::measure`], which grows past the advance width
/// to fit overhanging ink, so no coverage is cut off. Empty text still yields
/// a one pixel wide, one line tall image.
pub fn render(font: &Font, text: &str, color: Rgba<u8>) -> Image {
    let layout = font.layout(text);
    let size = layout.size;
    let (ox, oy) = (layout.origin.0 as i64, layout.origin.1 as i64);

    let (w, h) = (size.w as usize, size.h as usize);
    let mut coverage = vec![0.0f32; w * h];

    for glyph in &layout.glyphs {
        let bounds = glyph.px_bounds();
        let (left, top) = (bounds.min.x as i64 + ox, bounds.min.y as i64 + oy);
        glyph.draw(|x, y, v| {
            let px = left + x as i64;
            let py = top + y as i64;
            if px < 0 || py < 0 || px >= w as i64 || py >= h as i64 {
                return;
            }
            let cell = &mut coverage[py as usize * w + px as usize];
            *cell = (*cell + v).min(1.0);
        });
    }

    let [r, g, b, a] = color.0;
    let pixels = RgbaImage::from_fn(size.w, size.h, |x, y| {
        let v = coverage[y as usize * w + x as usize];
        let alpha = (v * a as f32).round().clamp(0.0, 255.0) as u8;
        Rgba([r, g, b, alpha])
    });
    Image::from_rgba(pixels, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::load_font_from_file;
    use crate::font::tests::bundled_font_path;

    fn font(size: u32) -> Font {
        let path = bundled_font_path();
        Font::new(load_font_from_file(&path).unwrap(), size, path)
    }

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn image_matches_measured_size() {
        let font = font(24);
        let img = render(&font, "Start game", WHITE);
        assert_eq!(img.size(), font.measure("Start game"));
        assert!(img.has_alpha());
    }

    #[test]
    fn glyphs_leave_ink() {
        let img = render(&font(24), "W", WHITE);
        let inked = img.pixels().pixels().filter(|p| p.0[3] > 0).count();
        assert!(inked > 0);
        assert!(img.pixels().pixels().all(|p| p.0[..3] == [255, 255, 255]));
    }

    #[test]
    fn overhanging_ink_stays_inside_the_image() {
        let font = font(48);
        for text in ["j", "f", "T", "fj", "jT\nff"] {
            let layout = font.layout(text);
            let size = layout.size;
            let (ox, oy) = layout.origin;
            let mut total = 0.0f32;
            let mut outside = 0.0f32;
            for glyph in &layout.glyphs {
                let bounds = glyph.px_bounds();
                let (left, top) = (bounds.min.x as i32 + ox, bounds.min.y as i32 + oy);
                glyph.draw(|x, y, v| {
                    let (px, py) = (left + x as i32, top + y as i32);
                    total += v;
                    if px < 0 || py < 0 || px >= size.w as i32 || py >= size.h as i32 {
                        outside += v;
                    }
                });
            }
            assert!(total > 0.0, "{text:?}");
            assert_eq!(outside, 0.0, "{text:?} lost coverage");
            assert_eq!(render(&font, text, WHITE).size(), size);
        }
    }

    #[test]
    fn left_overhang_shifts_the_caret() {
        let font = font(48);
        let img = render(&font, "j", WHITE);
        let inked_column = |x: u32| (0..img.height()).any(|y| img.get_pixel(x, y).0[3] > 0);
        assert!(inked_column(0));
        assert!(img.width() > font.line_width("j").ceil() as u32);
    }

    #[test]
    fn blank_text_is_transparent() {
        let font = font(16);
        for text in ["", "   "] {
            let img = render(&font, text, WHITE);
            assert!(img.width() >= 1);
            assert_eq!(img.height(), font.line_height());
            assert!(img.pixels().pixels().all(|p| p.0[3] == 0));
        }
    }

    #[test]
    fn color_alpha_scales_coverage() {
        let font = font(32);
        let solid = render(&font, "H", WHITE);
        let faded = render(&font, "H", Rgba([255, 255, 255, 100]));
        let max = |img: &Image| img.pixels().pixels().map(|p| p.0[3]).max().unwrap_or(0);
        assert_eq!(max(&solid), 255);
        assert!(max(&faded) <= 100);
    }

    #[test]
    fn rendering_is_deterministic() {
        let font = font(18);
        let a = render(&font, "Quit", Rgba([200, 10, 10, 255]));
        let b = render(&font, "Quit", Rgba([200, 10, 10, 255]));
        assert_ne!(a, b);
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn second_line_is_below_first() {
        let font = font(20);
        let img = render(&font, "_\n_", WHITE);
        let rows_with_ink: Vec<u32> = (0..img.height())
            .filter(|&y| (0..img.width()).any(|x| img.get_pixel(x, y).0[3] > 0))
            .collect();
        let first = *rows_with_ink.first().unwrap();
        let last = *rows_with_ink.last().unwrap();
        assert!(last - first >= font.line_spacing() - 1);
    }
}
