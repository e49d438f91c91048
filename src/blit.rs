//! Pixel compositing onto CPU-side surfaces.

use ::image::RgbaImage;
use ::image::imageops;

use crate::image::Image;
use crate::rect::Rect;

/// Copies `src` into `dest` at `(x, y)`, replacing destination pixels (alpha included).
///
/// Pixels falling outside `dest` are clipped.
pub fn copy_into(dest: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    imageops::replace(dest, src, x, y);
}

/// Alpha-blends `image` over `dest` with its top-left at `(x, y)`.
///
/// Returns the destination rectangle that was targeted, before clipping.
pub fn blit(dest: &mut RgbaImage, image: &Image, x: i32, y: i32) -> Rect {
    imageops::overlay(dest, image.pixels(), x as i64, y as i64);
    Rect::new(x, y, image.width(), image.height())
}

/// Draws `image` so that its center lines up with the center of `target`.
///
/// No scaling is applied; parts that land outside `dest` are clipped.
pub fn draw_centered(dest: &mut RgbaImage, image: &Image, target: Rect) -> Rect {
    let placed = Rect::with_center(target.center(), image.size());
    blit(dest, image, placed.x, placed.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::Size;
    use ::image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn solid(size: Size, color: Rgba<u8>) -> Image {
        Image::from_rgba(RgbaImage::from_pixel(size.w, size.h, color), true)
    }

    #[test]
    fn centered_blit_lands_on_center() {
        let mut screen = RgbaImage::new(100, 100);
        let sprite = solid(Size::new(10, 10), RED);
        let placed = draw_centered(&mut screen, &sprite, Rect::new(0, 0, 100, 100));
        assert_eq!(placed, Rect::new(45, 45, 10, 10));
        assert_eq!(*screen.get_pixel(45, 45), RED);
        assert_eq!(*screen.get_pixel(54, 54), RED);
        assert_eq!(*screen.get_pixel(44, 45), CLEAR);
        assert_eq!(*screen.get_pixel(55, 54), CLEAR);
    }

    #[test]
    fn centered_blit_on_offset_target() {
        let mut screen = RgbaImage::new(100, 100);
        let sprite = solid(Size::new(10, 10), RED);
        let target = Rect::new(40, 30, 20, 40);
        assert_eq!(target.center(), (50, 50));
        let placed = draw_centered(&mut screen, &sprite, target);
        assert_eq!((placed.x, placed.y), (45, 45));
    }

    #[test]
    fn blit_clips_at_edges() {
        let mut screen = RgbaImage::new(8, 8);
        let sprite = solid(Size::new(4, 4), RED);
        blit(&mut screen, &sprite, -2, 6);
        assert_eq!(*screen.get_pixel(0, 7), RED);
        assert_eq!(*screen.get_pixel(1, 6), RED);
        assert_eq!(*screen.get_pixel(2, 6), CLEAR);
    }

    #[test]
    fn transparent_pixels_leave_destination() {
        let mut screen = RgbaImage::from_pixel(4, 4, RED);
        let hole = solid(Size::new(2, 2), CLEAR);
        blit(&mut screen, &hole, 1, 1);
        assert_eq!(*screen.get_pixel(1, 1), RED);
    }

    #[test]
    fn copy_into_replaces_alpha() {
        let mut screen = RgbaImage::from_pixel(4, 4, RED);
        copy_into(&mut screen, &RgbaImage::new(2, 2), 0, 0);
        assert_eq!(*screen.get_pixel(0, 0), CLEAR);
        assert_eq!(*screen.get_pixel(2, 2), RED);
    }
}
