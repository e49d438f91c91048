use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use ::image::imageops::{self, FilterType};
use ::image::{Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::rect::{Rect, Size};

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

fn next_image_id() -> u64 {
    NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Resampling filter used whenever an image is resized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScaleFilter {
    /// Pixel replication, no blending between source pixels.
    #[default]
    Nearest,
    Bilinear,
}

impl ScaleFilter {
    fn filter_type(self) -> FilterType {
        match self {
            ScaleFilter::Nearest => FilterType::Nearest,
            ScaleFilter::Bilinear => FilterType::Triangle,
        }
    }
}

/// Handle to an immutable RGBA pixel buffer.
///
/// Handles are cheap to clone and share the same pixels. Every image gets a
/// process-unique id when it is created, and equality and hashing use that id
/// rather than the pixel contents: two separately loaded copies of the same
/// file are different images. Cached images are shared, so copy them with
/// [`Image::to_rgba8`] or [`Image::copy`] before editing pixels.
#[derive(Debug, Clone)]
pub struct Image {
    pub(crate) id: u64,
    pub(crate) pixels: Arc<RgbaImage>,
    pub(crate) has_alpha: bool,
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Image {}

impl std::hash::Hash for Image {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Image {
    /// Wraps an owned buffer in a new image handle.
    ///
    /// When `has_alpha` is false every pixel is made fully opaque.
    pub fn from_rgba(mut pixels: RgbaImage, has_alpha: bool) -> Self {
        if !has_alpha {
            for p in pixels.pixels_mut() {
                p.0[3] = u8::MAX;
            }
        }
        Self {
            id: next_image_id(),
            pixels: Arc::new(pixels),
            has_alpha,
        }
    }

    /// Creates a new image from raw RGBA8 pixel data.
    ///
    /// # Errors
    /// Returns an error if the data length doesn't match width * height * 4.
    pub fn new_from_rgba8(width: u32, height: u32, rgba: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(Error::invalid(format!(
                "rgba data is {} bytes, expected {} for {}x{}",
                rgba.len(),
                expected,
                width,
                height
            )));
        }
        let pixels = RgbaImage::from_raw(width, height, rgba.to_vec())
            .ok_or_else(|| Error::invalid("rgba buffer does not match dimensions"))?;
        Ok(Self::from_rgba(pixels, true))
    }

    /// A fully transparent image of the given size.
    pub fn transparent(size: Size) -> Self {
        Self::from_rgba(RgbaImage::new(size.w, size.h), true)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size())
    }

    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.pixels.get_pixel(x, y)
    }

    /// True when both handles point at the same pixel buffer.
    pub fn ptr_eq(&self, other: &Image) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    /// An owned copy of the pixels, safe to mutate.
    pub fn to_rgba8(&self) -> RgbaImage {
        (*self.pixels).clone()
    }

    /// A new image with copied pixels and a fresh identity.
    pub fn copy(&self) -> Image {
        Self {
            id: next_image_id(),
            pixels: Arc::new(self.to_rgba8()),
            has_alpha: self.has_alpha,
        }
    }

    /// Copies the pixels inside `bounds` into a new image.
    ///
    /// # Errors
    /// Returns an error if the bounds are empty or out of range.
    pub fn sub_image(&self, bounds: Rect) -> Result<Image> {
        if bounds.x < 0
            || bounds.y < 0
            || bounds.size().is_empty()
            || bounds.right() as i64 > self.width() as i64
            || bounds.bottom() as i64 > self.height() as i64
        {
            return Err(Error::invalid(format!(
                "sub image {:?} outside {}x{} image",
                bounds,
                self.width(),
                self.height()
            )));
        }
        let view = imageops::crop_imm(
            &*self.pixels,
            bounds.x as u32,
            bounds.y as u32,
            bounds.w,
            bounds.h,
        );
        Ok(Self::from_rgba(view.to_image(), self.has_alpha))
    }

    /// Resamples the image to exactly `size`.
    ///
    /// # Errors
    /// Returns an error if `size` has a zero dimension.
    pub fn scaled(&self, size: Size, filter: ScaleFilter) -> Result<Image> {
        if size.is_empty() {
            return Err(Error::invalid(format!(
                "cannot scale to empty size {}x{}",
                size.w, size.h
            )));
        }
        let pixels = resize(&self.pixels, size, filter);
        Ok(Self::from_rgba(pixels, self.has_alpha))
    }
}

pub(crate) fn resize(pixels: &RgbaImage, size: Size, filter: ScaleFilter) -> RgbaImage {
    imageops::resize(pixels, size.w, size.h, filter.filter_type())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(w: u32, h: u32) -> Image {
        let pixels = RgbaImage::from_fn(w, h, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 0, 0, 128])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        Image::from_rgba(pixels, true)
    }

    #[test]
    fn identity_is_per_handle_not_per_pixels() {
        let a = checker(4, 4);
        let b = a.clone();
        let c = a.copy();
        assert_eq!(a, b);
        assert!(a.ptr_eq(&b));
        assert_ne!(a, c);
        assert!(!a.ptr_eq(&c));
        assert_eq!(a.pixels(), c.pixels());
    }

    #[test]
    fn derived_images_get_fresh_wide_ids() {
        let a = checker(3, 3);
        let first: u64 = a.id();
        let derived = [
            a.copy(),
            a.sub_image(Rect::new(0, 0, 2, 2)).unwrap(),
            a.scaled(Size::new(6, 6), ScaleFilter::Nearest).unwrap(),
        ];
        let mut last = first;
        for img in &derived {
            assert!(img.id() > last);
            last = img.id();
        }
    }

    #[test]
    fn opaque_images_drop_alpha() {
        let img = Image::from_rgba(checker(2, 2).to_rgba8(), false);
        assert!(!img.has_alpha());
        assert!(img.pixels().pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn new_from_rgba8_checks_length() {
        assert!(Image::new_from_rgba8(2, 2, &[0u8; 16]).is_ok());
        let err = Image::new_from_rgba8(2, 2, &[0u8; 15]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn sub_image_copies_region() {
        let img = checker(4, 4);
        let sub = img.sub_image(Rect::new(1, 0, 2, 3)).unwrap();
        assert_eq!(sub.size(), Size::new(2, 3));
        assert_eq!(sub.get_pixel(0, 0), img.get_pixel(1, 0));
        assert_eq!(sub.get_pixel(1, 2), img.get_pixel(2, 2));
    }

    #[test]
    fn sub_image_rejects_out_of_range() {
        let img = checker(4, 4);
        assert!(img.sub_image(Rect::new(3, 0, 2, 2)).is_err());
        assert!(img.sub_image(Rect::new(-1, 0, 2, 2)).is_err());
        assert!(img.sub_image(Rect::new(0, 0, 0, 2)).is_err());
    }

    #[test]
    fn scaled_hits_exact_size() {
        let img = checker(3, 3);
        let big = img.scaled(Size::new(7, 5), ScaleFilter::Nearest).unwrap();
        assert_eq!(big.size(), Size::new(7, 5));
        assert!(img.scaled(Size::new(0, 5), ScaleFilter::Nearest).is_err());
    }
}
