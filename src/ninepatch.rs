//! Nine-patch panels: a source image cut into a 3x3 grid where the corners keep
//! their size, the edges stretch along one axis and the center stretches along
//! both.

use ::image::RgbaImage;

use crate::blit::copy_into;
use crate::error::{Error, Result};
use crate::image::{Image, ScaleFilter, resize};
use crate::rect::{Rect, Size};

/// The nine regions of a source image, row-major from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NinePatch {
    /// Size of every region, `source / 3` rounded down.
    pub cell: Size,
    pub regions: [Rect; 9],
}

impl NinePatch {
    /// Slices `source` into its nine regions.
    ///
    /// Rows and columns past `3 * cell` (the remainder of the division) are not
    /// covered by any region.
    ///
    /// # Errors
    /// Returns an error if the source is smaller than 3x3.
    pub fn regions(source: Size) -> Result<Self> {
        if source.w < 3 || source.h < 3 {
            return Err(Error::invalid(format!(
                "nine-patch source must be at least 3x3, got {}x{}",
                source.w, source.h
            )));
        }
        let cell = Size::new(source.w / 3, source.h / 3);
        let regions = std::array::from_fn(|i| {
            let col = (i % 3) as u32;
            let row = (i / 3) as u32;
            Rect::new((col * cell.w) as i32, (row * cell.h) as i32, cell.w, cell.h)
        });
        Ok(Self { cell, regions })
    }

    /// Where each region lands in an output of `target` size, and the size it
    /// is scaled to. Same order as [`NinePatch::regions`].
    ///
    /// # Errors
    /// Returns an error if `target` is smaller than two cells along either axis.
    pub fn placements(&self, target: Size) -> Result<[Rect; 9]> {
        let (cw, ch) = (self.cell.w, self.cell.h);
        if target.w < 2 * cw || target.h < 2 * ch {
            return Err(Error::invalid(format!(
                "nine-patch target {}x{} is smaller than its corners ({}x{} each)",
                target.w, target.h, cw, ch
            )));
        }
        let mid_w = target.w - 2 * cw;
        let mid_h = target.h - 2 * ch;
        let xs = [0, cw, target.w - cw];
        let ys = [0, ch, target.h - ch];
        let ws = [cw, mid_w, cw];
        let hs = [ch, mid_h, ch];
        Ok(std::array::from_fn(|i| {
            let (col, row) = (i % 3, i / 3);
            Rect::new(xs[col] as i32, ys[row] as i32, ws[col], hs[row])
        }))
    }
}

/// Builds a `target`-sized image from the nine-patch `source`.
///
/// Corners are copied pixel for pixel; the edge and center pieces are all
/// resampled with `filter`. The source is left untouched.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] if the source is smaller than 3x3 or if
/// `target` is smaller than twice the corner size along either axis.
pub fn composite(source: &Image, target: Size, filter: ScaleFilter) -> Result<Image> {
    let patch = NinePatch::regions(source.size())?;
    let placements = patch.placements(target)?;

    let mut out = RgbaImage::new(target.w, target.h);
    for (region, place) in patch.regions.iter().zip(placements.iter()) {
        if place.size().is_empty() {
            continue;
        }
        let piece = ::image::imageops::crop_imm(
            source.pixels(),
            region.x as u32,
            region.y as u32,
            region.w,
            region.h,
        )
        .to_image();
        let piece = if place.size() == region.size() {
            piece
        } else {
            resize(&piece, place.size(), filter)
        };
        copy_into(&mut out, &piece, place.x as i64, place.y as i64);
    }

    log::trace!(
        "composited nine-patch {}x{} -> {}x{}",
        source.width(),
        source.height(),
        target.w,
        target.h
    );
    Ok(Image::from_rgba(out, true))
}
