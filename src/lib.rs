//! jamkit - cached asset helpers for small 2D games.
//!
//! Loads PNG images and TrueType fonts, renders text into images, centers
//! images on rectangles and stretches nine-patch panels. Every loader is
//! memoized: calling it again with the same arguments hands back the same
//! [`Image`] instead of doing the work twice.
//!
//! # Example
//! ```no_run
//! use jamkit::{AssetConfig, Assets, Rect, Size, draw_centered};
//! use image::{Rgba, RgbaImage};
//!
//! fn main() -> jamkit::Result<()> {
//!     let mut assets = Assets::new(AssetConfig::default().with_asset_root("assets"));
//!
//!     let frame = assets.image("panel")?;
//!     let panel = assets.ninepatch(&frame, Size::new(240, 80))?;
//!     let label = assets.text("Play", Rgba([255, 255, 255, 255]), 32, None::<&str>)?;
//!
//!     let mut screen = RgbaImage::new(800, 600);
//!     let slot = Rect::new(280, 260, 240, 80);
//!     draw_centered(&mut screen, &panel, slot);
//!     draw_centered(&mut screen, &label, slot);
//!     Ok(())
//! }
//! ```
//!
//! The free functions ([`load_image`], [`load_font`], [`text`], [`ninepatch`])
//! work against a process-wide context installed with [`init`]:
//!
//! ```no_run
//! jamkit::init(jamkit::AssetConfig::from_env()).unwrap();
//! let button = jamkit::load_image("button", 2.0, true, None).unwrap();
//! jamkit::shutdown();
//! ```

mod assets;
mod blit;
mod cache;
mod config;
mod error;
mod font;
mod image;
mod ninepatch;
mod platform;
mod rect;
mod text;

use std::path::Path;

use ::image::Rgba;

pub use crate::assets::{Assets, CacheStats};
pub use crate::blit::{blit, copy_into, draw_centered};
pub use crate::config::{
    ASSET_ROOT_ENV, AssetConfig, DEFAULT_FONT, FONT_ROOT_ENV, NINEPATCH_CACHE_CAPACITY,
    TEXT_CACHE_CAPACITY,
};
pub use crate::error::{Error, Result};
pub use crate::font::{Font, FontSource, load_font_from_bytes, load_font_from_file};
pub use crate::image::{Image, ScaleFilter};
pub use crate::ninepatch::{NinePatch, composite};
pub use crate::platform::{init, is_initialized, shutdown, with_assets};
pub use crate::rect::{Rect, Size};
pub use crate::text::render as render_text;

/// Loads `<base>/<name>.png` through the global context.
///
/// See [`Assets::load_image`].
pub fn load_image(name: &str, scale: f32, has_alpha: bool, base: Option<&Path>) -> Result<Image> {
    with_assets(|a| a.load_image(name, scale, has_alpha, base))
}

/// Loads a font through the global context. See [`Assets::load_font`].
pub fn load_font(size: u32, source: impl Into<FontSource>) -> Result<Font> {
    with_assets(|a| a.load_font(size, source))
}

/// Renders text through the global context. See [`Assets::text`].
pub fn text(txt: &str, color: Rgba<u8>, size: u32, font: impl Into<FontSource>) -> Result<Image> {
    with_assets(|a| a.text(txt, color, size, font))
}

/// Builds a nine-patch panel through the global context. See [`Assets::ninepatch`].
pub fn ninepatch(source: &Image, target: Size) -> Result<Image> {
    with_assets(|a| a.ninepatch(source, target))
}
