//! The asset context: configuration plus one memo cache per operation.

use std::path::{Path, PathBuf};

use ab_glyph::FontArc;
use ::image::{ImageFormat, Rgba};

use crate::cache::MemoCache;
use crate::config::AssetConfig;
use crate::error::{Error, Result};
use crate::font::{Font, FontSource, load_font_from_file};
use crate::image::{Image, ScaleFilter};
use crate::ninepatch;
use crate::rect::Size;
use crate::text;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ImageKey {
    path: PathBuf,
    scale_bits: u32,
    has_alpha: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TextKey {
    text: String,
    color: [u8; 4],
    size: u32,
    font: FontSource,
}

/// Number of entries currently held by each cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub images: usize,
    pub fonts: usize,
    pub texts: usize,
    pub ninepatches: usize,
}

/// Loads and memoizes images, fonts, rendered text and nine-patch panels.
///
/// Every cached operation hands back the very same [`Image`] (same id, same
/// pixel buffer) when called again with equal arguments.
pub struct Assets {
    config: AssetConfig,
    /// Keyed by resolved path, scale and alpha flag. Unbounded.
    images: MemoCache<ImageKey, Image>,
    /// Parsed font files, shared between sizes. Unbounded.
    font_files: MemoCache<PathBuf, FontArc>,
    /// Keyed by pixel size and resolved source. Unbounded.
    fonts: MemoCache<(u32, FontSource), Font>,
    /// Keyed by text, colour, size and resolved font. LRU, `text_cache_capacity`.
    texts: MemoCache<TextKey, Image>,
    /// Keyed by source image id and target size. LRU, `ninepatch_cache_capacity`.
    ninepatches: MemoCache<(u64, Size), Image>,
}

impl std::fmt::Debug for Assets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assets")
            .field("config", &self.config)
            .field("stats", &self.cache_stats())
            .finish()
    }
}

impl Default for Assets {
    fn default() -> Self {
        Self::new(AssetConfig::default())
    }
}

impl Assets {
    pub fn new(config: AssetConfig) -> Self {
        Self {
            images: MemoCache::unbounded(),
            font_files: MemoCache::unbounded(),
            fonts: MemoCache::unbounded(),
            texts: MemoCache::bounded(config.text_cache_capacity),
            ninepatches: MemoCache::bounded(config.ninepatch_cache_capacity),
            config,
        }
    }

    pub fn config(&self) -> &AssetConfig {
        &self.config
    }

    /// Loads `<base>/<name>.png`, with `base` defaulting to the asset root.
    ///
    /// A `scale` other than 1 resizes both dimensions by that factor, rounding
    /// down. With `has_alpha` false the image is made fully opaque.
    ///
    /// # Errors
    /// [`Error::NotFound`] when the file is missing, [`Error::Decode`] when it
    /// is not a PNG, and [`Error::InvalidArgument`] for a scale that is not a
    /// positive number or that shrinks the image to nothing.
    pub fn load_image(
        &mut self,
        name: &str,
        scale: f32,
        has_alpha: bool,
        base: Option<&Path>,
    ) -> Result<Image> {
        if !scale.is_finite() || scale <= 0.0 {
            log::warn!("rejected image scale {scale} for {name}");
            return Err(Error::invalid(format!("image scale must be positive, got {scale}")));
        }
        let key = ImageKey {
            path: self.config.image_path(base, name),
            scale_bits: scale.to_bits(),
            has_alpha,
        };
        let path = key.path.clone();
        self.images
            .get_or_try_insert_with(key, || read_image(&path, scale, has_alpha))
    }

    /// [`Assets::load_image`] at scale 1 with alpha, from the asset root.
    pub fn image(&mut self, name: &str) -> Result<Image> {
        self.load_image(name, 1.0, true, None)
    }

    /// Loads a font at pixel `size`.
    ///
    /// # Errors
    /// [`Error::NotFound`] when the font file is missing, [`Error::Font`] when
    /// it cannot be parsed.
    pub fn load_font(&mut self, size: u32, source: impl Into<FontSource>) -> Result<Font> {
        let source = self.resolve_source(source.into());
        let path = match &source {
            FontSource::Path(path) => path.clone(),
            FontSource::Named(name) => self.config.font_path(name),
            FontSource::Default => self.config.font_path(&self.config.default_font),
        };
        let font_files = &mut self.font_files;
        self.fonts.get_or_try_insert_with((size, source), || {
            let font = font_files.get_or_try_insert_with(path.clone(), || {
                log::debug!("loading font {}", path.display());
                load_font_from_file(&path)
            })?;
            Ok(Font::new(font, size, path))
        })
    }

    /// Renders `txt` with the given colour, pixel size and font.
    ///
    /// # Errors
    /// Fails when the font cannot be loaded.
    pub fn text(
        &mut self,
        txt: &str,
        color: Rgba<u8>,
        size: u32,
        font: impl Into<FontSource>,
    ) -> Result<Image> {
        let font = self.resolve_source(font.into());
        let key = TextKey {
            text: txt.to_string(),
            color: color.0,
            size,
            font: font.clone(),
        };
        if let Some(image) = self.texts.get(&key) {
            log::trace!("text cache hit for {txt:?}");
            return Ok(image.clone());
        }
        let loaded = self.load_font(size, font)?;
        let image = text::render(&loaded, txt, color);
        if self.texts.insert(key, image.clone()).is_some() {
            log::debug!("text cache full, evicted least recently used entry");
        }
        Ok(image)
    }

    /// Composites `source` as a nine-patch panel of `target` size.
    ///
    /// # Errors
    /// See [`ninepatch::composite`].
    pub fn ninepatch(&mut self, source: &Image, target: Size) -> Result<Image> {
        let filter: ScaleFilter = self.config.ninepatch_filter;
        self.ninepatches
            .get_or_try_insert_with((source.id(), target), || {
                ninepatch::composite(source, target, filter)
            })
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            images: self.images.len(),
            fonts: self.fonts.len(),
            texts: self.texts.len(),
            ninepatches: self.ninepatches.len(),
        }
    }

    /// Drops every cached entry. Handles already given out stay valid.
    pub fn clear_caches(&mut self) {
        self.images.clear();
        self.font_files.clear();
        self.fonts.clear();
        self.texts.clear();
        self.ninepatches.clear();
    }

    /// Whether a [`Assets::text`] call with these arguments would be a cache hit.
    ///
    /// Does not count as a use for LRU purposes.
    pub fn is_text_cached(
        &self,
        txt: &str,
        color: Rgba<u8>,
        size: u32,
        font: impl Into<FontSource>,
    ) -> bool {
        let key = TextKey {
            text: txt.to_string(),
            color: color.0,
            size,
            font: self.resolve_source(font.into()),
        };
        self.texts.contains(&key)
    }

    pub fn text_cache_capacity(&self) -> Option<usize> {
        self.texts.capacity()
    }

    /// `Default` and the default font's name share one cache entry.
    fn resolve_source(&self, source: FontSource) -> FontSource {
        match source {
            FontSource::Default => FontSource::Named(self.config.default_font.clone()),
            other => other,
        }
    }
}

fn read_image(path: &Path, scale: f32, has_alpha: bool) -> Result<Image> {
    let bytes = std::fs::read(path).map_err(|e| Error::from_io(path, e))?;
    let mut pixels = ::image::load_from_memory_with_format(&bytes, ImageFormat::Png)?.to_rgba8();

    if scale != 1.0 {
        let size = Size::new(
            (pixels.width() as f32 * scale) as u32,
            (pixels.height() as f32 * scale) as u32,
        );
        if size.is_empty() {
            return Err(Error::invalid(format!(
                "scale {scale} shrinks {} to nothing",
                path.display()
            )));
        }
        pixels = crate::image::resize(&pixels, size, ScaleFilter::Nearest);
    }

    log::debug!(
        "loaded image {} ({}x{}, alpha: {})",
        path.display(),
        pixels.width(),
        pixels.height(),
        has_alpha
    );
    Ok(Image::from_rgba(pixels, has_alpha))
}
