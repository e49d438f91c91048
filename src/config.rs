use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::image::ScaleFilter;

pub const ASSET_ROOT_ENV: &str = "JAMKIT_ASSET_ROOT";
pub const FONT_ROOT_ENV: &str = "JAMKIT_FONT_ROOT";

pub const DEFAULT_FONT: &str = "regular";
pub const TEXT_CACHE_CAPACITY: usize = 5000;
pub const NINEPATCH_CACHE_CAPACITY: usize = 100;

/// Where assets live and how much the bounded caches may hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    /// Directory searched for `<name>.png` when no base is given.
    pub asset_root: PathBuf,
    /// Directory searched for `<name>.ttf`.
    pub font_root: PathBuf,
    /// Font name used when text is rendered without one.
    pub default_font: String,
    pub text_cache_capacity: NonZeroUsize,
    pub ninepatch_cache_capacity: NonZeroUsize,
    /// Filter used for every scaled nine-patch piece.
    pub ninepatch_filter: ScaleFilter,
}

impl Default for AssetConfig {
    fn default() -> Self {
        let asset_root = PathBuf::from("assets");
        Self {
            font_root: asset_root.join("fonts"),
            asset_root,
            default_font: DEFAULT_FONT.to_string(),
            text_cache_capacity: capacity(TEXT_CACHE_CAPACITY),
            ninepatch_cache_capacity: capacity(NINEPATCH_CACHE_CAPACITY),
            ninepatch_filter: ScaleFilter::Nearest,
        }
    }
}

fn capacity(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN)
}

impl AssetConfig {
    /// Defaults, with the roots overridden by `JAMKIT_ASSET_ROOT` and
    /// `JAMKIT_FONT_ROOT` when they are set.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(root) = var(ASSET_ROOT_ENV).filter(|v| !v.is_empty()) {
            config = config.with_asset_root(root);
        }
        if let Some(root) = var(FONT_ROOT_ENV).filter(|v| !v.is_empty()) {
            config.font_root = PathBuf::from(root);
        }
        config
    }

    /// Sets the asset root; the font root follows as `<root>/fonts`.
    pub fn with_asset_root(mut self, root: impl AsRef<Path>) -> Self {
        self.asset_root = root.as_ref().to_path_buf();
        self.font_root = self.asset_root.join("fonts");
        self
    }

    pub fn with_font_root(mut self, root: impl AsRef<Path>) -> Self {
        self.font_root = root.as_ref().to_path_buf();
        self
    }

    pub fn with_default_font(mut self, name: impl Into<String>) -> Self {
        self.default_font = name.into();
        self
    }

    /// Zero is treated as one.
    pub fn with_text_cache_capacity(mut self, n: usize) -> Self {
        self.text_cache_capacity = capacity(n);
        self
    }

    /// Zero is treated as one.
    pub fn with_ninepatch_cache_capacity(mut self, n: usize) -> Self {
        self.ninepatch_cache_capacity = capacity(n);
        self
    }

    pub fn with_ninepatch_filter(mut self, filter: ScaleFilter) -> Self {
        self.ninepatch_filter = filter;
        self
    }

    pub(crate) fn image_path(&self, base: Option<&Path>, name: &str) -> PathBuf {
        base.unwrap_or(&self.asset_root).join(format!("{name}.png"))
    }

    pub(crate) fn font_path(&self, name: &str) -> PathBuf {
        self.font_root.join(format!("{name}.ttf"))
    }
}
