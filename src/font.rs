use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use ab_glyph::{
    Font as _, FontArc, Glyph, GlyphId, OutlinedGlyph, PxScale, PxScaleFont, ScaleFont as _,
};

use crate::error::{Error, Result};
use crate::rect::Size;

static NEXT_FONT_ID: AtomicU64 = AtomicU64::new(1);

/// Where a font comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FontSource {
    /// The configured default font.
    #[default]
    Default,
    /// `<font_root>/<name>.ttf`.
    Named(String),
    /// A font file anywhere on disk.
    Path(PathBuf),
}

impl From<&str> for FontSource {
    fn from(name: &str) -> Self {
        FontSource::Named(name.to_string())
    }
}

impl From<String> for FontSource {
    fn from(name: String) -> Self {
        FontSource::Named(name)
    }
}

impl From<Option<&str>> for FontSource {
    fn from(name: Option<&str>) -> Self {
        name.map_or(FontSource::Default, FontSource::from)
    }
}

impl From<&Path> for FontSource {
    fn from(path: &Path) -> Self {
        FontSource::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for FontSource {
    fn from(path: PathBuf) -> Self {
        FontSource::Path(path)
    }
}

pub fn load_font_from_file(path: &Path) -> Result<FontArc> {
    let bytes = std::fs::read(path).map_err(|e| Error::from_io(path, e))?;
    load_font_from_bytes(path, bytes)
}

pub fn load_font_from_bytes(path: &Path, bytes: Vec<u8>) -> Result<FontArc> {
    FontArc::try_from_vec(bytes).map_err(|e| Error::Font {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// A parsed font at a fixed pixel size.
#[derive(Debug, Clone)]
pub struct Font {
    id: u64,
    font: FontArc,
    size: u32,
    path: PathBuf,
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Font {}

impl Font {
    pub fn new(font: FontArc, size: u32, path: PathBuf) -> Self {
        Self {
            id: NEXT_FONT_ID.fetch_add(1, Ordering::Relaxed),
            font,
            size: size.max(1),
            path,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Pixel size the font was loaded at.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn px_scale(&self) -> PxScale {
        PxScale::from(self.size as f32)
    }

    pub(crate) fn scaled(&self) -> PxScaleFont<&FontArc> {
        self.font.as_scaled(self.px_scale())
    }

    pub fn ascent(&self) -> f32 {
        self.scaled().ascent()
    }

    /// Distance from the baseline to the lowest descender; negative.
    pub fn descent(&self) -> f32 {
        self.scaled().descent()
    }

    /// Height of one rendered line in pixels.
    pub fn line_height(&self) -> u32 {
        let scaled = self.scaled();
        ((scaled.ascent() - scaled.descent()).ceil() as u32).max(1)
    }

    /// Distance between the tops of consecutive lines.
    pub fn line_spacing(&self) -> u32 {
        let scaled = self.scaled();
        ((scaled.ascent() - scaled.descent() + scaled.line_gap()).ceil() as u32).max(1)
    }

    /// Advance width of a single line, kerning included.
    pub fn line_width(&self, line: &str) -> f32 {
        let scaled = self.scaled();
        let mut width = 0.0f32;
        let mut prev: Option<GlyphId> = None;
        for ch in line.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(p) = prev {
                width += scaled.kern(p, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }
        width
    }

    /// Outlines every glyph of `text` and works out the image that holds them.
    ///
    /// The image spans the line boxes and the ink of every glyph, whichever
    /// reaches further. Ink hanging left of the first caret or above the first
    /// line moves the origin instead of being cut off.
    pub(crate) fn layout(&self, text: &str) -> Layout {
        let scaled = self.scaled();
        let scale = self.px_scale();
        let spacing = self.line_spacing() as f32;
        let lines: Vec<&str> = text.split('\n').collect();

        let mut glyphs = Vec::new();
        let mut advance = 0.0f32;
        for (line_no, line) in lines.iter().enumerate() {
            let baseline = line_no as f32 * spacing + scaled.ascent();
            let mut caret = 0.0f32;
            let mut prev: Option<GlyphId> = None;
            for ch in line.chars() {
                let id = scaled.glyph_id(ch);
                if let Some(p) = prev {
                    caret += scaled.kern(p, id);
                }
                prev = Some(id);
                let glyph = Glyph {
                    id,
                    scale,
                    position: ab_glyph::point(caret, baseline),
                };
                caret += scaled.h_advance(id);
                if let Some(outlined) = scaled.outline_glyph(glyph) {
                    glyphs.push(outlined);
                }
            }
            advance = advance.max(caret);
        }

        let height =
            self.line_height() + (lines.len() as u32).saturating_sub(1) * self.line_spacing();
        let (mut min_x, mut min_y) = (0i32, 0i32);
        let (mut max_x, mut max_y) = (advance.ceil() as i32, height as i32);
        for glyph in &glyphs {
            // px_bounds is already snapped to whole pixels.
            let bounds = glyph.px_bounds();
            min_x = min_x.min(bounds.min.x as i32);
            min_y = min_y.min(bounds.min.y as i32);
            max_x = max_x.max(bounds.max.x as i32);
            max_y = max_y.max(bounds.max.y as i32);
        }

        Layout {
            glyphs,
            origin: (-min_x, -min_y),
            size: Size::new(((max_x - min_x) as u32).max(1), (max_y - min_y) as u32),
        }
    }

    /// Pixel size of `text` once rendered; lines are split on `\n`.
    ///
    /// Covers both the advance of the longest line and any glyph ink that
    /// overhangs it, so it always equals the size of the rendered image.
    pub fn measure(&self, text: &str) -> Size {
        self.layout(text).size
    }
}

/// Outlined glyphs of a string, positioned as if the image origin were the
/// top-left of the first line box.
pub(crate) struct Layout {
    pub(crate) glyphs: Vec<OutlinedGlyph>,
    /// Whole-pixel shift from layout coordinates to image coordinates.
    pub(crate) origin: (i32, i32),
    pub(crate) size: Size,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn bundled_font_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts/regular.ttf")
    }

    fn bundled(size: u32) -> Font {
        let path = bundled_font_path();
        Font::new(load_font_from_file(&path).unwrap(), size, path)
    }

    #[test]
    fn missing_font_is_not_found() {
        let err = load_font_from_file(Path::new("no/such/font.ttf")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn garbage_is_a_font_error() {
        let err = load_font_from_bytes(Path::new("junk.ttf"), vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::Font { .. }));
    }

    #[test]
    fn metrics_scale_with_size() {
        let small = bundled(12);
        let large = bundled(48);
        assert!(small.ascent() > 0.0);
        assert!(small.descent() < 0.0);
        assert!(large.line_height() > small.line_height());
        assert!(large.line_width("Hello") > small.line_width("Hello"));
    }

    #[test]
    fn measure_counts_lines() {
        let font = bundled(20);
        let one = font.measure("ab");
        let two = font.measure("ab\nab");
        assert_eq!(one.h, font.line_height());
        assert_eq!(two.h, font.line_height() + font.line_spacing());
        assert_eq!(one.w, two.w);
        assert_eq!(font.measure("").w, 1);
    }

    #[test]
    fn measure_covers_overhanging_ink() {
        let font = bundled(48);
        // The hook of `j` starts left of the caret; `f` reaches past its advance.
        for text in ["j", "f"] {
            let advance = font.line_width(text).ceil() as u32;
            assert!(font.measure(text).w > advance, "{text:?}");
        }
        let layout = font.layout("j");
        assert!(layout.origin.0 > 0);
        assert_eq!(layout.origin.1, 0);
    }

    #[test]
    fn font_ids_are_unique() {
        let a = bundled(12);
        let b = bundled(12);
        let id: u64 = a.id();
        assert!(b.id() > id);
        assert_ne!(a, b);
    }

    #[test]
    fn sources_convert() {
        assert_eq!(FontSource::from("bold"), FontSource::Named("bold".into()));
        assert_eq!(FontSource::from(None::<&str>), FontSource::Default);
        assert_eq!(
            FontSource::from(Path::new("x.ttf")),
            FontSource::Path(PathBuf::from("x.ttf"))
        );
    }
}
