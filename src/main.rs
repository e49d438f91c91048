//! Writes a nine-patch panel and a centered label to PNG files for a quick look.
//!
//! Usage: `jamkit [source.png] [width] [height] [out_dir]`

use std::path::PathBuf;

use anyhow::Context as _;
use image::{Rgba, RgbaImage};
use jamkit::{AssetConfig, Assets, FontSource, Image, Size};

fn demo_source() -> Image {
    let colors = [
        [90, 60, 30],
        [140, 100, 50],
        [90, 60, 30],
        [140, 100, 50],
        [230, 200, 150],
        [140, 100, 50],
        [90, 60, 30],
        [140, 100, 50],
        [90, 60, 30],
    ];
    let pixels = RgbaImage::from_fn(9, 9, |x, y| {
        let [r, g, b] = colors[(y / 3 * 3 + x / 3) as usize];
        Rgba([r, g, b, 255])
    });
    Image::from_rgba(pixels, true)
}

fn parse_arg(args: &[String], index: usize, default: u32) -> anyhow::Result<u32> {
    match args.get(index) {
        Some(v) => v
            .parse()
            .with_context(|| format!("argument {index} is not a size: {v}")),
        None => Ok(default),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut assets = Assets::new(AssetConfig::from_env());

    let source = match args.first().filter(|s| !s.is_empty() && s.as_str() != "-") {
        Some(path) => {
            let path = PathBuf::from(path);
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .context("source path has no file name")?;
            let base = path.parent().map(PathBuf::from).unwrap_or_default();
            assets
                .load_image(name, 1.0, true, Some(&base))
                .with_context(|| format!("loading {}", path.display()))?
        }
        None => demo_source(),
    };

    let size = Size::new(parse_arg(&args, 1, 240)?, parse_arg(&args, 2, 120)?);
    let out_dir = args.get(3).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let panel = assets.ninepatch(&source, size).context("compositing nine-patch")?;
    let mut canvas = panel.to_rgba8();

    match assets.text("jamkit", Rgba([255, 255, 255, 255]), 32, FontSource::Default) {
        Ok(label) => {
            jamkit::draw_centered(&mut canvas, &label, panel.bounds());
            label
                .pixels()
                .save(out_dir.join("label.png"))
                .context("writing label.png")?;
        }
        Err(e) => log::warn!("skipping label: {e}"),
    }

    canvas
        .save(out_dir.join("ninepatch.png"))
        .context("writing ninepatch.png")?;
    log::info!(
        "wrote {}x{} panel to {}",
        size.w,
        size.h,
        out_dir.display()
    );
    Ok(())
}
