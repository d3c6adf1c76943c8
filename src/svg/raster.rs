use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{KanjiError, KanjiResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterOpts {
    /// Output width and height in pixels.
    pub size: u32,
    /// Straight RGBA8 fill painted under the drawing.
    pub background: [u8; 4],
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            size: 128,
            background: [255, 255, 255, 255],
        }
    }
}

pub fn parse_svg(bytes: &[u8]) -> KanjiResult<usvg::Tree> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(tree)
}

/// Render an SVG stretched to `size x size` on top of the background color.
pub fn rasterize_svg(bytes: &[u8], opts: &RasterOpts) -> KanjiResult<image::RgbaImage> {
    let tree = parse_svg(bytes)?;
    let size = opts.size;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| KanjiError::raster(format!("failed to allocate {size}x{size} pixmap")))?;
    let [r, g, b, a] = opts.background;
    pixmap.fill(resvg::tiny_skia::Color::from_rgba8(r, g, b, a));

    let sx = (size as f32) / tree.size().width();
    let sy = (size as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    let mut rgba = pixmap.data().to_vec();
    unpremultiply_rgba8_in_place(&mut rgba);
    image::RgbaImage::from_raw(size, size, rgba)
        .ok_or_else(|| KanjiError::raster("pixmap size does not match image buffer"))
}

pub fn write_png(img: &image::RgbaImage, path: &Path) -> KanjiResult<()> {
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

// tiny-skia pixmaps are premultiplied; PNG wants straight alpha.
fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}
