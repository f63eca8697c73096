//! SVG to PNG cover conversion.
//!
//! One cover at a time: parse with usvg, rasterize with resvg onto a
//! background-filled pixmap, encode with the `image` PNG encoder at maximal
//! lossless compression. The encoder is deterministic, so re-running a
//! conversion produces bit-identical output.

use anyhow::{Context, Result};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use resvg::tiny_skia::{Color, Pixmap, Transform};

/// Fixed raster geometry for one batch.
#[derive(Debug, Clone, Copy)]
pub struct RenderSpec {
    pub width: u32,
    pub height: u32,
    /// Background color transparency is flattened onto.
    pub background: (u8, u8, u8),
}

/// Parsing options shared by the whole batch.
///
/// System fonts are loaded once so covers with `<text>` render properly.
pub fn render_options() -> usvg::Options<'static> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    options
}

/// Rasterize one SVG cover to PNG bytes.
///
/// The vector content is scaled uniformly to cover the target rectangle
/// (overflow cropped, centered) and composited over the opaque background.
pub fn convert_cover(
    svg_data: &[u8],
    spec: RenderSpec,
    options: &usvg::Options,
) -> Result<Vec<u8>> {
    let tree = usvg::Tree::from_data(svg_data, options).context("failed to parse SVG")?;

    let size = tree.size();
    if size.width() <= 0.0 || size.height() <= 0.0 {
        anyhow::bail!("SVG has no size");
    }

    let mut pixmap =
        Pixmap::new(spec.width, spec.height).context("failed to allocate output pixmap")?;
    let (r, g, b) = spec.background;
    pixmap.fill(Color::from_rgba8(r, g, b, 255));

    // Cover fit: scale by the larger axis ratio, center the overflow
    #[allow(clippy::cast_precision_loss)]
    let (out_w, out_h) = (spec.width as f32, spec.height as f32);
    let scale = (out_w / size.width()).max(out_h / size.height());
    let tx = (out_w - size.width() * scale) / 2.0;
    let ty = (out_h - size.height() * scale) / 2.0;

    let transform = Transform::from_scale(scale, scale).post_translate(tx, ty);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    encode_png(&pixmap)
}

/// Encode the pixmap as PNG with maximal lossless compression.
fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut out, CompressionType::Best, FilterType::Adaptive);

    // The pixmap stores premultiplied RGBA, but compositing over an opaque
    // background leaves every pixel at alpha 255, where premultiplied and
    // straight alpha coincide.
    encoder
        .write_image(
            pixmap.data(),
            pixmap.width(),
            pixmap.height(),
            ExtendedColorType::Rgba8,
        )
        .context("failed to encode PNG")?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED_SQUARE: &[u8] =
        br##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
<rect width="100" height="100" fill="#ff0000"/></svg>"##;

    fn spec() -> RenderSpec {
        RenderSpec {
            width: 1200,
            height: 630,
            background: (13, 17, 23),
        }
    }

    #[test]
    fn test_convert_produces_png_magic() {
        let options = render_options();
        let png = convert_cover(RED_SQUARE, spec(), &options).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_convert_is_deterministic() {
        let options = render_options();
        let first = convert_cover(RED_SQUARE, spec(), &options).unwrap();
        let second = convert_cover(RED_SQUARE, spec(), &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_convert_rejects_corrupt_input() {
        let options = render_options();
        assert!(convert_cover(b"this is not svg", spec(), &options).is_err());
    }

    #[test]
    fn test_transparency_flattened_onto_background() {
        // Fully transparent SVG: output decodes as the background color
        let empty: &[u8] =
            br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"></svg>"#;
        let options = render_options();
        let png = convert_cover(empty, spec(), &options).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (1200, 630));
        assert_eq!(decoded.get_pixel(0, 0), &image::Rgba([13, 17, 23, 255]));
    }
}
