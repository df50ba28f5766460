//! SVG source rasterization using resvg/usvg.

use image::RgbaImage;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::{RenderError, Result};
use crate::raster::pixmap_to_rgba_image;

/// Longer-edge length used when rasterizing an SVG file without an explicit size.
///
/// Twice the largest canonical favicon size, so every target is a downscale.
pub const DEFAULT_SVG_EDGE: u32 = 256;

/// Renders SVG markup to an RGBA image whose longer edge is `edge` pixels.
///
/// Aspect ratio is preserved.
pub fn rasterize(svg_data: &str, edge: u32) -> Result<RgbaImage> {
    let opts = Options::default();
    let tree =
        Tree::from_str(svg_data, &opts).map_err(|e| RenderError::SvgParse(e.to_string()))?;

    let svg_size = tree.size();
    let scale = edge as f32 / svg_size.width().max(svg_size.height());
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        RenderError::SvgParse(format!("cannot allocate {width}x{height} surface"))
    })?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><rect width="100" height="50" fill="#00ff00"/></svg>"##;

    #[test]
    fn rasterize_preserves_aspect_ratio() {
        let img = rasterize(SIMPLE_SVG, 50).unwrap();
        assert_eq!(img.width(), 50);
        assert_eq!(img.height(), 25);
        assert_eq!(img.get_pixel(10, 10).0, [0, 255, 0, 255]);
    }

    #[test]
    fn invalid_svg_is_an_error() {
        let err = rasterize("<not-svg", 32).unwrap_err();
        assert!(matches!(err, RenderError::SvgParse(_)));
    }
}
