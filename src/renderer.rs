//! The icon renderer: one source image in, one PNG per target size out.
//!
//! Every call renders all sizes from scratch. There is no cache and no
//! state between calls, so identical inputs always give identical bytes.

use std::path::Path;

use image::imageops::{self, FilterType};
use log::{debug, info};

use crate::archive::{IconBundle, build_archive};
use crate::config::{Fill, RenderConfig};
use crate::error::Result;
use crate::favicon::FaviconLinks;
use crate::icon::{IconSet, RenderedIcon, SourceImage};
use crate::raster;

/// Resampling filter used when stretching the source onto a surface.
const RESIZE_FILTER: FilterType = FilterType::Triangle;

// ============================================================================
// RenderOutput
// ============================================================================

/// Everything one render pass produces: the icons and their archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    /// Rendered icons, in configured size order.
    pub icons: IconSet,
    /// Zip bundle containing every icon.
    pub bundle: IconBundle,
}

impl RenderOutput {
    /// The 16x16 icon, used for previews and the small favicon link.
    pub fn preview(&self) -> Option<&RenderedIcon> {
        self.icons.get(16)
    }

    /// The 16x16 and 32x32 favicon link targets.
    pub fn favicon_links(&self) -> FaviconLinks<'_> {
        FaviconLinks::from_icons(&self.icons)
    }

    pub fn into_parts(self) -> (IconSet, IconBundle) {
        (self.icons, self.bundle)
    }

    /// Writes each `icon<size>.png` into `dir`, plus `icons.zip` when
    /// `include_bundle` is set. Returns the paths written.
    pub fn write_to_dir(&self, dir: &Path, include_bundle: bool) -> Result<Vec<std::path::PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(self.icons.len() + 1);
        for icon in &self.icons {
            let path = dir.join(icon.file_name());
            std::fs::write(&path, &icon.png)?;
            written.push(path);
        }
        if include_bundle {
            let path = dir.join(self.bundle.file_name());
            std::fs::write(&path, &self.bundle.bytes)?;
            written.push(path);
        }
        debug!("wrote {} files to {}", written.len(), dir.display());
        Ok(written)
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Renders every configured size and bundles the results.
pub fn render(source: &SourceImage, config: &RenderConfig) -> Result<RenderOutput> {
    let icons = render_icons(source, config)?;
    let bundle = build_archive(&icons.icons)?;
    Ok(RenderOutput { icons, bundle })
}

/// Renders every configured size, without building the archive.
pub fn render_icons(source: &SourceImage, config: &RenderConfig) -> Result<IconSet> {
    config.validate()?;
    let dims = source.dimensions();
    info!(
        "rendering {}x{} source at sizes {:?} (radius {}%, fill {:?})",
        dims.width, dims.height, config.sizes, config.corner_radius_percent, config.fill
    );

    let mut icons = IconSet::new();
    for &size in &config.sizes {
        let radius = config.corner_radius_for(size);
        icons.push(render_icon(source, size, radius, config.fill)?);
    }
    Ok(icons)
}

/// Renders a single `size` x `size` icon.
///
/// The surface is filled (unless transparent), clipped to a rounded rectangle
/// of `corner_radius` pixels (when positive), and the source is stretched to
/// cover it exactly.
pub fn render_icon(
    source: &SourceImage,
    size: u32,
    corner_radius: f32,
    fill: Fill,
) -> Result<RenderedIcon> {
    let mut surface = raster::square_surface(size)?;

    if let Fill::Solid(color) = fill {
        raster::fill_surface(&mut surface, color);
    }

    let clip = raster::rounded_clip_mask(size, corner_radius)?;

    // Resample in premultiplied space so clear pixels do not darken edges.
    let premultiplied = raster::premultiply_image(&source.data);
    let stretched = imageops::resize(&premultiplied, size, size, RESIZE_FILTER);
    let layer = raster::premultiplied_image_to_pixmap(&stretched)?;
    raster::draw_clipped(&mut surface, &layer, clip.as_ref());

    let png = raster::encode_png(&raster::pixmap_to_rgba_image(&surface))?;
    debug!("rendered {size}x{size} icon ({} bytes)", png.len());
    Ok(RenderedIcon::new(size, png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use image::{Rgba, RgbaImage};

    const RED: [u8; 4] = [255, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    fn red_source() -> SourceImage {
        SourceImage::new(RgbaImage::from_pixel(256, 256, Rgba(RED))).unwrap()
    }

    #[test]
    fn renders_one_icon_per_size_in_order() {
        let output = render(&red_source(), &RenderConfig::new()).unwrap();
        assert_eq!(output.icons.sizes(), vec![128, 48, 32, 16]);
        for icon in &output.icons {
            let img = icon.decode().unwrap();
            assert_eq!(img.width(), icon.size);
            assert_eq!(img.height(), icon.size);
        }
    }

    #[test]
    fn square_corners_with_white_fill_are_all_red() {
        let config = RenderConfig::new().with_fill(Fill::WHITE);
        let output = render(&red_source(), &config).unwrap();
        assert_eq!(output.icons.len(), 4);
        for icon in &output.icons {
            let img = icon.decode().unwrap();
            assert!(
                img.pixels().all(|p| p.0 == RED),
                "icon{} should be solid red",
                icon.size
            );
        }
    }

    #[test]
    fn rounded_transparent_icons_have_clear_corners() {
        let config = RenderConfig::new()
            .with_corner_radius(50)
            .with_fill(Fill::Transparent);
        let output = render(&red_source(), &config).unwrap();

        for icon in &output.icons {
            let img = icon.decode().unwrap();
            let last = icon.size - 1;
            let mid = icon.size / 2;
            for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
                assert_eq!(img.get_pixel(x, y).0, CLEAR, "icon{} corner ({x},{y})", icon.size);
            }
            assert_eq!(img.get_pixel(mid, mid).0, RED);
        }
    }

    #[test]
    fn rounded_corners_keep_fill_color() {
        let config = RenderConfig::new()
            .with_sizes(vec![32])
            .with_corner_radius(50)
            .with_fill(Fill::WHITE);
        let output = render(&red_source(), &config).unwrap();
        let img = output.icons.get(32).unwrap().decode().unwrap();
        assert_eq!(img.get_pixel(0, 0).0, WHITE);
        assert_eq!(img.get_pixel(31, 31).0, WHITE);
        assert_eq!(img.get_pixel(16, 16).0, RED);
    }

    #[test]
    fn transparent_source_over_transparent_fill_stays_clear() {
        let source = SourceImage::new(RgbaImage::from_pixel(8, 8, Rgba(CLEAR))).unwrap();
        let config = RenderConfig::new()
            .with_sizes(vec![16])
            .with_fill(Fill::Transparent);
        let output = render(&source, &config).unwrap();
        let img = output.icons.get(16).unwrap().decode().unwrap();
        assert!(img.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn transparent_edges_do_not_darken() {
        // Left half opaque white, right half clear.
        let mut data = RgbaImage::from_pixel(256, 256, Rgba(CLEAR));
        for y in 0..256 {
            for x in 0..128 {
                data.put_pixel(x, y, Rgba(WHITE));
            }
        }
        let source = SourceImage::new(data).unwrap();
        let config = RenderConfig::new()
            .with_sizes(vec![128, 48, 32, 16, 15])
            .with_fill(Fill::Transparent);
        let output = render(&source, &config).unwrap();

        for icon in &output.icons {
            let img = icon.decode().unwrap();
            for (x, y, p) in img.enumerate_pixels() {
                if p[3] > 0 {
                    assert_eq!(
                        [p[0], p[1], p[2]],
                        [255, 255, 255],
                        "icon{} pixel ({x},{y}) alpha {}",
                        icon.size,
                        p[3]
                    );
                }
            }
        }

        // An odd size straddles the edge, so some pixels are partially covered.
        let img = output.icons.get(15).unwrap().decode().unwrap();
        assert!(img.pixels().any(|p| p[3] > 0 && p[3] < 255));
    }

    #[test]
    fn source_is_stretched_to_square() {
        // Left half red, right half blue; a 2:1 source squeezed into a square
        // keeps the split at the middle.
        let mut data = RgbaImage::from_pixel(64, 32, Rgba([0, 0, 255, 255]));
        for y in 0..32 {
            for x in 0..32 {
                data.put_pixel(x, y, Rgba(RED));
            }
        }
        let source = SourceImage::new(data).unwrap();
        let config = RenderConfig::new().with_sizes(vec![32]);
        let img = render(&source, &config).unwrap().icons.icons[0]
            .decode()
            .unwrap();
        assert_eq!(img.get_pixel(2, 16).0, RED);
        assert_eq!(img.get_pixel(29, 16).0, [0, 0, 255, 255]);
    }

    #[test]
    fn rendering_is_deterministic() {
        let config = RenderConfig::new()
            .with_corner_radius(30)
            .with_fill(Fill::rgb(12, 34, 56));
        let first = render(&red_source(), &config).unwrap();
        let second = render(&red_source(), &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_sizes_fail_with_invalid_config() {
        let config = RenderConfig::new().with_sizes(Vec::new());
        let err = render(&red_source(), &config).unwrap_err();
        assert!(matches!(err, RenderError::InvalidConfig(_)));
    }

    #[test]
    fn preview_and_favicons_are_selected_by_size() {
        let output = render(&red_source(), &RenderConfig::new()).unwrap();
        assert_eq!(output.preview().unwrap().size, 16);
        let links = output.favicon_links();
        assert_eq!(links.small.unwrap().size, 16);
        assert_eq!(links.large.unwrap().size, 32);
    }

    #[test]
    fn write_to_dir_saves_icons_and_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let output = render(&red_source(), &RenderConfig::new()).unwrap();

        let written = output.write_to_dir(dir.path(), true).unwrap();
        assert_eq!(written.len(), 5);
        for name in ["icon128.png", "icon48.png", "icon32.png", "icon16.png", "icons.zip"] {
            assert!(dir.path().join(name).exists(), "{name} missing");
        }
        let saved = std::fs::read(dir.path().join("icon32.png")).unwrap();
        assert_eq!(saved, output.icons.get(32).unwrap().png);
    }
}
