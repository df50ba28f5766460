//! Icon types: the decoded source image and the rendered per-size outputs.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};
use log::debug;

use crate::error::{RenderError, Result};

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Returns true if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Maps an upload's MIME type to the file extension used as a decode hint.
///
/// Only JPEG is recognised explicitly; everything else is treated as PNG.
pub fn file_extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" => "jpeg",
        _ => "png",
    }
}

// ============================================================================
// SourceImage
// ============================================================================

/// A fully decoded source raster, ready to be drawn at any target size.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    /// The image data in RGBA format.
    pub data: RgbaImage,
}

impl SourceImage {
    /// Wraps already-decoded pixels.
    ///
    /// Fails if the image has no pixels.
    pub fn new(data: RgbaImage) -> Result<Self> {
        if data.width() == 0 || data.height() == 0 {
            return Err(RenderError::invalid_config("source image is empty"));
        }
        Ok(Self { data })
    }

    /// Decodes image bytes, sniffing the format from the content.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes).map_err(RenderError::Decode)?;
        Self::new(img.to_rgba8())
    }

    /// Decodes image bytes using the upload's MIME type as a format hint.
    ///
    /// If the bytes do not match the hinted format, the format is sniffed
    /// from the content instead.
    pub fn from_bytes_with_mime(bytes: &[u8], mime_type: &str) -> Result<Self> {
        let hint = ImageFormat::from_extension(file_extension_for_mime(mime_type))
            .unwrap_or(ImageFormat::Png);
        match image::load_from_memory_with_format(bytes, hint) {
            Ok(img) => Self::new(img.to_rgba8()),
            Err(e) => {
                debug!("decode as {hint:?} failed ({e}), sniffing format");
                Self::from_bytes(bytes)
            }
        }
    }

    /// Reads and decodes an image file. SVG files are rasterized.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let is_svg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if is_svg {
            let markup = String::from_utf8_lossy(&bytes);
            return Self::from_svg(&markup, crate::svg::DEFAULT_SVG_EDGE);
        }
        Self::from_bytes(&bytes)
    }

    /// Rasterizes SVG markup so its longer edge is `edge` pixels.
    pub fn from_svg(svg_data: &str, edge: u32) -> Result<Self> {
        Self::new(crate::svg::rasterize(svg_data, edge)?)
    }

    /// Returns the pixel dimensions of the image.
    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }
}

// ============================================================================
// RenderedIcon
// ============================================================================

/// One rendered icon: a square PNG at a single target size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedIcon {
    /// Edge length in pixels.
    pub size: u32,
    /// Encoded PNG bytes.
    pub png: Vec<u8>,
}

impl RenderedIcon {
    pub fn new(size: u32, png: Vec<u8>) -> Self {
        Self { size, png }
    }

    /// Download file name, e.g. `icon32.png`.
    pub fn file_name(&self) -> String {
        icon_file_name(self.size)
    }

    /// The PNG as a `data:` URI, suitable for `<img src>` or `<link href>`.
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }

    /// Decodes the PNG back into pixels.
    pub fn decode(&self) -> Result<RgbaImage> {
        let img = image::load_from_memory_with_format(&self.png, ImageFormat::Png)
            .map_err(RenderError::Decode)?;
        Ok(img.to_rgba8())
    }
}

/// File name used for an icon of the given size inside downloads and archives.
pub fn icon_file_name(size: u32) -> String {
    format!("icon{size}.png")
}

// ============================================================================
// IconSet
// ============================================================================

/// The icons produced by one render pass, in configured size order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IconSet {
    pub icons: Vec<RenderedIcon>,
}

impl IconSet {
    /// Creates a new empty icon set.
    pub fn new() -> Self {
        Self { icons: Vec::new() }
    }

    pub fn from_icons(icons: Vec<RenderedIcon>) -> Self {
        Self { icons }
    }

    pub fn push(&mut self, icon: RenderedIcon) {
        self.icons.push(icon);
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Finds the icon rendered at exactly `size`.
    pub fn get(&self, size: u32) -> Option<&RenderedIcon> {
        self.icons.iter().find(|icon| icon.size == size)
    }

    /// Sizes in render order.
    pub fn sizes(&self) -> Vec<u32> {
        self.icons.iter().map(|icon| icon.size).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderedIcon> {
        self.icons.iter()
    }
}

impl IntoIterator for IconSet {
    type Item = RenderedIcon;
    type IntoIter = std::vec::IntoIter<RenderedIcon>;

    fn into_iter(self) -> Self::IntoIter {
        self.icons.into_iter()
    }
}

impl<'a> IntoIterator for &'a IconSet {
    type Item = &'a RenderedIcon;
    type IntoIter = std::slice::Iter<'a, RenderedIcon>;

    fn into_iter(self) -> Self::IntoIter {
        self.icons.iter()
    }
}
