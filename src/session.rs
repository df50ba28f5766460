//! Caller-owned render session: the current source, the current settings and
//! the latest output.
//!
//! Each setting change re-renders every size from scratch while a source is
//! loaded. The new output replaces the previous one wholesale.

use image::Rgba;
use log::{debug, info};

use crate::config::{Fill, RenderConfig};
use crate::error::Result;
use crate::icon::SourceImage;
use crate::profile::RenderProfile;
use crate::renderer::{RenderOutput, render};

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from a [`RenderProfile`].
pub trait Configurable {
    /// Applies a profile's settings to this instance.
    fn apply_profile(&mut self, profile: &RenderProfile) -> Result<()>;

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> RenderProfile;
}

// ============================================================================
// RenderSession
// ============================================================================

/// Holds the loaded source image and settings, and re-renders on change.
///
/// # Example
///
/// ```
/// use favicon_renderer::{RenderSession, SourceImage};
/// use image::{Rgba, RgbaImage};
///
/// let source = SourceImage::new(RgbaImage::from_pixel(64, 64, Rgba([255, 0, 0, 255]))).unwrap();
///
/// let mut session = RenderSession::new();
/// session.load_image(source).unwrap();
/// session.set_corner_radius(20).unwrap();
/// session.set_transparent().unwrap();
///
/// let output = session.output().unwrap();
/// assert_eq!(output.icons.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct RenderSession {
    source: Option<SourceImage>,
    corner_radius: u8,
    background: Rgba<u8>,
    transparent: bool,
    sizes: Vec<u32>,
    output: Option<RenderOutput>,
}

impl RenderSession {
    /// Creates a session with canonical sizes, square corners and a white
    /// background.
    pub fn new() -> Self {
        let config = RenderConfig::new();
        Self {
            source: None,
            corner_radius: config.corner_radius_percent,
            background: Rgba([255, 255, 255, 255]),
            transparent: false,
            sizes: config.sizes,
            output: None,
        }
    }

    /// Decodes uploaded bytes, makes them the current source and renders.
    ///
    /// On decode failure the previous source and output are kept.
    pub fn load_bytes(&mut self, bytes: &[u8], mime_type: &str) -> Result<&RenderOutput> {
        let source = SourceImage::from_bytes_with_mime(bytes, mime_type)?;
        self.load_image(source)
    }

    /// Makes `source` the current source and renders.
    pub fn load_image(&mut self, source: SourceImage) -> Result<&RenderOutput> {
        let dims = source.dimensions();
        info!("loaded {}x{} source", dims.width, dims.height);
        let rendered = render(&source, &self.config());
        self.source = Some(source);
        match rendered {
            Ok(output) => Ok(&*self.output.insert(output)),
            Err(e) => {
                self.output = None;
                Err(e)
            }
        }
    }

    /// Drops the current source and output, keeping the settings.
    pub fn clear(&mut self) {
        debug!("clearing session source");
        self.source = None;
        self.output = None;
    }

    pub fn set_sizes(&mut self, sizes: impl Into<Vec<u32>>) -> Result<()> {
        self.sizes = sizes.into();
        self.rerender()
    }

    /// Sets the corner radius percentage (clamped to 100).
    pub fn set_corner_radius(&mut self, percent: u8) -> Result<()> {
        self.corner_radius = percent.min(100);
        self.rerender()
    }

    /// Selects a background color, turning transparency off.
    pub fn set_background(&mut self, color: Rgba<u8>) -> Result<()> {
        self.background = color;
        self.transparent = false;
        self.rerender()
    }

    /// Selects a transparent background. The last color is remembered.
    pub fn set_transparent(&mut self) -> Result<()> {
        self.transparent = true;
        self.rerender()
    }

    /// The settings a render would use right now.
    pub fn config(&self) -> RenderConfig {
        let fill = if self.transparent {
            Fill::Transparent
        } else {
            Fill::Solid(self.background)
        };
        RenderConfig::new()
            .with_sizes(self.sizes.clone())
            .with_corner_radius(self.corner_radius)
            .with_fill(fill)
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Output of the most recent successful render, if any.
    pub fn output(&self) -> Option<&RenderOutput> {
        self.output.as_ref()
    }

    /// Re-renders from the current source and settings.
    ///
    /// Does nothing without a source. On failure the stale output is dropped
    /// so it cannot be mistaken for the current settings.
    fn rerender(&mut self) -> Result<()> {
        let Some(source) = self.source.as_ref() else {
            return Ok(());
        };
        match render(source, &self.config()) {
            Ok(output) => {
                self.output = Some(output);
                Ok(())
            }
            Err(e) => {
                self.output = None;
                Err(e)
            }
        }
    }
}

impl Default for RenderSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Configurable for RenderSession {
    /// Applies a profile's settings and re-renders if a source is loaded.
    fn apply_profile(&mut self, profile: &RenderProfile) -> Result<()> {
        let config = profile.to_config()?;
        // A transparent profile still carries the color to return to.
        if let Fill::Solid(color) = Fill::from_hex(&profile.background)? {
            self.background = color;
        }
        self.sizes = config.sizes;
        self.corner_radius = config.corner_radius_percent;
        self.transparent = config.fill.is_transparent();
        self.rerender()
    }

    /// Exports the current settings, including the remembered background
    /// color while transparency is on.
    fn export_profile(&self) -> RenderProfile {
        RenderProfile {
            sizes: self.sizes.clone(),
            corner_radius: self.corner_radius,
            background: Fill::Solid(self.background).to_hex().unwrap_or_default(),
            transparent: self.transparent,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
