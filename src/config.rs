//! Render configuration: target sizes, corner rounding and background fill.

use std::str::FromStr;

use image::Rgba;
use palette::Srgb;

use crate::error::{RenderError, Result};

/// The favicon sizes rendered by default, largest first.
pub const CANONICAL_SIZES: [u32; 4] = [128, 48, 32, 16];

// ============================================================================
// Fill
// ============================================================================

/// What sits behind the source image on every surface.
///
/// A solid color and transparency are mutually exclusive: picking one
/// replaces the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Paint the whole surface with this color before drawing the source.
    Solid(Rgba<u8>),
    /// Leave the surface transparent.
    Transparent,
}

impl Fill {
    pub const WHITE: Self = Self::Solid(Rgba([255, 255, 255, 255]));

    /// Opaque fill from RGB components.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Solid(Rgba([r, g, b, 255]))
    }

    /// Parses a CSS hex color (`#rrggbb`, `rrggbb` or `#rgb`) into an opaque fill.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let color = Srgb::<u8>::from_str(hex.trim())
            .map_err(|e| RenderError::invalid_config(format!("bad color {hex:?}: {e}")))?;
        Ok(Self::rgb(color.red, color.green, color.blue))
    }

    /// Returns the fill color as `#rrggbb`, or `None` when transparent.
    pub fn to_hex(&self) -> Option<String> {
        match self {
            Self::Solid(Rgba([r, g, b, _])) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            Self::Transparent => None,
        }
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, Self::Transparent)
    }
}

impl Default for Fill {
    fn default() -> Self {
        Self::WHITE
    }
}

// ============================================================================
// RenderConfig
// ============================================================================

/// Immutable snapshot of the settings used for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Target edge lengths in pixels, rendered in this order.
    pub sizes: Vec<u32>,
    /// Corner radius as a percentage of the edge length (0-100).
    pub corner_radius_percent: u8,
    pub fill: Fill,
}

impl RenderConfig {
    /// Canonical favicon sizes, square corners, white background.
    pub fn new() -> Self {
        Self {
            sizes: CANONICAL_SIZES.to_vec(),
            corner_radius_percent: 0,
            fill: Fill::default(),
        }
    }

    pub fn with_sizes(mut self, sizes: impl Into<Vec<u32>>) -> Self {
        self.sizes = sizes.into();
        self
    }

    /// Sets the corner radius percentage. Values above 100 are clamped.
    pub fn with_corner_radius(mut self, percent: u8) -> Self {
        self.corner_radius_percent = percent.min(100);
        self
    }

    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    /// Checks that the config can produce at least one icon.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(RenderError::invalid_config("no target sizes given"));
        }
        if self.sizes.contains(&0) {
            return Err(RenderError::invalid_config("target sizes must be positive"));
        }
        Ok(())
    }

    /// Corner radius in pixels for a surface of edge `size`.
    ///
    /// Never exceeds `size / 2`, so the rounded rectangle cannot self-intersect.
    pub fn corner_radius_for(&self, size: u32) -> f32 {
        let radius = size as f32 * self.corner_radius_percent as f32 / 100.0;
        radius.min(size as f32 / 2.0)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}
