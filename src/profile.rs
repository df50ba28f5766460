//! Serializable render settings for saving and exchanging configurations.
//!
//! A [`RenderProfile`] captures the user-facing settings in a JSON-friendly
//! form: target sizes, corner radius, background color and the transparency
//! toggle.
//!
//! # Example
//!
//! ```
//! use favicon_renderer::{RenderConfig, RenderProfile};
//!
//! let profile = RenderProfile::new()
//!     .with_corner_radius(25)
//!     .with_background("#336699");
//!
//! let json = profile.to_json().unwrap();
//! let restored = RenderProfile::from_json(&json).unwrap();
//! let config: RenderConfig = restored.to_config().unwrap();
//! assert_eq!(config.corner_radius_percent, 25);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{CANONICAL_SIZES, Fill, RenderConfig};
use crate::error::Result;

/// Serializable settings for one render configuration.
///
/// # JSON Format
///
/// ```json
/// {
///   "sizes": [128, 48, 32, 16],
///   "cornerRadius": 20,
///   "background": "#ffffff",
///   "transparent": false
/// }
/// ```
///
/// Every field is optional when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct RenderProfile {
    /// Target edge lengths in pixels.
    #[serde(default = "default_sizes")]
    pub sizes: Vec<u32>,

    /// Corner radius as a percentage of the edge length (0-100).
    #[serde(default)]
    pub corner_radius: u8,

    /// Background color as CSS hex. Not drawn while `transparent` is set, but
    /// still validated.
    #[serde(default = "default_background")]
    pub background: String,

    /// Leave the background transparent instead of filling it.
    #[serde(default)]
    pub transparent: bool,
}

fn default_sizes() -> Vec<u32> {
    CANONICAL_SIZES.to_vec()
}

fn default_background() -> String {
    "#ffffff".to_string()
}

impl Default for RenderProfile {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            corner_radius: 0,
            background: default_background(),
            transparent: false,
        }
    }
}

impl RenderProfile {
    /// Creates a profile with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sizes(mut self, sizes: impl Into<Vec<u32>>) -> Self {
        self.sizes = sizes.into();
        self
    }

    pub fn with_corner_radius(mut self, percent: u8) -> Self {
        self.corner_radius = percent;
        self
    }

    /// Sets the background color and turns transparency off.
    pub fn with_background(mut self, hex: impl Into<String>) -> Self {
        self.background = hex.into();
        self.transparent = false;
        self
    }

    /// Turns transparency on. The background color is kept for later.
    pub fn with_transparent(mut self) -> Self {
        self.transparent = true;
        self
    }

    /// Resolves the profile into a render config.
    ///
    /// Fails if the background color cannot be parsed (even when transparent)
    /// or the config is invalid.
    pub fn to_config(&self) -> Result<RenderConfig> {
        // The color is checked even while transparent, since it is what the
        // user returns to when transparency is switched off.
        let background = Fill::from_hex(&self.background)?;
        let fill = if self.transparent {
            Fill::Transparent
        } else {
            background
        };
        let config = RenderConfig::new()
            .with_sizes(self.sizes.clone())
            .with_corner_radius(self.corner_radius)
            .with_fill(fill);
        config.validate()?;
        Ok(config)
    }

    /// Captures a render config as a profile.
    ///
    /// A transparent config keeps the default background color.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            sizes: config.sizes.clone(),
            corner_radius: config.corner_radius_percent,
            background: config.fill.to_hex().unwrap_or_else(default_background),
            transparent: config.fill.is_transparent(),
        }
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    #[test]
    fn profile_serialization_roundtrip() {
        let profile = RenderProfile::new()
            .with_sizes(vec![64, 32])
            .with_corner_radius(40)
            .with_transparent();

        let json = profile.to_json().unwrap();
        let restored = RenderProfile::from_json(&json).unwrap();

        assert_eq!(restored, profile);
    }

    #[test]
    fn profile_json_format() {
        let json = RenderProfile::new().with_corner_radius(10).to_json_pretty().unwrap();

        // Verify camelCase serialization
        assert!(json.contains("\"cornerRadius\""));
        assert!(json.contains("\"background\""));
        assert!(json.contains("\"transparent\""));
    }

    #[test]
    fn empty_profile_deserializes_to_defaults() {
        let profile = RenderProfile::from_json("{}").unwrap();
        assert_eq!(profile, RenderProfile::default());
        assert_eq!(profile.to_config().unwrap(), RenderConfig::default());
    }

    #[test]
    fn background_and_transparency_are_exclusive() {
        let profile = RenderProfile::new().with_transparent().with_background("#000000");
        assert!(!profile.transparent);
        assert_eq!(profile.to_config().unwrap().fill, Fill::rgb(0, 0, 0));

        let profile = profile.with_transparent();
        assert_eq!(profile.to_config().unwrap().fill, Fill::Transparent);
    }

    #[test]
    fn bad_background_is_invalid_config() {
        let err = RenderProfile::new()
            .with_background("#zzzzzz")
            .to_config()
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidConfig(_)));
    }

    #[test]
    fn bad_background_is_rejected_while_transparent() {
        let profile = RenderProfile::from_json(r#"{"background": "nope", "transparent": true}"#)
            .unwrap();
        assert!(matches!(
            profile.to_config(),
            Err(RenderError::InvalidConfig(_))
        ));
    }

    #[test]
    fn empty_sizes_are_rejected() {
        let profile = RenderProfile::from_json(r#"{"sizes": []}"#).unwrap();
        assert!(profile.to_config().is_err());
    }

    #[test]
    fn config_roundtrip() {
        let config = RenderConfig::new()
            .with_corner_radius(15)
            .with_fill(Fill::rgb(0x12, 0x34, 0x56));
        let profile = RenderProfile::from_config(&config);
        assert_eq!(profile.background, "#123456");
        assert_eq!(profile.to_config().unwrap(), config);
    }
}
