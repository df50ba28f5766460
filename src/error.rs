//! Error type shared by the renderer, the archive builder and the session.

use thiserror::Error;

/// Everything that can go wrong while turning a source image into icons.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The render configuration cannot produce any output (e.g. no sizes).
    #[error("invalid render config: {0}")]
    InvalidConfig(String),

    /// The source bytes could not be decoded as an image.
    #[error("failed to decode source image: {0}")]
    Decode(#[source] image::ImageError),

    /// The source markup could not be parsed as SVG.
    #[error("failed to parse SVG source: {0}")]
    SvgParse(String),

    /// A rendered surface could not be encoded as PNG.
    #[error("failed to encode icon as PNG: {0}")]
    Encode(#[source] image::ImageError),

    /// The zip container could not be written.
    #[error("failed to build icon archive: {0}")]
    ArchiveEncode(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RenderError>;

impl RenderError {
    pub(crate) fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
