//! favicon-renderer: turn one image into a set of favicon-sized PNGs
//!
//! This crate stretches a source image onto square surfaces of each target
//! size, optionally filling the background and rounding the corners, and
//! bundles the resulting PNGs into a zip archive.
//!
//! # Example
//!
//! ```
//! use favicon_renderer::{render, Fill, RenderConfig, SourceImage};
//! use image::{Rgba, RgbaImage};
//!
//! let source = SourceImage::new(RgbaImage::from_pixel(256, 256, Rgba([255, 0, 0, 255]))).unwrap();
//! let config = RenderConfig::new()
//!     .with_corner_radius(50)
//!     .with_fill(Fill::Transparent);
//!
//! let output = render(&source, &config).unwrap();
//! assert_eq!(output.icons.sizes(), vec![128, 48, 32, 16]);
//! assert_eq!(output.bundle.entries[0], "icon128.png");
//!
//! // Favicon link targets for the page
//! let links = output.favicon_links();
//! let href = links.small.unwrap().data_uri();
//! assert!(href.starts_with("data:image/png;base64,"));
//! ```
//!
//! # Interactive use
//!
//! For a UI that re-renders whenever a setting changes, keep a
//! [`RenderSession`] and feed it uploads and setting changes. Settings can be
//! saved and restored as a [`RenderProfile`] through the [`Configurable`]
//! trait.

mod archive;
mod config;
mod error;
mod favicon;
mod icon;
mod profile;
mod raster;
mod renderer;
mod session;
mod svg;

pub use archive::{BUNDLE_FILE_NAME, IconBundle, build_archive};
pub use config::{CANONICAL_SIZES, Fill, RenderConfig};
pub use error::{RenderError, Result};
pub use favicon::{FaviconLinks, LARGE_FAVICON, SMALL_FAVICON, sizes_attr};
pub use icon::{IconSet, RenderedIcon, SizePx, SourceImage, file_extension_for_mime, icon_file_name};
pub use profile::RenderProfile;
pub use renderer::{RenderOutput, render, render_icon, render_icons};
pub use session::{Configurable, RenderSession};
pub use svg::DEFAULT_SVG_EDGE;
