//! Zip bundle of all rendered icons.

use std::io::{Cursor, Write};

use log::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::{RenderError, Result};
use crate::icon::RenderedIcon;

/// File name offered for the bundle download.
pub const BUNDLE_FILE_NAME: &str = "icons.zip";

/// A zip container holding one `icon<size>.png` per rendered icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconBundle {
    /// Entry names, in the order they were written.
    pub entries: Vec<String>,
    /// The serialized zip archive.
    pub bytes: Vec<u8>,
}

impl IconBundle {
    /// Download file name, always `icons.zip`.
    pub fn file_name(&self) -> &'static str {
        BUNDLE_FILE_NAME
    }
}

/// Packs each icon's PNG bytes into a zip archive.
///
/// Entry timestamps are pinned to the zip epoch so identical icons always
/// produce identical archive bytes.
pub fn build_archive(icons: &[RenderedIcon]) -> Result<IconBundle> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let mut entries = Vec::with_capacity(icons.len());

    for icon in icons {
        let name = icon.file_name();
        zip.start_file(name.as_str(), options)?;
        zip.write_all(&icon.png)
            .map_err(|e| RenderError::ArchiveEncode(e.into()))?;
        entries.push(name);
    }

    let bytes = zip.finish()?.into_inner();
    debug!("built {} with {} entries ({} bytes)", BUNDLE_FILE_NAME, entries.len(), bytes.len());
    Ok(IconBundle { entries, bytes })
}
