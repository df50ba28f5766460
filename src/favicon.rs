//! Favicon link targets picked out of a rendered icon set.

use crate::icon::{IconSet, RenderedIcon};

/// Edge length of the small favicon, also used as the preview thumbnail.
pub const SMALL_FAVICON: u32 = 16;
/// Edge length of the large favicon.
pub const LARGE_FAVICON: u32 = 32;

/// The icons a page should point its `<link rel="icon">` elements at.
///
/// Either entry is `None` when that size was not part of the render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaviconLinks<'a> {
    pub small: Option<&'a RenderedIcon>,
    pub large: Option<&'a RenderedIcon>,
}

impl<'a> FaviconLinks<'a> {
    pub fn from_icons(icons: &'a IconSet) -> Self {
        Self {
            small: icons.get(SMALL_FAVICON),
            large: icons.get(LARGE_FAVICON),
        }
    }

    /// `(sizes attribute, icon)` pairs, large first.
    pub fn entries(&self) -> impl Iterator<Item = (String, &'a RenderedIcon)> {
        [self.large, self.small]
            .into_iter()
            .flatten()
            .map(|icon| (sizes_attr(icon.size), icon))
    }

    /// HTML `<link>` tags referencing the downloadable icon files.
    ///
    /// `base_path` is prepended to each file name; pass `""` for files next
    /// to the page.
    pub fn html_snippet(&self, base_path: &str) -> String {
        self.entries()
            .map(|(sizes, icon)| {
                format!(
                    r#"<link rel="icon" type="image/png" sizes="{sizes}" href="{base_path}{}">"#,
                    icon.file_name()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Value of a link's `sizes` attribute, e.g. `16x16`.
pub fn sizes_attr(size: u32) -> String {
    format!("{size}x{size}")
}
