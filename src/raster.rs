//! Low-level drawing helpers on top of tiny-skia.
//!
//! Surfaces are tiny-skia pixmaps (premultiplied alpha); everything that
//! crosses the crate boundary is an `image::RgbaImage` (straight alpha).

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use resvg::tiny_skia::{
    Color, ColorU8, FillRule, Mask, Path, PathBuilder, Pixmap, PixmapPaint,
    PremultipliedColorU8, Transform,
};

use crate::error::{RenderError, Result};

/// Control-point distance for approximating a quarter circle with one cubic.
const QUARTER_ARC_KAPPA: f32 = 0.552_284_8;

// ============================================================================
// Surfaces
// ============================================================================

/// Allocates a fully transparent `size` x `size` surface.
pub fn square_surface(size: u32) -> Result<Pixmap> {
    Pixmap::new(size, size)
        .ok_or_else(|| RenderError::invalid_config(format!("cannot allocate {size}x{size} surface")))
}

/// Paints the whole surface with a straight-alpha color.
pub fn fill_surface(surface: &mut Pixmap, color: Rgba<u8>) {
    let [r, g, b, a] = color.0;
    surface.fill(Color::from_rgba8(r, g, b, a));
}

/// Draws `src` onto `dest` at the origin, 1:1, through an optional clip mask.
pub fn draw_clipped(dest: &mut Pixmap, src: &Pixmap, clip: Option<&Mask>) {
    dest.draw_pixmap(
        0,
        0,
        src.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        clip,
    );
}

// ============================================================================
// Rounded-rect clip
// ============================================================================

/// Builds a `size` x `size` rounded rectangle with quarter-circle corners.
///
/// `radius` is clamped to `size / 2`. Returns `None` for a non-positive radius
/// or a degenerate size.
pub fn rounded_rect_path(size: f32, radius: f32) -> Option<Path> {
    let r = radius.min(size / 2.0);
    if r <= 0.0 || size <= 0.0 {
        return None;
    }
    let k = r * QUARTER_ARC_KAPPA;
    let s = size;

    let mut pb = PathBuilder::new();
    pb.move_to(r, 0.0);
    pb.line_to(s - r, 0.0);
    pb.cubic_to(s - r + k, 0.0, s, r - k, s, r);
    pb.line_to(s, s - r);
    pb.cubic_to(s, s - r + k, s - r + k, s, s - r, s);
    pb.line_to(r, s);
    pb.cubic_to(r - k, s, 0.0, s - r + k, 0.0, s - r);
    pb.line_to(0.0, r);
    pb.cubic_to(0.0, r - k, r - k, 0.0, r, 0.0);
    pb.close();
    pb.finish()
}

/// Anti-aliased coverage mask for a rounded rectangle filling a square surface.
///
/// Returns `None` when no clipping is needed (radius of zero).
pub fn rounded_clip_mask(size: u32, radius: f32) -> Result<Option<Mask>> {
    let Some(path) = rounded_rect_path(size as f32, radius) else {
        return Ok(None);
    };
    let mut mask = Mask::new(size, size)
        .ok_or_else(|| RenderError::invalid_config(format!("cannot allocate {size}x{size} mask")))?;
    mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
    Ok(Some(mask))
}

// ============================================================================
// Conversions
// ============================================================================

/// Premultiplies every pixel by its alpha, keeping the `RgbaImage` container.
///
/// Resampling must happen on premultiplied values, otherwise clear pixels
/// bleed their (black) color into neighbouring edges.
pub fn premultiply_image(img: &RgbaImage) -> RgbaImage {
    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let p = ColorU8::from_rgba(r, g, b, a).premultiply();
        pixel.0 = [p.red(), p.green(), p.blue(), p.alpha()];
    }
    out
}

/// Copies an image that already holds premultiplied values into a pixmap.
///
/// Color channels are clamped to alpha, which resampling rounding can
/// exceed by one.
pub fn premultiplied_image_to_pixmap(img: &RgbaImage) -> Result<Pixmap> {
    let mut pixmap = Pixmap::new(img.width(), img.height()).ok_or_else(|| {
        RenderError::invalid_config(format!(
            "cannot allocate {}x{} surface",
            img.width(),
            img.height()
        ))
    })?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
        let [r, g, b, a] = src.0;
        if let Some(color) = PremultipliedColorU8::from_rgba(r.min(a), g.min(a), b.min(a), a) {
            *dst = color;
        }
    }
    Ok(pixmap)
}

/// Converts a tiny-skia pixmap to an `image::RgbaImage`.
pub fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        // tiny_skia uses premultiplied alpha, we need to unpremultiply
        let (r, g, b, a) = unpremultiply(src.red(), src.green(), src.blue(), src.alpha());
        *dst = Rgba([r, g, b, a]);
    }
    img
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

/// Encodes an image as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(RenderError::Encode)?;
    Ok(buf)
}
