use std::sync::Arc;

use anyhow::{Context, bail};

use crate::assets::PreparedImage;

// Largest accepted decoded edge, in pixels.
const MAX_DIM: u32 = 16_384;

/// Decode encoded image bytes into premultiplied RGBA8.
///
/// SVG documents are detected by content and rasterized at their intrinsic size; everything
/// else goes through the `image` crate's format sniffing.
pub fn decode_image(bytes: &[u8]) -> anyhow::Result<PreparedImage> {
    if bytes.is_empty() {
        bail!("image payload is empty");
    }
    if looks_like_svg(bytes) {
        let tree = parse_svg(bytes)?;
        return rasterize_svg(&tree);
    }

    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    check_dimensions(width, height)?;

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Parse SVG bytes into a `usvg` tree.
pub fn parse_svg(bytes: &[u8]) -> anyhow::Result<usvg::Tree> {
    let opts = usvg::Options::default();
    usvg::Tree::from_data(bytes, &opts).context("parse svg tree")
}

/// Rasterize an SVG tree at its intrinsic size.
pub fn rasterize_svg(tree: &usvg::Tree) -> anyhow::Result<PreparedImage> {
    fn to_px(v: f32) -> anyhow::Result<u32> {
        if !v.is_finite() || v <= 0.0 {
            bail!("svg has invalid width/height");
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let width = to_px(size.width())?;
    let height = to_px(size.height())?;
    check_dimensions(width, height)?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .context("allocate svg pixmap")?;
    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    resvg::render(
        tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    // tiny-skia pixmaps are already premultiplied RGBA8.
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.take()),
    })
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    // The cut at 512 bytes may split a multi-byte character.
    let text = match std::str::from_utf8(head) {
        Ok(text) => text,
        Err(e) => match std::str::from_utf8(&head[..e.valid_up_to()]) {
            Ok(text) => text,
            Err(_) => return false,
        },
    };
    let text = text.trim_start_matches('\u{feff}').trim_start();
    let doctype = text
        .get(.."<!DOCTYPE".len())
        .is_some_and(|p| p.eq_ignore_ascii_case("<!DOCTYPE"));
    let leading = text.starts_with("<?xml")
        || text.starts_with("<svg")
        || text.starts_with("<!--")
        || doctype;
    leading && text.contains("<svg")
}

fn check_dimensions(width: u32, height: u32) -> anyhow::Result<()> {
    if width == 0 || height == 0 {
        bail!("image has zero size ({width}x{height})");
    }
    if width > MAX_DIM || height > MAX_DIM {
        bail!("image too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})");
    }
    Ok(())
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
