//! PNG encoding of a finished poster.

use base64::Engine as _;
use image::ImageEncoder as _;

use crate::{
    foundation::error::{PosterError, PosterResult},
    render::surface::{FrameRGBA, Surface},
};

/// Prefix every poster data URI starts with.
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encoded poster image.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    png: Vec<u8>,
}

impl EncodedImage {
    /// Always `image/png`.
    pub fn mime_type(&self) -> &'static str {
        "image/png"
    }

    /// Raw PNG bytes.
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Take the PNG bytes.
    pub fn into_png_bytes(self) -> Vec<u8> {
        self.png
    }

    /// `data:image/png;base64,...` form of the image.
    pub fn to_data_uri(&self) -> String {
        let b64 = base64::engine::general_purpose::STANDARD.encode(&self.png);
        let mut out = String::with_capacity(DATA_URI_PREFIX.len() + b64.len());
        out.push_str(DATA_URI_PREFIX);
        out.push_str(&b64);
        out
    }
}

impl std::fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("png_len", &self.png.len())
            .finish()
    }
}

/// Rasterize `surface` and encode it.
pub fn encode(surface: Surface) -> PosterResult<EncodedImage> {
    encode_frame(&surface.finish())
}

/// Encode a raster readback as PNG.
///
/// Premultiplied input is converted to straight alpha first. Encoder settings are fixed so the
/// same pixels always give the same bytes.
#[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
pub fn encode_frame(frame: &FrameRGBA) -> PosterResult<EncodedImage> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(PosterError::validation(format!(
            "frame byte length {} does not match {}x{} RGBA8",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let mut straight = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_in_place(&mut straight);
    }

    let mut png = Vec::new();
    image::codecs::png::PngEncoder::new_with_quality(
        &mut png,
        image::codecs::png::CompressionType::Best,
        image::codecs::png::FilterType::Adaptive,
    )
    .write_image(
        &straight,
        frame.width,
        frame.height,
        image::ExtendedColorType::Rgba8,
    )
    .map_err(|e| PosterError::Other(anyhow::anyhow!("png encode failed: {e}")))?;

    tracing::debug!(bytes = png.len(), "encoded poster");
    Ok(EncodedImage {
        width: frame.width,
        height: frame.height,
        png,
    })
}

fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/encode.rs"]
mod tests;
