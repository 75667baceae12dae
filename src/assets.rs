use std::sync::Arc;

pub mod decode;
pub mod fonts;
pub mod loader;
pub mod source;
pub mod template;

/// Decoded bitmap ready to be drawn.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}
