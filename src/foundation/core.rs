use crate::foundation::error::{PosterError, PosterResult};

pub use kurbo::{Affine, BezPath, Circle, Point, Rect, Vec2};

/// Pixel dimensions of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// Build an opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Build an opaque color from `0xRRGGBB`.
    pub const fn from_hex(rgb: u32) -> Self {
        Self::opaque((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }
}

/// Poster geometry: canvas size plus the square bounding the circular photo frame.
///
/// The frame is centered on both axes. `frame_x`/`frame_y` are derived, and construction
/// rejects any combination where the frame would spill past the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSpec {
    poster_width: u32,
    poster_height: u32,
    frame_size: u32,
}

impl FrameSpec {
    /// Poster width used for every generated poster.
    pub const POSTER_WIDTH: u32 = 1080;
    /// Poster height used for every generated poster.
    pub const POSTER_HEIGHT: u32 = 1920;
    /// Diameter of the circular photo frame.
    pub const FRAME_SIZE: u32 = 620;

    /// The fixed 1080x1920 poster with a 620px frame.
    pub const DEFAULT: Self = Self {
        poster_width: Self::POSTER_WIDTH,
        poster_height: Self::POSTER_HEIGHT,
        frame_size: Self::FRAME_SIZE,
    };

    /// Build a custom geometry, validating that the centered frame fits the canvas.
    pub fn new(poster_width: u32, poster_height: u32, frame_size: u32) -> PosterResult<Self> {
        if frame_size == 0 {
            return Err(PosterError::validation("frame size must be > 0"));
        }
        let out = Self {
            poster_width,
            poster_height,
            frame_size,
        };
        let size = f64::from(frame_size);
        if frame_size > poster_width
            || frame_size > poster_height
            || out.frame_x() + size > f64::from(poster_width)
            || out.frame_y() + size > f64::from(poster_height)
        {
            return Err(PosterError::validation(format!(
                "frame of {frame_size}px does not fit a {poster_width}x{poster_height} poster"
            )));
        }
        Ok(out)
    }

    /// Canvas the poster is drawn on.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.poster_width,
            height: self.poster_height,
        }
    }

    /// Frame diameter in pixels.
    pub fn frame_size(&self) -> f64 {
        f64::from(self.frame_size)
    }

    /// Left edge of the frame's bounding square.
    pub fn frame_x(&self) -> f64 {
        (f64::from(self.poster_width) - self.frame_size()) / 2.0
    }

    /// Top edge of the frame's bounding square.
    pub fn frame_y(&self) -> f64 {
        (f64::from(self.poster_height) - self.frame_size()) / 2.0
    }

    /// Bounding square of the circular frame.
    pub fn frame_rect(&self) -> Rect {
        Rect::new(
            self.frame_x(),
            self.frame_y(),
            self.frame_x() + self.frame_size(),
            self.frame_y() + self.frame_size(),
        )
    }

    /// Circular clip region the photo is confined to.
    pub fn frame_circle(&self) -> Circle {
        let r = self.frame_size() / 2.0;
        Circle::new((self.frame_x() + r, self.frame_y() + r), r)
    }
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
