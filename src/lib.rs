//! `posterkit` composes personalized event posters.
//!
//! A poster is a fixed template image, the user's photo clipped into a circular frame, and a
//! stroked text overlay, encoded as a 1080x1920 PNG:
//!
//! 1. [`AssetLoader`] resolves the template and the photo through an [`AssetFetcher`].
//! 2. [`render::composite`] draws both onto a [`Surface`].
//! 3. [`TextOverlay`] draws the five overlay strings.
//! 4. [`encode`] produces an [`EncodedImage`], which [`deliver`] hands to a
//!    [`DeliveryTarget`].
//!
//! [`PosterGenerator`] runs the whole sequence.

#![forbid(unsafe_code)]

pub mod assets;
pub mod config;
pub mod deliver;
pub mod encode;
pub mod foundation;
pub mod pipeline;
pub mod render;

pub use assets::{
    PreparedImage,
    fonts::{FontBook, FontFace},
    loader::{AssetFetcher, AssetLoader, StdFetcher},
    source::ImageSource,
    template::TemplateId,
};
pub use config::{FontConfig, HttpConfig, PosterConfig};
pub use deliver::{DeliveryTarget, DirectoryTarget, ShareOutcome, SharePayload};
pub use encode::{DATA_URI_PREFIX, EncodedImage};
pub use foundation::core::{Canvas, FrameSpec, Rgba8};
pub use foundation::error::{PosterError, PosterErrorKind, PosterResult};
pub use pipeline::{PosterGenerator, PosterRequest};
pub use render::{
    surface::Surface,
    text::{OverlayCopy, TextOverlay},
};
