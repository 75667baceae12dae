use chrono::Utc;

use crate::{
    assets::{
        fonts::FontBook,
        loader::{AssetFetcher, AssetLoader, StdFetcher},
        source::ImageSource,
        template::TemplateId,
    },
    config::PosterConfig,
    deliver::{self, DeliveryTarget, ShareOutcome},
    encode::{self, EncodedImage},
    foundation::core::FrameSpec,
    foundation::error::PosterResult,
    render::{composite, surface::Surface, text::TextOverlay},
};

/// One poster to generate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PosterRequest {
    /// The user photo placed inside the frame.
    pub photo: ImageSource,
    /// Background artwork.
    pub template: TemplateId,
    /// Frame shape hint. Accepted but unused: the frame is always a circle.
    pub frame_type: Option<String>,
    /// Free-form message. Accepted but never drawn.
    pub custom_message: Option<String>,
}

impl PosterRequest {
    pub fn new(photo: impl Into<ImageSource>) -> Self {
        Self {
            photo: photo.into(),
            template: TemplateId::default(),
            frame_type: None,
            custom_message: None,
        }
    }

    pub fn with_template(mut self, template: TemplateId) -> Self {
        self.template = template;
        self
    }

    pub fn with_frame_type(mut self, frame_type: impl Into<String>) -> Self {
        self.frame_type = Some(frame_type.into());
        self
    }

    pub fn with_custom_message(mut self, message: impl Into<String>) -> Self {
        self.custom_message = Some(message.into());
        self
    }
}

/// Composes posters: template, framed photo, text overlay, PNG.
///
/// Every call to [`PosterGenerator::generate`] owns a fresh [`Surface`]; nothing is carried
/// from one poster to the next except the loader and the shaped-font caches.
#[derive(Debug)]
pub struct PosterGenerator<F> {
    loader: AssetLoader<F>,
    overlay: TextOverlay,
    frame: FrameSpec,
}

impl PosterGenerator<StdFetcher> {
    /// Generator backed by disk and HTTP, with fonts resolved from `cfg`.
    pub fn from_config(cfg: &PosterConfig) -> PosterResult<Self> {
        let face = FontBook::from_config(&cfg.fonts).resolve_bold()?;
        let overlay = TextOverlay::new(&face, cfg.copy.clone())?;
        Ok(Self::new(StdFetcher::from_config(cfg), overlay))
    }
}

impl<F: AssetFetcher> PosterGenerator<F> {
    pub fn new(fetcher: F, overlay: TextOverlay) -> Self {
        Self {
            loader: AssetLoader::new(fetcher),
            overlay,
            frame: FrameSpec::DEFAULT,
        }
    }

    /// Use a different poster and frame geometry.
    pub fn with_frame(mut self, frame: FrameSpec) -> Self {
        self.frame = frame;
        self
    }

    pub fn frame(&self) -> &FrameSpec {
        &self.frame
    }

    pub fn loader(&self) -> &AssetLoader<F> {
        &self.loader
    }

    /// Generate one poster.
    ///
    /// The surface is allocated before anything is loaded, and the template is drawn before the
    /// photo is requested. The first failure aborts the poster; no partial image is returned.
    #[tracing::instrument(skip(self, request), fields(template = %request.template))]
    pub async fn generate(&mut self, request: &PosterRequest) -> PosterResult<EncodedImage> {
        let mut surface = Surface::new(self.frame.canvas())?;
        tracing::debug!(
            width = surface.width(),
            height = surface.height(),
            "surface allocated"
        );

        let template = self.loader.load_template(request.template).await?;
        composite::draw_template(&mut surface, &template)?;
        tracing::debug!(w = template.width, h = template.height, "template drawn");

        let photo = self.loader.load_user_image(&request.photo).await?;
        composite::draw_framed_photo(&mut surface, &photo, &self.frame)?;
        tracing::debug!(w = photo.width, h = photo.height, "photo framed");

        self.overlay.render(&mut surface, &self.frame)?;
        tracing::debug!("text overlay drawn");

        encode::encode(surface)
    }

    /// Generate and save as `DevFest-Poster-<unix-millis>.png`. Returns the file name.
    pub async fn download<T: DeliveryTarget>(
        &mut self,
        request: &PosterRequest,
        target: &T,
    ) -> PosterResult<String> {
        let image = self.generate(request).await?;
        deliver::save_download(target, &image, Utc::now()).await
    }

    /// Generate and share, falling back to the clipboard, then to a download.
    pub async fn share<T: DeliveryTarget>(
        &mut self,
        request: &PosterRequest,
        target: &T,
    ) -> PosterResult<ShareOutcome> {
        let image = self.generate(request).await?;
        deliver::share_image(target, &image, Utc::now()).await
    }

    /// Generate and write the PNG to the clipboard.
    pub async fn copy_to_clipboard<T: DeliveryTarget>(
        &mut self,
        request: &PosterRequest,
        target: &T,
    ) -> PosterResult<()> {
        let image = self.generate(request).await?;
        deliver::copy_image(target, &image).await
    }
}
