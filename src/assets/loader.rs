use std::{
    future::Future,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, bail};

use crate::{
    assets::{
        PreparedImage, decode,
        source::{ImageSource, decode_data_url},
        template::TemplateId,
    },
    config::{HttpConfig, PosterConfig},
    foundation::error::{PosterError, PosterResult},
};

/// Byte-level I/O collaborator behind [`AssetLoader`].
///
/// Implementations may suspend. They report raw failures; [`AssetLoader`] attributes them to
/// the asset that failed.
pub trait AssetFetcher {
    /// Fetch the encoded artwork for `id`.
    fn fetch_template(&self, id: TemplateId) -> impl Future<Output = anyhow::Result<Vec<u8>>>;

    /// Fetch an `http(s)` URL.
    fn fetch_url(&self, url: &str) -> impl Future<Output = anyhow::Result<Vec<u8>>>;

    /// Read a local file.
    fn fetch_path(&self, path: &Path) -> impl Future<Output = anyhow::Result<Vec<u8>>> {
        let path = path.to_path_buf();
        async move {
            std::fs::read(&path).with_context(|| format!("read '{}'", path.display()))
        }
    }
}

/// Resolves templates and user photos into decoded bitmaps.
#[derive(Clone, Debug)]
pub struct AssetLoader<F> {
    fetcher: F,
}

impl<F: AssetFetcher> AssetLoader<F> {
    /// Wrap a fetcher.
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Borrow the underlying fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Load and decode the template artwork. Every failure is a [`PosterError::TemplateLoad`].
    pub async fn load_template(&self, id: TemplateId) -> PosterResult<PreparedImage> {
        let bytes = self
            .fetcher
            .fetch_template(id)
            .await
            .map_err(|e| PosterError::template_load(id.as_str(), e))?;
        decode::decode_image(&bytes)
            .with_context(|| format!("decode template artwork '{}'", id.asset_path()))
            .map_err(|e| PosterError::template_load(id.as_str(), e))
    }

    /// Load and decode the user photo. Every failure is a [`PosterError::UserImageLoad`].
    pub async fn load_user_image(&self, source: &ImageSource) -> PosterResult<PreparedImage> {
        let bytes = match source {
            ImageSource::Bytes(b) => Ok(b.clone()),
            ImageSource::DataUrl(u) => decode_data_url(u),
            ImageSource::Url(u) => self.fetcher.fetch_url(u).await,
            ImageSource::Path(p) => self.fetcher.fetch_path(p).await,
        }
        .map_err(PosterError::user_image_load)?;

        decode::decode_image(&bytes)
            .with_context(|| format!("decode user image from {}", source.describe()))
            .map_err(PosterError::user_image_load)
    }
}

/// Default fetcher: templates and paths from disk, URLs over HTTP.
///
/// I/O is blocking and runs inline when the future is polled.
#[derive(Clone, Debug)]
pub struct StdFetcher {
    template_dir: PathBuf,
    http: HttpConfig,
}

impl StdFetcher {
    /// Build a fetcher rooted at `template_dir`.
    pub fn new(template_dir: impl Into<PathBuf>, http: HttpConfig) -> Self {
        Self {
            template_dir: template_dir.into(),
            http,
        }
    }

    /// Build a fetcher from the loader-related parts of `cfg`.
    pub fn from_config(cfg: &PosterConfig) -> Self {
        Self::new(cfg.template_dir.clone(), cfg.http.clone())
    }

    /// Directory template paths are resolved against.
    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    fn fetch_http(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_millis(self.http.timeout_ms)))
            .build();
        let agent: ureq::Agent = config.into();

        let mut response = agent
            .get(url)
            .header("User-Agent", &self.http.user_agent)
            .call()
            .with_context(|| format!("GET {url}"))?;

        let bytes = response
            .body_mut()
            .with_config()
            .limit(self.http.max_body_bytes)
            .read_to_vec()
            .with_context(|| format!("read response body from {url}"))?;
        if bytes.is_empty() {
            bail!("empty HTTP response body from {url}");
        }
        Ok(bytes)
    }
}

impl AssetFetcher for StdFetcher {
    async fn fetch_template(&self, id: TemplateId) -> anyhow::Result<Vec<u8>> {
        let path = self.template_dir.join(id.asset_path());
        std::fs::read(&path).with_context(|| format!("read template '{}'", path.display()))
    }

    async fn fetch_url(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        self.fetch_http(url)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
