//! Handing a finished poster to the platform: file save, native share, clipboard.

use std::{
    future::Future,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::{
    encode::EncodedImage,
    foundation::error::{PosterError, PosterResult},
};

/// File name offered to native share sheets.
pub const SHARE_FILE_NAME: &str = "DevFest-Poster.png";
/// Share sheet title.
pub const SHARE_TITLE: &str = "My DevFest Bhopal Poster";
/// Share sheet body text.
pub const SHARE_TEXT: &str = "Check out my custom DevFest poster!";

const DOWNLOAD_PREFIX: &str = "DevFest-Poster-";

/// `DevFest-Poster-<unix-millis>.png` for a save at `now`.
pub fn download_file_name(now: DateTime<Utc>) -> String {
    format!("{DOWNLOAD_PREFIX}{}.png", now.timestamp_millis())
}

/// A file attached to a share request.
#[derive(Clone, PartialEq, Eq)]
pub struct ShareFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ShareFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Everything a native share action receives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub files: Vec<ShareFile>,
}

impl SharePayload {
    /// Share payload carrying `image` as [`SHARE_FILE_NAME`].
    pub fn for_poster(image: &EncodedImage) -> Self {
        Self {
            title: SHARE_TITLE.to_string(),
            text: SHARE_TEXT.to_string(),
            files: vec![ShareFile {
                name: SHARE_FILE_NAME.to_string(),
                mime_type: image.mime_type().to_string(),
                bytes: image.png_bytes().to_vec(),
            }],
        }
    }
}

/// How a share request was finally delivered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The native share action accepted the file.
    Shared,
    /// The image was written to the clipboard instead.
    Clipboard,
    /// Neither was available; the image was saved under this file name.
    Downloaded(String),
}

/// Platform capabilities the dispatcher can use.
///
/// Capability queries default to "unsupported"; a target only has to implement what it offers.
pub trait DeliveryTarget {
    /// Save `bytes` as a file called `file_name`.
    fn save_file(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> impl Future<Output = anyhow::Result<()>>;

    /// Whether the platform has a file-capable share action at all.
    fn supports_file_share(&self) -> bool {
        false
    }

    /// Whether this particular payload can be shared.
    fn can_share(&self, _payload: &SharePayload) -> bool {
        false
    }

    /// Invoke the native share action.
    fn share(&self, _payload: &SharePayload) -> impl Future<Output = anyhow::Result<()>> {
        async { anyhow::bail!("native share is not available on this target") }
    }

    /// Whether image clipboard writes are available.
    fn supports_clipboard_image(&self) -> bool {
        false
    }

    /// Write a PNG to the clipboard.
    fn write_clipboard_image(
        &self,
        _mime_type: &str,
        _png: &[u8],
    ) -> impl Future<Output = anyhow::Result<()>> {
        async { anyhow::bail!("clipboard image writes are not available on this target") }
    }
}

/// Save `image` under a timestamped name and return that name.
pub async fn save_download<T: DeliveryTarget>(
    target: &T,
    image: &EncodedImage,
    now: DateTime<Utc>,
) -> PosterResult<String> {
    let name = download_file_name(now);
    target
        .save_file(&name, image.png_bytes())
        .await
        .map_err(|e| PosterError::share(format!("save '{name}': {e:#}")))?;
    tracing::info!(file = %name, "poster downloaded");
    Ok(name)
}

/// Share `image`, falling back to the clipboard and then to a download.
pub async fn share_image<T: DeliveryTarget>(
    target: &T,
    image: &EncodedImage,
    now: DateTime<Utc>,
) -> PosterResult<ShareOutcome> {
    if target.supports_file_share() {
        let payload = SharePayload::for_poster(image);
        if target.can_share(&payload) {
            target
                .share(&payload)
                .await
                .map_err(|e| PosterError::share(format!("native share: {e:#}")))?;
            tracing::info!("poster shared");
            return Ok(ShareOutcome::Shared);
        }
        tracing::debug!("target cannot share the poster file");
    }

    if target.supports_clipboard_image() {
        copy_image(target, image).await?;
        return Ok(ShareOutcome::Clipboard);
    }

    tracing::info!("no share or clipboard support, falling back to download");
    save_download(target, image, now)
        .await
        .map(ShareOutcome::Downloaded)
}

/// Write `image` to the clipboard.
pub async fn copy_image<T: DeliveryTarget>(target: &T, image: &EncodedImage) -> PosterResult<()> {
    if !target.supports_clipboard_image() {
        return Err(PosterError::share(
            "clipboard image writes are not supported",
        ));
    }
    target
        .write_clipboard_image(image.mime_type(), image.png_bytes())
        .await
        .map_err(|e| PosterError::share(format!("clipboard write: {e:#}")))?;
    tracing::info!("poster copied to clipboard");
    Ok(())
}

/// Desktop target that writes files into a directory. It has no share or clipboard support.
#[derive(Clone, Debug)]
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DeliveryTarget for DirectoryTarget {
    async fn save_file(&self, file_name: &str, bytes: &[u8]) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))
    }
}

#[cfg(test)]
#[path = "../tests/unit/deliver.rs"]
mod tests;
