use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{foundation::error::PosterResult, render::text::OverlayCopy};

/// Runtime configuration for loaders, fonts and the text overlay.
///
/// Every field has a default, so an empty JSON object is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PosterConfig {
    /// Directory the template table's relative paths are resolved against.
    pub template_dir: PathBuf,
    /// Font sources for the text overlay.
    pub fonts: FontConfig,
    /// Remote photo fetching.
    pub http: HttpConfig,
    /// Overlay strings.
    pub copy: OverlayCopy,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("public"),
            fonts: FontConfig::default(),
            http: HttpConfig::default(),
            copy: OverlayCopy::default(),
        }
    }
}

/// Where overlay fonts are looked up, in priority order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    /// Individual font files (`.ttf`, `.otf`, `.ttc`).
    pub files: Vec<PathBuf>,
    /// Directories scanned for font files.
    pub dirs: Vec<PathBuf>,
    /// Also consult fonts installed on the system.
    pub system_fonts: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            files: vec![],
            dirs: vec![],
            system_fonts: true,
        }
    }
}

/// HTTP settings for `http(s)` photo sources.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// Global request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Largest accepted response body.
    pub max_body_bytes: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            max_body_bytes: 20 * 1024 * 1024,
            user_agent: concat!("posterkit/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl PosterConfig {
    /// Read a JSON configuration file.
    pub fn from_path(path: &Path) -> PosterResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg = serde_json::from_str(&text)
            .with_context(|| format!("parse config '{}'", path.display()))?;
        Ok(cfg)
    }

    /// Apply `POSTERKIT_*` environment overrides on top of the current values.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = get("POSTERKIT_TEMPLATE_DIR").filter(|v| !v.is_empty()) {
            self.template_dir = PathBuf::from(dir);
        }
        if let Some(file) = get("POSTERKIT_FONT_FILE").filter(|v| !v.is_empty()) {
            self.fonts.files.insert(0, PathBuf::from(file));
        }
        if let Some(ms) = get("POSTERKIT_HTTP_TIMEOUT_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&n| n > 0)
        {
            self.http.timeout_ms = ms;
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
