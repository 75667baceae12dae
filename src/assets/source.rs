use std::path::PathBuf;

use anyhow::{Context, bail};
use base64::Engine as _;

/// Where the user photo comes from.
///
/// The system only borrows the photo for the duration of one composition.
#[derive(Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Remote `http://` or `https://` URL.
    Url(String),
    /// RFC 2397 `data:` URL carrying the image inline.
    DataUrl(String),
    /// Local file.
    Path(PathBuf),
    /// Encoded image bytes already in memory.
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// Classify a caller-provided reference by its prefix.
    ///
    /// `data:` and `http(s)://` are recognized, `file://` is stripped to a path, and anything
    /// else is treated as a local path.
    pub fn parse(reference: &str) -> Self {
        let r = reference.trim();
        if has_prefix_ignore_case(r, "data:") {
            ImageSource::DataUrl(r.to_string())
        } else if has_prefix_ignore_case(r, "http://") || has_prefix_ignore_case(r, "https://") {
            ImageSource::Url(r.to_string())
        } else if has_prefix_ignore_case(r, "file://") {
            ImageSource::Path(PathBuf::from(&r["file://".len()..]))
        } else {
            ImageSource::Path(PathBuf::from(r))
        }
    }

    /// Short description safe to log (never includes inline payloads).
    pub fn describe(&self) -> String {
        match self {
            ImageSource::Url(u) => u.clone(),
            ImageSource::DataUrl(d) => format!("data url ({} chars)", d.len()),
            ImageSource::Path(p) => p.display().to_string(),
            ImageSource::Bytes(b) => format!("in-memory bytes ({} bytes)", b.len()),
        }
    }
}

impl std::fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ImageSource").field(&self.describe()).finish()
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        ImageSource::Bytes(bytes)
    }
}

impl From<&str> for ImageSource {
    fn from(reference: &str) -> Self {
        ImageSource::parse(reference)
    }
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Decode a `data:` URL into its payload bytes.
pub fn decode_data_url(url: &str) -> anyhow::Result<Vec<u8>> {
    if !has_prefix_ignore_case(url, "data:") {
        bail!("URL does not start with 'data:'");
    }
    let rest = &url["data:".len()..];
    let (metadata, data) = rest
        .split_once(',')
        .context("missing comma in data URL")?;

    let is_base64 = metadata
        .split(';')
        .skip(1)
        .any(|p| p.trim().eq_ignore_ascii_case("base64"));

    if is_base64 {
        decode_base64_data(data)
    } else {
        percent_decode(data)
    }
}

fn decode_base64_data(data: &str) -> anyhow::Result<Vec<u8>> {
    let cleaned: Vec<u8> = data
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    base64::engine::general_purpose::STANDARD
        .decode(cleaned)
        .context("invalid base64 payload in data URL")
}

fn percent_decode(input: &str) -> anyhow::Result<Vec<u8>> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        if i + 2 >= bytes.len() {
            bail!("incomplete percent-escape in data URL");
        }
        let hi = (bytes[i + 1] as char).to_digit(16);
        let lo = (bytes[i + 2] as char).to_digit(16);
        match (hi, lo) {
            (Some(hi), Some(lo)) => {
                out.push(((hi << 4) | lo) as u8);
                i += 3;
            }
            _ => bail!("invalid percent-escape in data URL"),
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
