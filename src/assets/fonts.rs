use std::{path::Path, sync::Arc};

use crate::{
    config::FontConfig,
    foundation::error::{PosterError, PosterResult},
};

/// Family preference of the overlay text, most preferred first.
pub const OVERLAY_FAMILIES: &[&str] = &["Arial"];

/// A single resolved font face.
#[derive(Clone)]
pub struct FontFace {
    /// Raw font file bytes (may be a collection).
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside `bytes`.
    pub index: u32,
    /// Family name reported by the font.
    pub family: String,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .field("family", &self.family)
            .finish()
    }
}

/// Font lookup over configured files, directories and (optionally) system fonts.
pub struct FontBook {
    db: usvg::fontdb::Database,
}

impl FontBook {
    /// Load every configured font source.
    ///
    /// Missing or unreadable entries are skipped; resolution fails later if nothing usable was
    /// loaded at all.
    pub fn from_config(cfg: &FontConfig) -> Self {
        let mut db = usvg::fontdb::Database::new();
        for file in &cfg.files {
            if let Err(e) = db.load_font_file(file) {
                tracing::warn!(path = %file.display(), error = %e, "skipping unreadable font file");
            }
        }
        for dir in &cfg.dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        if cfg.system_fonts {
            db.load_system_fonts();
        }
        tracing::debug!(faces = db.len(), "font book loaded");
        Self { db }
    }

    /// Build a book from in-memory font data only.
    pub fn from_bytes(font_bytes: Vec<u8>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_font_data(font_bytes);
        Self { db }
    }

    /// Number of loaded faces.
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// True when no faces were loaded.
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// Resolve the bold overlay face: preferred families, then generic sans-serif, then any face.
    pub fn resolve_bold(&self) -> PosterResult<FontFace> {
        use usvg::fontdb::{Family, Query, Stretch, Style, Weight};

        let mut families: Vec<Family<'_>> =
            OVERLAY_FAMILIES.iter().map(|f| Family::Name(f)).collect();
        families.push(Family::SansSerif);

        let query = Query {
            families: &families,
            weight: Weight::BOLD,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };

        let id = self
            .db
            .query(&query)
            .or_else(|| self.db.faces().next().map(|f| f.id))
            .ok_or_else(|| PosterError::font_unavailable("no font faces loaded"))?;

        let family = self
            .db
            .face(id)
            .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| "unknown".to_string());

        let (bytes, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| {
                PosterError::font_unavailable(format!("font data for '{family}' is unreadable"))
            })?;

        tracing::debug!(%family, index, "resolved overlay font");
        Ok(FontFace {
            bytes: Arc::new(bytes),
            index,
            family,
        })
    }
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font file");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
