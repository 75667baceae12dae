use std::{fmt, str::FromStr};

use crate::foundation::error::{PosterError, PosterResult};

/// One of the fixed poster backgrounds.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    /// `poster1`
    #[default]
    Poster1,
    /// `poster2`
    Poster2,
    /// `poster3`
    Poster3,
    /// `poster4`
    Poster4,
}

impl TemplateId {
    /// Every template, in identifier order.
    pub const ALL: [TemplateId; 4] = [
        TemplateId::Poster1,
        TemplateId::Poster2,
        TemplateId::Poster3,
        TemplateId::Poster4,
    ];

    /// Stable identifier used on the wire and in file names.
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Poster1 => "poster1",
            TemplateId::Poster2 => "poster2",
            TemplateId::Poster3 => "poster3",
            TemplateId::Poster4 => "poster4",
        }
    }

    /// Template artwork location, relative to the template root.
    pub fn asset_path(self) -> &'static str {
        match self {
            TemplateId::Poster1 => "uploads/devfest-poster1.png",
            TemplateId::Poster2 => "uploads/devfest-poster2.png",
            TemplateId::Poster3 => "uploads/devfest-poster3.png",
            TemplateId::Poster4 => "uploads/devfest-poster4.png",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = PosterError;

    fn from_str(s: &str) -> PosterResult<Self> {
        let s = s.trim();
        TemplateId::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                PosterError::validation(format!(
                    "unknown template '{s}' (expected one of poster1, poster2, poster3, poster4)"
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/template.rs"]
mod tests;
