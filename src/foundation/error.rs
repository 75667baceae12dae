/// Convenience result type used across posterkit.
pub type PosterResult<T> = Result<T, PosterError>;

/// Top-level error taxonomy used by composition and delivery APIs.
#[derive(thiserror::Error, Debug)]
pub enum PosterError {
    /// The drawing surface could not be created. Raised before any asset load.
    #[error("canvas unavailable: {0}")]
    CanvasUnavailable(String),

    /// The poster template failed to fetch or decode.
    #[error("failed to load poster template '{template}': {source:#}")]
    TemplateLoad {
        /// Template identifier that was requested.
        template: String,
        /// Underlying fetch or decode failure.
        source: anyhow::Error,
    },

    /// The user-supplied photo failed to fetch or decode.
    #[error("failed to load user image: {source:#}")]
    UserImageLoad {
        /// Underlying fetch or decode failure.
        source: anyhow::Error,
    },

    /// Delivery failed after a successful composition.
    #[error("share error: {0}")]
    Share(String),

    /// No usable font face could be resolved for the text overlay.
    #[error("font unavailable: {0}")]
    FontUnavailable(String),

    /// Invalid caller-provided data (identifiers, geometry, configuration).
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Fieldless view of [`PosterError`] for callers that only match on the category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PosterErrorKind {
    /// See [`PosterError::CanvasUnavailable`].
    CanvasUnavailable,
    /// See [`PosterError::TemplateLoad`].
    TemplateLoad,
    /// See [`PosterError::UserImageLoad`].
    UserImageLoad,
    /// See [`PosterError::Share`].
    Share,
    /// See [`PosterError::FontUnavailable`].
    FontUnavailable,
    /// See [`PosterError::Validation`].
    Validation,
    /// See [`PosterError::Other`].
    Other,
}

impl PosterError {
    /// Build a [`PosterError::CanvasUnavailable`] value.
    pub fn canvas_unavailable(msg: impl Into<String>) -> Self {
        Self::CanvasUnavailable(msg.into())
    }

    /// Build a [`PosterError::TemplateLoad`] value.
    pub fn template_load(template: impl Into<String>, source: anyhow::Error) -> Self {
        Self::TemplateLoad {
            template: template.into(),
            source,
        }
    }

    /// Build a [`PosterError::UserImageLoad`] value.
    pub fn user_image_load(source: anyhow::Error) -> Self {
        Self::UserImageLoad { source }
    }

    /// Build a [`PosterError::Share`] value.
    pub fn share(msg: impl Into<String>) -> Self {
        Self::Share(msg.into())
    }

    /// Build a [`PosterError::FontUnavailable`] value.
    pub fn font_unavailable(msg: impl Into<String>) -> Self {
        Self::FontUnavailable(msg.into())
    }

    /// Build a [`PosterError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Category of this error.
    pub fn kind(&self) -> PosterErrorKind {
        match self {
            Self::CanvasUnavailable(_) => PosterErrorKind::CanvasUnavailable,
            Self::TemplateLoad { .. } => PosterErrorKind::TemplateLoad,
            Self::UserImageLoad { .. } => PosterErrorKind::UserImageLoad,
            Self::Share(_) => PosterErrorKind::Share,
            Self::FontUnavailable(_) => PosterErrorKind::FontUnavailable,
            Self::Validation(_) => PosterErrorKind::Validation,
            Self::Other(_) => PosterErrorKind::Other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
