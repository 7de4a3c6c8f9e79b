/// Result alias used throughout the crate.
pub type SceneResult<T> = Result<T, SceneError>;

/// Error taxonomy of the scene compositor.
///
/// Almost nothing in the per-frame path can fail; errors surface at configuration time, while
/// preparing assets, or when a raster backend cannot allocate its surface.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Configuration rejected by [`crate::SceneConfig::validate`].
    #[error("validation error: {0}")]
    Validation(String),

    /// Asset fetch or decode failure.
    #[error("asset error: {0}")]
    Asset(String),

    /// Backend-level rendering failure.
    #[error("render error: {0}")]
    Render(String),

    /// Any other error with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`SceneError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
