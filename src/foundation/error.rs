/// Convenience result type used throughout neon-heart.
pub type NeonResult<T> = Result<T, NeonError>;

/// Top-level error type for neon-heart operations.
///
/// The animation core itself never returns these to a caller: a surface that cannot be acquired
/// simply skips the run. Errors surface from hosts (recorder, sinks, CLI) where there is someone
/// to report to.
#[derive(thiserror::Error, Debug)]
pub enum NeonError {
    /// Invalid user input or options.
    #[error("validation error: {0}")]
    Validation(String),

    /// The drawable context could not be obtained (zero-sized or oversized surface).
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// Rasterization failed or was asked for something it cannot do.
    #[error("render error: {0}")]
    Render(String),

    /// Frame output (PNG files, ffmpeg) failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NeonError {
    /// Build a [`NeonError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`NeonError::SurfaceUnavailable`] value.
    pub fn surface_unavailable(msg: impl Into<String>) -> Self {
        Self::SurfaceUnavailable(msg.into())
    }

    /// Build a [`NeonError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`NeonError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
