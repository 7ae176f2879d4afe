/// Crate-wide result alias.
pub type StoryreelResult<T> = Result<T, StoryreelError>;

/// Error taxonomy for the composition engine.
///
/// The variants map onto the three abort classes a job can hit: bad input
/// (rejected before any side effects), a failed external collaborator, and a
/// background video that cannot cover the required duration. Degraded-mode
/// fallbacks (missing audio, decode failures, out-of-range overlays) are
/// logged warnings, never errors.
#[derive(thiserror::Error, Debug)]
pub enum StoryreelError {
    /// Malformed request input (script, speaker count, file type).
    #[error("input error: {0}")]
    Input(String),

    /// An external collaborator (synthesis, captioning, looping) failed.
    #[error("collaborator error: {0}")]
    Collaborator(String),

    /// Background video shorter than the required output while looping is off.
    #[error(
        "background video too short: required {required:.2}s, available {available:.2}s (enable looping or upload a longer video)"
    )]
    DurationMismatch {
        /// Duration the background video actually provides, in seconds.
        available: f64,
        /// Duration the audio track requires, in seconds.
        required: f64,
    },

    /// Final render/encode failure.
    #[error("render error: {0}")]
    Render(String),

    /// Anything else, carried through unchanged.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryreelError {
    /// Shorthand for [`StoryreelError::Input`].
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Shorthand for [`StoryreelError::Collaborator`].
    pub fn collaborator(msg: impl Into<String>) -> Self {
        Self::Collaborator(msg.into())
    }

    /// Shorthand for [`StoryreelError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
