/// Convenience result type used across Dramaton.
pub type DramaResult<T> = Result<T, DramaError>;

/// Failures surfaced by project loading, stage editing and playback.
///
/// Resolution misses (no graphic, no audio, unknown GOTO target) are never errors; they
/// degrade to a placeholder or a logged warning. What remains here is malformed project
/// data and calls made in the wrong interpreter state.
#[derive(thiserror::Error, Debug)]
pub enum DramaError {
    /// Project or stage data that breaks an invariant: duplicate ids, duplicate scene
    /// names, sfx values outside `0..=100`, a zero-sized canvas, an unknown scene id, or a
    /// stage with no z-index left above its top element.
    #[error("validation error: {0}")]
    Validation(String),

    /// Playback driven out of order: advancing before a scene starts, dismissing an
    /// establishing shot twice, or a menu choice while no scene-complete menu is open.
    #[error("script error: {0}")]
    Script(String),

    /// Malformed project JSON, or a project or snapshot that failed to encode.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Project and snapshot file IO, carried with the path that failed.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DramaError {
    /// Build a [`DramaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DramaError::Script`] value.
    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }

    /// Build a [`DramaError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
