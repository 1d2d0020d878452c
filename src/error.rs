//! Error types for the scene runtime.

use thiserror::Error;

/// Failures that stop the runtime from continuing.
///
/// Missing NPC scripts or terrain images are not errors: those definitions are
/// logged and skipped at scene load.
#[derive(Debug, Error)]
pub enum GameError {
    /// A scene id was requested that the catalog does not define, and no
    /// fallback scene was available.
    #[error("scene '{requested}' not found and no fallback scene is available")]
    SceneNotFound { requested: String },

    /// The catalog defines no scenes at all.
    #[error("game data defines no scenes")]
    NoScenes,

    /// Game data or configuration JSON could not be parsed.
    #[error("invalid game data: {0}")]
    InvalidData(#[from] serde_json::Error),

    /// An animation definition has no frames or a non-positive frame duration.
    #[error("animation '{key}' must have at least one frame and a positive frame duration")]
    EmptyAnimation { key: String },

    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for runtime operations.
pub type Result<T> = std::result::Result<T, GameError>;
