//! Error types for world generation.

use thiserror::Error;
use wf_core::CoreError;

/// Result type for generation operations.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that can occur while generating or extending a world.
#[derive(Debug, Error)]
pub enum GenError {
    /// The scene graph rejected an operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The scene already has enough charted exits to make exploring pointless.
    #[error("{scene} already has {exits} charted exits")]
    NotSparse {
        /// Scene the player tried to explore from.
        scene: String,
        /// How many exits it has.
        exits: usize,
    },
}
