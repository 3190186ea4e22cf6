//! Error types for the story engine.
//!
//! Player mistakes are errors too. Their `Display` text is what the player
//! reads, so they are phrased as game prose rather than diagnostics.

use std::path::PathBuf;

use thiserror::Error;
use wf_core::CoreError;
use wf_worldgen::GenError;

/// Result type for story engine operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Errors that can occur while playing.
#[derive(Debug, Error)]
pub enum FictionError {
    /// Input that maps to no known command.
    #[error("I don't understand that command.")]
    UnknownCommand(String),

    /// A command missing its object, e.g. a bare `take`.
    #[error("{0}")]
    Incomplete(&'static str),

    /// No exit in that direction.
    #[error("You can't go {0} from here.")]
    CannotGo(String),

    /// The named item is not lying here.
    #[error("No {0} here to take.")]
    ItemNotHere(String),

    /// The named item is not being carried.
    #[error("You aren't carrying any {0}.")]
    ItemNotInInventory(String),

    /// An item with the same name is already carried.
    #[error("You already carry a {0}.")]
    AlreadyCarrying(String),

    /// The named NPC is not here.
    #[error("No {0} here to talk to.")]
    NpcNotHere(String),

    /// Already in a conversation with that NPC.
    #[error("You are already talking to {0}.")]
    AlreadyTalking(String),

    /// A closing word with no conversation in progress.
    #[error("You are not talking to anyone.")]
    NotInConversation,

    /// Backtrack target not in recent history, or already there.
    #[error("You can't retrace your steps to {0}.")]
    NoHistoryEntry(String),

    /// A scripted action whose condition does not hold.
    #[error("You can't {0} right now.")]
    ConditionNotMet(String),

    /// Exploring from a scene whose paths are already charted.
    #[error("The paths from {scene} are already charted. Try going somewhere instead.")]
    ExplorationUnavailable {
        /// Scene name.
        scene: String,
    },

    /// Reading or writing a save file failed.
    #[error("could not access save file {path}: {source}")]
    SaveIo {
        /// Path of the save file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A save file that is not valid save JSON.
    #[error("save file is corrupt: {0}")]
    SaveFormat(#[from] serde_json::Error),

    /// No save with that name.
    #[error("no save named {0}")]
    SaveNotFound(String),

    /// A save name that would leave the save directory.
    #[error("invalid save name: {0}")]
    InvalidSaveName(String),

    /// An operation that needs a run before one was started.
    #[error("No run active. Start a new run first.")]
    NoActiveRun,

    /// Scene graph failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Generation failure.
    #[error(transparent)]
    Gen(#[from] GenError),
}

impl FictionError {
    /// Whether this is a recoverable player mistake rather than a fault.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCommand(_)
                | Self::Incomplete(_)
                | Self::CannotGo(_)
                | Self::ItemNotHere(_)
                | Self::ItemNotInInventory(_)
                | Self::AlreadyCarrying(_)
                | Self::NpcNotHere(_)
                | Self::AlreadyTalking(_)
                | Self::NotInConversation
                | Self::NoHistoryEntry(_)
                | Self::ConditionNotMet(_)
                | Self::ExplorationUnavailable { .. }
        )
    }
}

/// Failures of the remote intent classifier. Never fatal.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The HTTP request failed.
    #[error("classifier request failed: {0}")]
    Request(String),

    /// The service did not answer in time.
    #[error("classifier timed out")]
    Timeout,

    /// The service answered with something unexpected.
    #[error("invalid classifier response: {0}")]
    InvalidResponse(String),

    /// The classifier is not configured.
    #[error("classifier unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for ClassifierError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}
