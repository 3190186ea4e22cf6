//! Story engine for Wayfarer.
//!
//! Ties a generated [`wf_core::Run`] to a single player's [`GameState`] and
//! turns loosely typed text into game actions. Player input flows through
//! the [`interpreter`] (staged matching against the legal choices, with an
//! optional remote intent classifier as last resort), then either into the
//! [`conversation`] state machine or the top-level command dispatcher.
//! [`StoryEngine`] exposes the whole surface: start, describe, command,
//! save, load.

/// Engine and classifier configuration.
pub mod config;
/// Boolean flag conditions for scripted scene actions.
pub mod condition;
/// NPC conversation state machine.
pub mod conversation;
/// Error types for the story engine.
pub mod error;
/// Command parsing and free-text interpretation.
pub mod interpreter;
/// Save files.
pub mod persistence;
/// Player state.
pub mod player;
/// The story engine session.
pub mod session;
/// Serializable snapshots handed to front ends.
pub mod view;

pub use config::{ClassifierConfig, EngineConfig};
pub use error::{ClassifierError, FictionError, FictionResult};
pub use interpreter::{Command, IntentClassifier, Interpreter, ZeroShotClassifier, parse_command};
pub use player::GameState;
pub use session::StoryEngine;
pub use view::{ExitView, RunStatus, SceneData};
