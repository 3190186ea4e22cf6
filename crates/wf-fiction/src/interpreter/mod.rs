//! Command parsing and free-text interpretation.
//!
//! Interpretation happens in two steps. The [`Interpreter`] expands loose
//! input into a canonical command string, usually one of the current
//! choices. [`parse_command`] then turns that string into a [`Command`].

mod classifier;
mod command;
mod resolver;

pub use classifier::{Classification, IntentClassifier, ZeroShotClassifier};
pub use command::{Command, HELP_TEXT, parse_command};
pub use resolver::{Interpreter, Resolution, Stage};
