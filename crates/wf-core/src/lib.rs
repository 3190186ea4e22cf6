//! Core types for Wayfarer: templates, scenes, the scene graph, and runs.
//!
//! This crate defines the data model shared by world generation and the
//! fiction engine. It owns no randomness; a [`Run`] is produced by the
//! generator in `wf-worldgen` and mutated by the session in `wf-fiction`.

/// Movement vocabulary and the direction-opposite table.
pub mod direction;
/// Error types used throughout the crate.
pub mod error;
/// The scene graph of generated locations and their connections.
pub mod graph;
/// Item instances and their property values.
pub mod item;
/// Spawned non-player characters.
pub mod npc;
/// A single seeded play-through.
pub mod run;
/// Generated scenes.
pub mod scene;
/// The immutable template catalog.
pub mod template;

/// Re-export direction helpers.
pub use direction::{Direction, normalize, opposite};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export graph types.
pub use graph::SceneGraph;
/// Re-export item types.
pub use item::{Item, PropertyValue};
/// Re-export NPC types.
pub use npc::{Npc, Personality};
/// Re-export run types.
pub use run::{LocationHistory, Run};
/// Re-export scene types.
pub use scene::{Scene, SceneAction, SceneOrigin};
/// Re-export template types.
pub use template::{
    ActionTemplate, GameSettings, ItemTemplate, LocationTemplate, NpcTemplate, TemplateCatalog,
};
