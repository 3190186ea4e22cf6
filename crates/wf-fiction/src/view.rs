//! Serializable snapshots handed to front ends.

use serde::Serialize;

/// One exit of the current scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExitView {
    /// Direction label.
    pub direction: String,
    /// Display name of the scene it leads to.
    pub destination: String,
}

/// Everything a front end needs to render the current scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneData {
    /// Scene id.
    pub scene_id: String,
    /// Display name.
    pub name: String,
    /// Description text.
    pub description: String,
    /// Names of items lying here.
    pub items: Vec<String>,
    /// Names of NPCs present.
    pub npcs: Vec<String>,
    /// Commands that are legal right now.
    pub choices: Vec<String>,
    /// Declared exits.
    pub exits: Vec<ExitView>,
    /// Names of carried items.
    pub inventory: Vec<String>,
    /// Seed of the run.
    pub seed: String,
    /// Number of distinct scenes seen.
    pub visited_scenes_count: usize,
    /// Recent scenes, oldest first.
    pub location_history: Vec<String>,
    /// NPC being talked to.
    pub current_conversation: Option<String>,
}

/// Summary of the active run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStatus {
    /// Seed of the run.
    pub seed: String,
    /// Current scene id.
    pub location: String,
    /// Number of distinct scenes seen.
    pub visited_scenes: usize,
    /// Number of carried items.
    pub inventory_count: usize,
}
