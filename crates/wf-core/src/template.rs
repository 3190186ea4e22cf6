//! The immutable template catalog.
//!
//! Templates are authored as one JSON document with four sections:
//! `game_settings`, `locations`, `items`, and `npcs`. Each section is a map
//! keyed by id. Maps are ordered so that anything iterating over templates
//! does so by id, which keeps world generation reproducible.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::item::PropertyValue;

const BUNDLED: &str = include_str!("../assets/templates.json");

/// Global settings for a catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameSettings {
    /// Human-readable title of the adventure.
    #[serde(default)]
    pub title: Option<String>,
    /// Location id where every new run begins.
    #[serde(default)]
    pub starting_location: String,
}

/// A scripted action offered in a location while its condition holds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActionTemplate {
    /// The exact choice text shown to the player.
    pub action: String,
    /// Location to move to after performing the action.
    #[serde(default)]
    pub target: Option<String>,
    /// Flag raised by performing the action.
    #[serde(default)]
    pub set_flag: Option<String>,
    /// Boolean flag expression gating the action.
    #[serde(default)]
    pub condition: Option<String>,
}

/// Blueprint for a location.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationTemplate {
    /// Location id; filled in from the map key when loading.
    #[serde(skip)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description text.
    pub description: String,
    /// Item template ids spawned here.
    #[serde(default)]
    pub items: Vec<String>,
    /// NPC template ids spawned here.
    #[serde(default)]
    pub npcs: Vec<String>,
    /// Declared exits: direction label to location id.
    #[serde(default)]
    pub connections: BTreeMap<String, String>,
    /// Scripted actions.
    #[serde(default)]
    pub actions: Vec<ActionTemplate>,
}

/// Blueprint for an item.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemTemplate {
    /// Item template id; filled in from the map key when loading.
    #[serde(skip)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description text.
    pub description: String,
    /// Free-form properties.
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

/// Blueprint for a non-player character.
#[derive(Debug, Clone, Deserialize)]
pub struct NpcTemplate {
    /// NPC template id; filled in from the map key when loading.
    #[serde(skip)]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Physical description.
    pub description: String,
    /// Personality label (`friendly`, `gruff`, ...).
    #[serde(default)]
    pub personality: String,
    /// Dialogue lines keyed by topic.
    #[serde(default)]
    pub dialogue: BTreeMap<String, String>,
    /// Quest titles.
    #[serde(default)]
    pub quests: Vec<String>,
    /// Trade offers.
    #[serde(default)]
    pub trades: BTreeMap<String, String>,
}

/// The full, read-only template catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateCatalog {
    /// Global settings.
    #[serde(default)]
    pub game_settings: GameSettings,
    /// Location templates by id.
    pub locations: BTreeMap<String, LocationTemplate>,
    /// Item templates by id.
    #[serde(default)]
    pub items: BTreeMap<String, ItemTemplate>,
    /// NPC templates by id.
    #[serde(default)]
    pub npcs: BTreeMap<String, NpcTemplate>,
}

impl TemplateCatalog {
    /// Parse a catalog from a JSON string.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let mut catalog: TemplateCatalog = serde_json::from_str(json)?;
        if catalog.locations.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }
        catalog.assign_ids();
        catalog.report_dangling_references();
        Ok(catalog)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::TemplateIo {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            locations = catalog.locations.len(),
            items = catalog.items.len(),
            npcs = catalog.npcs.len(),
            "templates loaded"
        );
        Ok(catalog)
    }

    /// The catalog shipped with the crate.
    pub fn bundled() -> CoreResult<Self> {
        Self::from_json_str(BUNDLED)
    }

    /// The location every run starts in.
    ///
    /// Falls back to the first location by id when the configured one is
    /// missing or unknown.
    pub fn starting_location(&self) -> &str {
        let configured = self.game_settings.starting_location.as_str();
        if self.locations.contains_key(configured) {
            return configured;
        }
        let fallback = self.locations.keys().next().map(String::as_str).unwrap_or_default();
        tracing::warn!(
            configured,
            fallback,
            "starting location is not defined, using first location"
        );
        fallback
    }

    /// Look up a location template.
    pub fn location(&self, id: &str) -> Option<&LocationTemplate> {
        self.locations.get(id)
    }

    /// Display name of a location, if it is templated.
    pub fn location_name(&self, id: &str) -> Option<&str> {
        self.locations.get(id).map(|l| l.name.as_str())
    }

    fn assign_ids(&mut self) {
        for (id, loc) in &mut self.locations {
            loc.id.clone_from(id);
        }
        for (id, item) in &mut self.items {
            item.id.clone_from(id);
        }
        for (id, npc) in &mut self.npcs {
            npc.id.clone_from(id);
        }
    }

    fn report_dangling_references(&self) {
        for loc in self.locations.values() {
            for item in loc.items.iter().filter(|i| !self.items.contains_key(*i)) {
                tracing::warn!(location = %loc.id, item = %item, "unknown item template");
            }
            for npc in loc.npcs.iter().filter(|n| !self.npcs.contains_key(*n)) {
                tracing::warn!(location = %loc.id, npc = %npc, "unknown npc template");
            }
            for (direction, target) in &loc.connections {
                if !self.locations.contains_key(target) {
                    tracing::warn!(
                        location = %loc.id,
                        direction = %direction,
                        target = %target,
                        "connection to unknown location"
                    );
                }
            }
        }
    }
}
