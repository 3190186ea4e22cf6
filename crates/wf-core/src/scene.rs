use std::collections::BTreeMap;

use serde::Serialize;

use crate::item::Item;
use crate::npc::Npc;
use crate::template::ActionTemplate;

/// How a scene came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneOrigin {
    /// Instantiated from a location template at run start.
    Template,
    /// Materialized by exploring an uncharted direction.
    Explored,
    /// Synthesized because the location data was missing.
    Fallback,
}

/// A scripted action available in a scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneAction {
    /// The exact choice text.
    pub action: String,
    /// Scene to move to afterwards.
    pub target: Option<String>,
    /// Flag raised when performed.
    pub set_flag: Option<String>,
    /// Boolean flag expression gating the action.
    pub condition: Option<String>,
}

impl From<&ActionTemplate> for SceneAction {
    fn from(t: &ActionTemplate) -> Self {
        Self {
            action: t.action.clone(),
            target: t.target.clone(),
            set_flag: t.set_flag.clone(),
            condition: t.condition.clone(),
        }
    }
}

/// A generated location node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    /// Unique id within a run.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description text.
    pub description: String,
    /// Items lying here, in spawn order.
    pub items: Vec<Item>,
    /// NPCs present here.
    pub npcs: Vec<Npc>,
    /// Exits: direction label to scene id.
    pub connections: BTreeMap<String, String>,
    /// Scripted actions.
    pub actions: Vec<SceneAction>,
    /// How the scene was created.
    pub origin: SceneOrigin,
}

impl Scene {
    /// Create an empty templated scene.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            items: Vec::new(),
            npcs: Vec::new(),
            connections: BTreeMap::new(),
            actions: Vec::new(),
            origin: SceneOrigin::Template,
        }
    }

    /// A minimal stand-in for a location whose data is missing.
    pub fn fallback(id: impl Into<String>) -> Self {
        let id = id.into();
        let name = title_from_id(&id);
        Self {
            description: format!("{name} is unexplored and mysterious."),
            name,
            origin: SceneOrigin::Fallback,
            ..Self::new(id, String::new(), String::new())
        }
    }

    /// Set the origin.
    pub fn with_origin(mut self, origin: SceneOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Add an item.
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Add an NPC.
    pub fn with_npc(mut self, npc: Npc) -> Self {
        self.npcs.push(npc);
        self
    }

    /// Add an exit.
    pub fn with_connection(mut self, direction: impl Into<String>, target: impl Into<String>) -> Self {
        self.connections.insert(direction.into(), target.into());
        self
    }

    /// Add a scripted action.
    pub fn with_action(mut self, action: SceneAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Where an exit leads, if declared.
    pub fn exit(&self, direction: &str) -> Option<&str> {
        self.connections.get(direction).map(String::as_str)
    }

    /// Whether any exit leads to `target`.
    pub fn links_to(&self, target: &str) -> bool {
        self.connections.values().any(|t| t == target)
    }

    /// Find an item lying here by name.
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.is_named(name))
    }

    /// Remove an item from the scene, handing ownership to the caller.
    pub fn take_item(&mut self, name: &str) -> Option<Item> {
        let pos = self.items.iter().position(|i| i.is_named(name))?;
        Some(self.items.remove(pos))
    }

    /// Put an item down here.
    pub fn put_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Find an NPC present here by name.
    pub fn npc(&self, name: &str) -> Option<&Npc> {
        self.npcs.iter().find(|n| n.is_named(name))
    }
}

/// `misty_forest_glade` becomes `Misty Forest Glade`.
pub fn title_from_id(id: &str) -> String {
    id.split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_moves_item_out_of_scene() {
        let mut scene = Scene::new("hall", "Hall", "A hall.")
            .with_item(Item::new("Sword", "Sharp."))
            .with_item(Item::new("Lamp", "Bright."));

        let sword = scene.take_item("sword").unwrap();
        assert_eq!(sword.name, "Sword");
        assert!(scene.item("sword").is_none());
        assert_eq!(scene.items.len(), 1);
        assert!(scene.take_item("sword").is_none());

        scene.put_item(sword);
        assert!(scene.item("Sword").is_some());
    }

    #[test]
    fn fallback_scene_is_mysterious() {
        let scene = Scene::fallback("sunken_glade");
        assert_eq!(scene.name, "Sunken Glade");
        assert!(scene.description.contains("unexplored and mysterious"));
        assert_eq!(scene.origin, SceneOrigin::Fallback);
        assert!(scene.connections.is_empty());
    }

    #[test]
    fn exits_and_links() {
        let scene = Scene::new("a", "A", "").with_connection("north", "b");
        assert_eq!(scene.exit("north"), Some("b"));
        assert_eq!(scene.exit("south"), None);
        assert!(scene.links_to("b"));
        assert!(!scene.links_to("c"));
    }

    #[test]
    fn title_case_ids() {
        assert_eq!(title_from_id("misty_forest_glade"), "Misty Forest Glade");
        assert_eq!(title_from_id("cave"), "Cave");
    }
}
