//! Template catalog to scene graph.

use rand::Rng;
use wf_core::{
    Item, ItemTemplate, LocationTemplate, Npc, NpcTemplate, Run, Scene, SceneAction, SceneGraph,
    TemplateCatalog, normalize,
};

use crate::flourish;
use crate::seed::Seed;

/// Builds runs from a template catalog.
///
/// Random draws happen in a fixed order: locations by id, then each
/// location's item list, then its NPC list. Nothing depends on hash order,
/// so a seed yields the same world on every machine.
#[derive(Debug, Clone, Copy)]
pub struct WorldGenerator<'a> {
    catalog: &'a TemplateCatalog,
}

impl<'a> WorldGenerator<'a> {
    /// Create a generator over a catalog.
    pub fn new(catalog: &'a TemplateCatalog) -> Self {
        Self { catalog }
    }

    /// Generate a complete run for `seed`.
    pub fn generate(&self, seed: &Seed) -> Run {
        let mut rng = seed.rng();
        let mut graph = SceneGraph::new();

        for location in self.catalog.locations.values() {
            let scene = self.instantiate(location, &mut rng);
            if let Err(err) = graph.insert(scene) {
                tracing::warn!(%err, "skipping location");
            }
        }

        let synthesized = graph.ensure_bidirectional();
        tracing::debug!(
            seed = %seed,
            scenes = graph.len(),
            synthesized,
            "world generated"
        );
        Run::new(seed.as_str(), graph)
    }

    fn instantiate<R: Rng + ?Sized>(&self, location: &LocationTemplate, rng: &mut R) -> Scene {
        let mut scene = Scene::new(&location.id, &location.name, &location.description);

        for id in &location.items {
            match self.catalog.items.get(id) {
                Some(template) => scene.items.push(spawn_item(template, rng)),
                None => tracing::warn!(location = %location.id, item = %id, "item template missing"),
            }
        }
        for id in &location.npcs {
            match self.catalog.npcs.get(id) {
                Some(template) => scene.npcs.push(spawn_npc(template, rng)),
                None => tracing::warn!(location = %location.id, npc = %id, "npc template missing"),
            }
        }

        scene.connections = location
            .connections
            .iter()
            .map(|(direction, target)| (normalize(direction), target.clone()))
            .collect();
        scene.actions = location.actions.iter().map(SceneAction::from).collect();
        scene
    }
}

/// Spawn an item, possibly with a description flourish.
pub fn spawn_item<R: Rng + ?Sized>(template: &ItemTemplate, rng: &mut R) -> Item {
    let mut item = Item::from_template(template);
    if let Some(suffix) = flourish::item(rng) {
        item.description.push_str(&suffix);
    }
    item
}

/// Spawn an NPC, flourishing its greeting and sometimes its quest line.
pub fn spawn_npc<R: Rng + ?Sized>(template: &NpcTemplate, rng: &mut R) -> Npc {
    let mut npc = Npc::from_template(template);
    if let Some(greeting) = npc.dialogue.greeting.as_mut() {
        greeting.push(' ');
        greeting.push_str(flourish::greeting(rng));
    }
    if let Some(quest) = npc.dialogue.quest.as_mut() {
        if let Some(tag) = flourish::quest(rng) {
            quest.push(' ');
            quest.push_str(tag);
        }
    }
    npc
}

/// Make sure `id` names a scene, synthesizing a fallback if it does not.
///
/// Returns `true` when a fallback was created.
pub fn ensure_scene(graph: &mut SceneGraph, id: &str) -> bool {
    if graph.contains(id) {
        return false;
    }
    tracing::warn!(scene = %id, "no data for location, using fallback scene");
    graph.insert(Scene::fallback(id)).is_ok()
}
