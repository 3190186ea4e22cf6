use std::collections::BTreeMap;

use crate::direction::opposite;
use crate::error::{CoreError, CoreResult};
use crate::scene::Scene;

/// The mutable set of scenes in a run, keyed by id.
///
/// Connections are directed edges stored on the source scene. After
/// [`SceneGraph::ensure_bidirectional`] every edge whose label has an
/// opposite also exists in reverse, unless the reverse slot was already
/// taken by a different edge.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    scenes: BTreeMap<String, Scene>,
}

impl SceneGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Scenes
    // -----------------------------------------------------------------------

    /// Add a scene. Ids must be unique.
    pub fn insert(&mut self, scene: Scene) -> CoreResult<()> {
        if self.scenes.contains_key(&scene.id) {
            return Err(CoreError::DuplicateScene(scene.id));
        }
        self.scenes.insert(scene.id.clone(), scene);
        Ok(())
    }

    /// Get a scene by id.
    pub fn get(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Get a mutable scene by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Scene> {
        self.scenes.get_mut(id)
    }

    /// Get a scene or fail with [`CoreError::SceneNotFound`].
    pub fn require(&self, id: &str) -> CoreResult<&Scene> {
        self.get(id)
            .ok_or_else(|| CoreError::SceneNotFound(id.to_string()))
    }

    /// Get a mutable scene or fail with [`CoreError::SceneNotFound`].
    pub fn require_mut(&mut self, id: &str) -> CoreResult<&mut Scene> {
        self.get_mut(id)
            .ok_or_else(|| CoreError::SceneNotFound(id.to_string()))
    }

    /// Whether a scene with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.scenes.contains_key(id)
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the graph has no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// All scenes, ordered by id.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.values()
    }

    /// All scene ids, ordered.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }

    // -----------------------------------------------------------------------
    // Connections
    // -----------------------------------------------------------------------

    /// Add or overwrite a directed edge `from --direction--> to`.
    pub fn connect(&mut self, from: &str, direction: &str, to: &str) -> CoreResult<()> {
        if !self.contains(to) {
            return Err(CoreError::SceneNotFound(to.to_string()));
        }
        self.require_mut(from)?
            .connections
            .insert(direction.to_string(), to.to_string());
        Ok(())
    }

    /// Add the reverse of `from --direction--> to` if it is missing.
    ///
    /// Returns `true` when an edge was added. Nothing happens when the
    /// label has no opposite, `to` does not exist, or the opposite slot on
    /// `to` is already filled. An exit back to `from` under some other label
    /// does not count as the reverse.
    pub fn link_back(&mut self, from: &str, direction: &str, to: &str) -> bool {
        let Some(reverse) = opposite(direction) else {
            return false;
        };
        let Some(target) = self.scenes.get_mut(to) else {
            return false;
        };
        if let Some(existing) = target.connections.get(reverse) {
            if existing == from {
                return false;
            }
            tracing::warn!(
                scene = %to,
                direction = reverse,
                existing = %existing,
                wanted = %from,
                "reverse exit already taken"
            );
            return false;
        }
        target
            .connections
            .insert(reverse.to_string(), from.to_string());
        true
    }

    /// Synthesize every missing reverse edge. Returns how many were added.
    pub fn ensure_bidirectional(&mut self) -> usize {
        let edges: Vec<(String, String, String)> = self
            .scenes
            .values()
            .flat_map(|scene| {
                scene
                    .connections
                    .iter()
                    .map(|(dir, to)| (scene.id.clone(), dir.clone(), to.clone()))
            })
            .collect();

        edges
            .iter()
            .filter(|(from, dir, to)| self.link_back(from, dir, to))
            .count()
    }

    /// Edges that break bidirectionality: `(from, direction, to)` where `to`
    /// exists, the label has an opposite, and `to`'s opposite exit does not
    /// lead back to `from`.
    pub fn one_way_edges(&self) -> Vec<(&str, &str, &str)> {
        self.scenes
            .values()
            .flat_map(|scene| {
                scene.connections.iter().filter_map(move |(dir, to)| {
                    let target = self.scenes.get(to)?;
                    let reverse = opposite(dir)?;
                    (target.exit(reverse) != Some(scene.id.as_str())).then_some((
                        scene.id.as_str(),
                        dir.as_str(),
                        to.as_str(),
                    ))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> SceneGraph {
        let mut g = SceneGraph::new();
        g.insert(Scene::new("clearing", "Clearing", "").with_connection("north", "oak"))
            .unwrap();
        g.insert(Scene::new("oak", "Oak", "").with_connection("deeper", "cave"))
            .unwrap();
        g.insert(Scene::new("cave", "Cave", "").with_connection("widdershins", "clearing"))
            .unwrap();
        g
    }

    #[test]
    fn duplicate_ids_rejected() {
        let mut g = graph();
        let err = g.insert(Scene::new("oak", "Oak again", "")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateScene(id) if id == "oak"));
    }

    #[test]
    fn reverse_links_synthesized() {
        let mut g = graph();
        let added = g.ensure_bidirectional();
        assert_eq!(added, 2);
        assert_eq!(g.get("oak").unwrap().exit("south"), Some("clearing"));
        assert_eq!(g.get("cave").unwrap().exit("surface"), Some("oak"));
        // No opposite for an unknown label.
        assert!(!g.get("clearing").unwrap().links_to("cave"));
        assert!(g.one_way_edges().is_empty());
    }

    #[test]
    fn existing_back_link_is_respected() {
        let mut g = SceneGraph::new();
        g.insert(Scene::new("a", "A", "").with_connection("north", "b"))
            .unwrap();
        g.insert(Scene::new("b", "B", "").with_connection("south", "a"))
            .unwrap();
        assert_eq!(g.ensure_bidirectional(), 0);
        assert!(g.one_way_edges().is_empty());
    }

    #[test]
    fn unlabelled_way_back_still_gets_reverse() {
        let mut g = SceneGraph::new();
        g.insert(Scene::new("a", "A", "").with_connection("north", "b"))
            .unwrap();
        g.insert(Scene::new("b", "B", "").with_connection("portal", "a"))
            .unwrap();
        assert_eq!(g.one_way_edges(), vec![("a", "north", "b")]);
        assert_eq!(g.ensure_bidirectional(), 1);
        assert_eq!(g.get("b").unwrap().exit("south"), Some("a"));
        assert_eq!(g.get("b").unwrap().exit("portal"), Some("a"));
        assert!(g.one_way_edges().is_empty());
    }

    #[test]
    fn occupied_reverse_slot_is_not_overwritten() {
        let mut g = SceneGraph::new();
        g.insert(Scene::new("a", "A", "").with_connection("north", "b"))
            .unwrap();
        g.insert(Scene::new("b", "B", "").with_connection("south", "c"))
            .unwrap();
        g.insert(Scene::new("c", "C", "")).unwrap();
        g.ensure_bidirectional();
        assert_eq!(g.get("b").unwrap().exit("south"), Some("c"));
        assert_eq!(g.one_way_edges(), vec![("a", "north", "b")]);
    }

    #[test]
    fn dangling_edges_are_ignored() {
        let mut g = SceneGraph::new();
        g.insert(Scene::new("a", "A", "").with_connection("east", "ghost"))
            .unwrap();
        assert_eq!(g.ensure_bidirectional(), 0);
        assert!(g.one_way_edges().is_empty());
    }

    #[test]
    fn connect_requires_both_ends() {
        let mut g = graph();
        assert!(g.connect("clearing", "east", "nowhere").is_err());
        assert!(g.connect("nowhere", "east", "oak").is_err());
        g.connect("clearing", "east", "cave").unwrap();
        assert_eq!(g.get("clearing").unwrap().exit("east"), Some("cave"));
    }
}
