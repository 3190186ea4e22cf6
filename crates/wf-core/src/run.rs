use std::collections::{BTreeSet, VecDeque};

use crate::graph::SceneGraph;

/// Default number of scenes kept in the movement history.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Bounded record of recently visited scenes, most recent last.
///
/// Consecutive duplicates are never stored.
#[derive(Debug, Clone)]
pub struct LocationHistory {
    entries: VecDeque<String>,
    limit: usize,
}

impl Default for LocationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl LocationHistory {
    /// Create an empty history holding at most `limit` entries.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit: limit.max(1),
        }
    }

    /// Record a scene. Returns `false` if it equals the latest entry.
    pub fn record(&mut self, scene_id: &str) -> bool {
        if self.last() == Some(scene_id) {
            return false;
        }
        self.entries.push_back(scene_id.to_string());
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        true
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Whether the scene is anywhere in the history.
    pub fn contains(&self, scene_id: &str) -> bool {
        self.entries.iter().any(|e| e == scene_id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Entries as an owned list, oldest first.
    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}

/// One seeded play-through: the generated world plus exploration progress.
#[derive(Debug, Clone)]
pub struct Run {
    /// The seed every random draw of this run derives from.
    pub seed: String,
    /// Generated scenes and their connections.
    pub graph: SceneGraph,
    /// Every scene the player has seen.
    pub visited: BTreeSet<String>,
    /// Recent movement, for backtracking.
    pub history: LocationHistory,
}

impl Run {
    /// Wrap a freshly generated graph.
    pub fn new(seed: impl Into<String>, graph: SceneGraph) -> Self {
        Self {
            seed: seed.into(),
            graph,
            visited: BTreeSet::new(),
            history: LocationHistory::default(),
        }
    }

    /// Replace the history with an empty one of a different size.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = LocationHistory::new(limit);
        self
    }

    /// Visit bookkeeping: mark seen and append to history.
    pub fn visit(&mut self, scene_id: &str) {
        self.visited.insert(scene_id.to_string());
        self.history.record(scene_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn history_stays_bounded_without_repeats(
            ids in proptest::collection::vec("[a-d]", 0..60),
            limit in 1usize..12,
        ) {
            let mut h = LocationHistory::new(limit);
            for id in &ids {
                h.record(id);
            }
            let entries = h.to_vec();
            prop_assert!(entries.len() <= limit);
            prop_assert!(entries.windows(2).all(|w| w[0] != w[1]));
            if let Some(last) = ids.last() {
                prop_assert_eq!(h.last(), Some(last.as_str()));
            }
        }
    }

    #[test]
    fn history_skips_consecutive_duplicates() {
        let mut h = LocationHistory::new(10);
        assert!(h.record("a"));
        assert!(!h.record("a"));
        assert!(h.record("b"));
        assert!(h.record("a"));
        assert_eq!(h.to_vec(), vec!["a", "b", "a"]);
    }

    #[test]
    fn history_is_bounded() {
        let mut h = LocationHistory::new(10);
        for i in 0..15 {
            h.record(&format!("scene_{i}"));
        }
        assert_eq!(h.len(), 10);
        assert_eq!(h.iter().next(), Some("scene_5"));
        assert_eq!(h.last(), Some("scene_14"));
        assert!(!h.contains("scene_4"));
    }

    #[test]
    fn visit_marks_and_records() {
        let mut run = Run::new("seed", SceneGraph::new());
        run.visit("a");
        run.visit("a");
        run.visit("b");
        assert_eq!(run.visited.len(), 2);
        assert_eq!(run.history.to_vec(), vec!["a", "b"]);
    }
}
