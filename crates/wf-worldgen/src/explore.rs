//! Procedural exploration: growing the scene graph past the templates.
//!
//! When a scene declares too few exits, the player may head into any
//! uncharted direction. The destination is named from the terrain the
//! player is leaving, steered toward terrain they have not seen yet, and
//! materialized as a fresh [`Scene`] unless one with that id already exists.
//! The edge (and its reverse, where the label has one) is committed at once,
//! so the same direction leads to the same place for the rest of the run.

use std::collections::BTreeSet;
use std::fmt;

use rand::Rng;
use rand::seq::IndexedRandom;
use wf_core::{Run, Scene, SceneOrigin, normalize, scene::title_from_id};

use crate::error::{GenError, GenResult};

/// Default exit count below which a scene counts as sparse.
pub const DEFAULT_SPARSE_THRESHOLD: usize = 2;

const ADJECTIVE_CHANCE: f64 = 0.5;

const ADJECTIVES: &[&str] = &[
    "misty", "silent", "ancient", "hidden", "windswept", "sunlit", "shadowed", "forgotten",
];

/// Broad landscape category inferred from scene ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Terrain {
    /// Woods, groves, thickets.
    Forest,
    /// Caves and tunnels.
    Cave,
    /// Peaks, cliffs, ridges.
    Mountain,
    /// Lakes, rivers, shores.
    Water,
    /// Ruins, towers, crumbling walls.
    Ruins,
    /// Marsh and bog.
    Swamp,
    /// Open grassland.
    Plains,
    /// Settlements.
    Village,
}

impl Terrain {
    /// All terrains, in inference priority order.
    pub const ALL: [Terrain; 8] = [
        Self::Forest,
        Self::Cave,
        Self::Mountain,
        Self::Water,
        Self::Ruins,
        Self::Swamp,
        Self::Plains,
        Self::Village,
    ];

    /// Guess the terrain of a scene from words in its id.
    ///
    /// Unrecognized ids count as forest, the wilderness default.
    pub fn infer(scene_id: &str) -> Self {
        let id = scene_id.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.keywords().iter().any(|k| id.contains(k)))
            .unwrap_or(Self::Forest)
    }

    /// Word used in generated ids; always one of [`Terrain::keywords`].
    pub fn label(self) -> &'static str {
        self.keywords()[0]
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Forest => &["forest", "wood", "grove", "oak", "thicket", "glade"],
            Self::Cave => &["cave", "cavern", "grotto", "tunnel", "mine"],
            Self::Mountain => &["mountain", "peak", "cliff", "ridge", "crag"],
            Self::Water => &["lake", "brook", "river", "shore", "falls", "pool"],
            Self::Ruins => &["ruins", "ruin", "tower", "crypt", "keep"],
            Self::Swamp => &["marsh", "swamp", "bog", "fen", "mire"],
            Self::Plains => &["meadow", "plain", "field", "heath", "moor"],
            Self::Village => &["village", "hut", "forge", "farm", "inn", "square"],
        }
    }

    /// Terrains that plausibly border this one.
    pub fn neighbors(self) -> &'static [Terrain] {
        use Terrain::*;
        match self {
            Forest => &[Forest, Plains, Mountain, Water, Ruins, Swamp],
            Cave => &[Cave, Mountain, Ruins, Water],
            Mountain => &[Mountain, Cave, Forest, Plains],
            Water => &[Water, Forest, Swamp, Plains],
            Ruins => &[Ruins, Forest, Cave, Plains],
            Swamp => &[Swamp, Water, Forest, Ruins],
            Plains => &[Plains, Forest, Village, Water, Mountain],
            Village => &[Village, Plains, Forest],
        }
    }

    fn descriptors(self) -> &'static [&'static str] {
        match self {
            Self::Forest => &["glade", "thicket", "hollow", "path"],
            Self::Cave => &["grotto", "passage", "chamber", "den"],
            Self::Mountain => &["pass", "ledge", "summit", "slope"],
            Self::Water => &["shallows", "bank", "ford", "inlet"],
            Self::Ruins => &["courtyard", "archway", "vault", "hall"],
            Self::Swamp => &["hollow", "reeds", "sinkhole", "causeway"],
            Self::Plains => &["expanse", "crossing", "rise", "track"],
            Self::Village => &["lane", "green", "yard", "well"],
        }
    }

    fn scenery(self) -> &'static str {
        match self {
            Self::Forest => "Trees crowd close overhead and the undergrowth rustles.",
            Self::Cave => "Stone walls sweat in the dark and every step echoes.",
            Self::Mountain => "Wind tears across bare rock and the valley lies far below.",
            Self::Water => "Water laps nearby, cold and clear.",
            Self::Ruins => "Broken masonry juts from the earth, half swallowed by moss.",
            Self::Swamp => "The ground squelches underfoot and the air hangs heavy.",
            Self::Plains => "Grass rolls away in every direction under a wide sky.",
            Self::Village => "Smoke curls from a chimney somewhere out of sight.",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a successful exploration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exploration {
    /// Scene the player ends up in.
    pub scene_id: String,
    /// Direction label, normalized.
    pub direction: String,
    /// Whether a new scene was materialized.
    pub created: bool,
    /// Whether the direction was already charted and simply followed.
    pub charted: bool,
}

/// Extends a run's graph into uncharted directions.
#[derive(Debug, Clone, Copy)]
pub struct Explorer {
    sparse_threshold: usize,
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new(DEFAULT_SPARSE_THRESHOLD)
    }
}

impl Explorer {
    /// Scenes with fewer than `sparse_threshold` exits may be explored.
    pub fn new(sparse_threshold: usize) -> Self {
        Self { sparse_threshold }
    }

    /// Whether exploring from this scene is allowed.
    pub fn can_explore(&self, scene: &Scene) -> bool {
        scene.connections.len() < self.sparse_threshold
    }

    /// Head `direction` from `from`.
    ///
    /// A direction that is already charted is followed without drawing from
    /// `rng`. Otherwise the scene must be sparse; a destination is named,
    /// materialized if new, and linked in both directions.
    pub fn explore<R: Rng + ?Sized>(
        &self,
        run: &mut Run,
        rng: &mut R,
        from: &str,
        direction: &str,
    ) -> GenResult<Exploration> {
        let direction = normalize(direction);
        let origin = run.graph.require(from)?;

        if let Some(target) = origin.exit(&direction) {
            return Ok(Exploration {
                scene_id: target.to_string(),
                direction,
                created: false,
                charted: true,
            });
        }
        if !self.can_explore(origin) {
            return Err(GenError::NotSparse {
                scene: from.to_string(),
                exits: origin.connections.len(),
            });
        }

        let (id, terrain, descriptor) = destination(rng, from, &run.visited);
        let created = !run.graph.contains(&id);
        if created {
            let name = title_from_id(&id);
            let description = format!("You reach a {descriptor}. {}", terrain.scenery());
            run.graph
                .insert(Scene::new(&id, name, description).with_origin(SceneOrigin::Explored))?;
        }
        run.graph.connect(from, &direction, &id)?;
        run.graph.link_back(from, &direction, &id);

        tracing::info!(from, direction = %direction, to = %id, created, "explored");
        Ok(Exploration {
            scene_id: id,
            direction,
            created,
            charted: false,
        })
    }
}

/// Name a procedural destination: `[adjective_]terrain_descriptor`.
fn destination<R: Rng + ?Sized>(
    rng: &mut R,
    from: &str,
    visited: &BTreeSet<String>,
) -> (String, Terrain, &'static str) {
    let here = Terrain::infer(from);
    let seen: BTreeSet<Terrain> = visited.iter().map(|id| Terrain::infer(id)).collect();
    let fresh: Vec<Terrain> = here
        .neighbors()
        .iter()
        .copied()
        .filter(|t| !seen.contains(t))
        .collect();
    let pool = if fresh.is_empty() {
        here.neighbors()
    } else {
        fresh.as_slice()
    };

    let terrain = pool.choose(rng).copied().unwrap_or(here);
    let descriptor = terrain.descriptors().choose(rng).copied().unwrap_or("clearing");
    let adjective = if rng.random::<f64>() < ADJECTIVE_CHANCE {
        ADJECTIVES.choose(rng).copied()
    } else {
        None
    };

    let mut id = match adjective {
        Some(adjective) => format!("{adjective}_{}_{descriptor}", terrain.label()),
        None => format!("{}_{descriptor}", terrain.label()),
    };
    if id == from {
        id.push_str("_beyond");
    }
    (id, terrain, descriptor)
}
