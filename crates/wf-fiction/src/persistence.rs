//! Save files.
//!
//! A save records only what the player changed: the seed, the player's
//! location, flags and inventory, and the set of visited scenes. Loading
//! regenerates the world from the seed and lays those on top.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use wf_core::{Item, Run};

use crate::error::{FictionError, FictionResult};
use crate::player::GameState;

/// Player fields stored in a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    /// Scene id.
    pub location: String,
    /// Carried items by name.
    pub inventory: BTreeMap<String, Item>,
    /// Raised flags.
    #[serde(default)]
    pub flags: Vec<String>,
}

/// On-disk save document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    /// Seed the world is regenerated from.
    pub seed: String,
    /// Player state.
    pub game_state: SavedState,
    /// Scenes the player has seen.
    #[serde(default)]
    pub visited_scenes: Vec<String>,
}

impl SaveFile {
    /// Snapshot a run and its player.
    pub fn capture(run: &Run, state: &GameState) -> Self {
        Self {
            seed: run.seed.clone(),
            game_state: SavedState {
                location: state.location.clone(),
                inventory: state.inventory.clone(),
                flags: state.flags.iter().cloned().collect(),
            },
            visited_scenes: run.visited.iter().cloned().collect(),
        }
    }
}

/// A directory of save files.
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    /// Use `dir` for saves. It is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The save directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a save: timestamped when `name` is `None`, otherwise
    /// `name` with `.json` appended if missing.
    ///
    /// Names that would escape the save directory are rejected.
    pub fn file_name(name: Option<&str>) -> FictionResult<String> {
        let Some(name) = name.map(str::trim) else {
            return Ok(format!(
                "save_{}.json",
                Local::now().format("%Y-%m-%d_%H-%M-%S")
            ));
        };
        if name.is_empty()
            || name.starts_with('.')
            || name.contains(['/', '\\'])
            || Path::new(name).is_absolute()
        {
            return Err(FictionError::InvalidSaveName(name.to_string()));
        }
        Ok(if name.ends_with(".json") {
            name.to_string()
        } else {
            format!("{name}.json")
        })
    }

    /// Write a save. Returns the file name used.
    pub fn write(&self, name: Option<&str>, save: &SaveFile) -> FictionResult<String> {
        let file_name = Self::file_name(name)?;
        let path = self.dir.join(&file_name);
        let json = serde_json::to_string_pretty(save)?;
        fs::create_dir_all(&self.dir)
            .and_then(|()| fs::write(&path, json))
            .map_err(|source| FictionError::SaveIo {
                path: path.clone(),
                source,
            })?;
        tracing::info!(path = %path.display(), "run saved");
        Ok(file_name)
    }

    /// Read and parse a save.
    pub fn read(&self, name: &str) -> FictionResult<SaveFile> {
        let file_name = Self::file_name(Some(name))?;
        let path = self.dir.join(&file_name);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(FictionError::SaveNotFound(file_name));
            }
            Err(source) => return Err(FictionError::SaveIo { path, source }),
        };
        Ok(serde_json::from_str(&json)?)
    }

    /// Names of timestamped saves, sorted.
    pub fn list(&self) -> FictionResult<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(FictionError::SaveIo {
                    path: self.dir.clone(),
                    source,
                });
            }
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|n| n.starts_with("save_") && n.ends_with(".json"))
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_core::{PropertyValue, SceneGraph};

    fn save() -> SaveFile {
        let mut run = Run::new("abc123", SceneGraph::new());
        run.visit("forest_clearing");
        let mut state = GameState::new("forest_clearing");
        state.set_flag("met_hermit");
        state
            .carry(
                Item::new("Sword", "Rusty. (It seems well-used.)")
                    .with_property("damage", PropertyValue::Integer(5)),
            )
            .unwrap();
        SaveFile::capture(&run, &state)
    }

    #[test]
    fn json_layout() {
        let json = serde_json::to_value(save()).unwrap();
        assert_eq!(json["seed"], "abc123");
        assert_eq!(json["game_state"]["location"], "forest_clearing");
        assert_eq!(json["game_state"]["flags"][0], "met_hermit");
        assert_eq!(json["game_state"]["inventory"]["Sword"]["properties"]["damage"], 5);
        assert_eq!(json["visited_scenes"][0], "forest_clearing");
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path().join("saves"));
        let name = store.write(Some("slot1"), &save()).unwrap();
        assert_eq!(name, "slot1.json");
        assert_eq!(store.read("slot1").unwrap(), save());
        assert_eq!(store.read("slot1.json").unwrap(), save());
    }

    #[test]
    fn timestamped_names_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path());
        let name = store.write(None, &save()).unwrap();
        assert!(name.starts_with("save_") && name.ends_with(".json"));
        store.write(Some("manual"), &save()).unwrap();
        assert_eq!(store.list().unwrap(), vec![name]);
    }

    #[test]
    fn missing_dir_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path().join("nope"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn missing_and_corrupt_saves() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path());
        assert!(matches!(
            store.read("ghost"),
            Err(FictionError::SaveNotFound(n)) if n == "ghost.json"
        ));
        fs::write(dir.path().join("bad.json"), "{ nope").unwrap();
        assert!(matches!(store.read("bad"), Err(FictionError::SaveFormat(_))));
    }

    #[test]
    fn names_stay_inside_the_directory() {
        for bad in ["../escape", "/etc/passwd", "a/b", ".hidden", ""] {
            assert!(
                matches!(
                    SaveStore::file_name(Some(bad)),
                    Err(FictionError::InvalidSaveName(_))
                ),
                "{bad}"
            );
        }
    }
}
