//! Story engine session management.
//!
//! `StoryEngine` owns the template catalog, at most one active run, and the
//! player's state within it. Every player-facing operation goes through it:
//! starting runs, describing the current scene, processing commands, and
//! saving or loading progress.

use rand::rngs::StdRng;
use wf_core::{Direction, Item, Run, Scene, SceneAction, TemplateCatalog, scene::title_from_id};
use wf_worldgen::{Explorer, GenError, Seed, WorldGenerator, ensure_scene};

use crate::condition::holds;
use crate::config::EngineConfig;
use crate::conversation::{self, is_closing};
use crate::error::{FictionError, FictionResult};
use crate::interpreter::{Command, HELP_TEXT, Interpreter, parse_command};
use crate::persistence::{SaveFile, SaveStore};
use crate::player::GameState;
use crate::view::{ExitView, RunStatus, SceneData};

/// An interactive story session over one template catalog.
#[derive(Debug)]
pub struct StoryEngine {
    catalog: TemplateCatalog,
    config: EngineConfig,
    interpreter: Interpreter,
    explorer: Explorer,
    store: SaveStore,
    active: Option<ActiveRun>,
}

/// The run in progress plus everything that changes while playing it.
#[derive(Debug)]
struct ActiveRun {
    run: Run,
    state: GameState,
    explore_rng: StdRng,
    chatter_rng: StdRng,
}

impl StoryEngine {
    /// Create an engine with no active run.
    pub fn new(catalog: TemplateCatalog, config: EngineConfig) -> Self {
        Self {
            interpreter: Interpreter::from_config(&config),
            explorer: Explorer::new(config.sparse_threshold),
            store: SaveStore::new(&config.save_dir),
            catalog,
            config,
            active: None,
        }
    }

    /// Replace the interpreter, e.g. to plug in a different classifier.
    pub fn with_interpreter(mut self, interpreter: Interpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// The template catalog.
    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The active run, if any.
    pub fn run(&self) -> Option<&Run> {
        self.active.as_ref().map(|a| &a.run)
    }

    /// The player's state, if a run is active.
    pub fn state(&self) -> Option<&GameState> {
        self.active.as_ref().map(|a| &a.state)
    }

    /// Discard any current run and start a new one.
    ///
    /// Without a seed, a fresh eight-hex-digit seed is drawn. A given seed is
    /// used verbatim, whitespace and all.
    pub fn start_new_run(
        &mut self,
        seed: Option<&str>,
        player_name: Option<String>,
        player_class: Option<String>,
    ) -> String {
        let seed = seed.map_or_else(Seed::random, Seed::new);
        let start = self.catalog.starting_location().to_string();
        let state = GameState::new(start).with_profile(player_name, player_class);
        self.active = Some(self.activate(&seed, state));
        tracing::info!(seed = %seed, "run started");
        format!("Started new run with seed: {seed}")
    }

    fn activate(&self, seed: &Seed, state: GameState) -> ActiveRun {
        let mut run = WorldGenerator::new(&self.catalog)
            .generate(seed)
            .with_history_limit(self.config.history_limit);
        ensure_scene(&mut run.graph, &state.location);
        ActiveRun {
            run,
            state,
            explore_rng: seed.stream("explore"),
            chatter_rng: seed.stream("chatter"),
        }
    }

    fn active(&self) -> FictionResult<&ActiveRun> {
        self.active.as_ref().ok_or(FictionError::NoActiveRun)
    }

    /// Describe the current scene. Marks it visited and records it in the
    /// movement history.
    pub fn current_scene_data(&mut self) -> FictionResult<SceneData> {
        let explorer = self.explorer;
        let active = self.active.as_mut().ok_or(FictionError::NoActiveRun)?;
        let location = active.state.location.clone();
        active.run.visit(&location);
        active.scene_data(&explorer)
    }

    /// The commands that are legal right now.
    pub fn choices(&self) -> FictionResult<Vec<String>> {
        let active = self.active()?;
        active.choices(&self.explorer)
    }

    /// Interpret and execute one line of player input.
    ///
    /// Always returns prose for the player; mistakes and failures are
    /// reported in the text rather than as errors. While a conversation is
    /// in progress the reply carries a status suffix.
    pub fn process_command(&mut self, input: &str) -> String {
        let explorer = self.explorer;
        let Some(active) = self.active.as_mut() else {
            return FictionError::NoActiveRun.to_string();
        };

        let before = active.state.talking_to().map(str::to_string);
        // Scripted actions are matched verbatim, even while gated off.
        let command = if before.is_none() && active.action(input).is_some() {
            input.trim().to_string()
        } else {
            let choices = active.choices(&explorer).unwrap_or_default();
            self.interpreter
                .interpret(input, &choices, before.is_some())
                .command
        };

        let outcome = if before.is_some() {
            active.converse(&command)
        } else {
            active.dispatch(&explorer, &command)
        };
        let mut reply = match outcome {
            Ok(text) => text,
            Err(err) => {
                if !err.is_user_error() {
                    tracing::warn!(%err, input, "command failed");
                }
                err.to_string()
            }
        };

        match (before, active.state.talking_to()) {
            (Some(_), Some(npc)) => reply.push_str(&format!(" (Still talking to {npc})")),
            (Some(_), None) => reply.push_str(" (Conversation ended)"),
            (None, Some(npc)) => reply.push_str(&format!(" (Now talking to {npc})")),
            (None, None) => {}
        }
        reply
    }

    /// Save the active run. Without a name, a timestamped file is used.
    pub fn save_run(&self, name: Option<&str>) -> FictionResult<String> {
        let active = self.active()?;
        let save = SaveFile::capture(&active.run, &active.state);
        let file = self.store.write(name, &save)?;
        Ok(format!("Run saved to {file}"))
    }

    /// Load a save, replacing the active run.
    ///
    /// The save is read and validated before anything changes, so a failed
    /// load leaves the current run untouched.
    pub fn load_run(&mut self, name: &str) -> FictionResult<String> {
        let save = self.store.read(name)?;
        let profile = self
            .active
            .as_ref()
            .map(|a| (a.state.player_name.clone(), a.state.player_class.clone()))
            .unwrap_or_default();

        let mut state = GameState::new(save.game_state.location.clone())
            .with_profile(profile.0, profile.1);
        state.flags = save.game_state.flags.iter().cloned().collect();
        state.inventory = save.game_state.inventory.clone();

        let seed = Seed::new(save.seed.as_str());
        let mut active = self.activate(&seed, state);
        active.withdraw_carried_items();
        active.run.visited = save.visited_scenes.iter().cloned().collect();
        let location = active.state.location.clone();
        active.run.visit(&location);

        self.active = Some(active);
        tracing::info!(save = name, seed = %seed, "run loaded");
        Ok(format!("Run loaded from {}", SaveStore::file_name(Some(name))?))
    }

    /// Timestamped saves in the save directory.
    pub fn list_saves(&self) -> FictionResult<Vec<String>> {
        self.store.list()
    }

    /// Summary of the active run.
    pub fn status(&self) -> FictionResult<RunStatus> {
        let active = self.active()?;
        Ok(RunStatus {
            seed: active.run.seed.clone(),
            location: active.state.location.clone(),
            visited_scenes: active.run.visited.len(),
            inventory_count: active.state.inventory.len(),
        })
    }

    /// Full records of the carried items.
    pub fn inventory_details(&self) -> FictionResult<Vec<Item>> {
        Ok(self.active()?.state.inventory.values().cloned().collect())
    }
}

impl ActiveRun {
    fn scene(&self) -> FictionResult<&Scene> {
        Ok(self.run.graph.require(&self.state.location)?)
    }

    fn scene_name(&self, id: &str) -> String {
        self.run
            .graph
            .get(id)
            .map_or_else(|| title_from_id(id), |s| s.name.clone())
    }

    fn scene_data(&self, explorer: &Explorer) -> FictionResult<SceneData> {
        let scene = self.scene()?;
        Ok(SceneData {
            scene_id: scene.id.clone(),
            name: scene.name.clone(),
            description: scene.description.clone(),
            items: scene.items.iter().map(|i| i.name.clone()).collect(),
            npcs: scene.npcs.iter().map(|n| n.name.clone()).collect(),
            choices: self.choices(explorer)?,
            exits: scene
                .connections
                .iter()
                .map(|(direction, target)| ExitView {
                    direction: direction.clone(),
                    destination: self.scene_name(target),
                })
                .collect(),
            inventory: self.state.inventory.keys().cloned().collect(),
            seed: self.run.seed.clone(),
            visited_scenes_count: self.run.visited.len(),
            location_history: self.run.history.to_vec(),
            current_conversation: self.state.talking_to().map(str::to_string),
        })
    }

    fn choices(&self, explorer: &Explorer) -> FictionResult<Vec<String>> {
        let scene = self.scene()?;
        if let Some(npc) = self.state.talking_to().and_then(|name| scene.npc(name)) {
            let mut topics: Vec<String> = conversation::topics(npc)
                .into_iter()
                .map(String::from)
                .collect();
            topics.push("goodbye".to_string());
            return Ok(topics);
        }

        let mut choices: Vec<String> = scene
            .connections
            .iter()
            .map(|(direction, target)| format!("go {direction} ({})", self.scene_name(target)))
            .collect();
        choices.extend(scene.items.iter().map(|i| format!("take {}", i.name.to_lowercase())));
        choices.extend(scene.npcs.iter().map(|n| format!("talk to {}", n.name.to_lowercase())));
        choices.extend(
            scene
                .actions
                .iter()
                .filter(|a| holds(a.condition.as_deref(), &self.state))
                .map(|a| a.action.clone()),
        );
        if explorer.can_explore(scene) {
            choices.extend(
                Direction::CARDINAL
                    .iter()
                    .filter(|d| scene.exit(d.name()).is_none())
                    .map(|d| format!("explore {}", d.name())),
            );
        }
        Ok(choices)
    }

    fn converse(&mut self, input: &str) -> FictionResult<String> {
        let scene = self.run.graph.require(&self.state.location)?;
        self.state
            .conversation
            .respond(scene, input, &mut self.chatter_rng)
    }

    fn action(&self, input: &str) -> Option<SceneAction> {
        let wanted = input.trim().to_lowercase();
        self.scene()
            .ok()?
            .actions
            .iter()
            .find(|a| a.action.to_lowercase() == wanted)
            .cloned()
    }

    fn dispatch(&mut self, explorer: &Explorer, input: &str) -> FictionResult<String> {
        if let Some(action) = self.action(input) {
            return self.perform(&action);
        }

        match parse_command(input) {
            Command::Go { direction } => self.go(&direction),
            Command::Explore { direction } => self.explore(explorer, &direction),
            Command::Backtrack { target } => self.backtrack(&target),
            Command::Take { item } => self.take(&item),
            Command::Drop { item } => self.drop_item(&item),
            Command::Use { item } => self.use_item(&item),
            Command::Talk { npc } => self.talk(&npc),
            Command::Inventory => Ok(self.inventory()),
            Command::Look => self.look(),
            Command::Help => Ok(HELP_TEXT.to_string()),
            Command::Incomplete { prompt } => Err(FictionError::Incomplete(prompt)),
            Command::Unknown { input } if is_closing(&input) => {
                Err(FictionError::NotInConversation)
            }
            Command::Unknown { input } => Err(FictionError::UnknownCommand(input)),
        }
    }

    /// Move to `target`, synthesizing a stand-in scene if it has no data.
    fn move_to(&mut self, target: &str) {
        ensure_scene(&mut self.run.graph, target);
        self.state.location = target.to_string();
        self.state.conversation.reset();
        self.run.visit(target);
    }

    fn go(&mut self, direction: &str) -> FictionResult<String> {
        let target = self
            .scene()?
            .exit(direction)
            .map(str::to_string)
            .ok_or_else(|| FictionError::CannotGo(direction.to_string()))?;
        self.move_to(&target);
        Ok(format!("You go {direction} to {}.", self.scene_name(&target)))
    }

    fn explore(&mut self, explorer: &Explorer, direction: &str) -> FictionResult<String> {
        let from = self.state.location.clone();
        let from_name = self.scene_name(&from);
        let outcome = explorer
            .explore(&mut self.run, &mut self.explore_rng, &from, direction)
            .map_err(|err| match err {
                GenError::NotSparse { .. } => {
                    FictionError::ExplorationUnavailable { scene: from_name }
                }
                other => other.into(),
            })?;
        self.move_to(&outcome.scene_id);
        let name = self.scene_name(&outcome.scene_id);
        Ok(if outcome.charted {
            format!("You go {} to {name}.", outcome.direction)
        } else if outcome.created {
            format!(
                "You venture {} into uncharted land and discover {name}.",
                outcome.direction
            )
        } else {
            format!("You venture {} and find yourself at {name}.", outcome.direction)
        })
    }

    fn backtrack(&mut self, target: &str) -> FictionResult<String> {
        let wanted = target.trim().to_lowercase();
        let slug = wanted.replace(' ', "_");
        let found = self
            .run
            .history
            .iter()
            .filter(|id| *id != self.state.location)
            .find(|id| *id == slug || self.scene_name(id).to_lowercase() == wanted)
            .map(str::to_string)
            .ok_or_else(|| FictionError::NoHistoryEntry(target.to_string()))?;
        self.move_to(&found);
        Ok(format!("You retrace your steps to {}.", self.scene_name(&found)))
    }

    fn take(&mut self, name: &str) -> FictionResult<String> {
        let scene = self.run.graph.require_mut(&self.state.location)?;
        let item = scene
            .take_item(name)
            .ok_or_else(|| FictionError::ItemNotHere(name.to_string()))?;
        let item_name = item.name.clone();
        if let Err(item) = self.state.carry(item) {
            scene.put_item(item);
            return Err(FictionError::AlreadyCarrying(item_name));
        }
        Ok(format!("You take the {item_name}."))
    }

    fn drop_item(&mut self, name: &str) -> FictionResult<String> {
        let scene = self.run.graph.require_mut(&self.state.location)?;
        let item = self
            .state
            .remove_item(name)
            .ok_or_else(|| FictionError::ItemNotInInventory(name.to_string()))?;
        let reply = format!("You drop the {}.", item.name);
        scene.put_item(item);
        Ok(reply)
    }

    fn use_item(&self, name: &str) -> FictionResult<String> {
        let item = self
            .state
            .item(name)
            .ok_or_else(|| FictionError::ItemNotInInventory(name.to_string()))?;
        Ok(if let Some(damage) = item.property("damage") {
            format!("You brandish the {}. It could inflict {damage} damage.", item.name)
        } else if let Some(heal) = item.property("heal") {
            format!("You use the {} and heal {heal} health.", item.name)
        } else {
            format!("You use the {}, but it has no effect.", item.name)
        })
    }

    fn talk(&mut self, name: &str) -> FictionResult<String> {
        let scene = self.run.graph.require(&self.state.location)?;
        let npc = scene
            .npc(name)
            .ok_or_else(|| FictionError::NpcNotHere(name.to_string()))?;
        self.state.conversation.begin(npc)
    }

    fn inventory(&self) -> String {
        if self.state.inventory.is_empty() {
            return "You aren't carrying anything.".to_string();
        }
        let names: Vec<&str> = self.state.inventory.keys().map(String::as_str).collect();
        format!("You are carrying: {}", names.join(", "))
    }

    fn look(&self) -> FictionResult<String> {
        let scene = self.scene()?;
        let mut out = format!("{}\n{}", scene.name, scene.description);
        if !scene.items.is_empty() {
            let items: Vec<&str> = scene.items.iter().map(|i| i.name.as_str()).collect();
            out.push_str(&format!("\nYou see: {}", items.join(", ")));
        }
        if !scene.npcs.is_empty() {
            let npcs: Vec<&str> = scene.npcs.iter().map(|n| n.name.as_str()).collect();
            out.push_str(&format!("\nPresent: {}", npcs.join(", ")));
        }
        if !scene.connections.is_empty() {
            let exits: Vec<String> = scene
                .connections
                .iter()
                .map(|(d, t)| format!("{d} ({})", self.scene_name(t)))
                .collect();
            out.push_str(&format!("\nExits: {}", exits.join(", ")));
        }
        Ok(out)
    }

    fn perform(&mut self, action: &SceneAction) -> FictionResult<String> {
        if !holds(action.condition.as_deref(), &self.state) {
            return Err(FictionError::ConditionNotMet(action.action.clone()));
        }
        if let Some(flag) = &action.set_flag {
            self.state.set_flag(flag.clone());
        }
        let mut reply = format!("You {}.", action.action);
        if let Some(target) = &action.target {
            self.move_to(target);
            reply.push_str(&format!(" You arrive at {}.", self.scene_name(target)));
        }
        tracing::debug!(action = %action.action, "scene action performed");
        Ok(reply)
    }

    /// Remove freshly generated copies of carried items from the world.
    fn withdraw_carried_items(&mut self) {
        let carried: Vec<Item> = self.state.inventory.values().cloned().collect();
        for item in carried {
            let holder = self
                .run
                .graph
                .scenes()
                .find(|s| s.items.contains(&item))
                .map(|s| s.id.clone());
            if let Some(scene) = holder.and_then(|id| self.run.graph.get_mut(&id)) {
                scene.items.retain(|i| i != &item);
            }
        }
    }
}
