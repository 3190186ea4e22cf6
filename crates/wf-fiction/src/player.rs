//! Player state management.

use std::collections::{BTreeMap, BTreeSet};

use wf_core::Item;

use crate::conversation::ConversationState;

/// The player's state within a run.
///
/// `location` always names a scene of the active run. The inventory is
/// keyed by item name; an item lives either here or in exactly one scene.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Current scene id.
    pub location: String,
    /// Carried items by name.
    pub inventory: BTreeMap<String, Item>,
    /// Raised story flags.
    pub flags: BTreeSet<String>,
    /// Conversation in progress, if any.
    pub conversation: ConversationState,
    /// Name the player chose.
    pub player_name: Option<String>,
    /// Class the player chose.
    pub player_class: Option<String>,
}

impl GameState {
    /// Create a fresh state at the given scene.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            inventory: BTreeMap::new(),
            flags: BTreeSet::new(),
            conversation: ConversationState::Idle,
            player_name: None,
            player_class: None,
        }
    }

    /// Record the player's name and class.
    pub fn with_profile(mut self, name: Option<String>, class: Option<String>) -> Self {
        self.player_name = name;
        self.player_class = class;
        self
    }

    /// Check if a flag is raised.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Raise a flag. Returns `false` if it was already set.
    pub fn set_flag(&mut self, flag: impl Into<String>) -> bool {
        self.flags.insert(flag.into())
    }

    /// Check if an item with this name is carried (case-insensitive).
    pub fn has_item(&self, name: &str) -> bool {
        self.item(name).is_some()
    }

    /// Look up a carried item by name (case-insensitive).
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.inventory.values().find(|i| i.is_named(name))
    }

    /// Put an item in the inventory.
    ///
    /// If an item with the same name is already carried, nothing changes
    /// and the item is handed back.
    pub fn carry(&mut self, item: Item) -> Result<(), Item> {
        if self.has_item(&item.name) {
            return Err(item);
        }
        self.inventory.insert(item.name.clone(), item);
        Ok(())
    }

    /// Take an item out of the inventory.
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        let key = self
            .inventory
            .iter()
            .find(|(_, item)| item.is_named(name))
            .map(|(key, _)| key.clone())?;
        self.inventory.remove(&key)
    }

    /// Name of the NPC being talked to.
    pub fn talking_to(&self) -> Option<&str> {
        self.conversation.npc()
    }
}
