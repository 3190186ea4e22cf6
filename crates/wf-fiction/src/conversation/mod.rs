//! NPC conversation state machine.
//!
//! A player is either idle or talking to one NPC in the current scene.
//! While talking, every line of input is answered by the NPC instead of
//! being dispatched as a command, until a closing word ends the exchange.

mod lines;
mod topic;

pub use lines::{GENERIC_FAREWELL, GENERIC_GREETING, NO_TASK, NO_TRADE, info_line, small_talk};
pub use topic::{CLOSING_WORDS, Topic, is_closing};

use rand::Rng;
use wf_core::{Npc, Scene};

use crate::error::{FictionError, FictionResult};

/// Whether a conversation is in progress, and with whom.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConversationState {
    /// Not talking to anyone.
    #[default]
    Idle,
    /// Talking to the named NPC.
    Talking {
        /// NPC display name.
        npc: String,
    },
}

impl ConversationState {
    /// Name of the NPC being talked to.
    pub fn npc(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Talking { npc } => Some(npc),
        }
    }

    /// Whether a conversation is in progress.
    pub fn is_talking(&self) -> bool {
        matches!(self, Self::Talking { .. })
    }

    /// Start talking to `npc`. Returns the greeting and available topics.
    pub fn begin(&mut self, npc: &Npc) -> FictionResult<String> {
        if let Self::Talking { npc: current } = self {
            return Err(FictionError::AlreadyTalking(current.clone()));
        }
        *self = Self::Talking {
            npc: npc.name.clone(),
        };
        tracing::debug!(npc = %npc.name, "conversation started");
        Ok(greet(npc))
    }

    /// Answer one line of player input.
    ///
    /// The NPC must still be in `scene`; if it is not, the conversation is
    /// dropped and the player told so.
    pub fn respond<R: Rng + ?Sized>(
        &mut self,
        scene: &Scene,
        input: &str,
        rng: &mut R,
    ) -> FictionResult<String> {
        let Self::Talking { npc: name } = self else {
            return Err(FictionError::NotInConversation);
        };
        let Some(npc) = scene.npc(name) else {
            let reply = format!("{name} is no longer here.");
            *self = Self::Idle;
            return Ok(reply);
        };

        let topic = Topic::classify(input);
        tracing::debug!(npc = %npc.name, ?topic, "conversation turn");
        let line = match topic {
            Topic::Close => {
                let line = npc
                    .dialogue
                    .farewell
                    .as_deref()
                    .unwrap_or(GENERIC_FAREWELL);
                let reply = format!("{}: \"{line}\"", npc.name);
                *self = Self::Idle;
                return Ok(reply);
            }
            Topic::Quest => quest_line(npc),
            Topic::Trade => trade_line(npc),
            Topic::Info => info_line(npc.bucket()).to_string(),
            Topic::Chat => small_talk(npc.bucket(), rng).to_string(),
        };
        Ok(format!("{}: \"{line}\"", npc.name))
    }

    /// Leave the conversation without a farewell.
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}

/// Topics an NPC can be asked about, by keyword.
pub fn topics(npc: &Npc) -> Vec<&'static str> {
    let mut topics = Vec::new();
    if npc.offers_quest() {
        topics.push("quest");
    }
    if npc.offers_trade() {
        topics.push("trade");
    }
    if npc.offers_info() {
        topics.push("info");
    }
    topics.push("chat");
    topics
}

fn greet(npc: &Npc) -> String {
    let greeting = npc
        .dialogue
        .greeting
        .as_deref()
        .unwrap_or(GENERIC_GREETING);
    format!(
        "{}: \"{greeting}\"\nYou can ask about: {}. Say goodbye to leave.",
        npc.name,
        topics(npc).join(", ")
    )
}

fn quest_line(npc: &Npc) -> String {
    let mut line = npc.dialogue.quest.clone().unwrap_or_else(|| {
        if npc.quests.is_empty() {
            NO_TASK.to_string()
        } else {
            "There is something you could do for me.".to_string()
        }
    });
    if !npc.quests.is_empty() {
        line.push_str(&format!(" (Quest: {})", npc.quests.join(", ")));
    }
    line
}

fn trade_line(npc: &Npc) -> String {
    let offers: Vec<String> = npc
        .trades
        .iter()
        .map(|(offer, price)| format!("{offer} for {price}"))
        .collect();
    match (&npc.dialogue.trade, offers.is_empty()) {
        (Some(line), true) => line.clone(),
        (Some(line), false) => format!("{line} (Offers: {})", offers.join(", ")),
        (None, false) => format!("I can offer {}.", offers.join(", ")),
        (None, true) => NO_TRADE.to_string(),
    }
}
