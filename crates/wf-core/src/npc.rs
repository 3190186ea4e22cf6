use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::template::NpcTemplate;

/// Personality bucket that decides how an NPC answers idle questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    /// Warm and helpful.
    Friendly,
    /// Short-tempered and terse.
    Gruff,
    /// Speaks in riddles.
    Mysterious,
    /// Old, patient, full of proverbs.
    Wise,
    /// Relentlessly upbeat.
    Cheerful,
    /// Anything the template author wrote that is not one of the above.
    #[default]
    Neutral,
}

impl Personality {
    /// Map a template label onto a bucket. Unrecognized labels fall into
    /// [`Personality::Neutral`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "friendly" => Self::Friendly,
            "gruff" => Self::Gruff,
            "mysterious" => Self::Mysterious,
            "wise" => Self::Wise,
            "cheerful" => Self::Cheerful,
            _ => Self::Neutral,
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Friendly => "friendly",
            Self::Gruff => "gruff",
            Self::Mysterious => "mysterious",
            Self::Wise => "wise",
            Self::Cheerful => "cheerful",
            Self::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

/// Dialogue lines an NPC can speak. The well-known topics are explicit;
/// anything else the template declares is kept in `other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dialogue {
    /// Spoken when a conversation starts.
    pub greeting: Option<String>,
    /// Spoken when asked about quests.
    pub quest: Option<String>,
    /// Spoken when asked about trading.
    pub trade: Option<String>,
    /// Spoken when a conversation ends.
    pub farewell: Option<String>,
    /// Additional author-defined topics.
    pub other: BTreeMap<String, String>,
}

impl Dialogue {
    /// Split a template dialogue map into known and extra topics.
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let mut dialogue = Self::default();
        for (topic, line) in map {
            match topic.as_str() {
                "greeting" => dialogue.greeting = Some(line.clone()),
                "quest" => dialogue.quest = Some(line.clone()),
                "trade" => dialogue.trade = Some(line.clone()),
                "farewell" => dialogue.farewell = Some(line.clone()),
                _ => {
                    dialogue.other.insert(topic.clone(), line.clone());
                }
            }
        }
        dialogue
    }
}

/// A spawned non-player character.
///
/// Each spawn is an independent copy of its template; two scenes that
/// reference the same template never share mutable state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Npc {
    /// Display name.
    pub name: String,
    /// Physical description.
    pub description: String,
    /// Personality bucket, or `None` if the template declares none.
    pub personality: Option<Personality>,
    /// Dialogue lines.
    pub dialogue: Dialogue,
    /// Quest titles this NPC can hand out.
    pub quests: Vec<String>,
    /// Trade offers: what they give and what they want for it.
    pub trades: BTreeMap<String, String>,
}

impl Npc {
    /// Create an NPC with no dialogue or capabilities.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            personality: None,
            dialogue: Dialogue::default(),
            quests: Vec::new(),
            trades: BTreeMap::new(),
        }
    }

    /// Spawn a copy of a template.
    pub fn from_template(template: &NpcTemplate) -> Self {
        let personality = if template.personality.trim().is_empty() {
            None
        } else {
            Some(Personality::from_label(&template.personality))
        };
        Self {
            name: template.name.clone(),
            description: template.description.clone(),
            personality,
            dialogue: Dialogue::from_map(&template.dialogue),
            quests: template.quests.clone(),
            trades: template.trades.clone(),
        }
    }

    /// Set the personality bucket.
    pub fn with_personality(mut self, personality: Personality) -> Self {
        self.personality = Some(personality);
        self
    }

    /// Set the greeting line.
    pub fn with_greeting(mut self, line: impl Into<String>) -> Self {
        self.dialogue.greeting = Some(line.into());
        self
    }

    /// Set the quest line.
    pub fn with_quest(mut self, line: impl Into<String>) -> Self {
        self.dialogue.quest = Some(line.into());
        self
    }

    /// Set the farewell line.
    pub fn with_farewell(mut self, line: impl Into<String>) -> Self {
        self.dialogue.farewell = Some(line.into());
        self
    }

    /// Add a trade offer.
    pub fn with_trade(mut self, offer: impl Into<String>, price: impl Into<String>) -> Self {
        self.trades.insert(offer.into(), price.into());
        self
    }

    /// The bucket used for canned responses.
    pub fn bucket(&self) -> Personality {
        self.personality.unwrap_or_default()
    }

    /// Whether the NPC has anything to say about quests.
    pub fn offers_quest(&self) -> bool {
        self.dialogue.quest.is_some() || !self.quests.is_empty()
    }

    /// Whether the NPC trades.
    pub fn offers_trade(&self) -> bool {
        self.dialogue.trade.is_some() || !self.trades.is_empty()
    }

    /// Whether the NPC will share local information.
    pub fn offers_info(&self) -> bool {
        self.personality.is_some()
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}
