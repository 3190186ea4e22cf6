//! Keyword routing of conversation input.

/// Words that end a conversation.
pub const CLOSING_WORDS: &[&str] = &["bye", "goodbye", "leave", "exit", "end", "farewell"];

const QUEST_WORDS: &[&str] = &[
    "quest", "quests", "task", "tasks", "job", "work", "mission", "adventure", "challenge",
];
const TRADE_WORDS: &[&str] = &[
    "trade", "trading", "buy", "sell", "barter", "wares", "goods", "shop", "deal",
];
const INFO_WORDS: &[&str] = &[
    "info", "information", "news", "rumor", "rumors", "rumour", "rumours", "about", "area",
    "around", "place", "lore", "know",
];

/// What a line of conversation is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    /// Asking for work.
    Quest,
    /// Asking to trade.
    Trade,
    /// Asking about the surroundings.
    Info,
    /// Anything else.
    Chat,
    /// Ending the conversation.
    Close,
}

impl Topic {
    /// Route a line by the first matching keyword family.
    pub fn classify(input: &str) -> Self {
        if is_closing(input) {
            return Self::Close;
        }
        let lower = input.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let mentions = |family: &[&str]| words.iter().any(|w| family.contains(w));

        if mentions(QUEST_WORDS) {
            Self::Quest
        } else if mentions(TRADE_WORDS) {
            Self::Trade
        } else if mentions(INFO_WORDS) {
            Self::Info
        } else {
            Self::Chat
        }
    }
}

/// Whether the whole input is a closing word.
pub fn is_closing(input: &str) -> bool {
    let lower = input.trim().to_lowercase();
    CLOSING_WORDS.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_words_are_exact() {
        assert!(is_closing("  Farewell "));
        assert!(is_closing("bye"));
        assert!(!is_closing("bye now"));
        assert_eq!(Topic::classify("goodbye"), Topic::Close);
    }

    #[test]
    fn keyword_families() {
        assert_eq!(Topic::classify("Do you have a quest?"), Topic::Quest);
        assert_eq!(Topic::classify("what do you sell"), Topic::Trade);
        assert_eq!(Topic::classify("any news?"), Topic::Info);
        assert_eq!(Topic::classify("nice weather"), Topic::Chat);
    }
}
