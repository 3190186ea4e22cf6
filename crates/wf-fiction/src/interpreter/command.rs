//! Parsing of canonical command strings.
//!
//! The [`super::Interpreter`] expands loose input into one of the current
//! choices (`go north (old oak)`, `take sword`, `talk to hermit`) or passes
//! it through; this module turns the result into a [`Command`].

use wf_core::{Direction, normalize};

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Follow a declared exit.
    Go {
        /// Direction label, normalized.
        direction: String,
    },
    /// Head into an uncharted direction.
    Explore {
        /// Direction label, normalized.
        direction: String,
    },
    /// Return to a recently visited scene.
    Backtrack {
        /// Scene id or name.
        target: String,
    },
    /// Pick up an item.
    Take {
        /// The item name.
        item: String,
    },
    /// Put an item down.
    Drop {
        /// The item name.
        item: String,
    },
    /// Use a carried item.
    Use {
        /// The item name.
        item: String,
    },
    /// Start a conversation.
    Talk {
        /// The NPC name.
        npc: String,
    },
    /// List inventory.
    Inventory,
    /// Describe the current scene.
    Look,
    /// Show help.
    Help,
    /// A verb without its object.
    Incomplete {
        /// What to ask the player.
        prompt: &'static str,
    },
    /// Unknown command.
    Unknown {
        /// The original input.
        input: String,
    },
}

const MOVE_VERBS: &[&str] = &["go", "move", "walk", "head", "travel"];
const EXPLORE_VERBS: &[&str] = &["explore", "wander", "venture"];
const BACKTRACK_VERBS: &[&str] = &["backtrack", "return", "retrace"];
const LOOK_VERBS: &[&str] = &["look", "l", "describe"];
const TAKE_VERBS: &[&str] = &["take", "get", "pick", "grab"];
const DROP_VERBS: &[&str] = &["drop", "discard"];
const TALK_VERBS: &[&str] = &["talk", "speak", "chat"];
const USE_VERBS: &[&str] = &["use", "apply"];
const INVENTORY_VERBS: &[&str] = &["inventory", "inv", "i"];
const HELP_VERBS: &[&str] = &["help", "h", "?", "commands"];

/// Verbs whose commands never appear among scene choices.
pub(crate) const SYSTEM_VERBS: &[&[&str]] = &[
    BACKTRACK_VERBS,
    LOOK_VERBS,
    DROP_VERBS,
    USE_VERBS,
    INVENTORY_VERBS,
    HELP_VERBS,
];

/// Words that carry no meaning on their own when matching tokens.
pub(crate) const FILLER_WORDS: &[&str] = &[
    "go", "take", "talk", "to", "explore", "the", "a", "an", "at", "with",
];

/// The command vocabulary, for `help`.
pub const HELP_TEXT: &str = "\
Commands:
  go <direction>        follow an exit (n, s, e, w, ne, nw, se, sw work too)
  explore <direction>   head somewhere uncharted from a sparse place
  backtrack <place>     return to somewhere you were recently
  take <item>           pick something up
  drop <item>           put something down
  use <item>            use something you carry
  talk to <someone>     start a conversation (say goodbye to end it)
  inventory             list what you carry
  look                  describe where you are
  help                  show this list";

/// Parse a command string.
pub fn parse_command(input: &str) -> Command {
    let cleaned = strip_annotation(input.trim()).to_lowercase();
    if cleaned.is_empty() {
        return Command::Look;
    }

    let words: Vec<&str> = cleaned.split_whitespace().collect();
    let verb = words[0];
    let rest = &words[1..];

    if let Some(direction) = Direction::parse(verb).filter(|_| rest.is_empty()) {
        return Command::Go {
            direction: direction.name().to_string(),
        };
    }

    if MOVE_VERBS.contains(&verb) {
        return match rest {
            [] => Command::Incomplete { prompt: "Go where?" },
            ["back", target @ ..] if !target.is_empty() => Command::Backtrack {
                target: object(target, &["to"]),
            },
            _ => Command::Go {
                direction: normalize(&rest.join(" ")),
            },
        };
    }
    if EXPLORE_VERBS.contains(&verb) {
        return match rest {
            [] => Command::Incomplete {
                prompt: "Explore which way?",
            },
            _ => Command::Explore {
                direction: normalize(&object(rest, &["to", "the"])),
            },
        };
    }
    if BACKTRACK_VERBS.contains(&verb) {
        let target = object(rest, &["to"]);
        return if target.is_empty() {
            Command::Incomplete {
                prompt: "Backtrack to where?",
            }
        } else {
            Command::Backtrack { target }
        };
    }
    if LOOK_VERBS.contains(&verb) {
        return Command::Look;
    }
    if TAKE_VERBS.contains(&verb) {
        let item = object(rest, &["up", "the"]);
        return if item.is_empty() {
            Command::Incomplete {
                prompt: "Take what?",
            }
        } else {
            Command::Take { item }
        };
    }
    if DROP_VERBS.contains(&verb) {
        let item = object(rest, &["the"]);
        return if item.is_empty() {
            Command::Incomplete {
                prompt: "Drop what?",
            }
        } else {
            Command::Drop { item }
        };
    }
    if USE_VERBS.contains(&verb) {
        let item = object(rest, &["the"]);
        return if item.is_empty() {
            Command::Incomplete { prompt: "Use what?" }
        } else {
            Command::Use { item }
        };
    }
    if TALK_VERBS.contains(&verb) {
        let npc = object(rest, &["to", "with", "the"]);
        return if npc.is_empty() {
            Command::Incomplete {
                prompt: "Talk to whom?",
            }
        } else {
            Command::Talk { npc }
        };
    }
    if INVENTORY_VERBS.contains(&verb) {
        return Command::Inventory;
    }
    if HELP_VERBS.contains(&verb) {
        return Command::Help;
    }

    Command::Unknown {
        input: input.trim().to_string(),
    }
}

/// Whether the input starts with a verb that bypasses choice matching.
pub(crate) fn starts_with_system_verb(input: &str) -> bool {
    let lower = input.trim().to_lowercase();
    let Some(verb) = lower.split_whitespace().next() else {
        return false;
    };
    SYSTEM_VERBS.iter().any(|family| family.contains(&verb))
}

/// `go north (Old Oak)` becomes `go north`.
fn strip_annotation(input: &str) -> &str {
    match input.find(" (") {
        Some(pos) if input.ends_with(')') => input[..pos].trim_end(),
        _ => input,
    }
}

/// Join the object words, skipping leading particles.
fn object(words: &[&str], particles: &[&str]) -> String {
    let start = words
        .iter()
        .position(|w| !particles.contains(w))
        .unwrap_or(words.len());
    words[start..].join(" ")
}
