//! Decorative text fragments appended during generation.
//!
//! Every draw goes through the caller's generator, so the fragments a world
//! receives are fixed by its seed.

use rand::Rng;
use rand::seq::IndexedRandom;

/// Chance that a spawned item gets a description flourish.
pub const ITEM_CHANCE: f64 = 0.3;

/// Chance that a quest line gets a flourish.
pub const QUEST_CHANCE: f64 = 0.5;

/// Item impressions, rendered as ` (It seems <x>.)`.
pub const ITEM_IMPRESSIONS: &[&str] = &[
    "unusually heavy",
    "slightly magical",
    "well-used",
    "brand new",
];

/// Lines tacked onto every greeting.
pub const GREETING_TAGS: &[&str] = &[
    "What brings you here?",
    "You look like you have questions.",
    "The forest is full of secrets.",
    "Be wary of the shadows.",
];

/// Lines sometimes tacked onto quest offers.
pub const QUEST_TAGS: &[&str] = &[
    "Will you accept this challenge?",
    "It's not for the faint of heart.",
    "Legends say only the brave succeed.",
];

/// Maybe an item impression, already formatted as a suffix.
pub fn item<R: Rng + ?Sized>(rng: &mut R) -> Option<String> {
    if rng.random::<f64>() >= ITEM_CHANCE {
        return None;
    }
    ITEM_IMPRESSIONS
        .choose(rng)
        .map(|impression| format!(" (It seems {impression}.)"))
}

/// A greeting tag. Always drawn.
pub fn greeting<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    GREETING_TAGS.choose(rng).copied().unwrap_or_default()
}

/// Maybe a quest tag.
pub fn quest<R: Rng + ?Sized>(rng: &mut R) -> Option<&'static str> {
    if rng.random::<f64>() >= QUEST_CHANCE {
        return None;
    }
    QUEST_TAGS.choose(rng).copied()
}
