//! Canned lines keyed by personality bucket.

use rand::Rng;
use rand::seq::IndexedRandom;
use wf_core::Personality;

/// Said on parting when the NPC has no farewell of its own.
pub const GENERIC_FAREWELL: &str = "Farewell, traveler.";

/// Said when asked for work by an NPC with none.
pub const NO_TASK: &str = "I have no tasks for you right now.";

/// Said when asked to trade by an NPC with nothing to offer.
pub const NO_TRADE: &str = "I have nothing to trade.";

/// Said on greeting when the NPC has no greeting of its own.
pub const GENERIC_GREETING: &str = "They greet you.";

/// What the NPC shares when asked about the area.
pub fn info_line(personality: Personality) -> &'static str {
    match personality {
        Personality::Friendly => {
            "Happy to help! The paths here wind more than you'd think, so keep your bearings."
        }
        Personality::Gruff => "Roads go places. Don't get lost. That's all you need.",
        Personality::Mysterious => {
            "Not every way is written on a map. Some open only for those who look."
        }
        Personality::Wise => {
            "The land remembers those who walk it with care. Listen, and it will guide you."
        }
        Personality::Cheerful => {
            "Oh, there's so much to see! Every corner hides a little wonder!"
        }
        Personality::Neutral => "There isn't much I can tell you about these parts.",
    }
}

/// A random bit of small talk.
pub fn small_talk<R: Rng + ?Sized>(personality: Personality, rng: &mut R) -> &'static str {
    pool(personality)
        .choose(rng)
        .copied()
        .unwrap_or("Hm.")
}

fn pool(personality: Personality) -> &'static [&'static str] {
    match personality {
        Personality::Friendly => &[
            "It's good to see a new face around here.",
            "Take care out there, won't you?",
            "If you need anything, just ask.",
        ],
        Personality::Gruff => &[
            "Hmph.",
            "I've got work to do.",
            "Make it quick.",
        ],
        Personality::Mysterious => &[
            "The wind carries whispers, if you know how to listen.",
            "Some doors are better left closed.",
            "We have met before. You just don't remember.",
        ],
        Personality::Wise => &[
            "Patience is a traveler's truest companion.",
            "Every path teaches something, even the wrong ones.",
            "The old trees have seen more than any of us.",
        ],
        Personality::Cheerful => &[
            "What a lovely day for an adventure!",
            "You have a very kind face, you know.",
            "I just love meeting travelers!",
        ],
        Personality::Neutral => &[
            "I see.",
            "Is that so?",
            "Hm, interesting.",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn every_bucket_has_lines() {
        let mut rng = StdRng::seed_from_u64(0);
        for p in [
            Personality::Friendly,
            Personality::Gruff,
            Personality::Mysterious,
            Personality::Wise,
            Personality::Cheerful,
            Personality::Neutral,
        ] {
            assert!(!info_line(p).is_empty());
            assert!(pool(p).contains(&small_talk(p, &mut rng)));
        }
    }
}
