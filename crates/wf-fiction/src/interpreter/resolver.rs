//! Staged resolution of free text against the legal choices.

use std::fmt;

use strsim::normalized_levenshtein;
use wf_core::Direction;

use super::classifier::{IntentClassifier, ZeroShotClassifier};
use super::command::{FILLER_WORDS, starts_with_system_verb};
use crate::config::{ClassifierConfig, DEFAULT_FUZZY_CUTOFF, EngineConfig};
use crate::conversation::is_closing;

/// Which stage produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Passed through untouched by a guard: a closing word mid-conversation,
    /// or a verb that never appears among the choices.
    Guard,
    /// Case-insensitive equality with a choice.
    Exact,
    /// Direction or `talk to` shorthand.
    Shorthand,
    /// Input and choice contain one another.
    Substring,
    /// A meaningful word of the input is a word of the choice.
    Token,
    /// Close enough by edit distance.
    Fuzzy,
    /// Picked by the remote classifier.
    Classifier,
    /// Nothing matched; the raw input goes on as-is.
    Passthrough,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Guard => "guard",
            Self::Exact => "exact",
            Self::Shorthand => "shorthand",
            Self::Substring => "substring",
            Self::Token => "token",
            Self::Fuzzy => "fuzzy",
            Self::Classifier => "classifier",
            Self::Passthrough => "passthrough",
        };
        f.write_str(name)
    }
}

/// The canonical command chosen for some input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Command text to dispatch.
    pub command: String,
    /// Stage that produced it.
    pub stage: Stage,
}

impl Resolution {
    fn new(command: impl Into<String>, stage: Stage) -> Self {
        Self {
            command: command.into(),
            stage,
        }
    }
}

/// Maps loosely typed input onto one of the current choices.
///
/// Stages run in a fixed order and the first hit wins: guard, exact,
/// shorthand, substring, token, fuzzy, classifier. Cheap, precise stages
/// come first so a looser stage never overrides a better match.
pub struct Interpreter {
    fuzzy_cutoff: f64,
    min_confidence: f64,
    classifier: Option<Box<dyn IntentClassifier>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_CUTOFF)
    }
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("fuzzy_cutoff", &self.fuzzy_cutoff)
            .field("min_confidence", &self.min_confidence)
            .field("classifier", &self.classifier.is_some())
            .finish()
    }
}

impl Interpreter {
    /// An interpreter without a classifier.
    pub fn new(fuzzy_cutoff: f64) -> Self {
        Self {
            fuzzy_cutoff,
            min_confidence: ClassifierConfig::default().min_confidence,
            classifier: None,
        }
    }

    /// Build from engine configuration. A classifier that cannot be
    /// constructed is logged and left out.
    pub fn from_config(config: &EngineConfig) -> Self {
        let interpreter = Self::new(config.fuzzy_cutoff);
        let Some(classifier_config) = &config.classifier else {
            return interpreter;
        };
        match ZeroShotClassifier::new(classifier_config) {
            Ok(classifier) => {
                interpreter.with_classifier(Box::new(classifier), classifier_config.min_confidence)
            }
            Err(err) => {
                tracing::warn!(%err, "intent classifier disabled");
                interpreter
            }
        }
    }

    /// Attach a classifier for the last stage.
    pub fn with_classifier(
        mut self,
        classifier: Box<dyn IntentClassifier>,
        min_confidence: f64,
    ) -> Self {
        self.classifier = Some(classifier);
        self.min_confidence = min_confidence;
        self
    }

    /// Resolve `raw` against `choices`.
    pub fn interpret(&self, raw: &str, choices: &[String], in_conversation: bool) -> Resolution {
        let resolution = self.resolve(raw, choices, in_conversation);
        tracing::debug!(
            input = raw,
            command = %resolution.command,
            stage = %resolution.stage,
            "interpreted"
        );
        resolution
    }

    /// Stages run in order: guard, exact, shorthand, substring, token, fuzzy,
    /// classifier, passthrough. Shorthand runs before substring so `n` means
    /// north even when another choice contains the letter. The token stage
    /// ignores filler words such as `the` and `to`.
    fn resolve(&self, raw: &str, choices: &[String], in_conversation: bool) -> Resolution {
        let input = raw.trim().to_lowercase();
        if input.is_empty() {
            return Resolution::new(raw.trim(), Stage::Passthrough);
        }
        if (in_conversation && is_closing(&input)) || starts_with_system_verb(&input) {
            return Resolution::new(raw.trim(), Stage::Guard);
        }

        let lowered: Vec<String> = choices.iter().map(|c| c.to_lowercase()).collect();
        let hit = |idx: usize, stage| Resolution::new(choices[idx].clone(), stage);

        if let Some(idx) = lowered.iter().position(|c| *c == input) {
            return hit(idx, Stage::Exact);
        }
        if let Some(resolution) = shorthand(&input, choices, &lowered) {
            return resolution;
        }
        if let Some(idx) = lowered
            .iter()
            .position(|c| c.contains(input.as_str()) || input.contains(c.as_str()))
        {
            return hit(idx, Stage::Substring);
        }
        if let Some(idx) = token_match(&input, &lowered) {
            return hit(idx, Stage::Token);
        }
        if let Some(idx) = self.fuzzy_match(&input, &lowered) {
            return hit(idx, Stage::Fuzzy);
        }
        if let Some(label) = self.classify(raw.trim(), choices) {
            return Resolution::new(label, Stage::Classifier);
        }
        Resolution::new(raw.trim(), Stage::Passthrough)
    }

    fn fuzzy_match(&self, input: &str, lowered: &[String]) -> Option<usize> {
        lowered
            .iter()
            .enumerate()
            .map(|(idx, c)| (idx, normalized_levenshtein(input, c)))
            .filter(|(_, score)| *score >= self.fuzzy_cutoff)
            .max_by(|a, b| a.1.total_cmp(&b.1).then(b.0.cmp(&a.0)))
            .map(|(idx, _)| idx)
    }

    fn classify(&self, text: &str, choices: &[String]) -> Option<String> {
        let classifier = self.classifier.as_ref()?;
        if choices.is_empty() {
            return None;
        }
        match classifier.classify(text, choices) {
            Ok(best) if best.score > self.min_confidence && choices.contains(&best.label) => {
                Some(best.label)
            }
            Ok(best) => {
                tracing::debug!(label = %best.label, score = best.score, "classifier not confident");
                None
            }
            Err(err) => {
                tracing::warn!(%err, "classifier failed, passing input through");
                None
            }
        }
    }
}

/// Direction shorthand and bare NPC names. A bare word picks a `talk to`
/// choice only when it is one of the NPC's name words.
fn shorthand(input: &str, choices: &[String], lowered: &[String]) -> Option<Resolution> {
    let words: Vec<&str> = input.split_whitespace().collect();
    let (verb, dir_word) = match words.as_slice() {
        [dir] => ("go", *dir),
        ["go", dir] => ("go", *dir),
        ["explore", dir] => ("explore", *dir),
        _ => ("", ""),
    };

    if let Some(direction) = Direction::parse_compass(dir_word) {
        let wanted = format!("{verb} {}", direction.name());
        let found = lowered
            .iter()
            .position(|c| *c == wanted || c.starts_with(&format!("{wanted} ")))
            .or_else(|| {
                // A bare direction may also name an uncharted way.
                let explore = format!("explore {}", direction.name());
                (words.len() == 1)
                    .then(|| lowered.iter().position(|c| *c == explore))
                    .flatten()
            });
        return Some(match found {
            Some(idx) => Resolution::new(choices[idx].clone(), Stage::Shorthand),
            None => Resolution::new(wanted, Stage::Shorthand),
        });
    }

    if let [word] = words.as_slice() {
        let idx = lowered.iter().position(|c| {
            c.strip_prefix("talk to ")
                .is_some_and(|name| name.split_whitespace().any(|w| w == *word))
        })?;
        return Some(Resolution::new(choices[idx].clone(), Stage::Shorthand));
    }
    None
}

fn token_match(input: &str, lowered: &[String]) -> Option<usize> {
    let tokens: Vec<&str> = input
        .split_whitespace()
        .filter(|t| !FILLER_WORDS.contains(t))
        .collect();
    if tokens.is_empty() {
        return None;
    }
    lowered.iter().position(|choice| {
        let words: Vec<&str> = choice
            .split(|c: char| c.is_whitespace() || c == '(' || c == ')')
            .filter(|w| !w.is_empty())
            .collect();
        tokens.iter().any(|t| words.contains(t))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassifierError;
    use crate::interpreter::classifier::Classification;
    use proptest::prelude::*;

    fn choices() -> Vec<String> {
        ["go north", "take sword", "talk to hermit"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    struct Fixed(Result<Classification, ()>);

    impl IntentClassifier for Fixed {
        fn classify(&self, _: &str, _: &[String]) -> Result<Classification, ClassifierError> {
            self.0
                .clone()
                .map_err(|()| ClassifierError::Unavailable("offline".into()))
        }
    }

    fn resolve(input: &str) -> Resolution {
        Interpreter::default().interpret(input, &choices(), false)
    }

    #[test]
    fn precedence_examples() {
        assert_eq!(resolve("north").command, "go north");
        assert_eq!(resolve("sword").command, "take sword");
        assert_eq!(resolve("hermi").command, "talk to hermit");
        let bye = resolve("bye");
        assert_eq!(bye.command, "bye");
        assert_eq!(bye.stage, Stage::Passthrough);
    }

    #[test]
    fn talk_shorthand_needs_a_name_word() {
        let choices: Vec<String> = vec!["take totem".into(), "talk to old hermit".into()];
        let lowered = choices.clone();
        for word in ["to", "a", "t", "talk", "herm"] {
            assert!(shorthand(word, &choices, &lowered).is_none(), "{word}");
        }
        for word in ["hermit", "old"] {
            let r = shorthand(word, &choices, &lowered).unwrap();
            assert_eq!(r.command, "talk to old hermit");
            assert_eq!(r.stage, Stage::Shorthand);
        }
        // Partial names still land through the substring stage.
        let r = Interpreter::default().interpret("herm", &choices, false);
        assert_eq!(r.command, "talk to old hermit");
        assert_eq!(r.stage, Stage::Substring);
    }

    #[test]
    fn exact_is_case_insensitive() {
        let r = resolve("Take Sword");
        assert_eq!(r.command, "take sword");
        assert_eq!(r.stage, Stage::Exact);
    }

    #[test]
    fn direction_shorthand() {
        let choices: Vec<String> = vec!["take lantern".into(), "go north (Old Oak)".into()];
        let r = Interpreter::default().interpret("n", &choices, false);
        assert_eq!(r.command, "go north (Old Oak)");
        assert_eq!(r.stage, Stage::Shorthand);

        let r = Interpreter::default().interpret("go n", &choices, false);
        assert_eq!(r.command, "go north (Old Oak)");

        // No such exit: expand anyway so the dispatcher can refuse.
        let r = Interpreter::default().interpret("e", &choices, false);
        assert_eq!(r.command, "go east");
    }

    #[test]
    fn bare_direction_can_explore() {
        let choices: Vec<String> = vec!["explore east".into(), "explore west".into()];
        let r = Interpreter::default().interpret("w", &choices, false);
        assert_eq!(r.command, "explore west");
    }

    #[test]
    fn closing_word_guard_only_in_conversation() {
        let r = Interpreter::default().interpret("farewell", &choices(), true);
        assert_eq!(r.stage, Stage::Guard);
        assert_eq!(r.command, "farewell");
    }

    #[test]
    fn system_verbs_bypass_matching() {
        let r = resolve("drop sword");
        assert_eq!(r.command, "drop sword");
        assert_eq!(r.stage, Stage::Guard);
    }

    #[test]
    fn token_and_fuzzy() {
        let r = resolve("grab the sword now");
        assert_eq!(r.command, "take sword");
        assert_eq!(r.stage, Stage::Token);

        let r = resolve("tale swrd");
        assert_eq!(r.command, "take sword");
        assert_eq!(r.stage, Stage::Fuzzy);
    }

    #[test]
    fn filler_tokens_do_not_match() {
        let r = resolve("take lantern");
        assert_eq!(r.stage, Stage::Passthrough);
    }

    #[test]
    fn classifier_used_when_confident() {
        let confident = Interpreter::default().with_classifier(
            Box::new(Fixed(Ok(Classification {
                label: "go north".into(),
                score: 0.93,
            }))),
            0.7,
        );
        let r = confident.interpret("climb upwards", &choices(), false);
        assert_eq!(r.command, "go north");
        assert_eq!(r.stage, Stage::Classifier);

        let unsure = Interpreter::default().with_classifier(
            Box::new(Fixed(Ok(Classification {
                label: "go north".into(),
                score: 0.4,
            }))),
            0.7,
        );
        let r = unsure.interpret("climb upwards", &choices(), false);
        assert_eq!(r.command, "climb upwards");
        assert_eq!(r.stage, Stage::Passthrough);
    }

    #[test]
    fn classifier_failure_passes_through() {
        let offline = Interpreter::default().with_classifier(Box::new(Fixed(Err(()))), 0.7);
        let r = offline.interpret("Climb Upwards", &choices(), false);
        assert_eq!(r.command, "Climb Upwards");
        assert_eq!(r.stage, Stage::Passthrough);
    }

    #[test]
    fn classifier_skipped_without_choices() {
        let confident = Interpreter::default().with_classifier(
            Box::new(Fixed(Ok(Classification {
                label: "x".into(),
                score: 1.0,
            }))),
            0.7,
        );
        let r = confident.interpret("dance", &[], false);
        assert_eq!(r.stage, Stage::Passthrough);
    }

    proptest! {
        #[test]
        fn resolution_is_a_choice_or_the_input(raw in "[a-z ]{0,16}") {
            let choices = choices();
            let r = Interpreter::default().interpret(&raw, &choices, false);
            prop_assert!(
                choices.contains(&r.command)
                    || r.command == raw.trim()
                    || r.stage == Stage::Shorthand,
                "{:?} -> {:?}", raw, r
            );
        }

        #[test]
        fn exact_choice_resolves_to_itself(idx in 0usize..3, upper in any::<bool>()) {
            let choices = choices();
            let raw = if upper { choices[idx].to_uppercase() } else { choices[idx].clone() };
            let r = Interpreter::default().interpret(&raw, &choices, false);
            prop_assert_eq!(&r.command, &choices[idx]);
            prop_assert_eq!(r.stage, Stage::Exact);
        }
    }
}
