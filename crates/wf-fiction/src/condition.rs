//! Condition evaluation for scripted scene actions.
//!
//! Conditions are written in a tiny boolean language over flag names:
//!
//! ```text
//! knows_tower_secret and not (trapdoor_open or false)
//! ```
//!
//! `!`, `&&` and `||` are accepted as aliases for `not`, `and` and `or`.

use thiserror::Error;

use crate::player::GameState;

/// A condition that can be evaluated against player state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Condition {
    /// Check if a flag is raised.
    Flag(String),
    /// Logical NOT.
    Not(Box<Condition>),
    /// Logical AND.
    And(Vec<Condition>),
    /// Logical OR.
    Or(Vec<Condition>),
    /// Always true.
    #[default]
    Always,
    /// Always false.
    Never,
}

/// A condition expression that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    /// The expression stopped mid-way.
    #[error("unexpected end of condition")]
    UnexpectedEnd,
    /// A token that does not fit where it appears.
    #[error("unexpected `{0}` in condition")]
    UnexpectedToken(String),
}

impl Condition {
    /// Parse an expression.
    pub fn parse(source: &str) -> Result<Self, ConditionError> {
        let tokens = tokenize(source);
        if tokens.is_empty() {
            return Ok(Condition::Always);
        }
        let mut parser = Parser { tokens, pos: 0 };
        let condition = parser.or()?;
        match parser.peek() {
            None => Ok(condition),
            Some(tok) => Err(ConditionError::UnexpectedToken(tok.to_string())),
        }
    }

    /// Evaluate the condition against the current state.
    pub fn evaluate(&self, state: &GameState) -> bool {
        match self {
            Condition::Flag(flag) => state.has_flag(flag),
            Condition::Not(inner) => !inner.evaluate(state),
            Condition::And(conditions) => conditions.iter().all(|c| c.evaluate(state)),
            Condition::Or(conditions) => conditions.iter().any(|c| c.evaluate(state)),
            Condition::Always => true,
            Condition::Never => false,
        }
    }
}

/// Whether an optional condition string holds.
///
/// A missing condition always holds; one that fails to parse never does.
pub fn holds(source: Option<&str>, state: &GameState) -> bool {
    let Some(source) = source else {
        return true;
    };
    match Condition::parse(source) {
        Ok(condition) => condition.evaluate(state),
        Err(err) => {
            tracing::warn!(condition = source, %err, "treating malformed condition as false");
            false
        }
    }
}

fn tokenize(source: &str) -> Vec<String> {
    let spaced = source
        .replace('(', " ( ")
        .replace(')', " ) ")
        .replace("&&", " and ")
        .replace("||", " or ")
        .replace('!', " not ");
    spaced.split_whitespace().map(str::to_string).collect()
}

struct Parser {
    tokens: Vec<String>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn advance(&mut self) -> Option<String> {
        let tok = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        tok
    }

    fn eat(&mut self, keyword: &str) -> bool {
        if self.peek().is_some_and(|t| t.eq_ignore_ascii_case(keyword)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn or(&mut self) -> Result<Condition, ConditionError> {
        let mut terms = vec![self.and()?];
        while self.eat("or") {
            terms.push(self.and()?);
        }
        Ok(if terms.len() == 1 {
            terms.remove(0)
        } else {
            Condition::Or(terms)
        })
    }

    fn and(&mut self) -> Result<Condition, ConditionError> {
        let mut terms = vec![self.unary()?];
        while self.eat("and") {
            terms.push(self.unary()?);
        }
        Ok(if terms.len() == 1 {
            terms.remove(0)
        } else {
            Condition::And(terms)
        })
    }

    fn unary(&mut self) -> Result<Condition, ConditionError> {
        if self.eat("not") {
            return Ok(Condition::Not(Box::new(self.unary()?)));
        }
        let tok = self.advance().ok_or(ConditionError::UnexpectedEnd)?;
        match tok.to_lowercase().as_str() {
            "(" => {
                let inner = self.or()?;
                if self.eat(")") {
                    Ok(inner)
                } else {
                    Err(self
                        .peek()
                        .map_or(ConditionError::UnexpectedEnd, |t| {
                            ConditionError::UnexpectedToken(t.to_string())
                        }))
                }
            }
            "true" => Ok(Condition::Always),
            "false" => Ok(Condition::Never),
            ")" | "and" | "or" => Err(ConditionError::UnexpectedToken(tok)),
            _ if tok.chars().all(|c| c.is_alphanumeric() || c == '_') => Ok(Condition::Flag(tok)),
            _ => Err(ConditionError::UnexpectedToken(tok)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state(flags: &[&str]) -> GameState {
        let mut state = GameState::new("here");
        for flag in flags {
            state.set_flag(*flag);
        }
        state
    }

    #[test]
    fn single_flag() {
        let cond = Condition::parse("door_open").unwrap();
        assert_eq!(cond, Condition::Flag("door_open".into()));
        assert!(!cond.evaluate(&state(&[])));
        assert!(cond.evaluate(&state(&["door_open"])));
    }

    #[test]
    fn logical_not() {
        let cond = Condition::parse("not secret").unwrap();
        assert!(cond.evaluate(&state(&[])));
        assert!(!cond.evaluate(&state(&["secret"])));
    }

    #[test]
    fn precedence_and_binds_tighter() {
        let cond = Condition::parse("a or b and c").unwrap();
        assert!(cond.evaluate(&state(&["a"])));
        assert!(!cond.evaluate(&state(&["b"])));
        assert!(cond.evaluate(&state(&["b", "c"])));
    }

    #[test]
    fn parentheses_and_aliases() {
        let cond = Condition::parse("(a || b) && !c").unwrap();
        assert!(cond.evaluate(&state(&["b"])));
        assert!(!cond.evaluate(&state(&["b", "c"])));
        assert!(!cond.evaluate(&state(&[])));
    }

    #[test]
    fn literals() {
        assert!(Condition::parse("true").unwrap().evaluate(&state(&[])));
        assert!(!Condition::parse("False").unwrap().evaluate(&state(&[])));
        assert_eq!(Condition::parse("  ").unwrap(), Condition::Always);
    }

    #[test]
    fn malformed_conditions() {
        assert_eq!(Condition::parse("a and"), Err(ConditionError::UnexpectedEnd));
        assert_eq!(Condition::parse("(a"), Err(ConditionError::UnexpectedEnd));
        assert!(matches!(
            Condition::parse("a b"),
            Err(ConditionError::UnexpectedToken(t)) if t == "b"
        ));
        assert!(matches!(
            Condition::parse("a == 1"),
            Err(ConditionError::UnexpectedToken(_))
        ));
    }

    #[test]
    fn holds_degrades_to_false() {
        let s = state(&["a"]);
        assert!(holds(None, &s));
        assert!(holds(Some("a"), &s));
        assert!(!holds(Some("a and and"), &s));
    }

    proptest! {
        #[test]
        fn double_negation_is_identity(flags in flag_set()) {
            let s = state(&flags);
            let plain = Condition::parse("a or b and c").unwrap();
            let twice = Condition::parse("not not (a or b and c)").unwrap();
            prop_assert_eq!(plain.evaluate(&s), twice.evaluate(&s));
        }

        #[test]
        fn de_morgan_holds(flags in flag_set()) {
            let s = state(&flags);
            let pairs = [
                ("not (a and b)", "not a or not b"),
                ("not (a or b)", "not a and not b"),
                ("!(a && (b || c))", "!a || (!b && !c)"),
            ];
            for (lhs, rhs) in pairs {
                let lhs_value = Condition::parse(lhs).unwrap().evaluate(&s);
                let rhs_value = Condition::parse(rhs).unwrap().evaluate(&s);
                prop_assert_eq!(lhs_value, rhs_value, "{} vs {}", lhs, rhs);
            }
        }
    }

    fn flag_set() -> impl Strategy<Value = Vec<&'static str>> {
        proptest::sample::subsequence(vec!["a", "b", "c"], 0..=3)
    }
}
