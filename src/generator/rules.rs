//! Strict composition rules.
//!
//! Each rule checks the whole candidate for at least one character of
//! its class. Rules for disabled options are never evaluated.

use super::pool::{CharacterPool, DEFAULT_SYMBOLS};
use crate::config::GeneratorOptions;
use crate::error::GenerateError;
use std::fmt;

/// A character class that strict mode requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrictRule {
    /// At least one of `a-z`.
    Lowercase,
    /// At least one of `A-Z`.
    Uppercase,
    /// At least one of `0-9`.
    Numbers,
    /// At least one configured symbol.
    Symbols,
}

impl StrictRule {
    /// All rules in evaluation order.
    pub const ALL: [StrictRule; 4] = [
        StrictRule::Lowercase,
        StrictRule::Uppercase,
        StrictRule::Numbers,
        StrictRule::Symbols,
    ];

    /// Option name the rule corresponds to.
    pub fn name(self) -> &'static str {
        match self {
            StrictRule::Lowercase => "lowercase",
            StrictRule::Uppercase => "uppercase",
            StrictRule::Numbers => "numbers",
            StrictRule::Symbols => "symbols",
        }
    }

    /// Returns true if the corresponding option is enabled.
    pub fn is_enabled(self, options: &GeneratorOptions) -> bool {
        match self {
            StrictRule::Lowercase => options.lowercase,
            StrictRule::Uppercase => options.uppercase,
            StrictRule::Numbers => options.numbers,
            StrictRule::Symbols => options.symbols.is_enabled(),
        }
    }
}

impl fmt::Display for StrictRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A candidate failed a strict rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("candidate has no {rule} character")]
pub struct RuleViolation {
    /// The unsatisfied rule.
    pub rule: StrictRule,
}

/// The strict rules enabled by a set of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrictRules {
    rules: Vec<StrictRule>,
    /// Characters accepted by the symbols rule.
    symbols: Vec<char>,
}

impl StrictRules {
    /// Collects the rules enabled in `options`.
    ///
    /// An explicit symbol set replaces the default set for the symbols
    /// rule; default symbols outside it do not satisfy the rule.
    pub fn from_options(options: &GeneratorOptions) -> Self {
        let rules = StrictRule::ALL
            .into_iter()
            .filter(|rule| rule.is_enabled(options))
            .collect();
        let symbols = options
            .symbols
            .charset()
            .unwrap_or(DEFAULT_SYMBOLS)
            .chars()
            .collect();

        Self { rules, symbols }
    }

    /// Returns the enabled rules.
    pub fn rules(&self) -> &[StrictRule] {
        &self.rules
    }

    /// Returns true if `ch` belongs to the class of `rule`.
    pub fn matches(&self, rule: StrictRule, ch: char) -> bool {
        match rule {
            StrictRule::Lowercase => ch.is_ascii_lowercase(),
            StrictRule::Uppercase => ch.is_ascii_uppercase(),
            StrictRule::Numbers => ch.is_ascii_digit(),
            StrictRule::Symbols => self.symbols.contains(&ch),
        }
    }

    /// Checks a candidate against every enabled rule.
    ///
    /// Returns the first rule that is not satisfied.
    pub fn check(&self, candidate: &[char]) -> Result<(), RuleViolation> {
        for &rule in &self.rules {
            if !candidate.iter().any(|&ch| self.matches(rule, ch)) {
                return Err(RuleViolation { rule });
            }
        }
        Ok(())
    }

    /// Fails if an enabled rule has no matching character in the pool.
    ///
    /// Regeneration could never satisfy such a rule.
    pub fn ensure_satisfiable(&self, pool: &CharacterPool) -> Result<(), GenerateError> {
        match self.check(pool.as_slice()) {
            Ok(()) => Ok(()),
            Err(RuleViolation { rule }) => Err(GenerateError::UnsatisfiableRule { rule }),
        }
    }
}
