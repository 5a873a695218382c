//! Errors surfaced by password generation.
//!
//! All of these are configuration errors: they are detected before any
//! candidate is drawn and are never retried internally.

use crate::generator::StrictRule;
use thiserror::Error;

/// Errors that can occur when building a generator from options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// No character class was enabled, or exclusions removed every character.
    #[error("character pool is empty: enable at least one character class and leave some characters unexcluded")]
    EmptyPool,

    /// Strict mode needs more characters than the requested length allows.
    #[error("length {length} is too short for strict mode (need at least {required})")]
    StrictLength {
        /// Minimum length for the enabled classes.
        required: usize,
        /// Requested length.
        length: usize,
    },

    /// Strict mode requires a character class the pool no longer contains.
    #[error("strict {rule} rule cannot be satisfied: no matching character remains in the pool")]
    UnsatisfiableRule {
        /// The rule left without candidates.
        rule: StrictRule,
    },

    /// The pool is larger than the selector can index without bias.
    #[error("character pool has {size} characters, maximum is {max}")]
    PoolTooLarge {
        /// Characters in the assembled pool.
        size: usize,
        /// Largest supported pool.
        max: usize,
    },
}
