//! Password synthesis.
//!
//! Assembles the character pool from options, draws candidates through
//! the unbiased selector, and in strict mode regenerates until every
//! enabled character class is represented.

mod password;
mod pool;
mod rules;

pub use password::{generate, generate_multiple, PasswordGenerator};
pub use pool::{
    CharacterPool, DEFAULT_SYMBOLS, LOWERCASE, NUMBERS, SIMILAR_CHARACTERS, UPPERCASE,
};
pub use rules::{RuleViolation, StrictRule, StrictRules};
