//! Password generation options.

use crate::error::GenerateError;
use crate::generator::DEFAULT_SYMBOLS;
use serde::{Deserialize, Serialize};

/// Which symbol characters, if any, join the pool.
///
/// Deserializes from either a boolean (`true` selects the built-in set)
/// or a string of explicit symbol characters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "SymbolsValue", into = "SymbolsValue")]
pub enum Symbols {
    /// No symbols.
    #[default]
    Disabled,
    /// The built-in set [`DEFAULT_SYMBOLS`].
    Default,
    /// An explicit set, used verbatim. Empty behaves like `Disabled`.
    Custom(String),
}

impl Symbols {
    /// Returns the symbol characters contributed to the pool, if any.
    pub fn charset(&self) -> Option<&str> {
        match self {
            Symbols::Disabled => None,
            Symbols::Default => Some(DEFAULT_SYMBOLS),
            Symbols::Custom(set) if set.is_empty() => None,
            Symbols::Custom(set) => Some(set),
        }
    }

    /// Returns true if symbols contribute to the pool.
    pub fn is_enabled(&self) -> bool {
        self.charset().is_some()
    }
}

impl From<bool> for Symbols {
    fn from(enabled: bool) -> Self {
        if enabled {
            Symbols::Default
        } else {
            Symbols::Disabled
        }
    }
}

impl From<&str> for Symbols {
    fn from(set: &str) -> Self {
        Symbols::Custom(set.to_owned())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SymbolsValue {
    Flag(bool),
    Set(String),
}

impl From<SymbolsValue> for Symbols {
    fn from(value: SymbolsValue) -> Self {
        match value {
            SymbolsValue::Flag(enabled) => enabled.into(),
            SymbolsValue::Set(set) => Symbols::Custom(set),
        }
    }
}

impl From<Symbols> for SymbolsValue {
    fn from(symbols: Symbols) -> Self {
        match symbols {
            Symbols::Disabled => SymbolsValue::Flag(false),
            Symbols::Default => SymbolsValue::Flag(true),
            Symbols::Custom(set) => SymbolsValue::Set(set),
        }
    }
}

/// Options controlling pool assembly and strict composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Number of characters per password.
    pub length: usize,
    /// Include digits.
    pub numbers: bool,
    /// Include symbols.
    pub symbols: Symbols,
    /// Include uppercase letters.
    pub uppercase: bool,
    /// Include lowercase letters.
    pub lowercase: bool,
    /// Characters removed from the pool (every occurrence).
    pub exclude: String,
    /// Remove visually ambiguous characters from the pool.
    #[serde(alias = "excludeSimilarCharacters")]
    pub exclude_similar_characters: bool,
    /// Require one character from each enabled class.
    pub strict: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: 10,
            numbers: false,
            symbols: Symbols::Disabled,
            uppercase: true,
            lowercase: true,
            exclude: String::new(),
            exclude_similar_characters: false,
            strict: false,
        }
    }
}

impl GeneratorOptions {
    /// Creates default options with the given length.
    pub fn with_length(length: usize) -> Self {
        Self {
            length,
            ..Default::default()
        }
    }

    /// Minimum length that can satisfy strict mode.
    ///
    /// Lowercase is always credited with one character, even when it is
    /// disabled; this keeps the bound compatible with existing callers.
    pub fn min_strict_length(&self) -> usize {
        1 + usize::from(self.numbers)
            + usize::from(self.symbols.is_enabled())
            + usize::from(self.uppercase)
    }

    /// Checks the strict-length precondition.
    ///
    /// Pool-dependent checks happen during pool assembly.
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.strict {
            let required = self.min_strict_length();
            if required > self.length {
                return Err(GenerateError::StrictLength {
                    required,
                    length: self.length,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = GeneratorOptions::default();
        assert_eq!(options.length, 10);
        assert!(options.lowercase && options.uppercase);
        assert!(!options.numbers && !options.strict);
        assert_eq!(options.symbols, Symbols::Disabled);
        assert!(options.exclude.is_empty());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_min_strict_length_counts_enabled_classes() {
        let options = GeneratorOptions {
            numbers: true,
            symbols: Symbols::Default,
            ..Default::default()
        };
        assert_eq!(options.min_strict_length(), 4);
    }

    #[test]
    fn test_min_strict_length_credits_lowercase_when_disabled() {
        // Known quirk: lowercase contributes even when it is off.
        let options = GeneratorOptions {
            lowercase: false,
            uppercase: false,
            numbers: true,
            ..Default::default()
        };
        assert_eq!(options.min_strict_length(), 2);
    }

    #[test]
    fn test_strict_length_too_short() {
        let options = GeneratorOptions {
            length: 2,
            numbers: true,
            symbols: Symbols::Default,
            uppercase: true,
            strict: true,
            ..Default::default()
        };
        assert_eq!(
            options.validate(),
            Err(GenerateError::StrictLength {
                required: 4,
                length: 2
            })
        );
    }

    #[test]
    fn test_strict_length_ignored_when_not_strict() {
        let options = GeneratorOptions {
            length: 1,
            numbers: true,
            symbols: Symbols::Default,
            ..Default::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_empty_custom_symbols_disabled() {
        let symbols = Symbols::from("");
        assert!(!symbols.is_enabled());
        assert_eq!(symbols.charset(), None);
    }

    #[test]
    fn test_symbols_from_toml_bool_and_string() {
        let flag: GeneratorOptions = toml::from_str("symbols = true").unwrap();
        assert_eq!(flag.symbols, Symbols::Default);

        let set: GeneratorOptions = toml::from_str("symbols = \"!@#\"").unwrap();
        assert_eq!(set.symbols, Symbols::Custom("!@#".to_owned()));
        assert_eq!(set.length, 10);
    }

    #[test]
    fn test_camel_case_alias_accepted() {
        let options: GeneratorOptions =
            toml::from_str("excludeSimilarCharacters = true").unwrap();
        assert!(options.exclude_similar_characters);
    }
}
