//! Character pool assembly.

use crate::config::GeneratorOptions;
use crate::error::GenerateError;
use crate::source::MAX_RANGE;

/// Lowercase ASCII letters.
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
/// Uppercase ASCII letters.
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// ASCII digits.
pub const NUMBERS: &str = "0123456789";
/// Symbols used when `symbols` is enabled without an explicit set.
pub const DEFAULT_SYMBOLS: &str = "!@#$%^&*()+_-=}{[]|:;\"/?.><,`~";
/// Visually ambiguous glyphs removed by `exclude_similar_characters`.
pub const SIMILAR_CHARACTERS: &[char] = &['i', 'l', 'L', 'I', '|', '`', 'o', 'O', '0'];

/// Ordered characters eligible for a password.
///
/// Classes are concatenated as lowercase, uppercase, numbers, symbols.
/// Duplicates are kept (a custom symbol set may repeat characters or
/// overlap other classes), which weights those characters accordingly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterPool {
    chars: Vec<char>,
}

impl CharacterPool {
    /// Builds the pool from options, applying exclusions.
    pub fn assemble(options: &GeneratorOptions) -> Result<Self, GenerateError> {
        let mut chars: Vec<char> = Vec::new();

        if options.lowercase {
            chars.extend(LOWERCASE.chars());
        }
        if options.uppercase {
            chars.extend(UPPERCASE.chars());
        }
        if options.numbers {
            chars.extend(NUMBERS.chars());
        }
        if let Some(symbols) = options.symbols.charset() {
            chars.extend(symbols.chars());
        }

        if chars.is_empty() {
            return Err(GenerateError::EmptyPool);
        }

        if options.exclude_similar_characters {
            chars.retain(|c| !SIMILAR_CHARACTERS.contains(c));
        }
        if !options.exclude.is_empty() {
            chars.retain(|&c| !options.exclude.contains(c));
        }

        if chars.is_empty() {
            return Err(GenerateError::EmptyPool);
        }
        if chars.len() > MAX_RANGE {
            return Err(GenerateError::PoolTooLarge {
                size: chars.len(),
                max: MAX_RANGE,
            });
        }

        tracing::trace!(pool_size = chars.len(), "Assembled character pool");

        Ok(Self { chars })
    }

    /// Returns the pool characters in order.
    #[inline]
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// Returns the number of characters (counting duplicates).
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false for an assembled pool.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Returns true if the pool contains `ch`.
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }
}

impl std::fmt::Display for CharacterPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Symbols;

    fn pool(options: GeneratorOptions) -> String {
        CharacterPool::assemble(&options).unwrap().to_string()
    }

    #[test]
    fn test_default_pool_is_letters() {
        assert_eq!(
            pool(GeneratorOptions::default()),
            format!("{LOWERCASE}{UPPERCASE}")
        );
    }

    #[test]
    fn test_category_order() {
        let options = GeneratorOptions {
            numbers: true,
            symbols: Symbols::Default,
            ..Default::default()
        };
        assert_eq!(
            pool(options),
            format!("{LOWERCASE}{UPPERCASE}{NUMBERS}{DEFAULT_SYMBOLS}")
        );
    }

    #[test]
    fn test_custom_symbols_used_verbatim() {
        let options = GeneratorOptions {
            lowercase: false,
            uppercase: false,
            symbols: Symbols::from("!!@"),
            ..Default::default()
        };
        assert_eq!(pool(options), "!!@");
    }

    #[test]
    fn test_similar_characters_removed() {
        let options = GeneratorOptions {
            numbers: true,
            symbols: Symbols::Default,
            exclude_similar_characters: true,
            ..Default::default()
        };
        let assembled = CharacterPool::assemble(&options).unwrap();
        for ch in SIMILAR_CHARACTERS {
            assert!(!assembled.contains(*ch), "{ch:?} should be excluded");
        }
        // 92 characters less the 9 ambiguous glyphs
        assert_eq!(assembled.len(), 83);
    }

    #[test]
    fn test_exclude_removes_every_occurrence() {
        let options = GeneratorOptions {
            symbols: Symbols::from("a-a-a"),
            exclude: "a".to_owned(),
            ..Default::default()
        };
        let assembled = CharacterPool::assemble(&options).unwrap();
        assert!(!assembled.contains('a'));
        assert_eq!(assembled.len(), 25 + 26 + 2);
    }

    #[test]
    fn test_exclude_abc() {
        let options = GeneratorOptions {
            exclude: "abc".to_owned(),
            ..Default::default()
        };
        let assembled = pool(options);
        assert!(assembled.starts_with("defg"));
        assert!(!assembled.contains(&['a', 'b', 'c'][..]));
    }

    #[test]
    fn test_no_categories_is_empty_pool() {
        let options = GeneratorOptions {
            lowercase: false,
            uppercase: false,
            ..Default::default()
        };
        assert_eq!(
            CharacterPool::assemble(&options),
            Err(GenerateError::EmptyPool)
        );
    }

    #[test]
    fn test_exclusion_of_everything_is_empty_pool() {
        let options = GeneratorOptions {
            uppercase: false,
            exclude: LOWERCASE.to_owned(),
            ..Default::default()
        };
        assert_eq!(
            CharacterPool::assemble(&options),
            Err(GenerateError::EmptyPool)
        );
    }

    #[test]
    fn test_oversized_pool_rejected() {
        let options = GeneratorOptions {
            symbols: Symbols::Custom("#".repeat(MAX_RANGE)),
            ..Default::default()
        };
        assert!(matches!(
            CharacterPool::assemble(&options),
            Err(GenerateError::PoolTooLarge { .. })
        ));
    }
}
