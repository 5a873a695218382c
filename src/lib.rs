//! Password Generation Library
//!
//! Generates random passwords from a configurable character pool using
//! a cryptographically secure byte source, with optional strict mode
//! guaranteeing one character from every enabled class.
//!
//! # Architecture
//!
//! ```text
//! options → pool assembly → unbiased draws → candidate → (strict) check
//!                                ↑                            │
//!                       batched CSPRNG bytes          regenerate on failure
//! ```
//!
//! # Design Principles
//!
//! - **No modulo bias**: indices come from rejection sampling, never `byte % n`
//! - **Fail early**: every configuration error is reported before drawing
//! - **Owned randomness**: each generator owns its byte source; no global state
//! - **Whole-candidate retries**: a strict failure discards the candidate, it is never patched
//!
//! # Example
//!
//! ```no_run
//! use passgen::{GeneratorOptions, PasswordGenerator, Symbols};
//!
//! let options = GeneratorOptions {
//!     length: 15,
//!     numbers: true,
//!     symbols: Symbols::Default,
//!     strict: true,
//!     ..Default::default()
//! };
//!
//! // One-off generation from OS entropy
//! let password = passgen::generate(&options).unwrap();
//! assert_eq!(password.chars().count(), 15);
//!
//! // Reuse a generator for bulk output
//! let mut generator = PasswordGenerator::new(options).unwrap();
//! let passwords = generator.generate_multiple(10);
//! assert_eq!(passwords.len(), 10);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod generator;
pub mod source;

// Re-export commonly used types at crate root
pub use analysis::{SelfTest, UniformityTest, UniformityThresholds};
pub use config::{ConfigError, FileConfig, GeneratorOptions, Symbols};
pub use error::GenerateError;
pub use generator::{generate, generate_multiple, CharacterPool, PasswordGenerator, StrictRule};
pub use source::{ByteSource, RandomBytes, UnbiasedSelector};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
