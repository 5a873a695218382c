//! Generator options and configuration files.
//!
//! Options are plain serde values so that they can be built in code,
//! loaded from TOML, or overridden from the command line.

mod file;
mod options;

pub use file::{ConfigError, FileConfig, OutputConfig};
pub use options::{GeneratorOptions, Symbols};
