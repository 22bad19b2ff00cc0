//! Configuration system for uniquery.
//!
//! This module provides the configuration structure for uniquery with sensible
//! defaults and support for serialization/deserialization via serde.
//! Configuration is loaded from a TOML file and merged with command-line
//! arguments, which always take precedence.
//!
//! # Example
//!
//! ```
//! use uniquery::config::Config;
//! use uniquery::document::export::OutputFormat;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.output_format, OutputFormat::Json);
//! assert_eq!(config.max_depth, 512);
//!
//! // Create custom configuration
//! let custom = Config {
//!     output_format: OutputFormat::Yaml,
//!     unique: true,
//!     ..Config::default()
//! };
//! ```

use log::warn;
use serde::{Deserialize, Serialize};

use crate::document::export::OutputFormat;
use crate::document::parser::InputFormat;
use crate::query::evaluator::DEFAULT_MAX_DEPTH;
use crate::runner::RunnerOptions;

/// Configuration for the uniquery application.
///
/// # Fields
///
/// * `output_format` - How results are printed: "json" or "yaml" (default: "json")
/// * `input_format` - Format assumed for stdin: "json", "yaml", "jsonl" or "auto" (default: "json")
/// * `unique` - Deduplicate results by canonical path (default: false)
/// * `show_paths` - Print the canonical path before each result (default: false)
/// * `max_depth` - Maximum recursion depth of an evaluation (default: 512)
/// * `verbose` - Log the parsed query (default: false)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// How results are printed
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Format assumed when reading from stdin
    #[serde(default)]
    pub input_format: InputFormat,

    /// Deduplicate results by canonical path
    #[serde(default)]
    pub unique: bool,

    /// Print the canonical path before each result
    #[serde(default)]
    pub show_paths: bool,

    /// Maximum recursion depth of an evaluation
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Log the parsed query
    #[serde(default)]
    pub verbose: bool,
}

/// Returns the default recursion limit.
fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            input_format: InputFormat::default(),
            unique: false,
            show_paths: false,
            max_depth: default_max_depth(),
            verbose: false,
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/uniquery/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("uniquery");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Self::default(),
        }
    }

    /// Loads configuration from a specific file, falling back to defaults.
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring invalid config file {}: {}", path.display(), err);
                Self::default()
            }),
            Err(err) => {
                warn!("Could not read config file {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to a specific file.
    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Returns the runner options described by this configuration.
    pub fn runner_options(&self) -> RunnerOptions {
        RunnerOptions {
            verbose: self.verbose,
            max_depth: self.max_depth,
        }
    }
}
