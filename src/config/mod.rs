//! Configuration system for pathquill.
//!
//! This module provides the configuration structure for pathquill with sensible
//! defaults and support for serialization/deserialization via serde.
//! Configuration is loaded from a TOML file and merged with command-line
//! arguments, which always win.
//!
//! # Example
//!
//! ```
//! use pathquill::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.max_depth, 64);
//! assert!(config.pretty);
//!
//! // Create custom configuration
//! let custom = Config {
//!     max_depth: 8,
//!     ..Config::default()
//! };
//! ```

use crate::file::loader::InputFormat;
use crate::querypath::resolver::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};

/// Configuration for the pathquill command.
///
/// # Fields
///
/// * `max_depth` - Maximum nesting of wildcard/slice expansions (default: 64)
/// * `pretty` - Pretty-print JSON output (default: true)
/// * `input_format` - How input is decoded: "auto", "json", "yaml" or "text" (default: "auto")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum nesting of wildcard/slice expansions
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// How input is decoded
    #[serde(default)]
    pub input_format: InputFormat,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_pretty() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            pretty: default_pretty(),
            input_format: InputFormat::default(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/pathquill/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("pathquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(err) => {
                log::warn!("could not read {}: {}", config_path.display(), err);
                Self::default()
            }
        }
    }

    /// Parses TOML settings, falling back to defaults when they are invalid.
    pub fn from_toml(contents: &str) -> Self {
        toml::from_str(contents).unwrap_or_else(|err| {
            log::warn!("ignoring invalid config: {}", err);
            Self::default()
        })
    }
}
