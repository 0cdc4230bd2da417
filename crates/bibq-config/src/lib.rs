//! Configuration system for bibq.
//!
//! bibq uses TOML configuration files named `.bibq.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.bibq.toml` files
//! found, then loading `~/.bibq.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{RawConfig, RawParserSettings, parse_config_file, parse_config_str};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};

/// Top-level merged configuration for bibq.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Query parser settings.
    pub parser: ParserSettings,
    /// Files the configuration was merged from, highest precedence first.
    pub sources: Vec<PathBuf>,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.bibq.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Serializes the effective settings to TOML, in the same layout as a `.bibq.toml` file.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            parser: self.parser.clone(),
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Settings for the query parser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Keywords accepted in field syntax; empty accepts any keyword.
    pub allowed_keywords: Vec<String>,
    /// Whether SPIRES mnemonics are rewritten to canonical field names.
    pub rewrite_spires: bool,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            allowed_keywords: Vec::new(),
            rewrite_spires: true,
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Query parser settings.
    parser: ParserSettings,
}
