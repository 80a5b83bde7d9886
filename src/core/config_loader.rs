//! # Config Loader
//!
//! Optional TOML settings for the command-line front end:
//!
//! ```toml
//! path = "/opt/imagemagick/bin"
//! swallow_stderr = true
//! expected_outcodes = [0, 1]
//! strict_quoting = false
//! ```
//!
//! Every key is optional. Unknown keys are rejected so typos do not pass silently.

use crate::models::{CommandOptions, QuotingMode};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Errors raised while loading a settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Could not read settings file '{path}': {source}")]
    Io {
        /// The file that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for `Settings`.
    #[error("Failed to parse settings file '{path}': {source}")]
    TomlParse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying parsing error from the `toml` crate.
        #[source]
        source: toml::de::Error,
    },
}

/// Settings read from a TOML file.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Directory prefixed to the executable.
    pub path: Option<String>,
    /// Discard stderr.
    #[serde(default)]
    pub swallow_stderr: bool,
    /// Exit statuses treated as success. `None` keeps the default `{0}`.
    pub expected_outcodes: Option<Vec<i32>>,
    /// Reject values that cannot be quoted safely for cmd.exe.
    #[serde(default)]
    pub strict_quoting: bool,
}

impl Settings {
    /// Loads settings from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::debug!("Loading settings from '{}'", path.display());
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content).map_err(|e| ConfigError::TomlParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Parses settings from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// The command options these settings describe.
    pub fn to_options(&self) -> CommandOptions {
        let mut options = CommandOptions {
            swallow_stderr: self.swallow_stderr,
            quoting: if self.strict_quoting {
                QuotingMode::Strict
            } else {
                QuotingMode::Compatible
            },
            ..CommandOptions::default()
        };
        if let Some(codes) = &self.expected_outcodes {
            options.expected_outcodes = codes.iter().copied().collect();
        }
        options
    }
}
