//! Rule options and user settings.
//!
//! `RuleSet::default()` is the classic behaviour of this game. The other
//! variants exist for players who want the stricter foundation rule or
//! the conventional "all foundations complete" win.
//!
//! `Config` is read from an optional TOML file; command-line flags are
//! applied on top of it by the binary.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// When is the game won?
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinRule {
    /// Four columns each hold a complete, face-up, alternating King..Ace run.
    #[default]
    CompleteRuns,
    /// As `CompleteRuns`, or all four foundations have reached King.
    RunsOrFoundations,
}

/// What may be placed on a non-empty foundation?
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoundationRule {
    /// Any card of the slot's suit with a higher rank than the current top.
    #[default]
    AnyHigher,
    /// Only the next rank up.
    Sequential,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub win: WinRule,
    pub foundation: FoundationRule,
}

/// Save name used for the automatic save after each command.
pub const DEFAULT_AUTOSAVE: &str = "latest";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `.sot` save files.
    pub save_dir: PathBuf,
    /// Save name written after every command; `None` disables autosave.
    pub autosave: Option<String>,
    /// Fixed shuffle seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub rules: RuleSet,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            save_dir: PathBuf::from("."),
            autosave: Some(DEFAULT_AUTOSAVE.to_string()),
            seed: None,
            rules: RuleSet::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
