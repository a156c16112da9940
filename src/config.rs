//! Keeper configuration.

use crate::games::checkers::Rules;
use crate::keeper::Bech32Rule;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Configuration shared by every keeper the binary opens.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct KeeperConfig {
    /// Human-readable prefix of participant addresses.
    #[serde(default = "default_address_prefix")]
    address_prefix: String,

    /// Continuation and win policies.
    #[serde(default)]
    rules: Rules,
}

#[instrument]
fn default_address_prefix() -> String {
    "cosmos".to_string()
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            address_prefix: default_address_prefix(),
            rules: Rules::default(),
        }
    }
}

impl KeeperConfig {
    /// Creates a configuration.
    #[instrument(skip(address_prefix), fields(prefix = %address_prefix))]
    pub fn new(address_prefix: String, rules: Rules) -> Self {
        Self {
            address_prefix,
            rules,
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let origin = path.as_ref().display().to_string();
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(origin.clone(), format!("Failed to read config file: {}", e))
        })?;
        Self::parse(&content, origin)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, INLINE_ORIGIN.to_string())
    }

    fn parse(content: &str, origin: String) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| {
            ConfigError::new(origin.clone(), format!("Failed to parse config: {}", e))
        })?;

        info!(
            %origin,
            prefix = %config.address_prefix,
            continuation = ?config.rules.continuation(),
            win_condition = ?config.rules.win_condition(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Address rule for the configured prefix.
    pub fn identity_rule(&self) -> Bech32Rule {
        Bech32Rule::new(self.address_prefix.clone())
    }
}

/// Origin reported for configuration parsed from a string.
pub const INLINE_ORIGIN: &str = "<inline>";

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error in {}: {} at {}:{}", origin, message, file, line)]
pub struct ConfigError {
    /// File path the configuration came from, or [`INLINE_ORIGIN`].
    pub origin: String,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(origin: String, message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            origin,
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
