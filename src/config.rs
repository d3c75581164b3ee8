use std::path::Path;

use tracing::warn;

use crate::engine::{GravityRules, GridRules};
use crate::error::ConfigError;

/// Board shape and expansion limit for one game variant.
///
/// All dimensions must be given when the section is present; only
/// `max_depth` is optional.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameConfig {
    pub height: u32,
    pub width: u32,
    /// Marks in a line needed to win.
    pub run_length: u32,
    /// Plies to expand below the live position. Unset expands until done.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl GameConfig {
    pub fn tic_tac_toe() -> Self {
        GameConfig {
            height: 3,
            width: 3,
            run_length: 3,
            max_depth: None,
        }
    }

    pub fn four_in_a_row() -> Self {
        GameConfig {
            height: 6,
            width: 7,
            run_length: 4,
            max_depth: Some(6),
        }
    }

    pub fn grid_rules(&self) -> GridRules {
        GridRules::new(self.height, self.width, self.run_length)
    }

    pub fn gravity_rules(&self) -> GravityRules {
        GravityRules::new(self.height, self.width, self.run_length)
    }

    fn validate(&self, section: &str) -> Result<(), ConfigError> {
        for (name, value) in [("height", self.height), ("width", self.width)] {
            if !(1..=255).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{section}.{name} must be in [1, 255]"
                )));
            }
        }
        let longest = self.height.max(self.width);
        if self.run_length == 0 || self.run_length > longest {
            return Err(ConfigError::Validation(format!(
                "{section}.run_length must be in [1, {longest}]"
            )));
        }
        if self.max_depth == Some(0) {
            return Err(ConfigError::Validation(format!(
                "{section}.max_depth must be > 0"
            )));
        }
        Ok(())
    }
}

/// Settings for the cooperative host loop.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Requests serviced between two expansion steps.
    pub requests_per_step: usize,
    /// How long an idle host waits for input before polling again.
    pub idle_poll_ms: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            requests_per_step: 1,
            idle_poll_ms: 100,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tic_tac_toe: GameConfig,
    pub four_in_a_row: GameConfig,
    pub host: HostConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            tic_tac_toe: GameConfig::tic_tac_toe(),
            four_in_a_row: GameConfig::four_in_a_row(),
            host: HostConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tic_tac_toe.validate("tic_tac_toe")?;
        self.four_in_a_row.validate("four_in_a_row")?;

        if self.host.requests_per_step == 0 {
            return Err(ConfigError::Validation(
                "host.requests_per_step must be > 0".into(),
            ));
        }
        if self.host.idle_poll_ms == 0 {
            return Err(ConfigError::Validation(
                "host.idle_poll_ms must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Render every default value as TOML, for writing a starter config file.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).unwrap_or_default()
    }
}
