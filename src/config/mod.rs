//! Configuration management.
//!
//! TOML configuration with typed sections, defaults for every field, and
//! validation on load. The file is optional: `hacksim play` falls back to
//! defaults when no `config.toml` exists, and `hacksim init` writes one out.
//!
//! ```toml
//! [game]
//! name = "HackSim"
//! player_name = "Anonymous"
//! data_dir = "data"
//! autosave_interval_secs = 30
//!
//! [logging]
//! level = "info"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Core game settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Displayed game title.
    #[serde(default = "default_name")]
    pub name: String,
    /// Initial player display name.
    #[serde(default = "default_player_name")]
    pub player_name: String,
    /// Directory holding the save file.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Seconds between automatic saves during play. 0 disables autosave.
    #[serde(default = "default_autosave")]
    pub autosave_interval_secs: u64,
}

fn default_name() -> String {
    "HackSim".to_string()
}

fn default_player_name() -> String {
    crate::game::types::DEFAULT_PLAYER_NAME.to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_autosave() -> u64 {
    30
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            name: default_name(),
            player_name: default_player_name(),
            data_dir: default_data_dir(),
            autosave_interval_secs: default_autosave(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of: error, warn, info, debug, trace.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load and validate a config file.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("cannot read config file {path}: {e}"))?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write a default config file. Refuses to overwrite an existing one.
    pub async fn create_default(path: &str) -> Result<()> {
        if fs::try_exists(path).await? {
            return Err(anyhow!("config file {path} already exists"));
        }
        let config = Config::default();
        fs::write(path, toml::to_string_pretty(&config)?).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.game.name.trim().is_empty() {
            return Err(anyhow!("game.name must not be empty"));
        }
        if self.game.player_name.trim().is_empty() {
            return Err(anyhow!("game.player_name must not be empty"));
        }
        if self.game.data_dir.trim().is_empty() {
            return Err(anyhow!("game.data_dir must not be empty"));
        }
        const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
        if !LEVELS.contains(&self.logging.level.as_str()) {
            return Err(anyhow!(
                "logging.level must be one of {:?}, got {:?}",
                LEVELS,
                self.logging.level
            ));
        }
        Ok(())
    }
}
