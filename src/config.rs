use std::path::Path;

use crate::board::Mark;
use crate::engine::Difficulty;
use crate::error::ConfigError;

/// Deepest Hard search accepted from a config file
pub const MAX_HARD_DEPTH: u8 = 8;

/// Search tuning for the move engine.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Plies searched by the Hard tier
    pub hard_depth: u8,
    /// Transposition table size per Hard search, in megabytes
    pub tt_size_mb: usize,
    /// Run searches on a background worker thread when one can be started
    pub use_worker: bool,
    /// Seed for the Easy tier's random choices; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            hard_depth: 4,
            tt_size_mb: 4,
            use_worker: true,
            seed: None,
        }
    }
}

/// Front-end defaults.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub difficulty: Difficulty,
    /// Mark played by the human; the engine plays the other one
    pub human_mark: Mark,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            difficulty: Difficulty::Medium,
            human_mark: Mark::X,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub ui: UiConfig,
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
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.hard_depth == 0 || self.engine.hard_depth > MAX_HARD_DEPTH {
            return Err(ConfigError::Validation(format!(
                "engine.hard_depth must be in 1..={}",
                MAX_HARD_DEPTH
            )));
        }
        if self.engine.tt_size_mb == 0 {
            return Err(ConfigError::Validation(
                "engine.tt_size_mb must be >= 1".into(),
            ));
        }
        Ok(())
    }
}
