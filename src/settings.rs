//! Game settings
//!
//! Loaded once at startup from an optional JSON file. Every field has a
//! default, so a partial file only overrides what it names.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{BlackCatchRule, Rules, SimError, SpawnTable};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(#[from] SimError),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; derived from the wall clock when absent
    pub seed: Option<u64>,

    // === Limits ===
    /// Slots in each entity store
    pub entity_capacity: usize,
    pub win_score: i32,

    // === Rules ===
    /// Relative weights of each spawn outcome
    pub spawn_table: SpawnTable,
    /// When a black block crossing the catch line ends the game
    pub black_catch: BlackCatchRule,
    /// Minimum time between shots
    pub fire_cooldown_ms: u64,

    // === Speed ===
    pub initial_speed: u32,
    pub max_speed: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            entity_capacity: DEFAULT_CAPACITY,
            win_score: DEFAULT_WIN_SCORE,

            spawn_table: SpawnTable::default(),
            black_catch: BlackCatchRule::default(),
            fire_cooldown_ms: DEFAULT_FIRE_COOLDOWN_MS,

            initial_speed: 1,
            max_speed: DEFAULT_MAX_SPEED,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Ok(Self::default());
        };

        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        if let Err(e) = settings.validate() {
            log::warn!("Rejected settings: {e}");
            return Err(e);
        }
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.rules().validate()?;
        Ok(())
    }

    /// Gameplay rules for the simulation core
    pub fn rules(&self) -> Rules {
        Rules {
            capacity: self.entity_capacity,
            win_score: self.win_score,
            spawn_table: self.spawn_table,
            black_catch: self.black_catch,
            fire_cooldown_ms: self.fire_cooldown_ms,
            initial_speed: self.initial_speed,
            max_speed: self.max_speed,
        }
    }

    /// Configured seed, or one taken from the wall clock
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default()
        })
    }
}
