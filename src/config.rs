//! Configuration System
//!
//! Loads model parameters from tuning.toml for easy adjustment without
//! recompiling. Every section falls back to the built-in defaults.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::components::bank::LendingPolicy;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Top-level configuration structure
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub people: PeopleConfig,
    #[serde(default)]
    pub bank: BankConfig,
}

/// Run-length and reporting cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub default_ticks: u64,
    pub snapshot_interval: u64,
}

/// Grid dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
}

/// Population parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PeopleConfig {
    /// Population size, fixed for the whole run
    pub init_people: usize,
    /// Savings above this amount classify a person as rich
    pub rich_threshold: i64,
}

/// Bank parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    /// Percent of deposits held back as reserves (0-100)
    pub reserve_percent: u32,
    /// Enforce the reserve cap on new loans instead of granting every
    /// request in full
    pub enforce_reserve: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_ticks: 500,
            snapshot_interval: 50,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
        }
    }
}

impl Default for PeopleConfig {
    fn default() -> Self {
        Self {
            init_people: 25,
            rich_threshold: 10,
        }
    }
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            reserve_percent: 50,
            enforce_reserve: false,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            grid: GridConfig::default(),
            people: PeopleConfig::default(),
            bank: BankConfig::default(),
        }
    }
}

impl BankConfig {
    /// Lending policy selected by this configuration
    pub fn lending_policy(&self) -> LendingPolicy {
        if self.enforce_reserve {
            LendingPolicy::ReserveCapped
        } else {
            LendingPolicy::Unconstrained
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default path, falling back to defaults when the
    /// file does not exist
    pub fn load_or_default() -> Self {
        if Path::new(DEFAULT_TUNING_PATH).exists() {
            Self::load(DEFAULT_TUNING_PATH).unwrap_or_else(|e| {
                eprintln!("Warning: Could not load {}: {}. Using defaults.", DEFAULT_TUNING_PATH, e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Reject configurations the model cannot be built from
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ConfigError::InvalidGrid {
                width: self.grid.width,
                height: self.grid.height,
            });
        }
        if self.people.init_people == 0 {
            return Err(ConfigError::InvalidPopulation);
        }
        if self.bank.reserve_percent > 100 {
            return Err(ConfigError::InvalidReservePercent(self.bank.reserve_percent));
        }
        if self.people.rich_threshold < 0 {
            return Err(ConfigError::InvalidRichThreshold(self.people.rich_threshold));
        }
        Ok(())
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidGrid { width: u32, height: u32 },

    #[error("population size must be positive")]
    InvalidPopulation,

    #[error("reserve percent must be within 0-100, got {0}")]
    InvalidReservePercent(u32),

    #[error("rich threshold must be non-negative, got {0}")]
    InvalidRichThreshold(i64),
}
