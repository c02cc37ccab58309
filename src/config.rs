//! Bridge configuration
//!
//! Every tunable the loop depends on lives here instead of in literals.
//! Persisted as JSON; missing fields fall back to the demo defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::spawn::SpawnPolicy;

/// Configuration for a [`SimulationBridge`](crate::SimulationBridge)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Gravity vector applied by the physics world (pixels/s²)
    pub gravity: Vec2,
    /// Fixed simulation timestep in seconds
    pub fixed_dt: f32,
    /// Frames between spawns (timer reset value)
    pub spawn_interval: u32,
    /// Frames before the first spawn
    pub initial_spawn_delay: u32,
    /// Entities whose y falls below this are reaped
    pub reap_below: f32,
    /// Seed for spawn position randomness
    pub seed: u64,
    /// What gets spawned and where
    pub spawn: SpawnPolicy,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, GRAVITY_Y),
            fixed_dt: SIM_DT,
            spawn_interval: SPAWN_INTERVAL,
            initial_spawn_delay: INITIAL_SPAWN_DELAY,
            reap_below: REAP_BELOW,
            seed: 0,
            spawn: SpawnPolicy::default(),
        }
    }
}

impl BridgeConfig {
    /// Default configuration with a specific spawn seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Check that the values describe a runnable simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fixed_dt.is_finite() || self.fixed_dt <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "fixed_dt must be positive, got {}",
                self.fixed_dt
            )));
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::Invalid("spawn_interval must be at least 1".into()));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::Invalid("gravity must be finite".into()));
        }
        if !self.reap_below.is_finite() {
            return Err(ConfigError::Invalid("reap_below must be finite".into()));
        }
        self.spawn.validate()
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save the config as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Config saved to {}", path.as_ref().display());
        Ok(())
    }
}
