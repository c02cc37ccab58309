//! Error types
//!
//! Precondition violations (ticking before initialization, a bad timestep)
//! are programmer errors and panic. Everything here is recoverable.

use thiserror::Error;

/// Recoverable failures reported by the bridge and its collaborators
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The physics world refused a new dynamic body
    #[error("physics world is full ({limit} dynamic bodies)")]
    PhysicsExhausted { limit: usize },
    /// The render surface refused a new visual
    #[error("render surface is full ({limit} visuals)")]
    RenderExhausted { limit: usize },
}

/// Failures loading, saving or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
