//! Pegboard - physics-driven sprite synchronization
//!
//! Core modules:
//! - `bridge`: Per-frame spawn/step/reap/sync loop tying physics to sprites
//! - `physics`: Physics world abstraction and the rapier2d backend
//! - `renderer`: Render surface abstraction and the CPU sprite list
//! - `geometry`: Static collision geometry and the pegboard layout
//! - `spawn`: Spawn timer and spawn policy
//! - `config`: Data-driven bridge configuration

pub mod bridge;
pub mod config;
pub mod error;
pub mod geometry;
pub mod physics;
pub mod renderer;
pub mod spawn;

pub use bridge::{BridgeSnapshot, BridgeStats, DynamicEntity, SimulationBridge, TickReport};
pub use config::BridgeConfig;
pub use error::{BridgeError, ConfigError};
pub use geometry::{PegboardLayout, StaticGeometry, pegboard_layout};
pub use physics::{BodyShape, PhysicsWorld, RapierWorld};
pub use renderer::{RenderSurface, SpriteList};
pub use spawn::{SpawnPolicy, SpawnTimer};

/// Demo configuration constants
pub mod consts {
    /// Fixed simulation timestep (80 Hz)
    pub const SIM_DT: f32 = 1.0 / 80.0;

    /// Board dimensions (pixels, y up)
    pub const BOARD_WIDTH: f32 = 800.0;
    pub const BOARD_HEIGHT: f32 = 800.0;

    /// Downward gravity (pixels/s²)
    pub const GRAVITY_Y: f32 = -900.0;

    /// Frames between spawns once the first ball has dropped
    pub const SPAWN_INTERVAL: u32 = 20;
    /// Frames before the very first spawn
    pub const INITIAL_SPAWN_DELAY: u32 = 10;

    /// Ball defaults
    pub const BALL_MASS: f32 = 0.5;
    pub const BALL_RADIUS: f32 = 15.0;
    pub const BALL_FRICTION: f32 = 0.3;
    pub const BALL_IMAGE: &str = "images/coin_01.png";

    /// Bumper grid defaults
    pub const BUMPER_RADIUS: f32 = 20.0;
    pub const BUMPER_SEPARATION: f32 = 150.0;
    pub const BUMPER_ROWS: u32 = 6;
    pub const BUMPER_COLUMNS: u32 = 6;
    pub const BUMPER_FRICTION: f32 = 0.3;
    pub const BUMPER_IMAGE: &str = "images/bumper.png";

    /// Ground segments
    pub const GROUND_HEIGHT: f32 = 10.0;
    pub const GROUND_LIP_HEIGHT: f32 = 30.0;
    pub const GROUND_LIP_WIDTH: f32 = 50.0;
    pub const GROUND_FRICTION: f32 = 10.0;
    /// Width used when drawing ground outlines
    pub const GROUND_LINE_WIDTH: f32 = 2.0;

    /// Balls whose center drops below this height are removed
    pub const REAP_BELOW: f32 = 0.0;
}
