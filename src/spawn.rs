//! Spawn cadence and spawn placement

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Frame countdown that fires once every `interval` frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnTimer {
    remaining: u32,
    interval: u32,
}

impl SpawnTimer {
    /// `initial` frames until the first fire, then every `interval` frames
    pub fn new(initial: u32, interval: u32) -> Self {
        assert!(interval > 0, "spawn interval must be at least one frame");
        Self {
            remaining: initial,
            interval,
        }
    }

    /// Count down one frame. Returns true (and resets) when the timer fires.
    ///
    /// A timer created with `initial == 0` fires on the first frame.
    pub fn advance(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.remaining = self.interval;
            true
        } else {
            false
        }
    }

    /// Frames left until the next fire
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }
}

/// What a spawned ball looks like and where it appears
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnPolicy {
    pub mass: f32,
    pub radius: f32,
    pub friction: f32,
    /// Horizontal spawn range (inclusive)
    pub x_min: f32,
    pub x_max: f32,
    /// Spawn height
    pub y: f32,
    /// Sprite image asset
    pub image: String,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            mass: BALL_MASS,
            radius: BALL_RADIUS,
            friction: BALL_FRICTION,
            x_min: 0.0,
            x_max: BOARD_WIDTH,
            y: BOARD_HEIGHT,
            image: BALL_IMAGE.to_string(),
        }
    }
}

impl SpawnPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(ConfigError::Invalid(format!("spawn mass must be positive, got {}", self.mass)));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "spawn radius must be positive, got {}",
                self.radius
            )));
        }
        if !(self.x_min.is_finite() && self.x_max.is_finite() && self.x_min <= self.x_max) {
            return Err(ConfigError::Invalid(format!(
                "spawn x range is inverted: {}..={}",
                self.x_min, self.x_max
            )));
        }
        if !self.y.is_finite() {
            return Err(ConfigError::Invalid("spawn y must be finite".into()));
        }
        Ok(())
    }

    /// Pick a spawn point: x uniform over the range, y fixed
    pub fn sample_position<R: Rng>(&self, rng: &mut R) -> Vec2 {
        let x = if self.x_min < self.x_max {
            rng.random_range(self.x_min..=self.x_max)
        } else {
            self.x_min
        };
        Vec2::new(x, self.y)
    }

    /// Sprite size for a spawned ball (diameter square)
    pub fn sprite_size(&self) -> Vec2 {
        Vec2::splat(self.radius * 2.0)
    }
}
