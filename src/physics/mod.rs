//! Physics world abstraction
//!
//! The bridge only needs a handful of capabilities from the physics engine.
//! They are collected in [`PhysicsWorld`] so the engine can be swapped (or
//! scripted in tests) without touching the loop.

pub mod rapier;

pub use rapier::RapierWorld;

use std::fmt::Debug;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::BridgeError;
use crate::geometry::StaticGeometry;

/// Collision shape of a dynamic body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BodyShape {
    Ball { radius: f32, friction: f32 },
}

/// Capabilities the bridge consumes from a physics engine
pub trait PhysicsWorld {
    /// Opaque body handle, copied freely by the bridge
    type Handle: Copy + Eq + Debug;

    /// Insert immovable geometry
    fn add_static_body(&mut self, geometry: &StaticGeometry) -> Result<Self::Handle, BridgeError>;

    /// Insert a simulated body with the given mass and shape at `position`
    fn add_dynamic_body(
        &mut self,
        mass: f32,
        shape: &BodyShape,
        position: Vec2,
    ) -> Result<Self::Handle, BridgeError>;

    /// Remove a body together with its collision shapes
    fn remove_body(&mut self, handle: Self::Handle);

    /// Advance the simulation by a fixed timestep
    fn step(&mut self, fixed_dt: f32);

    fn position(&self, handle: Self::Handle) -> Vec2;

    /// Orientation in radians
    fn angle(&self, handle: Self::Handle) -> f32;

    /// Number of live dynamic bodies
    fn dynamic_body_count(&self) -> usize;
}
