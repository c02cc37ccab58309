//! Bridge bookkeeping types

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A simulated body paired 1:1 with the visual that mirrors it
///
/// `body` is only ever read during sync; the render side never writes
/// back into the physics world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicEntity<B, V> {
    pub id: u32,
    pub body: B,
    pub visual: V,
}

/// What happened during one successful tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Entity spawned this frame
    pub spawned: Option<u32>,
    /// Entities removed this frame (ascending id)
    pub reaped: Vec<u32>,
}

/// Running totals since the bridge was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeStats {
    pub spawned: u64,
    pub reaped: u64,
    pub spawn_failures: u64,
}

/// Position and orientation of one live entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: u32,
    pub position: Vec2,
    pub angle_degrees: f32,
}

/// Every live entity after a given frame, in id order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeSnapshot {
    pub frame: u64,
    pub stats: BridgeStats,
    pub entities: Vec<EntitySnapshot>,
}
