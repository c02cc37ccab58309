//! Render surface abstraction
//!
//! The bridge never draws anything itself. It creates, moves and removes
//! visuals through [`RenderSurface`] and asks for a draw once per frame.

pub mod shapes;
pub mod sprite;
pub mod vertex;

pub use sprite::{DrawBatch, Line, Sprite, SpriteHandle, SpriteList};
pub use vertex::SpriteVertex;

use std::fmt::Debug;

use glam::Vec2;

use crate::error::BridgeError;

/// Capabilities the bridge consumes from a renderer
pub trait RenderSurface {
    /// Opaque visual handle
    type Handle: Copy + Eq + Debug;

    /// Create a sprite showing `image`, centered at `position`
    fn add_visual(&mut self, image: &str, position: Vec2, size: Vec2) -> Result<Self::Handle, BridgeError>;

    /// Create a static line (ground outlines)
    fn add_line(&mut self, a: Vec2, b: Vec2, width: f32) -> Result<Self::Handle, BridgeError>;

    fn remove_visual(&mut self, handle: Self::Handle);

    /// Move and rotate a visual; the angle is in degrees
    fn set_transform(&mut self, handle: Self::Handle, position: Vec2, angle_degrees: f32);

    /// Draw every visual
    fn draw_all(&mut self);

    /// Number of live visuals, lines included
    fn visual_count(&self) -> usize;
}
