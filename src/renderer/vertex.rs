//! Vertex types for sprite batches

use bytemuck::{Pod, Zeroable};

/// 2D vertex with position, texture coordinate and tint
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl SpriteVertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }

    /// Size of one vertex in bytes (for buffer layouts)
    pub const fn stride() -> usize {
        std::mem::size_of::<SpriteVertex>()
    }
}

/// Tints
pub mod colors {
    /// Untinted sprite
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const GROUND_LINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}
