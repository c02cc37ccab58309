//! CPU sprite list
//!
//! Keeps sprites and lines in creation order and turns them into a vertex
//! buffer plus draw batches on every `draw_all`. Uploading the buffer and
//! binding textures is left to whatever backend consumes the batches.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::RenderSurface;
use super::shapes::{line_quad, sprite_quad};
use super::vertex::{SpriteVertex, colors};
use crate::error::BridgeError;

/// Handle to a sprite or line in a [`SpriteList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpriteHandle(pub u32);

/// A textured, rotatable rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub id: u32,
    pub image: String,
    pub position: Vec2,
    /// Counter-clockwise rotation in degrees
    pub angle_degrees: f32,
    pub size: Vec2,
}

/// A flat-colored line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: u32,
    pub a: Vec2,
    pub b: Vec2,
    pub width: f32,
}

/// A run of vertices sharing one texture (None = untextured)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawBatch {
    pub image: Option<String>,
    pub first_vertex: usize,
    pub vertex_count: usize,
}

/// Sprite list render surface
#[derive(Debug, Default)]
pub struct SpriteList {
    /// Sprites sorted by id (creation order)
    sprites: Vec<Sprite>,
    /// Lines sorted by id
    lines: Vec<Line>,
    /// Vertices produced by the last draw
    vertices: Vec<SpriteVertex>,
    /// Batches produced by the last draw
    batches: Vec<DrawBatch>,
    frames_drawn: u64,
    /// Cap on live visuals (None = unbounded)
    max_visuals: Option<usize>,
    next_id: u32,
}

impl SpriteList {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Limit the number of live visuals
    pub fn with_capacity_limit(mut self, limit: usize) -> Self {
        self.max_visuals = Some(limit);
        self
    }

    fn next_handle(&mut self) -> Result<SpriteHandle, BridgeError> {
        if let Some(limit) = self.max_visuals {
            if self.visual_count() >= limit {
                return Err(BridgeError::RenderExhausted { limit });
            }
        }
        // Ids start at 1 even for a Default-built list
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        Ok(SpriteHandle(id))
    }

    pub fn sprite(&self, handle: SpriteHandle) -> Option<&Sprite> {
        self.sprites
            .binary_search_by_key(&handle.0, |s| s.id)
            .ok()
            .map(|i| &self.sprites[i])
    }

    pub fn line(&self, handle: SpriteHandle) -> Option<&Line> {
        self.lines
            .binary_search_by_key(&handle.0, |l| l.id)
            .ok()
            .map(|i| &self.lines[i])
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Vertex buffer from the last draw
    pub fn vertices(&self) -> &[SpriteVertex] {
        &self.vertices
    }

    /// Vertex buffer as raw bytes, ready for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn batches(&self) -> &[DrawBatch] {
        &self.batches
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Append `quad`, extending the last batch when the texture matches
    fn push_quad(&mut self, image: Option<&str>, quad: [SpriteVertex; 6]) {
        let first_vertex = self.vertices.len();
        self.vertices.extend_from_slice(&quad);

        if let Some(last) = self.batches.last_mut() {
            if last.image.as_deref() == image {
                last.vertex_count += quad.len();
                return;
            }
        }
        self.batches.push(DrawBatch {
            image: image.map(str::to_string),
            first_vertex,
            vertex_count: quad.len(),
        });
    }
}

impl RenderSurface for SpriteList {
    type Handle = SpriteHandle;

    fn add_visual(&mut self, image: &str, position: Vec2, size: Vec2) -> Result<SpriteHandle, BridgeError> {
        let handle = self.next_handle()?;
        // Ids only grow, so pushing keeps the list sorted
        self.sprites.push(Sprite {
            id: handle.0,
            image: image.to_string(),
            position,
            angle_degrees: 0.0,
            size,
        });
        Ok(handle)
    }

    fn add_line(&mut self, a: Vec2, b: Vec2, width: f32) -> Result<SpriteHandle, BridgeError> {
        let handle = self.next_handle()?;
        self.lines.push(Line {
            id: handle.0,
            a,
            b,
            width,
        });
        Ok(handle)
    }

    fn remove_visual(&mut self, handle: SpriteHandle) {
        if let Ok(i) = self.sprites.binary_search_by_key(&handle.0, |s| s.id) {
            self.sprites.remove(i);
        } else if let Ok(i) = self.lines.binary_search_by_key(&handle.0, |l| l.id) {
            self.lines.remove(i);
        } else {
            log::warn!("Tried to remove unknown visual {:?}", handle);
        }
    }

    fn set_transform(&mut self, handle: SpriteHandle, position: Vec2, angle_degrees: f32) {
        match self.sprites.binary_search_by_key(&handle.0, |s| s.id) {
            Ok(i) => {
                let sprite = &mut self.sprites[i];
                sprite.position = position;
                sprite.angle_degrees = angle_degrees;
            }
            Err(_) => log::warn!("Tried to move unknown sprite {:?}", handle),
        }
    }

    fn draw_all(&mut self) {
        self.vertices.clear();
        self.batches.clear();

        let sprites = std::mem::take(&mut self.sprites);
        for sprite in &sprites {
            let quad = sprite_quad(sprite.position, sprite.size, sprite.angle_degrees, colors::WHITE);
            self.push_quad(Some(sprite.image.as_str()), quad);
        }
        self.sprites = sprites;

        let lines = std::mem::take(&mut self.lines);
        for line in &lines {
            self.push_quad(None, line_quad(line.a, line.b, line.width, colors::GROUND_LINE));
        }
        self.lines = lines;

        self.frames_drawn += 1;
    }

    fn visual_count(&self) -> usize {
        self.sprites.len() + self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut list = SpriteList::new();
        let a = list.add_visual("coin.png", Vec2::new(1.0, 2.0), Vec2::splat(30.0)).unwrap();
        let b = list.add_line(Vec2::ZERO, Vec2::X, 2.0).unwrap();
        assert_ne!(a, b);
        assert_eq!(list.visual_count(), 2);

        list.remove_visual(a);
        assert!(list.sprite(a).is_none());
        assert!(list.line(b).is_some());
        assert_eq!(list.visual_count(), 1);
    }

    #[test]
    fn test_set_transform() {
        let mut list = SpriteList::new();
        let h = list.add_visual("coin.png", Vec2::ZERO, Vec2::splat(30.0)).unwrap();
        list.set_transform(h, Vec2::new(5.0, 6.0), 45.0);
        let sprite = list.sprite(h).unwrap();
        assert_eq!(sprite.position, Vec2::new(5.0, 6.0));
        assert_eq!(sprite.angle_degrees, 45.0);
    }

    #[test]
    fn test_draw_batches_by_image() {
        let mut list = SpriteList::new();
        list.add_visual("bumper.png", Vec2::ZERO, Vec2::splat(40.0)).unwrap();
        list.add_visual("bumper.png", Vec2::X, Vec2::splat(40.0)).unwrap();
        list.add_visual("coin.png", Vec2::Y, Vec2::splat(30.0)).unwrap();
        list.add_line(Vec2::ZERO, Vec2::X, 2.0).unwrap();

        list.draw_all();

        assert_eq!(list.vertices().len(), 4 * 6);
        assert_eq!(list.vertex_bytes().len(), 4 * 6 * SpriteVertex::stride());
        let batches = list.batches();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].image.as_deref(), Some("bumper.png"));
        assert_eq!(batches[0].vertex_count, 12);
        assert_eq!(batches[1].image.as_deref(), Some("coin.png"));
        assert_eq!(batches[1].first_vertex, 12);
        assert_eq!(batches[2].image, None);
        assert_eq!(list.frames_drawn(), 1);
    }

    #[test]
    fn test_redraw_replaces_buffer() {
        let mut list = SpriteList::new();
        let h = list.add_visual("coin.png", Vec2::ZERO, Vec2::splat(30.0)).unwrap();
        list.draw_all();
        list.remove_visual(h);
        list.draw_all();
        assert!(list.vertices().is_empty());
        assert!(list.batches().is_empty());
    }

    #[test]
    fn test_capacity_limit() {
        let mut list = SpriteList::new().with_capacity_limit(1);
        list.add_visual("coin.png", Vec2::ZERO, Vec2::ONE).unwrap();
        assert!(matches!(
            list.add_visual("coin.png", Vec2::ZERO, Vec2::ONE),
            Err(BridgeError::RenderExhausted { limit: 1 })
        ));
    }
}
