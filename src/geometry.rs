//! Static collision geometry
//!
//! Segments and fixed circles that never move. They are handed to the
//! physics world once at startup and live until the world is dropped.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Immovable collision geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StaticGeometry {
    /// Line segment (optionally thickened by `radius`)
    Segment {
        a: Vec2,
        b: Vec2,
        radius: f32,
        friction: f32,
    },
    /// Fixed circle, drawn with `image` when one is given
    Circle {
        center: Vec2,
        radius: f32,
        friction: f32,
        image: Option<String>,
    },
}

impl StaticGeometry {
    pub fn segment(a: Vec2, b: Vec2, friction: f32) -> Self {
        Self::Segment {
            a,
            b,
            radius: 0.0,
            friction,
        }
    }

    pub fn circle(center: Vec2, radius: f32, friction: f32) -> Self {
        Self::Circle {
            center,
            radius,
            friction,
            image: None,
        }
    }

    /// Attach a sprite image (circles only, segments are drawn as lines)
    pub fn with_image(mut self, asset: impl Into<String>) -> Self {
        if let Self::Circle { image, .. } = &mut self {
            *image = Some(asset.into());
        }
        self
    }

    pub fn friction(&self) -> f32 {
        match self {
            Self::Segment { friction, .. } | Self::Circle { friction, .. } => *friction,
        }
    }

    pub fn is_circle(&self) -> bool {
        matches!(self, Self::Circle { .. })
    }
}

/// Parameters for the bumper-field board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PegboardLayout {
    pub width: f32,
    pub ground_height: f32,
    pub lip_height: f32,
    pub lip_width: f32,
    pub ground_friction: f32,
    pub rows: u32,
    pub columns: u32,
    pub bumper_radius: f32,
    pub bumper_separation: f32,
    pub bumper_friction: f32,
    pub bumper_image: Option<String>,
}

impl Default for PegboardLayout {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            ground_height: GROUND_HEIGHT,
            lip_height: GROUND_LIP_HEIGHT,
            lip_width: GROUND_LIP_WIDTH,
            ground_friction: GROUND_FRICTION,
            rows: BUMPER_ROWS,
            columns: BUMPER_COLUMNS,
            bumper_radius: BUMPER_RADIUS,
            bumper_separation: BUMPER_SEPARATION,
            bumper_friction: BUMPER_FRICTION,
            bumper_image: Some(BUMPER_IMAGE.to_string()),
        }
    }
}

/// Build the board: a floor, two tilted lips at the edges and a staggered
/// grid of bumpers (odd rows shifted right by half a separation).
pub fn pegboard_layout(layout: &PegboardLayout) -> Vec<StaticGeometry> {
    let w = layout.width;
    let ground = layout.ground_height;
    let mut geometry = vec![
        StaticGeometry::segment(Vec2::new(0.0, ground), Vec2::new(w, ground), layout.ground_friction),
        StaticGeometry::segment(
            Vec2::new(w - layout.lip_width, ground),
            Vec2::new(w, layout.lip_height),
            layout.ground_friction,
        ),
        StaticGeometry::segment(
            Vec2::new(layout.lip_width, ground),
            Vec2::new(0.0, layout.lip_height),
            layout.ground_friction,
        ),
    ];

    let sep = layout.bumper_separation;
    let half_sep = (sep / 2.0).floor();
    for row in 0..layout.rows {
        for column in 0..layout.columns {
            let x = column as f32 * sep + half_sep * (row % 2) as f32;
            let y = row as f32 * sep + half_sep;
            let mut bumper =
                StaticGeometry::circle(Vec2::new(x, y), layout.bumper_radius, layout.bumper_friction);
            if let Some(image) = &layout.bumper_image {
                bumper = bumper.with_image(image.clone());
            }
            geometry.push(bumper);
        }
    }

    geometry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_counts() {
        let geometry = pegboard_layout(&PegboardLayout::default());
        let circles = geometry.iter().filter(|g| g.is_circle()).count();
        assert_eq!(geometry.len(), 3 + 36);
        assert_eq!(circles, 36);
    }

    #[test]
    fn test_bumpers_are_staggered() {
        let geometry = pegboard_layout(&PegboardLayout::default());
        let centers: Vec<Vec2> = geometry
            .iter()
            .filter_map(|g| match g {
                StaticGeometry::Circle { center, .. } => Some(*center),
                _ => None,
            })
            .collect();
        // Row 0, column 0
        assert_eq!(centers[0], Vec2::new(0.0, 75.0));
        // Row 1, column 0 is shifted by half a separation
        assert_eq!(centers[6], Vec2::new(75.0, 225.0));
        // Row 5, column 5
        assert_eq!(centers[35], Vec2::new(825.0, 825.0));
    }

    #[test]
    fn test_ground_friction() {
        let geometry = pegboard_layout(&PegboardLayout::default());
        assert!(geometry[..3].iter().all(|g| g.friction() == 10.0));
        assert!(geometry[3..].iter().all(|g| g.friction() == 0.3));
    }

    #[test]
    fn test_with_image_ignores_segments() {
        let seg = StaticGeometry::segment(Vec2::ZERO, Vec2::X, 1.0).with_image("x.png");
        assert_eq!(seg, StaticGeometry::segment(Vec2::ZERO, Vec2::X, 1.0));
    }
}
