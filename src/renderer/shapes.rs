//! Quad generation for sprites and lines

use glam::Vec2;

use super::vertex::SpriteVertex;

/// Two triangles covering a rotated, textured rectangle
///
/// `angle_degrees` rotates counter-clockwise around `center`.
pub fn sprite_quad(center: Vec2, size: Vec2, angle_degrees: f32, color: [f32; 4]) -> [SpriteVertex; 6] {
    let rot = Vec2::from_angle(angle_degrees.to_radians());
    let half = size * 0.5;

    // Corners in local space with their uvs (v flipped: image rows go down)
    let corner = |local: Vec2, u: f32, v: f32| {
        let p = center + rot.rotate(local);
        SpriteVertex::new(p.x, p.y, u, v, color)
    };

    let bl = corner(Vec2::new(-half.x, -half.y), 0.0, 1.0);
    let br = corner(Vec2::new(half.x, -half.y), 1.0, 1.0);
    let tr = corner(Vec2::new(half.x, half.y), 1.0, 0.0);
    let tl = corner(Vec2::new(-half.x, half.y), 0.0, 0.0);

    [bl, br, tr, tr, tl, bl]
}

/// Two triangles covering a line of the given width
pub fn line_quad(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> [SpriteVertex; 6] {
    let dir = (b - a).normalize_or_zero();
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);

    let v1a = a + perp;
    let v1b = a - perp;
    let v2a = b + perp;
    let v2b = b - perp;

    [
        SpriteVertex::new(v1a.x, v1a.y, 0.0, 0.0, color),
        SpriteVertex::new(v1b.x, v1b.y, 0.0, 0.0, color),
        SpriteVertex::new(v2a.x, v2a.y, 0.0, 0.0, color),
        SpriteVertex::new(v2a.x, v2a.y, 0.0, 0.0, color),
        SpriteVertex::new(v1b.x, v1b.y, 0.0, 0.0, color),
        SpriteVertex::new(v2b.x, v2b.y, 0.0, 0.0, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::vertex::colors::WHITE;

    fn close(a: [f32; 2], b: [f32; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-4 && (a[1] - b[1]).abs() < 1e-4
    }

    #[test]
    fn test_sprite_quad_unrotated() {
        let quad = sprite_quad(Vec2::new(10.0, 20.0), Vec2::new(30.0, 30.0), 0.0, WHITE);
        assert!(close(quad[0].position, [-5.0, 5.0]));
        assert!(close(quad[2].position, [25.0, 35.0]));
        assert_eq!(quad[0].uv, [0.0, 1.0]);
        assert_eq!(quad[2].uv, [1.0, 0.0]);
    }

    #[test]
    fn test_sprite_quad_rotated_90() {
        let quad = sprite_quad(Vec2::ZERO, Vec2::new(2.0, 2.0), 90.0, WHITE);
        // Bottom-left corner (-1, -1) rotates to (1, -1)
        assert!(close(quad[0].position, [1.0, -1.0]));
    }

    #[test]
    fn test_line_quad_width() {
        let quad = line_quad(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0, WHITE);
        assert!(close(quad[0].position, [0.0, 1.0]));
        assert!(close(quad[1].position, [0.0, -1.0]));
        assert!(close(quad[5].position, [10.0, -1.0]));
    }
}
