//! Shape generation for 2D primitives and the game scene

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Palette, Vertex};
use crate::sim::{Avatar, BackgroundEntity, Obstacle};
use crate::tuning::Tuning;

/// Generate vertices for an axis-aligned rectangle (two triangles)
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Upper and lower pipe of an obstacle, each running from the gap edge to the
/// edge of the playfield
pub fn obstacle(obstacle: &Obstacle, tuning: &Tuning, color: [f32; 4]) -> Vec<Vertex> {
    let half_w = tuning.obstacle_half_width;
    let (left, right) = (obstacle.x - half_w, obstacle.x + half_w);
    let gap_top = obstacle.gap_y + tuning.gap_half_height;
    let gap_bottom = obstacle.gap_y - tuning.gap_half_height;

    let mut vertices = Vec::with_capacity(12);
    vertices.extend(rect(Vec2::new(left, gap_top), Vec2::new(right, 1.0), color));
    vertices.extend(rect(Vec2::new(left, -1.0), Vec2::new(right, gap_bottom), color));
    vertices
}

/// The avatar is drawn as a square matching its hitbox
pub fn avatar(avatar: &Avatar, tuning: &Tuning, color: [f32; 4]) -> [Vertex; 6] {
    let r = tuning.avatar_radius;
    rect(
        Vec2::new(-r, avatar.y - r),
        Vec2::new(r, avatar.y + r),
        color,
    )
}

/// Full scene, back to front: background, pipes, avatar
pub fn scene(
    avatar_state: &Avatar,
    obstacles: &[Obstacle],
    background: &[BackgroundEntity],
    tuning: &Tuning,
    palette: &Palette,
    disc_segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        background.len() * disc_segments as usize * 3 + obstacles.len() * 12 + 6,
    );

    for entity in background {
        vertices.extend(circle(
            Vec2::new(entity.x, entity.y),
            entity.size,
            palette.background,
            disc_segments,
        ));
    }
    for o in obstacles {
        vertices.extend(obstacle(o, tuning, palette.pipe));
    }
    vertices.extend(avatar(avatar_state, tuning, palette.avatar));

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacle_leaves_gap_open() {
        let tuning = Tuning::default();
        let o = Obstacle {
            id: 1,
            x: 0.5,
            gap_y: 0.1,
            passed: false,
        };
        let vertices = obstacle(&o, &tuning, Palette::STANDARD.pipe);
        assert_eq!(vertices.len(), 12);

        // No vertex lies strictly inside the gap
        for v in &vertices {
            let y = v.position[1];
            assert!(y >= 0.4 - 1e-6 || y <= -0.2 + 1e-6, "vertex in gap at y={}", y);
            assert!((v.position[0] - 0.5).abs() <= 0.1 + 1e-6);
        }
    }

    #[test]
    fn test_scene_vertex_count() {
        let tuning = Tuning::default();
        let obstacles = [
            Obstacle { id: 1, x: 0.0, gap_y: 0.0, passed: false },
            Obstacle { id: 2, x: 0.7, gap_y: 0.2, passed: false },
        ];
        let background = [BackgroundEntity { x: 0.0, y: 0.5, size: 0.1, speed: 0.001 }];
        let vertices = scene(
            &Avatar::default(),
            &obstacles,
            &background,
            &tuning,
            &Palette::STANDARD,
            16,
        );
        assert_eq!(vertices.len(), 16 * 3 + 2 * 12 + 6);
        // Avatar is drawn last
        assert_eq!(vertices.last().map(|v| v.color), Some(Palette::STANDARD.avatar));
    }

    #[test]
    fn test_avatar_square_tracks_position() {
        let tuning = Tuning::default();
        let quad = avatar(&Avatar { y: -0.5, vel: 0.0 }, &tuning, [1.0; 4]);
        let ys: Vec<f32> = quad.iter().map(|v| v.position[1]).collect();
        let min = ys.iter().cloned().fold(f32::MAX, f32::min);
        let max = ys.iter().cloned().fold(f32::MIN, f32::max);
        assert!((min - -0.6).abs() < 1e-6);
        assert!((max - -0.4).abs() < 1e-6);
    }
}
