//! Avatar vs obstacle collision detection
//!
//! The avatar sits at x = 0 with a fixed radius; obstacles are boxes with a
//! gap. The test is a per-frame proximity check, not a swept one: an obstacle
//! moving more than `avatar_radius + obstacle_half_width` per frame could skip
//! over the avatar entirely. At the default speed (0.005 per frame against a
//! 0.4 wide overlap window) that cannot happen.

use super::state::{Avatar, Obstacle};
use crate::tuning::Tuning;

/// Whether an obstacle horizontally overlaps the avatar's hitbox
#[inline]
pub fn overlaps_horizontally(obstacle: &Obstacle, tuning: &Tuning) -> bool {
    obstacle.x.abs() < tuning.avatar_radius + tuning.obstacle_half_width
}

/// Whether a vertical position lies outside an obstacle's gap
#[inline]
pub fn outside_gap(y: f32, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    y < obstacle.gap_y - tuning.gap_half_height || y > obstacle.gap_y + tuning.gap_half_height
}

/// First obstacle the avatar collides with, if any
pub fn first_collision<'a>(
    avatar: &Avatar,
    obstacles: &'a [Obstacle],
    tuning: &Tuning,
) -> Option<&'a Obstacle> {
    obstacles
        .iter()
        .find(|o| overlaps_horizontally(o, tuning) && outside_gap(avatar.y, o, tuning))
}

/// Check whether the avatar hits any obstacle
pub fn collides(avatar: &Avatar, obstacles: &[Obstacle], tuning: &Tuning) -> bool {
    first_collision(avatar, obstacles, tuning).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe(x: f32, gap_y: f32) -> Obstacle {
        Obstacle {
            id: 1,
            x,
            gap_y,
            passed: false,
        }
    }

    #[test]
    fn test_outside_gap_collides() {
        let tuning = Tuning::default();
        let avatar = Avatar { y: 0.5, vel: 0.0 };
        assert!(collides(&avatar, &[pipe(0.0, 0.0)], &tuning));
    }

    #[test]
    fn test_inside_gap_is_clear() {
        let tuning = Tuning::default();
        let avatar = Avatar { y: 0.1, vel: 0.0 };
        assert!(!collides(&avatar, &[pipe(0.0, 0.0)], &tuning));
    }

    #[test]
    fn test_gap_edges_are_clear() {
        let tuning = Tuning::default();
        let o = pipe(0.0, 0.25);
        assert!(!outside_gap(0.25 + 0.3, &o, &tuning));
        assert!(!outside_gap(0.25 - 0.3, &o, &tuning));
        assert!(outside_gap(0.25 + 0.31, &o, &tuning));
    }

    #[test]
    fn test_no_horizontal_overlap() {
        let tuning = Tuning::default();
        let avatar = Avatar { y: 0.85, vel: 0.0 };
        assert!(!collides(&avatar, &[pipe(0.2, 0.0)], &tuning));
        assert!(!collides(&avatar, &[pipe(-0.25, 0.0)], &tuning));
        assert!(collides(&avatar, &[pipe(0.19, 0.0)], &tuning));
        assert!(collides(&avatar, &[pipe(-0.19, 0.0)], &tuning));
    }

    #[test]
    fn test_first_collision_short_circuits() {
        let tuning = Tuning::default();
        let avatar = Avatar { y: -0.5, vel: 0.0 };
        let obstacles = [
            Obstacle { id: 1, x: -0.15, gap_y: 0.4, passed: true },
            Obstacle { id: 2, x: 0.15, gap_y: 0.4, passed: false },
        ];
        assert_eq!(first_collision(&avatar, &obstacles, &tuning).map(|o| o.id), Some(1));
    }

    #[test]
    fn test_empty_stream() {
        let tuning = Tuning::default();
        assert!(!collides(&Avatar::default(), &[], &tuning));
    }
}
