//! Obstacle stream: scrolling, recycling and pass detection
//!
//! The stream is ordered oldest (leftmost) to newest (rightmost). Every
//! obstacle scrolls at the same speed, so insertion order is spatial order.

use rand_pcg::Pcg32;

use super::state::{Obstacle, symmetric};
use crate::tuning::Tuning;

/// Outcome of one stream advance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamAdvance {
    /// Points earned this frame (one per pass)
    pub score_delta: u64,
    /// IDs of obstacles whose `passed` flag flipped this frame, oldest first
    pub passes: Vec<u32>,
    /// Obstacles removed off the left edge
    pub removed: usize,
    /// Whether a new obstacle was appended
    pub spawned: bool,
}

/// Build a fresh obstacle at the spawn line with a uniformly random gap
pub fn spawn(id: u32, tuning: &Tuning, rng: &mut Pcg32) -> Obstacle {
    Obstacle {
        id,
        x: tuning.spawn_x,
        gap_y: symmetric(rng, tuning.gap_center_range),
        passed: false,
    }
}

/// Scroll every obstacle left, drop the ones past the despawn line, score the
/// ones that just crossed x = 0 and append a new one when the rearmost has
/// scrolled far enough.
///
/// `spawn` is called at most once per advance.
pub fn advance(
    obstacles: &mut Vec<Obstacle>,
    tuning: &Tuning,
    mut spawn: impl FnMut() -> Obstacle,
) -> StreamAdvance {
    let mut result = StreamAdvance::default();

    for obstacle in obstacles.iter_mut() {
        obstacle.x -= tuning.obstacle_speed;
    }

    let before = obstacles.len();
    obstacles.retain(|o| o.x >= tuning.despawn_x);
    result.removed = before - obstacles.len();

    for obstacle in obstacles.iter_mut() {
        if !obstacle.passed && obstacle.x < 0.0 {
            obstacle.passed = true;
            result.score_delta += 1;
            result.passes.push(obstacle.id);
        }
    }

    let needs_spawn = obstacles
        .last()
        .map(|last| last.x < tuning.respawn_x)
        .unwrap_or(true);
    if needs_spawn {
        obstacles.push(spawn());
        result.spawned = true;
    }

    result
}
