//! Game session and core simulation types
//!
//! Everything the per-frame update touches lives in one owned [`GameSession`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::background;
use super::obstacles::{self, StreamAdvance};
use crate::tuning::Tuning;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first activate input
    #[default]
    NotStarted,
    /// Frames are being simulated
    Running,
    /// Run ended; the next activate restarts
    Over,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Avatar reached the floor bound
    Grounded,
    /// Avatar overlapped an obstacle outside its gap
    Obstacle,
}

/// Something the front end may want to react to (logging, sound, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Restarted,
    Flapped,
    ObstaclePassed { id: u32, score: u64 },
    Crashed { cause: CrashCause, score: u64 },
}

/// The player-controlled avatar. Its x is fixed at 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Avatar {
    pub y: f32,
    pub vel: f32,
}

impl Avatar {
    /// Overwrite the velocity with the flap velocity (clamped)
    pub fn flap(&mut self, tuning: &Tuning) {
        let (min, max) = tuning.velocity_bounds();
        self.vel = tuning.flap_velocity().clamp(min, max);
    }
}

/// A pipe pair with a passable gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub x: f32,
    pub gap_y: f32,
    /// Set once, when x first drops below 0
    pub passed: bool,
}

/// Decorative entity drifting behind the pipes. Recycled, never destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackgroundEntity {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// Frames simulated in the current run
    pub time_ticks: u64,
    pub avatar: Avatar,
    /// Ordered oldest (leftmost) to newest (rightmost)
    pub obstacles: Vec<Obstacle>,
    pub background: Vec<BackgroundEntity>,
    /// Events since the last [`GameSession::drain_events`]
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl GameSession {
    /// Create a session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut session = Self {
            seed,
            tuning,
            phase: GamePhase::NotStarted,
            score: 0,
            time_ticks: 0,
            avatar: Avatar::default(),
            obstacles: Vec::new(),
            background: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        session.populate_background();
        session
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Build a fresh obstacle at the spawn line with a random gap
    pub fn spawn_obstacle(&mut self) -> Obstacle {
        let id = self.next_entity_id();
        obstacles::spawn(id, &self.tuning, &mut self.rng)
    }

    /// Run the obstacle stream for one frame (does not touch the score)
    pub fn advance_obstacles(&mut self) -> StreamAdvance {
        let Self {
            obstacles: stream,
            tuning,
            rng,
            next_id,
            ..
        } = self;
        obstacles::advance(stream, tuning, || {
            let id = *next_id;
            *next_id += 1;
            obstacles::spawn(id, tuning, rng)
        })
    }

    /// Run the background stream for one frame
    pub fn advance_background(&mut self) -> usize {
        background::advance(&mut self.background, &self.tuning, &mut self.rng)
    }

    /// Replace the obstacle stream with a single fresh obstacle
    pub fn reset_obstacles(&mut self) {
        self.obstacles.clear();
        let first = self.spawn_obstacle();
        self.obstacles.push(first);
    }

    /// Fill the background pool up to `tuning.background_pool`, spread across
    /// the screen so the first frames are not empty
    pub fn populate_background(&mut self) {
        self.background.clear();
        self.resize_background(self.tuning.background_pool);
    }

    /// Change the background pool size, keeping the entities already on screen
    pub fn resize_background(&mut self, pool: usize) {
        self.tuning.background_pool = pool;
        self.background.truncate(pool);
        while self.background.len() < pool {
            let entity = self.random_background_entity();
            self.background.push(entity);
        }
    }

    fn random_background_entity(&mut self) -> BackgroundEntity {
        let t = &self.tuning;
        let rng = &mut self.rng;
        BackgroundEntity {
            x: rng.random_range(t.background_wrap_x..=t.background_spawn_x),
            y: symmetric(rng, t.background_y_range),
            size: rng.random_range(t.background_min_size..=t.background_max_size),
            speed: rng.random_range(t.background_min_speed..=t.background_max_speed),
        }
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Uniform sample in -range..=range (0 when the range is empty)
pub(crate) fn symmetric(rng: &mut Pcg32, range: f32) -> f32 {
    if range > 0.0 {
        rng.random_range(-range..=range)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let session = GameSession::new(7);
        assert_eq!(session.phase, GamePhase::NotStarted);
        assert_eq!(session.score, 0);
        assert!(session.obstacles.is_empty());
        assert_eq!(session.background.len(), session.tuning.background_pool);
        assert_eq!(session.avatar, Avatar::default());
    }

    #[test]
    fn test_spawned_gaps_stay_in_range() {
        let mut session = GameSession::new(42);
        for _ in 0..500 {
            let o = session.spawn_obstacle();
            assert!(o.gap_y.abs() <= 0.6);
            assert_eq!(o.x, 1.2);
            assert!(!o.passed);
        }
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut session = GameSession::new(1);
        let a = session.spawn_obstacle();
        let b = session.spawn_obstacle();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_flap_overwrites_velocity() {
        let tuning = Tuning::default();
        for start in [-0.08, -0.01, 0.0, 0.02, 0.03] {
            let mut avatar = Avatar { y: 0.0, vel: start };
            avatar.flap(&tuning);
            assert_eq!(avatar.vel, 0.015);
        }
    }

    #[test]
    fn test_resize_background_keeps_existing_entities() {
        let mut session = GameSession::new(8);
        let before = session.background.clone();
        assert_eq!(before.len(), 5);

        session.resize_background(8);
        assert_eq!(session.tuning.background_pool, 8);
        assert_eq!(session.background.len(), 8);
        assert_eq!(&session.background[..5], &before[..]);

        session.resize_background(0);
        assert!(session.background.is_empty());
        assert_eq!(session.tuning.background_pool, 0);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = GameSession::new(99);
        let mut b = GameSession::new(99);
        for _ in 0..10 {
            assert_eq!(a.spawn_obstacle(), b.spawn_obstacle());
        }
        assert_eq!(a.background, b.background);
    }
}
