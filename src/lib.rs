//! Skyflap - A gravity-and-flap pipe dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacle streams, collisions, game state)
//! - `driver`: Frame driver and the collaborator traits it talks to
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::{FrameDriver, FrameOutcome, FrameScheduler, Renderer, ScoreDisplay};
pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// All values are in normalized playfield units (the visible area spans
/// -1.0..1.0 on both axes) and are tuned per frame, not per second.
pub mod consts {
    /// Gravity magnitude added to the avatar velocity every frame
    pub const GRAVITY: f32 = 0.0008;
    /// Velocity a flap sets, against gravity
    pub const FLAP_STRENGTH: f32 = 0.015;
    /// Velocity cap against gravity (rising)
    pub const MAX_RISE_SPEED: f32 = 0.03;
    /// Velocity cap with gravity (falling)
    pub const MAX_FALL_SPEED: f32 = 0.08;
    /// Sign of "down": -1.0 means gravity pulls toward negative y
    pub const DOWN_DIRECTION: f32 = -1.0;

    /// Vertical bound the avatar is clamped to (both directions)
    pub const AVATAR_BOUND: f32 = 0.9;
    /// Avatar hitbox radius; the avatar sits at x = 0
    pub const AVATAR_RADIUS: f32 = 0.1;

    /// Obstacle scroll speed per frame
    pub const OBSTACLE_SPEED: f32 = 0.005;
    /// Obstacle width (drawn and collided)
    pub const OBSTACLE_WIDTH: f32 = 0.2;
    /// Full height of the passable gap
    pub const OBSTACLE_GAP: f32 = 0.6;
    /// Gap centers are drawn from -GAP_CENTER_RANGE..=GAP_CENTER_RANGE
    pub const GAP_CENTER_RANGE: f32 = 0.6;
    /// x where new obstacles appear
    pub const OBSTACLE_SPAWN_X: f32 = 1.2;
    /// A new obstacle is appended once the rearmost one is left of this
    pub const OBSTACLE_RESPAWN_X: f32 = 0.5;
    /// Obstacles left of this are removed
    pub const OBSTACLE_DESPAWN_X: f32 = -1.2;

    /// Default number of background entities
    pub const BACKGROUND_POOL: usize = 5;
    /// Background entities recycle from here back to the spawn x
    pub const BACKGROUND_WRAP_X: f32 = -1.2;
    /// x a recycled background entity reappears at
    pub const BACKGROUND_SPAWN_X: f32 = 1.2;
    /// Per-entity drift speeds are drawn once from MIN..=MAX
    pub const BACKGROUND_MIN_SPEED: f32 = 0.001;
    pub const BACKGROUND_MAX_SPEED: f32 = 0.003;
    /// Disc radii are drawn once from MIN..=MAX
    pub const BACKGROUND_MIN_SIZE: f32 = 0.08;
    pub const BACKGROUND_MAX_SIZE: f32 = 0.16;
    /// Largest background pool a tuning may ask for
    pub const MAX_BACKGROUND_POOL: usize = 256;
    /// Largest |x| or |y| a tuning position may use
    pub const MAX_COORDINATE: f32 = 10.0;
    /// Background vertical positions are drawn from -RANGE..=RANGE
    pub const BACKGROUND_Y_RANGE: f32 = 0.8;
}
