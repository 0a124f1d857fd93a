//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-frame constants only (no wall-clock time)
//! - Seeded RNG only
//! - Stable iteration order (insertion order = spatial order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod background;
pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::collides;
pub use obstacles::StreamAdvance;
pub use physics::{PhysicsOutcome, integrate};
pub use state::{
    Avatar, BackgroundEntity, CrashCause, GameEvent, GamePhase, GameSession, Obstacle,
};
pub use tick::{Activation, TickOutcome, activate, tick};
