//! Game state machine and per-frame simulation tick
//!
//! `activate` is the only input; `tick` advances one frame while running.

use super::collision::collides;
use super::physics::integrate;
use super::state::{Avatar, CrashCause, GameEvent, GamePhase, GameSession};

/// What an activate input did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// First run began
    Started,
    /// Avatar flapped (phase unchanged)
    Flapped,
    /// A finished run was reset and restarted
    Restarted,
}

/// Result of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session is not running; nothing was simulated
    Idle,
    /// Frame simulated, run continues
    Continue,
    /// Frame simulated and the run ended
    Over(CrashCause),
}

/// Apply the single "activate" input (space key / touch)
pub fn activate(session: &mut GameSession) -> Activation {
    match session.phase {
        GamePhase::NotStarted => {
            session.reset_obstacles();
            session.avatar.vel = 0.0;
            session.time_ticks = 0;
            session.phase = GamePhase::Running;
            session.events.push(GameEvent::Started);
            Activation::Started
        }
        GamePhase::Running => {
            session.avatar.flap(&session.tuning);
            session.events.push(GameEvent::Flapped);
            Activation::Flapped
        }
        GamePhase::Over => {
            restart(session);
            session.events.push(GameEvent::Restarted);
            Activation::Restarted
        }
    }
}

/// Clear all per-run state and go straight back to running
fn restart(session: &mut GameSession) {
    session.score = 0;
    session.time_ticks = 0;
    session.avatar = Avatar::default();
    session.reset_obstacles();
    session.phase = GamePhase::Running;
}

/// Advance the session by one frame.
///
/// Order: avatar physics, obstacle stream (scoring), background stream,
/// collision. Grounding or a collision ends the run.
pub fn tick(session: &mut GameSession) -> TickOutcome {
    if session.phase != GamePhase::Running {
        return TickOutcome::Idle;
    }
    session.time_ticks += 1;

    let physics = integrate(&mut session.avatar, &session.tuning, false);

    let stream = session.advance_obstacles();
    for id in stream.passes {
        session.score += 1;
        session.events.push(GameEvent::ObstaclePassed {
            id,
            score: session.score,
        });
    }

    session.advance_background();

    let crash = if physics.grounded {
        Some(CrashCause::Grounded)
    } else if collides(&session.avatar, &session.obstacles, &session.tuning) {
        Some(CrashCause::Obstacle)
    } else {
        None
    };

    match crash {
        Some(cause) => {
            session.phase = GamePhase::Over;
            session.events.push(GameEvent::Crashed {
                cause,
                score: session.score,
            });
            TickOutcome::Over(cause)
        }
        None => TickOutcome::Continue,
    }
}
