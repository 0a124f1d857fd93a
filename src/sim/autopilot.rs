//! Idle/demo mode - a simple AI that decides when to flap
//!
//! Aims a little below the center of the nearest gap that can still hit the
//! avatar and flaps whenever the avatar sinks under that line.

use super::state::{GamePhase, GameSession};

/// How far below the gap center the avatar may sink before flapping
const FLAP_MARGIN: f32 = 0.1;

/// Gap center the autopilot is steering toward
pub fn target_height(session: &GameSession) -> f32 {
    let t = &session.tuning;
    let reach = t.avatar_radius + t.obstacle_half_width;
    session
        .obstacles
        .iter()
        .find(|o| o.x > -reach)
        .map(|o| o.gap_y)
        .unwrap_or(0.0)
}

/// Whether the autopilot would issue an activate input this frame
pub fn wants_flap(session: &GameSession) -> bool {
    if session.phase != GamePhase::Running {
        return false;
    }
    // Height above the target, measured against gravity
    let up = -session.tuning.down_direction;
    let height = (session.avatar.y - target_height(session)) * up;
    height < -FLAP_MARGIN
}
