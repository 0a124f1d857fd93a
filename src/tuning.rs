//! Data-driven game balance
//!
//! Every simulation constant lives in [`Tuning`]. The defaults reproduce the
//! canonical feel; a JSON override can be loaded for experiments.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Why a tuning override was rejected
#[derive(Debug)]
pub enum TuningError {
    /// The JSON could not be parsed into a [`Tuning`]
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "malformed tuning JSON: {}", e),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{}`: {}", field, reason),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Simulation constants, all per frame and in playfield units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Gravity magnitude (sign comes from `down_direction`)
    pub gravity: f32,
    /// Flap velocity magnitude (applied against gravity)
    pub flap_strength: f32,
    pub max_rise_speed: f32,
    pub max_fall_speed: f32,
    /// -1.0: falls toward negative y. 1.0: mirrored playfield.
    pub down_direction: f32,

    /// |y| limit for the avatar
    pub avatar_bound: f32,
    pub avatar_radius: f32,

    pub obstacle_speed: f32,
    pub obstacle_half_width: f32,
    pub gap_half_height: f32,
    pub gap_center_range: f32,
    pub spawn_x: f32,
    pub respawn_x: f32,
    pub despawn_x: f32,

    /// Number of decorative background entities (0 disables the stream)
    pub background_pool: usize,
    /// Entities left of this are recycled to `background_spawn_x`
    pub background_wrap_x: f32,
    pub background_spawn_x: f32,
    pub background_min_speed: f32,
    pub background_max_speed: f32,
    pub background_min_size: f32,
    pub background_max_size: f32,
    pub background_y_range: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            flap_strength: FLAP_STRENGTH,
            max_rise_speed: MAX_RISE_SPEED,
            max_fall_speed: MAX_FALL_SPEED,
            down_direction: DOWN_DIRECTION,

            avatar_bound: AVATAR_BOUND,
            avatar_radius: AVATAR_RADIUS,

            obstacle_speed: OBSTACLE_SPEED,
            obstacle_half_width: OBSTACLE_WIDTH / 2.0,
            gap_half_height: OBSTACLE_GAP / 2.0,
            gap_center_range: GAP_CENTER_RANGE,
            spawn_x: OBSTACLE_SPAWN_X,
            respawn_x: OBSTACLE_RESPAWN_X,
            despawn_x: OBSTACLE_DESPAWN_X,

            background_pool: BACKGROUND_POOL,
            background_wrap_x: BACKGROUND_WRAP_X,
            background_spawn_x: BACKGROUND_SPAWN_X,
            background_min_speed: BACKGROUND_MIN_SPEED,
            background_max_speed: BACKGROUND_MAX_SPEED,
            background_min_size: BACKGROUND_MIN_SIZE,
            background_max_size: BACKGROUND_MAX_SIZE,
            background_y_range: BACKGROUND_Y_RANGE,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it.
    /// Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        let positive = [
            ("gravity", self.gravity),
            ("flap_strength", self.flap_strength),
            ("max_rise_speed", self.max_rise_speed),
            ("max_fall_speed", self.max_fall_speed),
            ("avatar_bound", self.avatar_bound),
            ("avatar_radius", self.avatar_radius),
            ("obstacle_speed", self.obstacle_speed),
            ("obstacle_half_width", self.obstacle_half_width),
            ("gap_half_height", self.gap_half_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return invalid(field, "must be a positive finite number");
            }
        }

        if self.down_direction != 1.0 && self.down_direction != -1.0 {
            return invalid("down_direction", "must be 1.0 or -1.0");
        }

        let ranges = [
            ("gap_center_range", self.gap_center_range),
            ("background_y_range", self.background_y_range),
        ];
        for (field, value) in ranges {
            if !(value.is_finite() && (0.0..=MAX_COORDINATE).contains(&value)) {
                return invalid(field, "must be in 0..=MAX_COORDINATE");
            }
        }

        let positions = [
            ("spawn_x", self.spawn_x),
            ("respawn_x", self.respawn_x),
            ("despawn_x", self.despawn_x),
            ("background_wrap_x", self.background_wrap_x),
            ("background_spawn_x", self.background_spawn_x),
        ];
        for (field, value) in positions {
            if !(value.is_finite() && value.abs() <= MAX_COORDINATE) {
                return invalid(field, "must be a finite position within MAX_COORDINATE");
            }
        }
        if !(self.despawn_x < self.respawn_x && self.respawn_x < self.spawn_x) {
            return invalid("respawn_x", "must lie between despawn_x and spawn_x");
        }
        // Obstacles must be able to cross the avatar at x = 0 before despawning
        if self.despawn_x >= 0.0 {
            return invalid("despawn_x", "must be left of the avatar (negative)");
        }
        if self.background_wrap_x >= self.background_spawn_x {
            return invalid("background_wrap_x", "must be left of background_spawn_x");
        }

        if self.background_pool > MAX_BACKGROUND_POOL {
            return invalid("background_pool", "must be at most MAX_BACKGROUND_POOL");
        }
        let draws = [
            ("background_min_speed", self.background_min_speed, self.background_max_speed),
            ("background_min_size", self.background_min_size, self.background_max_size),
        ];
        for (field, min, max) in draws {
            if !(min.is_finite() && max.is_finite() && 0.0 <= min && min <= max) {
                return invalid(field, "must be finite with 0 <= min <= max");
            }
        }
        Ok(())
    }

    /// Signed per-frame gravity
    #[inline]
    pub fn gravity_step(&self) -> f32 {
        self.gravity * self.down_direction
    }

    /// Signed velocity set by a flap
    #[inline]
    pub fn flap_velocity(&self) -> f32 {
        -self.flap_strength * self.down_direction
    }

    /// (min, max) velocity clamp, oriented by `down_direction`
    pub fn velocity_bounds(&self) -> (f32, f32) {
        if self.down_direction < 0.0 {
            (-self.max_fall_speed, self.max_rise_speed)
        } else {
            (-self.max_rise_speed, self.max_fall_speed)
        }
    }

    /// y of the terminal bound (the one gravity pulls toward)
    #[inline]
    pub fn floor(&self) -> f32 {
        self.avatar_bound * self.down_direction
    }

    /// y of the non-terminal bound
    #[inline]
    pub fn ceiling(&self) -> f32 {
        -self.avatar_bound * self.down_direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.gravity_step(), -0.0008);
        assert_eq!(tuning.flap_velocity(), 0.015);
        assert_eq!(tuning.velocity_bounds(), (-0.08, 0.03));
        assert_eq!(tuning.floor(), -0.9);
        assert_eq!(tuning.ceiling(), 0.9);
    }

    #[test]
    fn test_mirrored_orientation() {
        let tuning = Tuning {
            down_direction: 1.0,
            ..Default::default()
        };
        assert_eq!(tuning.gravity_step(), 0.0008);
        assert_eq!(tuning.flap_velocity(), -0.015);
        assert_eq!(tuning.velocity_bounds(), (-0.03, 0.08));
        assert_eq!(tuning.floor(), 0.9);
        assert_eq!(tuning.ceiling(), -0.9);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "obstacle_speed": 0.01, "background_pool": 0 }"#)
            .expect("partial override should parse");
        assert_eq!(tuning.obstacle_speed, 0.01);
        assert_eq!(tuning.background_pool, 0);
        assert_eq!(tuning.gravity, GRAVITY);
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "gravity": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "gravity", .. }));

        let err = Tuning::from_json(r#"{ "down_direction": 0.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "down_direction", .. }));

        let err = Tuning::from_json(r#"{ "respawn_x": 2.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "respawn_x", .. }));
        assert!(err.to_string().contains("respawn_x"));

        // 1e39 overflows f32 to infinity
        let err = Tuning::from_json(r#"{ "background_max_speed": 1e39 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "background_min_speed", .. }));

        let err = Tuning::from_json(r#"{ "background_max_size": 1e39 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "background_min_size", .. }));

        let err = Tuning::from_json(r#"{ "background_pool": 100000 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "background_pool", .. }));

        let err = Tuning::from_json(r#"{ "despawn_x": 0.1 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "despawn_x", .. }));

        let err = Tuning::from_json(r#"{ "spawn_x": 1e39 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "spawn_x", .. }));

        let err = Tuning::from_json(r#"{ "gap_center_range": 1e30 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "gap_center_range", .. }));

        let err = Tuning::from_json(r#"{ "background_wrap_x": 2.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "background_wrap_x", .. }));
    }

    #[test]
    fn test_accepted_overrides_build_a_session() {
        let json = r#"{
            "background_pool": 256,
            "background_max_speed": 0.5,
            "background_max_size": 0.5,
            "despawn_x": -0.5,
            "gap_center_range": 0.0
        }"#;
        let tuning = Tuning::from_json(json).expect("override within limits");
        let session = crate::sim::GameSession::with_tuning(1, tuning);
        assert_eq!(session.background.len(), MAX_BACKGROUND_POOL);
    }
}
