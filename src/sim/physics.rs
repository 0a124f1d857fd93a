//! Avatar physics: gravity, velocity caps and vertical bounds

use super::state::Avatar;
use crate::tuning::Tuning;

/// What happened to the avatar during one integration step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhysicsOutcome {
    /// Avatar reached the floor bound; the run is over
    pub grounded: bool,
    /// Avatar reached the ceiling bound (not terminal)
    pub hit_ceiling: bool,
}

/// Advance the avatar by one frame.
///
/// A flap (if any) overwrites the velocity before gravity is applied. The
/// velocity cap is enforced every frame, and the position is clamped to the
/// floor/ceiling afterwards.
pub fn integrate(avatar: &mut Avatar, tuning: &Tuning, flap: bool) -> PhysicsOutcome {
    if flap {
        avatar.flap(tuning);
    }

    let (min_vel, max_vel) = tuning.velocity_bounds();
    avatar.vel = (avatar.vel + tuning.gravity_step()).clamp(min_vel, max_vel);
    avatar.y += avatar.vel;

    let mut outcome = PhysicsOutcome::default();
    let (floor, ceiling) = (tuning.floor(), tuning.ceiling());
    // Distance past the floor measured along "down", so this works mirrored too
    if (avatar.y - floor) * tuning.down_direction >= 0.0 {
        avatar.y = floor;
        avatar.vel = 0.0;
        outcome.grounded = true;
    } else if (ceiling - avatar.y) * tuning.down_direction >= 0.0 {
        avatar.y = ceiling;
        avatar.vel = 0.0;
        outcome.hit_ceiling = true;
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_step_from_rest() {
        let tuning = Tuning::default();
        let mut avatar = Avatar { y: 0.0, vel: 0.0 };
        let outcome = integrate(&mut avatar, &tuning, false);
        assert!((avatar.vel - -0.0008).abs() < 1e-7);
        assert!((avatar.y - -0.0008).abs() < 1e-7);
        assert_eq!(outcome, PhysicsOutcome::default());
    }

    #[test]
    fn test_fall_speed_capped() {
        let tuning = Tuning::default();
        let mut avatar = Avatar { y: 0.5, vel: -0.0799 };
        integrate(&mut avatar, &tuning, false);
        assert_eq!(avatar.vel, -0.08);
    }

    #[test]
    fn test_rise_speed_capped() {
        let tuning = Tuning::default();
        let mut avatar = Avatar { y: 0.0, vel: 0.5 };
        integrate(&mut avatar, &tuning, false);
        assert_eq!(avatar.vel, 0.03);
    }

    #[test]
    fn test_flap_then_gravity() {
        let tuning = Tuning::default();
        let mut avatar = Avatar { y: 0.0, vel: -0.07 };
        integrate(&mut avatar, &tuning, true);
        assert!((avatar.vel - (0.015 - 0.0008)).abs() < 1e-7);
        assert!(avatar.y > 0.0);
    }

    #[test]
    fn test_floor_is_terminal() {
        let tuning = Tuning::default();
        let mut avatar = Avatar { y: -0.89, vel: -0.05 };
        let outcome = integrate(&mut avatar, &tuning, false);
        assert!(outcome.grounded);
        assert!(!outcome.hit_ceiling);
        assert_eq!(avatar.y, -0.9);
        assert_eq!(avatar.vel, 0.0);
    }

    #[test]
    fn test_ceiling_is_not_terminal() {
        let tuning = Tuning::default();
        let mut avatar = Avatar { y: 0.89, vel: 0.03 };
        let outcome = integrate(&mut avatar, &tuning, false);
        assert!(!outcome.grounded);
        assert!(outcome.hit_ceiling);
        assert_eq!(avatar.y, 0.9);
        assert_eq!(avatar.vel, 0.0);
    }

    #[test]
    fn test_mirrored_gravity() {
        let tuning = Tuning {
            down_direction: 1.0,
            ..Default::default()
        };
        let mut avatar = Avatar::default();
        integrate(&mut avatar, &tuning, false);
        assert!((avatar.vel - 0.0008).abs() < 1e-7);

        integrate(&mut avatar, &tuning, true);
        assert!((avatar.vel - (-0.015 + 0.0008)).abs() < 1e-7);

        let mut avatar = Avatar { y: 0.89, vel: 0.05 };
        assert!(integrate(&mut avatar, &tuning, false).grounded);
        assert_eq!(avatar.y, 0.9);

        let mut avatar = Avatar { y: -0.89, vel: -0.03 };
        let outcome = integrate(&mut avatar, &tuning, false);
        assert!(outcome.hit_ceiling && !outcome.grounded);
        assert_eq!(avatar.y, -0.9);
    }
}
