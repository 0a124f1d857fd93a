//! Decorative background stream
//!
//! A fixed pool of entities drifting left at their own speeds. Entities that
//! leave the screen are moved back to the right edge at a new height.

use rand_pcg::Pcg32;

use super::state::{BackgroundEntity, symmetric};
use crate::tuning::Tuning;

/// Scroll the pool by each entity's own speed, recycling in place.
/// Returns how many entities wrapped this frame.
pub fn advance(entities: &mut [BackgroundEntity], tuning: &Tuning, rng: &mut Pcg32) -> usize {
    let mut wrapped = 0;
    for entity in entities.iter_mut() {
        entity.x -= entity.speed;
        if entity.x < tuning.background_wrap_x {
            entity.x = tuning.background_spawn_x;
            entity.y = symmetric(rng, tuning.background_y_range);
            wrapped += 1;
        }
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_each_entity_uses_own_speed() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut pool = vec![
            BackgroundEntity { x: 0.0, y: 0.1, size: 0.1, speed: 0.001 },
            BackgroundEntity { x: 0.0, y: 0.2, size: 0.1, speed: 0.003 },
        ];
        assert_eq!(advance(&mut pool, &tuning, &mut rng), 0);
        assert!((pool[0].x - -0.001).abs() < 1e-7);
        assert!((pool[1].x - -0.003).abs() < 1e-7);
        assert_eq!(pool[0].y, 0.1);
    }

    #[test]
    fn test_recycles_in_place() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut pool = vec![BackgroundEntity { x: -1.199, y: 0.5, size: 0.12, speed: 0.002 }];
        assert_eq!(advance(&mut pool, &tuning, &mut rng), 1);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].x, 1.2);
        assert_eq!(pool[0].size, 0.12);
        assert_eq!(pool[0].speed, 0.002);
        assert!(pool[0].y.abs() <= tuning.background_y_range);
    }

    #[test]
    fn test_wrap_and_spawn_come_from_tuning() {
        let tuning = Tuning {
            background_wrap_x: -0.5,
            background_spawn_x: 0.7,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        let mut pool = vec![BackgroundEntity { x: -0.499, y: 0.0, size: 0.1, speed: 0.002 }];
        assert_eq!(advance(&mut pool, &tuning, &mut rng), 1);
        assert_eq!(pool[0].x, 0.7);

        let session = crate::sim::GameSession::with_tuning(3, tuning);
        assert!(session.background.iter().all(|e| e.x >= -0.5 && e.x <= 0.7));
    }

    #[test]
    fn test_pool_size_is_stable() {
        let tuning = Tuning::default();
        let mut session = crate::sim::GameSession::new(11);
        let count = session.background.len();
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..10_000 {
            advance(&mut session.background, &tuning, &mut rng);
            assert_eq!(session.background.len(), count);
            assert!(session.background.iter().all(|e| e.x >= -1.2 && e.x <= 1.2));
        }
    }
}
