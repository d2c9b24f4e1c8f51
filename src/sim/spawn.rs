//! Time-gated enemy spawning
//!
//! Both tiers share the per-frame spawn timer, so their gates coincide on
//! common multiples (including frame 0).

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, HeavyEnemy};
use crate::tuning::Tuning;

/// Uniform x in `[0, width - size)`, or 0 when the enemy is wider than the field
fn spawn_x(rng: &mut impl Rng, width: f32, size: f32) -> f32 {
    let max = width - size;
    if max > 0.0 { rng.random_range(0.0..max) } else { 0.0 }
}

/// Tier-1 spawn: every `tier1_spawn_interval` frames, speed `1 + score / 20`
pub fn maybe_spawn_tier1(
    timer: u64,
    score: u32,
    width: f32,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> Option<Enemy> {
    if timer % tuning.tier1_spawn_interval != 0 {
        return None;
    }
    let size = tuning.tier1_size;
    Some(Enemy {
        pos: Vec2::new(spawn_x(rng, width, size), 0.0),
        size: Vec2::splat(size),
        speed: 1.0 + score as f32 / tuning.tier1_speed_divisor,
    })
}

/// Tier-2 spawn: every `tier2_spawn_interval` frames, speed `1 + score / 25`
pub fn maybe_spawn_tier2(
    timer: u64,
    score: u32,
    width: f32,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> Option<HeavyEnemy> {
    if timer % tuning.tier2_spawn_interval != 0 {
        return None;
    }
    let size = tuning.tier2_size;
    Some(HeavyEnemy {
        pos: Vec2::new(spawn_x(rng, width, size), 0.0),
        size: Vec2::splat(size),
        speed: 1.0 + score as f32 / tuning.tier2_speed_divisor,
        health: tuning.tier2_health,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_both_tiers_fire_on_frame_zero() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let e = maybe_spawn_tier1(0, 0, 800.0, &tuning, &mut rng).unwrap();
        let h = maybe_spawn_tier2(0, 0, 800.0, &tuning, &mut rng).unwrap();

        assert_eq!(e.pos.y, 0.0);
        assert_eq!(e.size, Vec2::splat(50.0));
        assert_eq!(e.speed, 1.0);

        assert_eq!(h.pos.y, 0.0);
        assert_eq!(h.size, Vec2::splat(70.0));
        assert_eq!(h.speed, 1.0);
        assert_eq!(h.health, 2);
    }

    #[test]
    fn test_gate_cadence() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let tier1 = |t: u64, rng: &mut Pcg32| maybe_spawn_tier1(t, 0, 800.0, &tuning, rng).is_some();
        let tier2 = |t: u64, rng: &mut Pcg32| maybe_spawn_tier2(t, 0, 800.0, &tuning, rng).is_some();

        assert!(tier1(100, &mut rng));
        assert!(!tier2(100, &mut rng));
        assert!(!tier1(150, &mut rng));
        assert!(!tier2(150, &mut rng));
        assert!(tier1(300, &mut rng));
        assert!(tier2(300, &mut rng));
        assert!(tier1(600, &mut rng));
        assert!(tier2(600, &mut rng));
        assert!(!tier2(400, &mut rng));
    }

    #[test]
    fn test_speed_scales_with_score() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let e = maybe_spawn_tier1(0, 10, 800.0, &tuning, &mut rng).unwrap();
        let h = maybe_spawn_tier2(0, 10, 800.0, &tuning, &mut rng).unwrap();
        assert!((e.speed - 1.5).abs() < 1e-6);
        assert!((h.speed - 1.4).abs() < 1e-6);
    }

    #[test]
    fn test_narrow_playfield_spawns_at_origin() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let h = maybe_spawn_tier2(0, 0, 60.0, &tuning, &mut rng).unwrap();
        assert_eq!(h.pos.x, 0.0);
    }

    proptest! {
        #[test]
        fn prop_spawn_x_within_playfield(seed in any::<u64>(), width in 100.0f32..4000.0) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let e = maybe_spawn_tier1(0, 0, width, &tuning, &mut rng).unwrap();
            let h = maybe_spawn_tier2(0, 0, width, &tuning, &mut rng).unwrap();
            prop_assert!(e.pos.x >= 0.0 && e.pos.x + e.size.x <= width);
            prop_assert!(h.pos.x >= 0.0 && h.pos.x + h.size.x <= width);
        }
    }
}
