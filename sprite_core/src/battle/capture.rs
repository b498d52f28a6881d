//! Capture attempts

use crate::constants::CAPTURE_BASE_RATE;
use crate::creature::Creature;
use rand::Rng;

/// Probability that a capture attempt succeeds:
/// `(1 - hp / max_hp) * 0.3 * ball_multiplier`, clamped to [0, 1].
///
/// Lower hp and stronger balls raise the chance monotonically. A creature
/// with zero max hp cannot be captured.
pub fn capture_chance(creature: &Creature, ball_multiplier: f64) -> f64 {
    if creature.stats.max_hp == 0 {
        return 0.0;
    }
    let missing = 1.0 - creature.hp_ratio();
    let chance = missing * CAPTURE_BASE_RATE * ball_multiplier;
    if chance.is_nan() {
        return 0.0;
    }
    chance.clamp(0.0, 1.0)
}

/// Roll a single capture attempt
pub fn attempt_capture(creature: &Creature, ball_multiplier: f64, rng: &mut impl Rng) -> bool {
    let chance = capture_chance(creature, ball_multiplier);
    let captured = rng.gen::<f64>() < chance;

    tracing::debug!(
        target_creature = %creature.id,
        chance,
        captured,
        "capture attempt"
    );

    captured
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CreatureRegistry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mouse_at(hp: u32) -> Creature {
        let mut mouse = CreatureRegistry::with_defaults().spawn("electric_mouse").unwrap();
        mouse.stats.hp = hp;
        mouse
    }

    #[test]
    fn test_half_hp_chance() {
        // max hp 40
        let mouse = mouse_at(20);
        assert!((capture_chance(&mouse, 1.0) - 0.15).abs() < f64::EPSILON);
        assert!((capture_chance(&mouse, 1.5) - 0.225).abs() < 1e-12);
    }

    #[test]
    fn test_full_hp_never_captures() {
        let mouse = mouse_at(40);
        assert!((capture_chance(&mouse, 10.0) - 0.0).abs() < f64::EPSILON);

        let mut rng = StdRng::seed_from_u64(9);
        assert!((0..1000).all(|_| !attempt_capture(&mouse, 10.0, &mut rng)));
    }

    #[test]
    fn test_chance_is_clamped() {
        let mouse = mouse_at(0);
        assert!((capture_chance(&mouse, 100.0) - 1.0).abs() < f64::EPSILON);
        assert!((capture_chance(&mouse, -2.0) - 0.0).abs() < f64::EPSILON);

        let mut rng = StdRng::seed_from_u64(9);
        assert!((0..1000).all(|_| attempt_capture(&mouse, 100.0, &mut rng)));
    }

    #[test]
    fn test_chance_rises_as_hp_drops() {
        let mut last = -1.0;
        for hp in (0..=40).rev() {
            let chance = capture_chance(&mouse_at(hp), 1.0);
            assert!(chance > last);
            last = chance;
        }
    }

    #[test]
    fn test_observed_rate_matches_chance() {
        let mouse = mouse_at(20);
        let mut rng = StdRng::seed_from_u64(77);
        let captures = (0..10_000)
            .filter(|_| attempt_capture(&mouse, 1.0, &mut rng))
            .count();
        let rate = captures as f64 / 10_000.0;
        assert!((rate - 0.15).abs() < 0.02, "observed rate {}", rate);
    }
}
