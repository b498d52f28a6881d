//! Experience and level-up

use crate::constants::MAX_LEVEL;
use crate::creature::{exp_to_next_level, Creature};

/// Add experience. Levels up at most once per call when the threshold is
/// reached; any surplus stays banked toward the next level.
///
/// Returns whether a level was gained.
pub fn gain_exp(creature: &mut Creature, exp: u32) -> bool {
    creature.exp = creature.exp.saturating_add(exp);

    if creature.exp >= creature.exp_to_next {
        return level_up(creature);
    }

    false
}

/// Advance one level: spend `exp_to_next`, grow stats by the growth value,
/// heal fully and refill every skill.
///
/// Saturating no-op returning false at the level cap.
pub fn level_up(creature: &mut Creature) -> bool {
    if creature.level >= MAX_LEVEL {
        return false;
    }

    creature.level += 1;
    creature.exp = creature.exp.saturating_sub(creature.exp_to_next);
    creature.exp_to_next = exp_to_next_level(creature.level);

    creature.stats.grow();
    creature.full_restore();

    tracing::info!(
        creature = %creature.id,
        level = creature.level,
        max_hp = creature.stats.max_hp,
        "level up"
    );

    true
}
