//! Damage calculation and skill execution

use super::result::{SkillHit, SkillOutcome};
use crate::constants::{
    CRIT_CHANCE, CRIT_MULTIPLIER, DAMAGE_RANDOM_MAX, DAMAGE_RANDOM_MIN, MIN_DAMAGE,
};
use crate::creature::{Creature, Skill};
use crate::element::effectiveness_multiplier;
use rand::Rng;

/// Unfloored damage: `power * atk / def * effectiveness * U[0.85, 1.0)`.
///
/// A defender with zero def is treated as having 1.
fn raw_damage(attacker: &Creature, defender: &Creature, skill: &Skill, rng: &mut impl Rng) -> f64 {
    let def = defender.stats.def.max(1) as f64;
    let base = skill.power as f64 * (attacker.stats.atk as f64 / def);
    let effectiveness = effectiveness_multiplier(skill.element, defender.element);
    let random = rng.gen_range(DAMAGE_RANDOM_MIN..DAMAGE_RANDOM_MAX);
    base * effectiveness * random
}

fn floor_damage(raw: f64) -> u32 {
    (raw.floor() as u32).max(MIN_DAMAGE)
}

/// Calculate the damage `skill` would deal, without crits or side effects.
/// Always at least 1.
pub fn calculate_damage(
    attacker: &Creature,
    defender: &Creature,
    skill: &Skill,
    rng: &mut impl Rng,
) -> u32 {
    floor_damage(raw_damage(attacker, defender, skill, rng))
}

/// Use the attacker's skill at `skill_index` on the defender.
///
/// Spends one use, rolls damage and a 10% critical (1.5x, floored once
/// after the multiplier) and removes the damage from the defender's hp,
/// stopping at zero. A skill without uses left, or a missing slot, leaves
/// both creatures unchanged.
pub fn use_skill(
    attacker: &mut Creature,
    skill_index: usize,
    defender: &mut Creature,
    rng: &mut impl Rng,
) -> SkillOutcome {
    let Some(skill) = attacker.skills.get_mut(skill_index) else {
        return SkillOutcome::UnknownSkill;
    };
    if !skill.consume() {
        tracing::debug!(attacker = %attacker.id, skill = skill_index, "skill has no uses left");
        return SkillOutcome::NoUsesLeft;
    }

    let skill = &attacker.skills[skill_index];
    let raw = raw_damage(attacker, defender, skill, rng);
    let effectiveness = effectiveness_multiplier(skill.element, defender.element);
    let critical = rng.gen::<f64>() < CRIT_CHANCE;
    let damage = if critical {
        floor_damage(raw * CRIT_MULTIPLIER)
    } else {
        floor_damage(raw)
    };

    let hp_before = defender.stats.hp;
    defender.stats.hp = hp_before.saturating_sub(damage);

    tracing::debug!(
        attacker = %attacker.id,
        defender = %defender.id,
        skill = %skill.id,
        damage,
        effectiveness,
        critical,
        hp_after = defender.stats.hp,
        "skill used"
    );

    SkillOutcome::Hit(SkillHit {
        damage,
        effectiveness,
        critical,
        hp_before,
        hp_after: defender.stats.hp,
    })
}
