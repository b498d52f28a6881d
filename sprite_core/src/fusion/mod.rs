//! Fusion - combine two creatures into a new one
//!
//! Parents are only read. The child gets a fresh id, a blended name,
//! mixed body pixels, inherited skills and boosted growth.

mod body;
mod identity;
mod skills;

pub use body::{fuse_bodies, fuse_part};
pub use identity::{fusion_id, fusion_name};
pub use skills::merge_skills;

use crate::constants::FUSION_GROWTH_BONUS;
use crate::creature::{exp_to_next_level, Creature, SpriteSize, Stats};
use rand::Rng;

/// Fuse `a` and `b` into a new creature.
///
/// - level is the floored mean of both levels, with exp reset to zero
/// - growth value is `(a + b) * 1.1`, and stats are rebuilt from it fully healed
/// - element comes from either parent with equal chance
/// - fusion count is `a + b + 1`, and size follows the total
pub fn fuse_sprites(a: &Creature, b: &Creature, rng: &mut impl Rng) -> Creature {
    let level = (a.level + b.level) / 2;
    let growth_value = (a.stats.growth_value + b.stats.growth_value) * FUSION_GROWTH_BONUS;
    let element = if rng.gen_bool(0.5) { a.element } else { b.element };
    let fusion_count = a.fusion_count.saturating_add(b.fusion_count).saturating_add(1);
    let body = fuse_bodies(&a.body, &b.body, rng);
    let skills = merge_skills(&a.skills, &b.skills, rng);

    let child = Creature {
        id: fusion_id(&a.id, &b.id),
        name: fusion_name(&a.name, &b.name),
        element,
        level,
        exp: 0,
        exp_to_next: exp_to_next_level(level),
        stats: Stats::fresh(level, growth_value),
        skills,
        body,
        fusion_count,
        size: SpriteSize::for_fusions(fusion_count),
        parents: Some((a.id.clone(), b.id.clone())),
    };

    tracing::info!(
        parent_a = %a.id,
        parent_b = %b.id,
        child = %child.id,
        name = %child.name,
        element = %child.element,
        fusion_count,
        "sprites fused"
    );

    child
}
