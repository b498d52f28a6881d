//! Skill inheritance

use crate::constants::{FUSION_INHERITED_SKILLS, MAX_SKILLS};
use crate::creature::Skill;
use rand::Rng;

fn contains_id(skills: &[Skill], id: &str) -> bool {
    skills.iter().any(|s| s.id == id)
}

/// Merge two skill lists into a child's list.
///
/// Both signature skills are kept first (A's, then B's), then up to two
/// non-signature skills are drawn without replacement from the pooled
/// remainder. Skills are copied as-is, current uses included. A skill id
/// already in the list is never added twice. The result holds at most four
/// skills.
pub fn merge_skills(a: &[Skill], b: &[Skill], rng: &mut impl Rng) -> Vec<Skill> {
    let mut merged: Vec<Skill> = Vec::with_capacity(MAX_SKILLS);

    for signature in [a, b]
        .iter()
        .filter_map(|skills| skills.iter().find(|s| s.is_signature))
    {
        if !contains_id(&merged, &signature.id) {
            merged.push(signature.clone());
        }
    }

    let mut pool: Vec<&Skill> = a.iter().chain(b).filter(|s| !s.is_signature).collect();
    let mut inherited = 0;
    while inherited < FUSION_INHERITED_SKILLS && !pool.is_empty() {
        let skill = pool.swap_remove(rng.gen_range(0..pool.len()));
        if contains_id(&merged, &skill.id) {
            continue;
        }
        merged.push(skill.clone());
        inherited += 1;
    }

    merged.truncate(MAX_SKILLS);
    merged
}
