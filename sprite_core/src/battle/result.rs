//! SkillOutcome - what a single skill use did

use serde::{Deserialize, Serialize};

/// Result of asking a creature to use one of its skills.
///
/// Only `Hit` mutates anything; the other variants are capability gates
/// that leave both creatures untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkillOutcome {
    /// The skill landed
    Hit(SkillHit),
    /// The skill has no uses left
    NoUsesLeft,
    /// The attacker has no skill at the requested slot
    UnknownSkill,
}

impl SkillOutcome {
    /// Damage dealt, zero for the no-op variants
    pub fn damage(&self) -> u32 {
        match self {
            SkillOutcome::Hit(hit) => hit.damage,
            _ => 0,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, SkillOutcome::Hit(_))
    }

    pub fn hit(&self) -> Option<&SkillHit> {
        match self {
            SkillOutcome::Hit(hit) => Some(hit),
            _ => None,
        }
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        match self {
            SkillOutcome::Hit(hit) => hit.summary(),
            SkillOutcome::NoUsesLeft => "No uses left".to_string(),
            SkillOutcome::UnknownSkill => "Unknown skill".to_string(),
        }
    }
}

/// Details of a landed skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillHit {
    /// Floored damage after the critical multiplier
    pub damage: u32,
    /// Element multiplier that applied (2.0, 1.0 or 0.5)
    pub effectiveness: f64,
    /// Whether the critical roll succeeded
    pub critical: bool,
    /// Defender hp before the hit
    pub hp_before: u32,
    /// Defender hp after the hit
    pub hp_after: u32,
}

impl SkillHit {
    /// Hp actually removed (damage past zero hp is not counted)
    pub fn hp_lost(&self) -> u32 {
        self.hp_before - self.hp_after
    }

    /// Whether this hit took the defender to zero hp
    pub fn is_knockout(&self) -> bool {
        self.hp_before > 0 && self.hp_after == 0
    }

    pub fn is_super_effective(&self) -> bool {
        self.effectiveness > 1.0
    }

    pub fn is_not_very_effective(&self) -> bool {
        self.effectiveness < 1.0
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{} damage", self.damage)];

        if self.critical {
            parts.push("critical hit".to_string());
        }
        if self.is_super_effective() {
            parts.push("super effective".to_string());
        } else if self.is_not_very_effective() {
            parts.push("not very effective".to_string());
        }
        if self.is_knockout() {
            parts.push("KO".to_string());
        }

        parts.join(", ")
    }
}
