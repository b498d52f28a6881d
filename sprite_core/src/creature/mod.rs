//! Creature model - identity, stats, skills and body of a collectable sprite

mod body;
mod skill;
mod stats;

pub use body::{Body, BodyPart, PartSlot};
pub use skill::Skill;
pub use stats::Stats;

use crate::constants::{MAX_LEVEL, MAX_SKILLS, SIZE_LARGE_FUSIONS, SIZE_MEDIUM_FUSIONS};
use crate::element::ElementType;
use serde::{Deserialize, Serialize};

/// Total experience curve: `floor(level^2.5 * 10)`
pub fn exp_for_level(level: u32) -> u32 {
    ((level as f64).powf(2.5) * 10.0).floor() as u32
}

/// Experience needed to leave `level`
pub fn exp_to_next_level(level: u32) -> u32 {
    exp_for_level(level + 1)
}

/// Sprite canvas size, grown in stages by cumulative fusions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SpriteSize {
    Small,
    Medium,
    Large,
}

impl SpriteSize {
    /// Size for a creature that went through `total_fusions` fusions
    pub fn for_fusions(total_fusions: u32) -> Self {
        if total_fusions >= SIZE_LARGE_FUSIONS {
            SpriteSize::Large
        } else if total_fusions >= SIZE_MEDIUM_FUSIONS {
            SpriteSize::Medium
        } else {
            SpriteSize::Small
        }
    }

    /// Edge length in pixels
    pub fn pixels(self) -> u32 {
        match self {
            SpriteSize::Small => 16,
            SpriteSize::Medium => 24,
            SpriteSize::Large => 32,
        }
    }
}

impl From<SpriteSize> for u32 {
    fn from(size: SpriteSize) -> u32 {
        size.pixels()
    }
}

impl TryFrom<u32> for SpriteSize {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            16 => Ok(SpriteSize::Small),
            24 => Ok(SpriteSize::Medium),
            32 => Ok(SpriteSize::Large),
            other => Err(format!("unsupported sprite size {other}")),
        }
    }
}

/// A collectable creature.
///
/// Base creatures come from the template registry; derived ones come out of
/// fusion. Battle and leveling mutate `stats`, `skills[].pp`, `level` and
/// `exp` in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub id: String,
    pub name: String,
    pub element: ElementType,
    /// 1..=50
    pub level: u32,
    pub exp: u32,
    pub exp_to_next: u32,
    pub stats: Stats,
    /// One to four skills
    pub skills: Vec<Skill>,
    pub body: Body,
    #[serde(default)]
    pub fusion_count: u32,
    pub size: SpriteSize,
    /// Ids of the two creatures this one was fused from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents: Option<(String, String)>,
}

impl Creature {
    /// Whether hp reached zero
    pub fn is_fainted(&self) -> bool {
        self.stats.hp == 0
    }

    /// Remaining hp as a fraction of max hp (0.0 when max hp is zero)
    pub fn hp_ratio(&self) -> f64 {
        if self.stats.max_hp == 0 {
            return 0.0;
        }
        self.stats.hp as f64 / self.stats.max_hp as f64
    }

    /// Restore up to `amount` hp. Returns the hp actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.stats.hp;
        self.stats.hp = self.stats.hp.saturating_add(amount).min(self.stats.max_hp);
        self.stats.hp - before
    }

    /// Refill every skill's uses
    pub fn restore_all_pp(&mut self) {
        for skill in &mut self.skills {
            skill.restore();
        }
    }

    /// Full hp and full uses on every skill
    pub fn full_restore(&mut self) {
        self.stats.hp = self.stats.max_hp;
        self.restore_all_pp();
    }

    /// Signature skill, if the creature has one
    pub fn signature_skill(&self) -> Option<&Skill> {
        self.skills.iter().find(|s| s.is_signature)
    }

    pub fn skill(&self, index: usize) -> Option<&Skill> {
        self.skills.get(index)
    }

    /// Check the creature invariants: one to four skills, level in range,
    /// hp and skill uses within their maximums, consistent body pixels.
    pub fn validate(&self) -> Result<(), String> {
        if self.skills.is_empty() || self.skills.len() > MAX_SKILLS {
            return Err(format!(
                "{}: expected 1-{} skills, found {}",
                self.id,
                MAX_SKILLS,
                self.skills.len()
            ));
        }
        if self.level == 0 || self.level > MAX_LEVEL {
            return Err(format!("{}: level {} out of range", self.id, self.level));
        }
        if self.stats.hp > self.stats.max_hp {
            return Err(format!(
                "{}: hp {} above max {}",
                self.id, self.stats.hp, self.stats.max_hp
            ));
        }
        if let Some(skill) = self.skills.iter().find(|s| s.pp > s.max_pp) {
            return Err(format!("{}: skill {} has pp above max", self.id, skill.id));
        }
        if !self.body.is_consistent() {
            return Err(format!("{}: body pixels do not match their parts", self.id));
        }
        Ok(())
    }

    /// Index of the first skill with uses left
    pub fn first_usable_skill(&self) -> Option<usize> {
        self.skills.iter().position(Skill::has_uses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_creature() -> Creature {
        Creature {
            id: "fire_fox".to_string(),
            name: "Fire Fox".to_string(),
            element: ElementType::Fire,
            level: 5,
            exp: 0,
            exp_to_next: 100,
            stats: Stats {
                hp: 45,
                max_hp: 45,
                atk: 15,
                def: 10,
                spd: 18,
                growth_value: 100.0,
            },
            skills: vec![
                Skill::new("ember", "Ember", 40, 25, ElementType::Fire).signature(),
                Skill::new("scratch", "Scratch", 30, 35, ElementType::Fire),
            ],
            body: Body {
                head: BodyPart::solid(8, 8, "#ff6600"),
                ears: BodyPart::solid(4, 6, "#ff8800"),
                body: BodyPart::solid(12, 10, "#ff4400"),
                legs: BodyPart::solid(6, 8, "#ff6600"),
                tail: Some(BodyPart::solid(8, 10, "#ffaa00")),
                wings: None,
            },
            fusion_count: 0,
            size: SpriteSize::Small,
            parents: None,
        }
    }

    #[test]
    fn test_exp_curve() {
        assert_eq!(exp_for_level(1), 10);
        assert_eq!(exp_for_level(2), 56);
        assert_eq!(exp_for_level(6), 881);
        assert_eq!(exp_to_next_level(5), 881);
    }

    #[test]
    fn test_sprite_size_stages() {
        assert_eq!(SpriteSize::for_fusions(0), SpriteSize::Small);
        assert_eq!(SpriteSize::for_fusions(1), SpriteSize::Small);
        assert_eq!(SpriteSize::for_fusions(2), SpriteSize::Medium);
        assert_eq!(SpriteSize::for_fusions(4), SpriteSize::Medium);
        assert_eq!(SpriteSize::for_fusions(5), SpriteSize::Large);
        assert_eq!(SpriteSize::for_fusions(40).pixels(), 32);
    }

    #[test]
    fn test_sprite_size_serializes_as_pixels() {
        assert_eq!(serde_json::to_string(&SpriteSize::Medium).unwrap(), "24");
        assert!(serde_json::from_str::<SpriteSize>("20").is_err());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut creature = test_creature();
        creature.stats.hp = 30;
        assert_eq!(creature.heal(50), 15);
        assert_eq!(creature.stats.hp, 45);
    }

    #[test]
    fn test_full_restore() {
        let mut creature = test_creature();
        creature.stats.hp = 1;
        creature.skills[0].pp = 0;
        creature.full_restore();

        assert_eq!(creature.stats.hp, 45);
        assert_eq!(creature.skills[0].pp, 25);
    }

    #[test]
    fn test_signature_and_usable_skill() {
        let mut creature = test_creature();
        assert_eq!(creature.signature_skill().map(|s| s.id.as_str()), Some("ember"));

        creature.skills[0].pp = 0;
        assert_eq!(creature.first_usable_skill(), Some(1));
        creature.skills[1].pp = 0;
        assert_eq!(creature.first_usable_skill(), None);
    }

    #[test]
    fn test_hp_ratio() {
        let mut creature = test_creature();
        assert!((creature.hp_ratio() - 1.0).abs() < f64::EPSILON);
        creature.stats.max_hp = 0;
        creature.stats.hp = 0;
        assert!((creature.hp_ratio() - 0.0).abs() < f64::EPSILON);
        assert!(creature.is_fainted());
    }

    #[test]
    fn test_creature_json_round_trip() {
        let mut creature = test_creature();
        creature.parents = Some(("a".to_string(), "b".to_string()));
        creature.stats.growth_value = 231.00000000000003;

        let json = serde_json::to_string(&creature).unwrap();
        let back: Creature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, creature);
    }

    #[test]
    fn test_validate() {
        let creature = test_creature();
        assert!(creature.validate().is_ok());

        let mut over_hp = creature.clone();
        over_hp.stats.hp = 46;
        assert!(over_hp.validate().is_err());

        let mut over_pp = creature.clone();
        over_pp.skills[1].pp = 36;
        assert!(over_pp.validate().is_err());

        let mut no_skills = creature.clone();
        no_skills.skills.clear();
        assert!(no_skills.validate().is_err());

        let mut too_high = creature.clone();
        too_high.level = MAX_LEVEL + 1;
        assert!(too_high.validate().is_err());

        let mut zero_level = creature;
        zero_level.level = 0;
        assert!(zero_level.validate().is_err());
    }
}
