//! Base creature template loading

use super::ConfigError;
use crate::constants::{MAX_LEVEL, MAX_SKILLS};
use crate::creature::{exp_to_next_level, Body, BodyPart, Creature, Skill, SpriteSize, Stats};
use crate::element::ElementType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Container for creature templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreaturesConfig {
    #[serde(rename = "creatures")]
    pub creatures: Vec<CreatureTemplate>,
}

/// Authored description of a base creature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureTemplate {
    pub id: String,
    pub name: String,
    pub element: ElementType,
    #[serde(default = "default_level")]
    pub level: u32,
    /// Defaults to the experience curve when omitted
    #[serde(default)]
    pub exp_to_next: Option<u32>,
    pub stats: TemplateStats,
    pub skills: Vec<SkillTemplate>,
    pub body: BodyTemplate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateStats {
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub spd: u32,
    #[serde(default = "default_growth_value")]
    pub growth_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillTemplate {
    pub id: String,
    pub name: String,
    pub power: u32,
    pub max_pp: u32,
    pub element: ElementType,
    #[serde(default)]
    pub signature: bool,
}

/// Single-colour rectangle used for authored body parts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartTemplate {
    pub width: u32,
    pub height: u32,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyTemplate {
    pub head: PartTemplate,
    pub ears: PartTemplate,
    pub body: PartTemplate,
    pub legs: PartTemplate,
    #[serde(default)]
    pub tail: Option<PartTemplate>,
    #[serde(default)]
    pub wings: Option<PartTemplate>,
}

fn default_level() -> u32 {
    1
}

fn default_growth_value() -> f64 {
    100.0
}

impl PartTemplate {
    fn build(&self) -> BodyPart {
        BodyPart::solid(self.width, self.height, &self.color)
    }
}

impl CreatureTemplate {
    /// Check the authored data against the creature invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| -> Result<(), ConfigError> {
            Err(ConfigError::ValidationError(format!("{}: {}", self.id, msg)))
        };

        if self.skills.is_empty() || self.skills.len() > MAX_SKILLS {
            return invalid(format!("expected 1-{} skills, found {}", MAX_SKILLS, self.skills.len()));
        }
        if self.stats.def == 0 {
            return invalid("def must be positive".to_string());
        }
        if self.stats.hp == 0 {
            return invalid("hp must be positive".to_string());
        }
        if self.level == 0 || self.level > MAX_LEVEL {
            return invalid(format!("level {} out of range", self.level));
        }
        if self.stats.growth_value <= 0.0 {
            return invalid("growth_value must be positive".to_string());
        }
        let parts = [
            Some(&self.body.head),
            Some(&self.body.ears),
            Some(&self.body.body),
            Some(&self.body.legs),
            self.body.tail.as_ref(),
            self.body.wings.as_ref(),
        ];
        if parts.iter().flatten().any(|p| p.width == 0 || p.height == 0) {
            return invalid("body parts need a non-zero size".to_string());
        }
        Ok(())
    }

    /// Build a fresh creature from this template
    pub fn instantiate(&self) -> Creature {
        Creature {
            id: self.id.clone(),
            name: self.name.clone(),
            element: self.element,
            level: self.level,
            exp: 0,
            exp_to_next: self.exp_to_next.unwrap_or_else(|| exp_to_next_level(self.level)),
            stats: Stats {
                hp: self.stats.hp,
                max_hp: self.stats.hp,
                atk: self.stats.atk,
                def: self.stats.def,
                spd: self.stats.spd,
                growth_value: self.stats.growth_value,
            },
            skills: self
                .skills
                .iter()
                .map(|s| Skill {
                    id: s.id.clone(),
                    name: s.name.clone(),
                    power: s.power,
                    pp: s.max_pp,
                    max_pp: s.max_pp,
                    element: s.element,
                    is_signature: s.signature,
                })
                .collect(),
            body: Body {
                head: self.body.head.build(),
                ears: self.body.ears.build(),
                body: self.body.body.build(),
                legs: self.body.legs.build(),
                tail: self.body.tail.as_ref().map(PartTemplate::build),
                wings: self.body.wings.as_ref().map(PartTemplate::build),
            },
            fusion_count: 0,
            size: SpriteSize::Small,
            parents: None,
        }
    }
}

fn validate_all(creatures: Vec<CreatureTemplate>) -> Result<Vec<CreatureTemplate>, ConfigError> {
    let mut seen = HashSet::new();
    for template in &creatures {
        template.validate()?;
        if !seen.insert(template.id.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate creature id {}",
                template.id
            )));
        }
    }
    Ok(creatures)
}

/// Load creature templates from a TOML file
pub fn load_creature_templates(path: &Path) -> Result<Vec<CreatureTemplate>, ConfigError> {
    let config: CreaturesConfig = super::load_toml(path)?;
    validate_all(config.creatures)
}

/// Load creature templates from a TOML string
pub fn parse_creature_templates(content: &str) -> Result<Vec<CreatureTemplate>, ConfigError> {
    let config: CreaturesConfig = super::parse_toml(content)?;
    validate_all(config.creatures)
}

/// Get the built-in base creatures
pub fn default_creature_templates() -> Vec<CreatureTemplate> {
    let toml = include_str!("../../config/creatures.toml");
    parse_creature_templates(toml).unwrap_or_else(|err| {
        tracing::warn!("built-in creature templates failed to load: {}", err);
        Vec::new()
    })
}
