//! Element types and the effectiveness cycle
//!
//! The four active elements form a single cycle where each one beats the
//! next and loses to the previous:
//!
//! fire -> ice -> electric -> poison -> fire
//!
//! Void sits outside the cycle and is neutral in both directions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Damage multiplier against an element this one is strong against
pub const SUPER_EFFECTIVE: f64 = 2.0;
/// Damage multiplier against an element this one is weak against
pub const NOT_VERY_EFFECTIVE: f64 = 0.5;
/// Damage multiplier for every other pairing
pub const NEUTRAL: f64 = 1.0;

/// Creature and skill element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Fire,
    Electric,
    Poison,
    Ice,
    Void,
}

impl ElementType {
    /// Get all element types
    pub fn all() -> &'static [ElementType] {
        &[
            ElementType::Fire,
            ElementType::Electric,
            ElementType::Poison,
            ElementType::Ice,
            ElementType::Void,
        ]
    }

    /// The element this one deals double damage to
    pub fn strong_against(self) -> Option<ElementType> {
        match self {
            ElementType::Fire => Some(ElementType::Ice),
            ElementType::Ice => Some(ElementType::Electric),
            ElementType::Electric => Some(ElementType::Poison),
            ElementType::Poison => Some(ElementType::Fire),
            ElementType::Void => None,
        }
    }

    /// The element this one deals half damage to
    pub fn weak_against(self) -> Option<ElementType> {
        match self {
            ElementType::Fire => Some(ElementType::Poison),
            ElementType::Ice => Some(ElementType::Fire),
            ElementType::Electric => Some(ElementType::Ice),
            ElementType::Poison => Some(ElementType::Electric),
            ElementType::Void => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementType::Fire => "fire",
            ElementType::Electric => "electric",
            ElementType::Poison => "poison",
            ElementType::Ice => "ice",
            ElementType::Void => "void",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Damage multiplier for an attack of `attack` element landing on a
/// `defense` element creature. Returns 2.0, 1.0 or 0.5.
pub fn effectiveness_multiplier(attack: ElementType, defense: ElementType) -> f64 {
    if attack == ElementType::Void || defense == ElementType::Void {
        return NEUTRAL;
    }
    if attack.strong_against() == Some(defense) {
        SUPER_EFFECTIVE
    } else if attack.weak_against() == Some(defense) {
        NOT_VERY_EFFECTIVE
    } else {
        NEUTRAL
    }
}
