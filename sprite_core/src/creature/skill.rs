//! Skill - a move with limited uses

use crate::element::ElementType;
use serde::{Deserialize, Serialize};

/// A battle move. `pp` counts the uses left and never exceeds `max_pp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Unique skill identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Base power fed into the damage formula
    pub power: u32,
    /// Uses left
    pub pp: u32,
    /// Uses after a full restore
    pub max_pp: u32,
    /// Element used for the effectiveness lookup
    pub element: ElementType,
    /// Flagship move, preferentially kept through fusion
    #[serde(default)]
    pub is_signature: bool,
}

impl Skill {
    /// Create a regular skill with full uses
    pub fn new(id: &str, name: &str, power: u32, max_pp: u32, element: ElementType) -> Self {
        Skill {
            id: id.to_string(),
            name: name.to_string(),
            power,
            pp: max_pp,
            max_pp,
            element,
            is_signature: false,
        }
    }

    /// Mark this skill as the creature's signature move
    pub fn signature(mut self) -> Self {
        self.is_signature = true;
        self
    }

    /// Whether at least one use is left
    pub fn has_uses(&self) -> bool {
        self.pp > 0
    }

    /// Spend one use. Returns false without touching `pp` when none are left.
    pub fn consume(&mut self) -> bool {
        if self.pp == 0 {
            return false;
        }
        self.pp -= 1;
        true
    }

    /// Refill uses to the maximum
    pub fn restore(&mut self) {
        self.pp = self.max_pp;
    }
}
