//! Prelude module for convenient imports
//!
//! ```rust
//! use sprite_core::prelude::*;
//! ```

// Creatures
pub use crate::creature::{Body, BodyPart, Creature, Skill, SpriteSize, Stats};
pub use crate::element::{effectiveness_multiplier, ElementType};
pub use crate::registry::{CreatureRegistry, RegistryError};

// Battle
pub use crate::battle::{
    attempt_capture, calculate_damage, calculate_rewards, determine_turn_order, gain_exp,
    level_up, use_skill, SkillOutcome,
};

// Fusion
pub use crate::fusion::fuse_sprites;

// Stages and floors
pub use crate::map::{generate_floor, Floor, RoomType};
pub use crate::stage::{StageManager, StageRewards};

// Collaborators
pub use crate::inventory::{Inventory, ItemCatalogue, Storage};
