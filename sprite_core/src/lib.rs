//! sprite_core - Battle and fusion core for a creature-collecting roguelike
//!
//! This library provides:
//! - Creature: stats, skills and pixel bodies of collectable sprites
//! - Battle: damage, critical hits, capture, experience and rewards
//! - Fusion: combining two creatures into a new one
//! - Stages and floors: encounter tables and procedurally generated dungeons
//! - Inventory and storage: the collaborators that own creatures between battles
//!
//! Every randomized operation takes the random source as an argument.

pub mod battle;
pub mod config;
pub mod constants;
pub mod creature;
pub mod element;
pub mod fusion;
pub mod inventory;
pub mod map;
pub mod prelude;
pub mod registry;
pub mod stage;

// Re-export core types for convenience
pub use battle::{BattleRewards, SkillHit, SkillOutcome};
pub use creature::{Body, BodyPart, Creature, PartSlot, Skill, SpriteSize, Stats};
pub use element::{effectiveness_multiplier, ElementType};
pub use fusion::fuse_sprites;
pub use inventory::{Inventory, InventoryError, ItemCatalogue, ItemDef, ItemEffect, Storage};
pub use map::{generate_floor, Floor, MapError, Room, RoomType};
pub use registry::{CreatureRegistry, RegistryError};
pub use stage::{Stage, StageError, StageManager, StageRewards};
