//! Battle engine - damage, skill use, turn order, capture and progression
//!
//! Every randomized operation takes the caller's RNG so sessions can be
//! replayed from a seed. Attacker and defender are passed as separate
//! exclusive borrows, so a creature can never hit itself.

mod capture;
mod damage;
mod progression;
mod result;
mod rewards;
mod turn;

pub use capture::{attempt_capture, capture_chance};
pub use damage::{calculate_damage, use_skill};
pub use progression::{gain_exp, level_up};
pub use result::{SkillHit, SkillOutcome};
pub use rewards::{calculate_rewards, BattleRewards};
pub use turn::{a_moves_first, determine_turn_order};
