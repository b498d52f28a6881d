//! Post-battle experience and gold

use crate::constants::{
    REWARD_EXP_PER_LEVEL, REWARD_EXP_SPREAD, REWARD_GOLD_PER_LEVEL, REWARD_GOLD_SPREAD,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Experience and gold for defeating an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BattleRewards {
    pub exp: u32,
    pub gold: u32,
}

/// Rewards for beating an enemy of `enemy_level`:
/// `exp = floor(level * 15 * (1 + U[0, 0.2)))`,
/// `gold = floor(level * 10 * (1 + U[0, 0.3)))`, drawn independently.
pub fn calculate_rewards(enemy_level: u32, rng: &mut impl Rng) -> BattleRewards {
    let level = enemy_level as f64;
    let exp = level * REWARD_EXP_PER_LEVEL * (1.0 + rng.gen::<f64>() * REWARD_EXP_SPREAD);
    let gold = level * REWARD_GOLD_PER_LEVEL * (1.0 + rng.gen::<f64>() * REWARD_GOLD_SPREAD);

    BattleRewards {
        exp: exp.floor() as u32,
        gold: gold.floor() as u32,
    }
}
