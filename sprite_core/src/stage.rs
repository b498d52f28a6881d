//! Stages - predefined encounter tables with a linear unlock chain

use crate::config;
use crate::creature::{exp_to_next_level, Creature};
use crate::registry::{CreatureRegistry, RegistryError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Stage lookup or encounter error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    #[error("No stage with id '{0}'")]
    UnknownStage(String),
    #[error("Stage '{0}' has no encounters")]
    NoEncounters(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// One weighted row of a stage's encounter table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyEncounter {
    pub template_id: String,
    pub level: u32,
    pub probability: f64,
}

/// One-time bonus for the first clear of a stage
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FirstClearBonus {
    pub exp: u32,
    pub gold: u32,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageReward {
    pub base_exp: u32,
    pub base_gold: u32,
    /// Capture rate advertised for the stage's enemies
    pub capture_chance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_clear_bonus: Option<FirstClearBonus>,
}

/// A predefined stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub name: String,
    pub level: u32,
    #[serde(default)]
    pub description: String,
    pub enemies: Vec<EnemyEncounter>,
    pub rewards: StageReward,
    #[serde(default)]
    pub unlocked: bool,
}

impl Stage {
    /// Pick an encounter row.
    ///
    /// Draws r in [0, 1) and returns the first row whose running
    /// probability total reaches r. When the table sums below r the first
    /// row is used. `None` only for an empty table.
    pub fn draw_encounter(&self, rng: &mut impl Rng) -> Option<&EnemyEncounter> {
        let r: f64 = rng.gen();
        let mut cumulative = 0.0;
        for encounter in &self.enemies {
            cumulative += encounter.probability;
            if cumulative >= r {
                return Some(encounter);
            }
        }
        self.enemies.first()
    }

    /// Sum of the encounter probabilities
    pub fn total_probability(&self) -> f64 {
        self.enemies.iter().map(|e| e.probability).sum()
    }
}

/// What a finished stage battle pays out
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StageRewards {
    pub exp: u32,
    pub gold: u32,
    /// Item ids from the first-clear bonus
    pub items: Vec<String>,
    pub first_clear: bool,
    /// Always false here; leveling is decided by whoever applies the exp
    pub level_up: bool,
}

/// Ordered stage list plus clear/unlock progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageManager {
    stages: Vec<Stage>,
    cleared: HashSet<String>,
}

impl Default for StageManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StageManager {
    /// Manager over the built-in stages
    pub fn new() -> Self {
        Self::with_stages(config::default_stages())
    }

    pub fn with_stages(stages: Vec<Stage>) -> Self {
        Self {
            stages,
            cleared: HashSet::new(),
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stage(&self, id: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == id)
    }

    fn require(&self, id: &str) -> Result<&Stage, StageError> {
        self.stage(id)
            .ok_or_else(|| StageError::UnknownStage(id.to_string()))
    }

    pub fn unlocked_stages(&self) -> Vec<&Stage> {
        self.stages.iter().filter(|s| s.unlocked).collect()
    }

    /// Unlock a stage. Returns false for an unknown id.
    pub fn unlock_stage(&mut self, id: &str) -> bool {
        match self.stages.iter_mut().find(|s| s.id == id) {
            Some(stage) => {
                stage.unlocked = true;
                true
            }
            None => false,
        }
    }

    pub fn is_cleared(&self, id: &str) -> bool {
        self.cleared.contains(id)
    }

    /// Record a clear and unlock the next stage in order
    pub fn clear_stage(&mut self, id: &str) -> Result<(), StageError> {
        let index = self
            .stages
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StageError::UnknownStage(id.to_string()))?;

        self.cleared.insert(id.to_string());
        if let Some(next) = self.stages.get_mut(index + 1) {
            next.unlocked = true;
            tracing::info!(stage = %id, unlocked = %next.id, "stage cleared");
        } else {
            tracing::info!(stage = %id, "final stage cleared");
        }
        Ok(())
    }

    /// Spawn an enemy for a stage.
    ///
    /// The drawn template is set to the row's level with baseline stats for
    /// that level, fully healed.
    pub fn generate_enemy(
        &self,
        stage_id: &str,
        registry: &CreatureRegistry,
        rng: &mut impl Rng,
    ) -> Result<Creature, StageError> {
        let stage = self.require(stage_id)?;
        let encounter = stage
            .draw_encounter(rng)
            .ok_or_else(|| StageError::NoEncounters(stage_id.to_string()))?;

        let mut enemy = registry.spawn(&encounter.template_id)?;
        enemy.level = encounter.level;
        enemy.exp = 0;
        enemy.exp_to_next = exp_to_next_level(encounter.level);
        enemy.stats.rescale_for_level(encounter.level);
        enemy.restore_all_pp();

        tracing::debug!(
            stage = %stage_id,
            enemy = %enemy.id,
            level = enemy.level,
            "encounter drawn"
        );
        Ok(enemy)
    }

    /// Rewards for a finished battle on `stage_id`.
    ///
    /// A loss pays nothing. A win pays the stage base, plus the first-clear
    /// bonus while the stage is not yet recorded as cleared.
    pub fn calculate_rewards(
        &self,
        stage_id: &str,
        victory: bool,
        captured: bool,
    ) -> Result<StageRewards, StageError> {
        let stage = self.require(stage_id)?;
        if !victory {
            return Ok(StageRewards::default());
        }

        let mut rewards = StageRewards {
            exp: stage.rewards.base_exp,
            gold: stage.rewards.base_gold,
            ..StageRewards::default()
        };
        if !self.is_cleared(stage_id) {
            if let Some(bonus) = &stage.rewards.first_clear_bonus {
                rewards.exp += bonus.exp;
                rewards.gold += bonus.gold;
                rewards.items = bonus.items.clone();
                rewards.first_clear = true;
            }
        }

        tracing::debug!(
            stage = %stage_id,
            captured,
            exp = rewards.exp,
            gold = rewards.gold,
            first_clear = rewards.first_clear,
            "stage rewards"
        );
        Ok(rewards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn encounter(template_id: &str, level: u32, probability: f64) -> EnemyEncounter {
        EnemyEncounter {
            template_id: template_id.to_string(),
            level,
            probability,
        }
    }

    fn stage(id: &str, enemies: Vec<EnemyEncounter>) -> Stage {
        Stage {
            id: id.to_string(),
            name: id.to_string(),
            level: 1,
            description: String::new(),
            enemies,
            rewards: StageReward {
                base_exp: 50,
                base_gold: 30,
                capture_chance: 0.3,
                first_clear_bonus: None,
            },
            unlocked: false,
        }
    }

    #[test]
    fn test_default_stages() {
        let manager = StageManager::new();
        assert_eq!(manager.stages().len(), 5);
        let unlocked: Vec<&str> = manager.unlocked_stages().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(unlocked, vec!["stage_1"]);
    }

    #[test]
    fn test_clear_unlocks_next() {
        let mut manager = StageManager::new();
        manager.clear_stage("stage_1").unwrap();

        assert!(manager.is_cleared("stage_1"));
        assert!(manager.stage("stage_2").unwrap().unlocked);
        assert!(!manager.stage("stage_3").unwrap().unlocked);
    }

    #[test]
    fn test_clear_last_stage() {
        let mut manager = StageManager::new();
        manager.clear_stage("stage_5").unwrap();
        assert!(manager.is_cleared("stage_5"));
        assert_eq!(
            manager.clear_stage("stage_9"),
            Err(StageError::UnknownStage("stage_9".to_string()))
        );
    }

    #[test]
    fn test_unlock_stage() {
        let mut manager = StageManager::new();
        assert!(manager.unlock_stage("stage_4"));
        assert!(!manager.unlock_stage("nowhere"));
        assert_eq!(manager.unlocked_stages().len(), 2);
    }

    #[test]
    fn test_defeat_pays_nothing() {
        let manager = StageManager::new();
        let rewards = manager.calculate_rewards("stage_5", false, false).unwrap();
        assert_eq!(rewards, StageRewards::default());
    }

    #[test]
    fn test_first_clear_bonus_once() {
        let mut manager = StageManager::new();

        let first = manager.calculate_rewards("stage_5", true, false).unwrap();
        assert_eq!(first.exp, 800);
        assert_eq!(first.gold, 500);
        assert_eq!(first.items, vec!["fusion_stone".to_string()]);
        assert!(first.first_clear);
        assert!(!first.level_up);

        manager.clear_stage("stage_5").unwrap();
        let repeat = manager.calculate_rewards("stage_5", true, true).unwrap();
        assert_eq!(repeat.exp, 300);
        assert_eq!(repeat.gold, 200);
        assert!(repeat.items.is_empty());
        assert!(!repeat.first_clear);
    }

    #[test]
    fn test_stage_without_bonus() {
        let manager = StageManager::new();
        let rewards = manager.calculate_rewards("stage_1", true, false).unwrap();
        assert_eq!((rewards.exp, rewards.gold), (50, 30));
        assert!(!rewards.first_clear);
    }

    #[test]
    fn test_generate_enemy_scales_to_row_level() {
        let manager = StageManager::new();
        let registry = CreatureRegistry::with_defaults();
        let mut rng = StdRng::seed_from_u64(17);

        let enemy = manager.generate_enemy("stage_5", &registry, &mut rng).unwrap();
        assert_eq!(enemy.id, "void_phantom");
        assert_eq!(enemy.level, 15);
        assert_eq!(enemy.stats.max_hp, 125);
        assert_eq!(enemy.stats.hp, 125);
        assert_eq!(enemy.stats.atk, 40);
        assert_eq!(enemy.stats.def, 30);
        assert_eq!(enemy.stats.spd, 39);
        assert_eq!(enemy.exp_to_next, exp_to_next_level(15));
    }

    #[test]
    fn test_generate_enemy_errors() {
        let registry = CreatureRegistry::with_defaults();
        let mut rng = StdRng::seed_from_u64(1);
        let manager = StageManager::with_stages(vec![
            stage("empty", vec![]),
            stage("ghost", vec![encounter("missingno", 3, 1.0)]),
        ]);

        assert_eq!(
            manager.generate_enemy("nope", &registry, &mut rng),
            Err(StageError::UnknownStage("nope".to_string()))
        );
        assert_eq!(
            manager.generate_enemy("empty", &registry, &mut rng),
            Err(StageError::NoEncounters("empty".to_string()))
        );
        assert_eq!(
            manager.generate_enemy("ghost", &registry, &mut rng),
            Err(StageError::Registry(RegistryError::NotFound("missingno".to_string())))
        );
    }

    #[test]
    fn test_under_weighted_table_falls_back_to_first() {
        let table = stage(
            "sparse",
            vec![encounter("fire_fox", 2, 0.0), encounter("ice_rabbit", 2, 0.0)],
        );
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(table.draw_encounter(&mut rng).unwrap().template_id, "fire_fox");
        }
    }

    #[test]
    fn test_draw_follows_weights() {
        let manager = StageManager::new();
        let stage_1 = manager.stage("stage_1").unwrap();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<&str, u32> = HashMap::new();

        for _ in 0..10_000 {
            let row = stage_1.draw_encounter(&mut rng).unwrap();
            *counts.entry(row.template_id.as_str()).or_insert(0) += 1;
        }

        let fox = counts["fire_fox"] as f64 / 10_000.0;
        let mouse = counts["electric_mouse"] as f64 / 10_000.0;
        assert!((fox - 0.4).abs() < 0.03, "fire_fox share {}", fox);
        assert!((mouse - 0.3).abs() < 0.03, "electric_mouse share {}", mouse);
    }
}
