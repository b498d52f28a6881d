//! Seeded play session - walk a floor, fight, capture and fuse

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use sprite_core::battle::{a_moves_first, attempt_capture, calculate_rewards, gain_exp, use_skill};
use sprite_core::{
    generate_floor, Creature, CreatureRegistry, Inventory, InventoryError, ItemCatalogue,
    MapError, RegistryError, RoomType, StageError, StageManager, Storage,
};
use thiserror::Error;

/// Rounds before a battle is called a stalemate
const MAX_ROUNDS: u32 = 100;
/// Balls are thrown once the enemy is at or below this hp ratio
const CAPTURE_HP_RATIO: f64 = 0.5;
/// Leader drinks a potion after a battle below this hp ratio
const POTION_HP_RATIO: f64 = 0.5;
const TREASURE_GOLD: u32 = 50;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Stage(#[from] StageError),
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error("No stage is unlocked")]
    NoStageUnlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Won,
    Captured,
    Lost,
    Stalemate,
}

impl BattleOutcome {
    pub fn is_victory(self) -> bool {
        matches!(self, BattleOutcome::Won | BattleOutcome::Captured)
    }
}

/// What happened over a session
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSummary {
    pub floor: u32,
    pub rooms_visited: u32,
    pub battles_won: u32,
    pub battles_lost: u32,
    pub stalemates: u32,
    pub captures: u32,
    pub level_ups: u32,
    pub exp_gained: u32,
    pub gold: u32,
    pub stages_cleared: Vec<String>,
    /// Name of the creature made from two captures, if any
    pub fusion: Option<String>,
    pub leader: String,
    pub leader_level: u32,
    pub party: Vec<String>,
    pub storage: Vec<String>,
}

impl SessionSummary {
    pub fn battles(&self) -> u32 {
        self.battles_won + self.battles_lost + self.stalemates
    }

    /// Win rate as a percentage
    pub fn win_rate(&self) -> f64 {
        if self.battles() > 0 {
            self.battles_won as f64 / self.battles() as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// One play-through driven by a single seeded RNG
pub struct Session {
    rng: ChaCha8Rng,
    registry: CreatureRegistry,
    stages: StageManager,
    catalogue: ItemCatalogue,
    inventory: Inventory,
    storage: Storage,
    leader_id: String,
    summary: SessionSummary,
}

impl Session {
    /// Start with `starter` as the party leader, three balls and two potions
    pub fn new(seed: u64, starter: &str) -> Result<Self, SessionError> {
        let registry = CreatureRegistry::with_defaults();
        let catalogue = ItemCatalogue::with_defaults();
        let mut inventory = Inventory::new();

        let leader = registry.spawn(starter)?;
        let leader_id = leader.id.clone();
        inventory.add_creature(leader)?;
        for (id, quantity) in [("poke_ball", 3), ("potion", 2)] {
            if let Some(item) = catalogue.get(id) {
                inventory.add_item(item, quantity);
            }
        }

        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            registry,
            stages: StageManager::new(),
            catalogue,
            inventory,
            storage: Storage::new(),
            leader_id,
            summary: SessionSummary::default(),
        })
    }

    pub fn leader(&self) -> Option<&Creature> {
        self.inventory.creature(&self.leader_id)
    }

    fn current_stage_id(&self) -> Result<String, SessionError> {
        self.stages
            .unlocked_stages()
            .last()
            .map(|s| s.id.clone())
            .ok_or(SessionError::NoStageUnlocked)
    }

    /// Walk floor `level` from the start room to the exit
    pub fn walk_floor(&mut self, level: u32) -> Result<(), SessionError> {
        let mut floor = generate_floor(level, &mut self.rng);
        self.summary.floor = level;

        while !floor.is_complete() {
            // On a chain the unvisited neighbour is the way forward
            let Some(next) = floor
                .available_rooms()
                .into_iter()
                .find(|r| !r.visited)
                .map(|r| r.id.clone())
            else {
                break;
            };
            floor.move_to_room(&next)?;
            self.summary.rooms_visited += 1;

            let Some(kind) = floor.current_room().map(|r| r.kind) else {
                break;
            };
            let cleared = match kind {
                RoomType::Battle => self.stage_battle(false)?.is_victory(),
                RoomType::Boss => self.stage_battle(true)?.is_victory(),
                RoomType::Shop => {
                    self.visit_shop()?;
                    true
                }
                RoomType::Treasure => {
                    self.open_treasure();
                    true
                }
                RoomType::Start | RoomType::Exit => true,
            };
            if cleared {
                floor.clear_room(&next)?;
            }
        }
        Ok(())
    }

    /// Fight one enemy from the newest unlocked stage and settle rewards.
    /// With `clear_on_win` a victory also clears the stage.
    pub fn stage_battle(&mut self, clear_on_win: bool) -> Result<BattleOutcome, SessionError> {
        let stage_id = self.current_stage_id()?;
        let mut enemy = self
            .stages
            .generate_enemy(&stage_id, &self.registry, &mut self.rng)?;
        let enemy_level = enemy.level;

        let outcome = self.fight(&mut enemy)?;
        tracing::info!(stage = %stage_id, enemy = %enemy.name, ?outcome, "battle finished");

        match outcome {
            BattleOutcome::Won | BattleOutcome::Captured => self.summary.battles_won += 1,
            BattleOutcome::Lost => self.summary.battles_lost += 1,
            BattleOutcome::Stalemate => self.summary.stalemates += 1,
        }
        if outcome == BattleOutcome::Captured {
            self.keep_capture(enemy)?;
        }

        if outcome.is_victory() {
            let captured = outcome == BattleOutcome::Captured;
            let stage_rewards = self.stages.calculate_rewards(&stage_id, true, captured)?;
            let battle_rewards = calculate_rewards(enemy_level, &mut self.rng);
            let exp = stage_rewards.exp + battle_rewards.exp;

            let leader = self
                .inventory
                .creature_mut(&self.leader_id)
                .ok_or_else(|| InventoryError::MissingCreature(self.leader_id.clone()))?;
            if gain_exp(leader, exp) {
                self.summary.level_ups += 1;
            }
            self.summary.exp_gained += exp;
            self.inventory
                .add_gold(stage_rewards.gold + battle_rewards.gold);
            for item_id in &stage_rewards.items {
                if let Some(item) = self.catalogue.get(item_id) {
                    self.inventory.add_item(item, 1);
                }
            }

            if clear_on_win && !self.stages.is_cleared(&stage_id) {
                self.stages.clear_stage(&stage_id)?;
                self.summary.stages_cleared.push(stage_id);
            }
        }

        self.recover()?;
        Ok(outcome)
    }

    /// Trade skills with `enemy` until one side is down, it is caught, or
    /// nobody can act
    fn fight(&mut self, enemy: &mut Creature) -> Result<BattleOutcome, SessionError> {
        for _ in 0..MAX_ROUNDS {
            let leader = self
                .inventory
                .creature_mut(&self.leader_id)
                .ok_or_else(|| InventoryError::MissingCreature(self.leader_id.clone()))?;
            if leader.is_fainted() {
                return Ok(BattleOutcome::Lost);
            }
            if enemy.is_fainted() {
                return Ok(BattleOutcome::Won);
            }
            if leader.first_usable_skill().is_none() && enemy.first_usable_skill().is_none() {
                return Ok(BattleOutcome::Stalemate);
            }

            let order = if a_moves_first(leader, enemy) {
                [true, false]
            } else {
                [false, true]
            };
            for leader_turn in order {
                let (attacker, defender) = if leader_turn {
                    (&mut *leader, &mut *enemy)
                } else {
                    (&mut *enemy, &mut *leader)
                };
                if attacker.is_fainted() || defender.is_fainted() {
                    break;
                }
                if let Some(slot) = attacker.first_usable_skill() {
                    let outcome = use_skill(attacker, slot, defender, &mut self.rng);
                    tracing::debug!("{} -> {}: {}", attacker.name, defender.name, outcome.summary());
                }
            }

            if !enemy.is_fainted()
                && enemy.hp_ratio() <= CAPTURE_HP_RATIO
                && !self.inventory.is_full()
            {
                if let Some((ball_id, multiplier)) = self.best_ball() {
                    self.inventory.use_item(&ball_id, None)?;
                    if attempt_capture(enemy, multiplier, &mut self.rng) {
                        return Ok(BattleOutcome::Captured);
                    }
                }
            }
        }
        Ok(BattleOutcome::Stalemate)
    }

    /// Held capture device with the highest multiplier
    fn best_ball(&self) -> Option<(String, f64)> {
        self.inventory
            .items()
            .filter_map(|stack| {
                stack
                    .item
                    .capture_multiplier()
                    .map(|m| (stack.item.id.clone(), m))
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    fn keep_capture(&mut self, mut creature: Creature) -> Result<(), SessionError> {
        self.summary.captures += 1;
        creature.id = format!("{}_{}", creature.id, self.summary.captures);
        self.inventory.add_creature(creature)?;
        Ok(())
    }

    /// Patch the leader up between battles
    fn recover(&mut self) -> Result<(), SessionError> {
        let Some(leader) = self.inventory.creature_mut(&self.leader_id) else {
            return Err(InventoryError::MissingCreature(self.leader_id.clone()).into());
        };
        if leader.is_fainted() || leader.first_usable_skill().is_none() {
            leader.full_restore();
            return Ok(());
        }
        if leader.hp_ratio() < POTION_HP_RATIO && self.inventory.quantity("potion") > 0 {
            self.inventory.use_item_on("potion", &self.leader_id)?;
        }
        Ok(())
    }

    fn visit_shop(&mut self) -> Result<(), SessionError> {
        if let Some(ball) = self.catalogue.get("poke_ball") {
            if self.inventory.gold() >= ball.price {
                self.inventory.purchase(ball, 1)?;
            }
        }
        Ok(())
    }

    fn open_treasure(&mut self) {
        self.inventory.add_gold(TREASURE_GOLD);
        if let Some(potion) = self.catalogue.get("potion") {
            self.inventory.add_item(potion, 1);
        }
    }

    /// Move the first two captures into storage and fuse them
    pub fn fuse_captures(&mut self) -> Result<Option<Creature>, SessionError> {
        let captures: Vec<String> = self
            .inventory
            .creatures()
            .iter()
            .filter(|c| c.id != self.leader_id)
            .take(2)
            .map(|c| c.id.clone())
            .collect();
        let [a_id, b_id] = captures.as_slice() else {
            return Ok(None);
        };

        for id in [a_id, b_id] {
            let creature = self.inventory.remove_creature(id)?;
            self.storage.add(creature)?;
        }
        let child = self
            .storage
            .fuse_in_storage(a_id, b_id, &mut self.rng)?
            .clone();
        self.summary.fusion = Some(child.name.clone());
        Ok(Some(child))
    }

    /// Close the session and report
    pub fn finish(mut self) -> SessionSummary {
        self.summary.gold = self.inventory.gold();
        if let Some((name, level)) = self.leader().map(|l| (l.name.clone(), l.level)) {
            self.summary.leader = name;
            self.summary.leader_level = level;
        }
        self.summary.party = self
            .inventory
            .creatures()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        self.summary.storage = self.storage.list().iter().map(|c| c.name.clone()).collect();
        self.summary
    }
}

/// Play a full session: walk a floor, take on `battles` stage
/// challenges, then fuse two captures
pub fn run(seed: u64, starter: &str, floor: u32, battles: u32) -> Result<SessionSummary, SessionError> {
    let mut session = Session::new(seed, starter)?;
    session.walk_floor(floor)?;
    for _ in 0..battles {
        session.stage_battle(true)?;
    }
    session.fuse_captures()?;
    Ok(session.finish())
}
