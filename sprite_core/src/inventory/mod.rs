//! Inventory - the party, gold and item stacks carried through a run

mod items;
mod storage;

pub use items::{ItemCatalogue, ItemDef, ItemEffect, ItemKind, ItemUse};
pub use storage::{Storage, STORAGE_CAPACITY};

use crate::creature::Creature;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Party size limit
pub const PARTY_CAPACITY: usize = 20;

/// Gold a fresh inventory starts with
pub const STARTING_GOLD: u32 = 100;

/// Inventory or storage error
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Full: capacity is {capacity}")]
    Full { capacity: usize },
    #[error("No creature with id '{0}'")]
    MissingCreature(String),
    #[error("No item '{0}' in the inventory")]
    MissingItem(String),
    #[error("Not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: u32, available: u32 },
    #[error("Invalid saved data: {0}")]
    Invalid(String),
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A held item and how many of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: ItemDef,
    pub quantity: u32,
}

/// Party, gold and items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    creatures: Vec<Creature>,
    items: BTreeMap<String, ItemStack>,
    gold: u32,
    max_creatures: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            creatures: Vec::new(),
            items: BTreeMap::new(),
            gold: STARTING_GOLD,
            max_creatures: PARTY_CAPACITY,
        }
    }

    // ==================== Creatures ====================

    /// Add a creature to the party. Fails when the party is full.
    pub fn add_creature(&mut self, creature: Creature) -> Result<(), InventoryError> {
        if self.is_full() {
            return Err(InventoryError::Full {
                capacity: self.max_creatures,
            });
        }
        tracing::debug!(creature = %creature.id, "creature joined party");
        self.creatures.push(creature);
        Ok(())
    }

    pub fn remove_creature(&mut self, id: &str) -> Result<Creature, InventoryError> {
        let index = self
            .creatures
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| InventoryError::MissingCreature(id.to_string()))?;
        Ok(self.creatures.remove(index))
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn creature(&self, id: &str) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    pub fn creature_mut(&mut self, id: &str) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|c| c.id == id)
    }

    pub fn is_full(&self) -> bool {
        self.creatures.len() >= self.max_creatures
    }

    pub fn capacity(&self) -> usize {
        self.max_creatures
    }

    // ==================== Gold ====================

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Spend gold, leaving the balance untouched when it is too low
    pub fn spend_gold(&mut self, amount: u32) -> Result<(), InventoryError> {
        if self.gold < amount {
            return Err(InventoryError::InsufficientGold {
                needed: amount,
                available: self.gold,
            });
        }
        self.gold -= amount;
        Ok(())
    }

    // ==================== Items ====================

    /// Add `quantity` of an item, stacking with any already held
    pub fn add_item(&mut self, item: &ItemDef, quantity: u32) {
        if quantity == 0 {
            return;
        }
        self.items
            .entry(item.id.clone())
            .and_modify(|stack| stack.quantity = stack.quantity.saturating_add(quantity))
            .or_insert_with(|| ItemStack {
                item: item.clone(),
                quantity,
            });
        tracing::debug!(item = %item.id, quantity, "item added");
    }

    /// How many of an item are held
    pub fn quantity(&self, id: &str) -> u32 {
        self.items.get(id).map_or(0, |stack| stack.quantity)
    }

    pub fn item(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id).map(|stack| &stack.item)
    }

    /// Held stacks, ordered by item id
    pub fn items(&self) -> impl Iterator<Item = &ItemStack> {
        self.items.values()
    }

    /// Buy `quantity` of an item at its catalogue price. A total cost past
    /// `u32::MAX` is never affordable.
    pub fn purchase(&mut self, item: &ItemDef, quantity: u32) -> Result<(), InventoryError> {
        let cost = item
            .price
            .checked_mul(quantity)
            .ok_or(InventoryError::InsufficientGold {
                needed: u32::MAX,
                available: self.gold,
            })?;
        self.spend_gold(cost)?;
        self.add_item(item, quantity);
        tracing::info!(item = %item.id, quantity, cost, gold = self.gold, "item purchased");
        Ok(())
    }

    /// Spend one of an item, dropping the stack when it runs out
    fn take_one(&mut self, id: &str) -> Result<ItemEffect, InventoryError> {
        let stack = self
            .items
            .get_mut(id)
            .ok_or_else(|| InventoryError::MissingItem(id.to_string()))?;
        let effect = stack.item.effect.clone();
        stack.quantity -= 1;
        if stack.quantity == 0 {
            self.items.remove(id);
        }
        Ok(effect)
    }

    /// Use one of an item, applying its effect to `target` when given.
    ///
    /// The item is spent either way.
    pub fn use_item(
        &mut self,
        id: &str,
        target: Option<&mut Creature>,
    ) -> Result<ItemUse, InventoryError> {
        let effect = self.take_one(id)?;
        let used = match target {
            Some(creature) => effect.apply(creature),
            None => ItemUse::NoEffect,
        };
        tracing::debug!(item = %id, ?used, "item used");
        Ok(used)
    }

    /// Use one of an item on a party member
    pub fn use_item_on(&mut self, id: &str, creature_id: &str) -> Result<ItemUse, InventoryError> {
        let index = self
            .creatures
            .iter()
            .position(|c| c.id == creature_id)
            .ok_or_else(|| InventoryError::MissingCreature(creature_id.to_string()))?;
        let effect = self.take_one(id)?;
        let used = effect.apply(&mut self.creatures[index]);
        tracing::debug!(item = %id, creature = %creature_id, ?used, "item used");
        Ok(used)
    }

    // ==================== Persistence ====================

    pub fn to_json(&self) -> Result<String, InventoryError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a saved inventory, rejecting creatures that break their
    /// invariants and a zero party capacity
    pub fn from_json(json: &str) -> Result<Self, InventoryError> {
        let inventory: Inventory = serde_json::from_str(json)?;
        inventory.validate()?;
        Ok(inventory)
    }

    fn validate(&self) -> Result<(), InventoryError> {
        if self.max_creatures == 0 {
            return Err(InventoryError::Invalid("party capacity must be positive".to_string()));
        }
        if self.creatures.len() > self.max_creatures {
            return Err(InventoryError::Invalid(format!(
                "{} creatures over capacity {}",
                self.creatures.len(),
                self.max_creatures
            )));
        }
        for creature in &self.creatures {
            creature.validate().map_err(InventoryError::Invalid)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CreatureRegistry;

    fn catalogue() -> ItemCatalogue {
        ItemCatalogue::with_defaults()
    }

    fn spawn(id: &str) -> Creature {
        CreatureRegistry::with_defaults().spawn(id).unwrap()
    }

    #[test]
    fn test_new_inventory() {
        let inventory = Inventory::new();
        assert_eq!(inventory.gold(), 100);
        assert_eq!(inventory.capacity(), 20);
        assert!(inventory.creatures().is_empty());
        assert_eq!(inventory.items().count(), 0);
    }

    #[test]
    fn test_party_capacity() {
        let mut inventory = Inventory::new();
        for i in 0..PARTY_CAPACITY {
            let mut creature = spawn("fire_fox");
            creature.id = format!("fox_{}", i);
            inventory.add_creature(creature).unwrap();
        }
        assert!(inventory.is_full());
        assert!(matches!(
            inventory.add_creature(spawn("ice_rabbit")),
            Err(InventoryError::Full { capacity: 20 })
        ));
        assert_eq!(inventory.creatures().len(), 20);
    }

    #[test]
    fn test_remove_creature() {
        let mut inventory = Inventory::new();
        inventory.add_creature(spawn("fire_fox")).unwrap();

        let fox = inventory.remove_creature("fire_fox").unwrap();
        assert_eq!(fox.id, "fire_fox");
        assert!(matches!(
            inventory.remove_creature("fire_fox"),
            Err(InventoryError::MissingCreature(_))
        ));
    }

    #[test]
    fn test_gold() {
        let mut inventory = Inventory::new();
        inventory.add_gold(50);
        inventory.spend_gold(120).unwrap();
        assert_eq!(inventory.gold(), 30);

        assert!(matches!(
            inventory.spend_gold(31),
            Err(InventoryError::InsufficientGold { needed: 31, available: 30 })
        ));
        assert_eq!(inventory.gold(), 30);
    }

    #[test]
    fn test_items_stack() {
        let catalogue = catalogue();
        let potion = catalogue.get("potion").unwrap();
        let mut inventory = Inventory::new();

        inventory.add_item(potion, 2);
        inventory.add_item(potion, 3);
        inventory.add_item(potion, 0);
        assert_eq!(inventory.quantity("potion"), 5);
        assert_eq!(inventory.items().count(), 1);
    }

    #[test]
    fn test_use_item_on_party_member() {
        let catalogue = catalogue();
        let mut inventory = Inventory::new();
        inventory.add_item(catalogue.get("potion").unwrap(), 1);
        let mut fox = spawn("fire_fox");
        fox.stats.hp = 5;
        inventory.add_creature(fox).unwrap();

        let used = inventory.use_item_on("potion", "fire_fox").unwrap();

        assert_eq!(used, ItemUse::Healed(40));
        assert_eq!(inventory.creature("fire_fox").unwrap().stats.hp, 45);
        assert_eq!(inventory.quantity("potion"), 0);
        assert!(inventory.item("potion").is_none());
    }

    #[test]
    fn test_use_item_on_missing_creature_keeps_item() {
        let catalogue = catalogue();
        let mut inventory = Inventory::new();
        inventory.add_item(catalogue.get("potion").unwrap(), 1);

        assert!(matches!(
            inventory.use_item_on("potion", "ghost"),
            Err(InventoryError::MissingCreature(_))
        ));
        assert_eq!(inventory.quantity("potion"), 1);
    }

    #[test]
    fn test_use_item_without_target() {
        let catalogue = catalogue();
        let mut inventory = Inventory::new();
        inventory.add_item(catalogue.get("poke_ball").unwrap(), 2);

        assert_eq!(inventory.use_item("poke_ball", None).unwrap(), ItemUse::NoEffect);
        assert_eq!(inventory.quantity("poke_ball"), 1);
        assert!(matches!(
            inventory.use_item("great_ball", None),
            Err(InventoryError::MissingItem(_))
        ));
    }

    #[test]
    fn test_use_item_on_outside_creature() {
        let catalogue = catalogue();
        let mut inventory = Inventory::new();
        inventory.add_item(catalogue.get("full_restore").unwrap(), 1);
        let mut wild = spawn("ice_rabbit");
        wild.stats.hp = 1;

        let used = inventory.use_item("full_restore", Some(&mut wild)).unwrap();
        assert_eq!(used, ItemUse::Restored);
        assert_eq!(wild.stats.hp, wild.stats.max_hp);
    }

    #[test]
    fn test_purchase() {
        let catalogue = catalogue();
        let mut inventory = Inventory::new();
        inventory.add_gold(400);

        inventory.purchase(catalogue.get("poke_ball").unwrap(), 3).unwrap();
        assert_eq!(inventory.gold(), 200);
        assert_eq!(inventory.quantity("poke_ball"), 3);

        assert!(matches!(
            inventory.purchase(catalogue.get("fusion_stone").unwrap(), 1),
            Err(InventoryError::InsufficientGold { needed: 500, available: 200 })
        ));
        assert_eq!(inventory.quantity("fusion_stone"), 0);
    }

    #[test]
    fn test_json_round_trip() {
        let catalogue = catalogue();
        let mut inventory = Inventory::new();
        inventory.add_item(catalogue.get("great_ball").unwrap(), 2);
        inventory.add_item(catalogue.get("exp_candy").unwrap(), 1);
        let mut fox = spawn("fire_fox");
        fox.stats.hp = 12;
        fox.skills[1].pp = 3;
        inventory.add_creature(fox).unwrap();
        inventory.add_gold(77);

        let json = inventory.to_json().unwrap();
        let restored = Inventory::from_json(&json).unwrap();

        assert_eq!(restored, inventory);
    }

    #[test]
    fn test_purchase_overflowing_cost() {
        let catalogue = catalogue();
        let mut inventory = Inventory::new();
        inventory.add_gold(u32::MAX);
        let stone = catalogue.get("fusion_stone").unwrap();

        // 500 * 10_000_000 does not fit in u32
        assert!(matches!(
            inventory.purchase(stone, 10_000_000),
            Err(InventoryError::InsufficientGold { .. })
        ));
        assert_eq!(inventory.gold(), u32::MAX);
        assert_eq!(inventory.quantity("fusion_stone"), 0);
    }

    #[test]
    fn test_from_json_rejects_broken_creature() {
        let mut inventory = Inventory::new();
        let mut fox = spawn("fire_fox");
        fox.stats.hp = fox.stats.max_hp + 10;
        inventory.creatures.push(fox);
        let json = inventory.to_json().unwrap();

        assert!(matches!(
            Inventory::from_json(&json),
            Err(InventoryError::Invalid(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_zero_capacity() {
        let mut inventory = Inventory::new();
        inventory.max_creatures = 0;
        let json = inventory.to_json().unwrap();

        assert!(matches!(
            Inventory::from_json(&json),
            Err(InventoryError::Invalid(_))
        ));
    }

    #[test]
    fn test_from_bad_json() {
        assert!(matches!(
            Inventory::from_json("{ not json"),
            Err(InventoryError::Serialization(_))
        ));
    }
}
