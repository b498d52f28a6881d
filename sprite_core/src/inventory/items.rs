//! Consumable items and their effects on creatures

use crate::battle::gain_exp;
use crate::config;
use crate::creature::Creature;
use serde::{Deserialize, Serialize};

/// Broad item category, used for shop grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Potion,
    Ball,
    Fusion,
    Boost,
}

/// What an item does when used
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemEffect {
    /// Restore up to `amount` hp
    Heal { amount: u32 },
    /// Full hp and full uses on every skill
    FullRestore,
    /// Add experience, leveling at most once
    GrantExp { amount: u32 },
    /// Capture device with a catch-rate multiplier
    Capture { multiplier: f64 },
    /// Consumed by a fusion; no effect on a single creature
    Fusion,
}

/// Observable result of applying an item to a creature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemUse {
    Healed(u32),
    Restored,
    ExpGained { leveled_up: bool },
    /// The item was spent without touching a creature
    NoEffect,
}

impl ItemEffect {
    /// Apply this effect to `target`
    pub fn apply(&self, target: &mut Creature) -> ItemUse {
        match *self {
            ItemEffect::Heal { amount } => ItemUse::Healed(target.heal(amount)),
            ItemEffect::FullRestore => {
                target.full_restore();
                ItemUse::Restored
            }
            ItemEffect::GrantExp { amount } => ItemUse::ExpGained {
                leveled_up: gain_exp(target, amount),
            },
            ItemEffect::Capture { .. } | ItemEffect::Fusion => ItemUse::NoEffect,
        }
    }

    /// Whether using the item needs a creature to act on
    pub fn targets_creature(&self) -> bool {
        matches!(
            self,
            ItemEffect::Heal { .. } | ItemEffect::FullRestore | ItemEffect::GrantExp { .. }
        )
    }
}

/// Catalogue entry for an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: ItemKind,
    /// Shop price in gold
    pub price: u32,
    pub effect: ItemEffect,
}

impl ItemDef {
    /// Catch-rate multiplier for capture devices
    pub fn capture_multiplier(&self) -> Option<f64> {
        match self.effect {
            ItemEffect::Capture { multiplier } => Some(multiplier),
            _ => None,
        }
    }
}

/// Lookup over item definitions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemCatalogue {
    items: Vec<ItemDef>,
}

impl ItemCatalogue {
    pub fn new(items: Vec<ItemDef>) -> Self {
        Self { items }
    }

    /// Catalogue holding the built-in items
    pub fn with_defaults() -> Self {
        Self::new(config::default_items())
    }

    pub fn get(&self, id: &str) -> Option<&ItemDef> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn items(&self) -> &[ItemDef] {
        &self.items
    }

    /// Items of one kind, in catalogue order
    pub fn of_kind(&self, kind: ItemKind) -> impl Iterator<Item = &ItemDef> {
        self.items.iter().filter(move |i| i.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CreatureRegistry;

    fn fox() -> Creature {
        CreatureRegistry::with_defaults().spawn("fire_fox").unwrap()
    }

    #[test]
    fn test_heal_stops_at_max() {
        let mut creature = fox();
        creature.stats.hp = 30;
        let used = ItemEffect::Heal { amount: 50 }.apply(&mut creature);
        assert_eq!(used, ItemUse::Healed(15));
        assert_eq!(creature.stats.hp, creature.stats.max_hp);
    }

    #[test]
    fn test_full_restore() {
        let mut creature = fox();
        creature.stats.hp = 1;
        creature.skills[0].pp = 0;
        assert_eq!(ItemEffect::FullRestore.apply(&mut creature), ItemUse::Restored);
        assert_eq!(creature.stats.hp, creature.stats.max_hp);
        assert_eq!(creature.skills[0].pp, creature.skills[0].max_pp);
    }

    #[test]
    fn test_grant_exp_levels_up() {
        let mut creature = fox();
        let used = ItemEffect::GrantExp { amount: 100 }.apply(&mut creature);
        assert_eq!(used, ItemUse::ExpGained { leveled_up: true });
        assert_eq!(creature.level, 6);
        assert_eq!(creature.exp, 0);
    }

    #[test]
    fn test_ball_does_not_touch_creature() {
        let mut creature = fox();
        let before = creature.clone();
        let ball = ItemEffect::Capture { multiplier: 1.0 };
        assert_eq!(ball.apply(&mut creature), ItemUse::NoEffect);
        assert!(!ball.targets_creature());
        assert_eq!(creature, before);
    }

    #[test]
    fn test_catalogue_lookup() {
        let catalogue = ItemCatalogue::with_defaults();
        assert_eq!(catalogue.get("exp_candy").unwrap().price, 150);
        assert!(catalogue.get("master_ball").is_none());
        assert_eq!(catalogue.of_kind(ItemKind::Ball).count(), 2);
    }
}
