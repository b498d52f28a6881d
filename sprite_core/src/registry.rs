//! Creature template registry - hands out independent copies of base creatures

use crate::config::{self, ConfigError, CreatureTemplate};
use crate::creature::Creature;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Registry lookup error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("No creature template with id '{0}'")]
    NotFound(String),
}

/// Registry of base creatures keyed by template id.
///
/// Every spawn is a deep copy, so mutating a spawned creature never touches
/// the registry or any earlier spawn.
#[derive(Debug, Clone, Default)]
pub struct CreatureRegistry {
    prototypes: HashMap<String, Creature>,
    /// Registration order, for stable listings
    order: Vec<String>,
}

impl CreatureRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in base creatures
    pub fn with_defaults() -> Self {
        Self::from_templates(&config::default_creature_templates())
    }

    /// Build from a TOML string of `[[creatures]]` tables
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(Self::from_templates(&config::parse_creature_templates(content)?))
    }

    /// Build from a TOML file of `[[creatures]]` tables
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self::from_templates(&config::load_creature_templates(path)?))
    }

    pub fn from_templates(templates: &[CreatureTemplate]) -> Self {
        let mut registry = Self::new();
        for template in templates {
            registry.register(template.instantiate());
        }
        registry
    }

    /// Register a prototype, replacing any previous one with the same id
    pub fn register(&mut self, creature: Creature) {
        if !self.prototypes.contains_key(&creature.id) {
            self.order.push(creature.id.clone());
        }
        self.prototypes.insert(creature.id.clone(), creature);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.prototypes.contains_key(id)
    }

    /// Template ids in registration order
    pub fn template_ids(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Spawn a fresh copy of a base creature
    pub fn spawn(&self, id: &str) -> Result<Creature, RegistryError> {
        self.prototypes
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Spawn one copy of every base creature, in registration order
    pub fn spawn_all(&self) -> Vec<Creature> {
        self.order
            .iter()
            .filter_map(|id| self.prototypes.get(id).cloned())
            .collect()
    }
}
