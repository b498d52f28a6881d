//! Storage - the creature box kept between runs

use super::InventoryError;
use crate::creature::Creature;
use crate::fusion::fuse_sprites;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Storage size limit
pub const STORAGE_CAPACITY: usize = 50;

/// Creature box. Persists as `{ "storage": [...], "max_storage": n }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Storage {
    storage: Vec<Creature>,
    max_storage: usize,
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage {
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
            max_storage: STORAGE_CAPACITY,
        }
    }

    pub fn add(&mut self, creature: Creature) -> Result<(), InventoryError> {
        if self.is_full() {
            return Err(InventoryError::Full {
                capacity: self.max_storage,
            });
        }
        self.storage.push(creature);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<Creature, InventoryError> {
        let index = self.position(id)?;
        Ok(self.storage.remove(index))
    }

    pub fn list(&self) -> &[Creature] {
        &self.storage
    }

    pub fn get(&self, id: &str) -> Option<&Creature> {
        self.storage.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.storage.len() >= self.max_storage
    }

    pub fn capacity(&self) -> usize {
        self.max_storage
    }

    fn position(&self, id: &str) -> Result<usize, InventoryError> {
        self.storage
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| InventoryError::MissingCreature(id.to_string()))
    }

    /// Fuse two stored creatures, replacing both with the child.
    ///
    /// When either id is missing nothing changes. Fusing a creature with
    /// itself counts as a missing second parent.
    pub fn fuse_in_storage(
        &mut self,
        a_id: &str,
        b_id: &str,
        rng: &mut impl Rng,
    ) -> Result<&Creature, InventoryError> {
        let a_index = self.position(a_id)?;
        let a = self.storage.remove(a_index);
        let b = match self.remove(b_id) {
            Ok(b) => b,
            Err(err) => {
                self.storage.insert(a_index, a);
                return Err(err);
            }
        };

        let child = fuse_sprites(&a, &b, rng);
        tracing::info!(parent_a = %a.id, parent_b = %b.id, child = %child.id, "fused in storage");
        self.storage.push(child);
        let last = self.storage.len() - 1;
        Ok(&self.storage[last])
    }

    /// Serialize the box as JSON
    pub fn save(&self) -> Result<String, InventoryError> {
        Ok(serde_json::to_string(self)?)
    }

    fn validate(&self) -> Result<(), InventoryError> {
        if self.max_storage == 0 {
            return Err(InventoryError::Invalid("storage capacity must be positive".to_string()));
        }
        if self.storage.len() > self.max_storage {
            return Err(InventoryError::Invalid(format!(
                "{} creatures over capacity {}",
                self.storage.len(),
                self.max_storage
            )));
        }
        for creature in &self.storage {
            creature.validate().map_err(InventoryError::Invalid)?;
        }
        Ok(())
    }

    /// Replace the box with a saved one. A bad save is logged and leaves
    /// the current contents in place.
    pub fn load(&mut self, json: &str) -> Result<(), InventoryError> {
        let loaded = serde_json::from_str::<Storage>(json)
            .map_err(InventoryError::from)
            .and_then(|loaded| loaded.validate().map(|()| loaded));
        match loaded {
            Ok(loaded) => {
                *self = loaded;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("failed to load storage: {}", err);
                Err(err)
            }
        }
    }
}
