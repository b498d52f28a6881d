//! Item catalogue loading

use super::ConfigError;
use crate::inventory::{ItemDef, ItemEffect};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Container for item definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsConfig {
    pub items: Vec<ItemDef>,
}

fn validate_all(items: Vec<ItemDef>) -> Result<Vec<ItemDef>, ConfigError> {
    let mut seen = HashSet::new();
    for item in &items {
        if !seen.insert(item.id.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate item id {}",
                item.id
            )));
        }
        if let ItemEffect::Capture { multiplier } = item.effect {
            if !multiplier.is_finite() || multiplier < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{}: capture multiplier {} must be a non-negative number",
                    item.id, multiplier
                )));
            }
        }
    }
    Ok(items)
}

/// Load the item catalogue from a TOML file
pub fn load_item_catalogue(path: &Path) -> Result<Vec<ItemDef>, ConfigError> {
    let config: ItemsConfig = super::load_toml(path)?;
    validate_all(config.items)
}

/// Load the item catalogue from a TOML string
pub fn parse_item_catalogue(content: &str) -> Result<Vec<ItemDef>, ConfigError> {
    let config: ItemsConfig = super::parse_toml(content)?;
    validate_all(config.items)
}

/// Get the built-in item catalogue
pub fn default_items() -> Vec<ItemDef> {
    let toml = include_str!("../../config/items.toml");
    parse_item_catalogue(toml).unwrap_or_else(|err| {
        tracing::warn!("built-in item catalogue failed to load: {}", err);
        Vec::new()
    })
}
