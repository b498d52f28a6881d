//! Stage table loading

use super::ConfigError;
use crate::stage::Stage;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Slack allowed on the encounter probability total
const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Container for stage definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagesConfig {
    pub stages: Vec<Stage>,
}

fn validate_stage(stage: &Stage) -> Result<(), ConfigError> {
    let invalid = |msg: String| -> Result<(), ConfigError> {
        Err(ConfigError::ValidationError(format!("{}: {}", stage.id, msg)))
    };

    if stage.enemies.is_empty() {
        return invalid("encounter table is empty".to_string());
    }
    if let Some(row) = stage
        .enemies
        .iter()
        .find(|e| !(0.0..=1.0).contains(&e.probability))
    {
        return invalid(format!(
            "probability {} for {} outside [0, 1]",
            row.probability, row.template_id
        ));
    }
    let total = stage.total_probability();
    if total > 1.0 + PROBABILITY_TOLERANCE {
        return invalid(format!("encounter probabilities sum to {}", total));
    }
    if !(0.0..=1.0).contains(&stage.rewards.capture_chance) {
        return invalid("capture_chance outside [0, 1]".to_string());
    }
    Ok(())
}

fn validate_all(stages: Vec<Stage>) -> Result<Vec<Stage>, ConfigError> {
    let mut seen = HashSet::new();
    for stage in &stages {
        validate_stage(stage)?;
        if !seen.insert(stage.id.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate stage id {}",
                stage.id
            )));
        }
    }
    Ok(stages)
}

/// Load stages from a TOML file
pub fn load_stages(path: &Path) -> Result<Vec<Stage>, ConfigError> {
    let config: StagesConfig = super::load_toml(path)?;
    validate_all(config.stages)
}

/// Load stages from a TOML string
pub fn parse_stages(content: &str) -> Result<Vec<Stage>, ConfigError> {
    let config: StagesConfig = super::parse_toml(content)?;
    validate_all(config.stages)
}

/// Get the built-in stages
pub fn default_stages() -> Vec<Stage> {
    let toml = include_str!("../../config/stages.toml");
    parse_stages(toml).unwrap_or_else(|err| {
        tracing::warn!("built-in stages failed to load: {}", err);
        Vec::new()
    })
}
