//! Stats - hit points, combat stats and growth

use crate::constants::{
    BASELINE_GROWTH, BASE_ATK, BASE_DEF, BASE_HP, BASE_SPD, LEVEL_UP_ATK, LEVEL_UP_DEF,
    LEVEL_UP_HP, LEVEL_UP_SPD,
};
use serde::{Deserialize, Serialize};

/// Creature stat line. `hp` stays within `0..=max_hp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u32,
    pub max_hp: u32,
    pub atk: u32,
    pub def: u32,
    pub spd: u32,
    /// Per-level gain multiplier basis (100 = 1.0x)
    pub growth_value: f64,
}

/// Floor a stat value, saturating at `u32::MAX`
fn stat_value(value: f64) -> u32 {
    value.floor().clamp(0.0, u32::MAX as f64) as u32
}

impl Stats {
    /// Build a fresh, fully healed stat line for `level`.
    ///
    /// Each stat is `base + level * per_level * growth_value / 100`, floored
    /// and capped at `u32::MAX` once compounded fusion growth gets that far.
    pub fn fresh(level: u32, growth_value: f64) -> Self {
        let g = growth_value / BASELINE_GROWTH;
        let level = level as f64;
        let max_hp = stat_value(BASE_HP + level * LEVEL_UP_HP * g);
        Stats {
            hp: max_hp,
            max_hp,
            atk: stat_value(BASE_ATK + level * LEVEL_UP_ATK * g),
            def: stat_value(BASE_DEF + level * LEVEL_UP_DEF * g),
            spd: stat_value(BASE_SPD + level * LEVEL_UP_SPD * g),
            growth_value,
        }
    }

    /// Overwrite the derived stats with the baseline curve for `level`,
    /// keeping this line's growth value, and heal to full.
    pub fn rescale_for_level(&mut self, level: u32) {
        let growth_value = self.growth_value;
        *self = Stats {
            growth_value,
            ..Stats::fresh(level, BASELINE_GROWTH)
        };
    }

    /// Growth multiplier (growth_value / 100)
    pub fn growth_factor(&self) -> f64 {
        self.growth_value / BASELINE_GROWTH
    }

    /// Apply one level's worth of stat gains, saturating at `u32::MAX`
    pub(crate) fn grow(&mut self) {
        let g = self.growth_factor();
        self.max_hp = self.max_hp.saturating_add(stat_value(LEVEL_UP_HP * g));
        self.atk = self.atk.saturating_add(stat_value(LEVEL_UP_ATK * g));
        self.def = self.def.saturating_add(stat_value(LEVEL_UP_DEF * g));
        self.spd = self.spd.saturating_add(stat_value(LEVEL_UP_SPD * g));
    }
}
