//! Rule constants shared by the battle, fusion and map generators

/// Hard level cap; level-ups at or above it are no-ops
pub const MAX_LEVEL: u32 = 50;

/// Growth value that corresponds to a 1.0x stat gain per level
pub const BASELINE_GROWTH: f64 = 100.0;

/// Maximum number of skills a creature can carry
pub const MAX_SKILLS: usize = 4;

// === Damage ===

/// Lower bound of the damage random factor (inclusive)
pub const DAMAGE_RANDOM_MIN: f64 = 0.85;
/// Upper bound of the damage random factor (exclusive)
pub const DAMAGE_RANDOM_MAX: f64 = 1.0;
/// Every landed hit deals at least this much
pub const MIN_DAMAGE: u32 = 1;
/// Chance for a skill use to be critical
pub const CRIT_CHANCE: f64 = 0.10;
/// Damage multiplier applied on a critical hit
pub const CRIT_MULTIPLIER: f64 = 1.5;

// === Capture ===

/// Capture rate at zero remaining hp with a 1.0x ball
pub const CAPTURE_BASE_RATE: f64 = 0.3;

// === Per-level growth (scaled by growth value / 100) ===

pub const LEVEL_UP_HP: f64 = 5.0;
pub const LEVEL_UP_ATK: f64 = 2.0;
pub const LEVEL_UP_DEF: f64 = 1.5;
pub const LEVEL_UP_SPD: f64 = 1.8;

// === Fresh stat lines: base + level * per_level ===

pub const BASE_HP: f64 = 50.0;
pub const BASE_ATK: f64 = 10.0;
pub const BASE_DEF: f64 = 8.0;
pub const BASE_SPD: f64 = 12.0;

// === Battle rewards ===

pub const REWARD_EXP_PER_LEVEL: f64 = 15.0;
/// Exp reward is scaled by 1 + U[0, spread)
pub const REWARD_EXP_SPREAD: f64 = 0.2;
pub const REWARD_GOLD_PER_LEVEL: f64 = 10.0;
pub const REWARD_GOLD_SPREAD: f64 = 0.3;

// === Fusion ===

/// Growth multiplier applied to the parents' summed growth value
pub const FUSION_GROWTH_BONUS: f64 = 1.1;
/// Non-signature skills drawn from the parents' pooled skills
pub const FUSION_INHERITED_SKILLS: usize = 2;
/// Per-fusion pixel mutation rate is drawn from [min, max)
pub const FUSION_MUTATION_MIN: f64 = 0.05;
pub const FUSION_MUTATION_MAX: f64 = 0.10;
/// Total fusions needed to reach the medium and large sprite sizes
pub const SIZE_MEDIUM_FUSIONS: u32 = 2;
pub const SIZE_LARGE_FUSIONS: u32 = 5;

// === Map ===

/// A floor has `BASE_ROOM_COUNT + level` rooms before the exit
pub const BASE_ROOM_COUNT: usize = 5;
/// Cumulative room-type thresholds: battle below the first, shop below the second
pub const BATTLE_ROOM_THRESHOLD: f64 = 0.70;
pub const SHOP_ROOM_THRESHOLD: f64 = 0.85;
