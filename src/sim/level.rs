//! Level difficulty curve
//!
//! Ten levels generated from a fixed formula. Every parameter moves toward
//! "harder" as the level number grows.

use serde::{Deserialize, Serialize};

/// Number of playable levels
pub const LEVEL_COUNT: u32 = 10;

/// Fall speed of level 0 (pixels per frame)
pub const BASE_FALL_SPEED: f32 = 3.0;
pub const FALL_SPEED_PER_LEVEL: f32 = 0.25;

pub const BASE_TRASH_COUNT: u32 = 10;
pub const TRASH_COUNT_PER_LEVEL: u32 = 5;

pub const INITIAL_SPAWN_INTERVAL_MS: u64 = 2300;
pub const SPAWN_INTERVAL_STEP_MS: u64 = 130;
/// Spawn interval never drops below this
pub const MIN_SPAWN_INTERVAL_MS: u64 = 550;

/// Difficulty parameters for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub level_number: u32,
    /// Base fall speed in pixels per frame (items jitter ±10% around it)
    pub fall_speed: f32,
    /// Items spawned over the whole level
    pub total_trash: u32,
    pub spawn_interval_ms: u64,
}

impl LevelDefinition {
    fn generate(n: u32) -> Self {
        let spawn_interval_ms = INITIAL_SPAWN_INTERVAL_MS
            .saturating_sub(n as u64 * SPAWN_INTERVAL_STEP_MS)
            .max(MIN_SPAWN_INTERVAL_MS);
        Self {
            level_number: n,
            fall_speed: BASE_FALL_SPEED + n as f32 * FALL_SPEED_PER_LEVEL,
            total_trash: BASE_TRASH_COUNT + n * TRASH_COUNT_PER_LEVEL,
            spawn_interval_ms,
        }
    }
}

/// Whether `n` names a level in the catalog
#[inline]
pub fn is_valid_level(n: u32) -> bool {
    (1..=LEVEL_COUNT).contains(&n)
}

/// Look up a level. Numbers outside the catalog fall back to level 1.
pub fn get_level(n: u32) -> LevelDefinition {
    if is_valid_level(n) {
        LevelDefinition::generate(n)
    } else {
        LevelDefinition::generate(1)
    }
}

/// All levels in order
pub fn levels() -> impl Iterator<Item = LevelDefinition> {
    (1..=LEVEL_COUNT).map(LevelDefinition::generate)
}
