//! Time-driven trash spawning for one level attempt
//!
//! Spawns at most one item per update, once more than a full interval has
//! passed since the previous spawn. Finishing is terminal.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::level::LevelDefinition;
use super::state::{Trash, TrashCategory};
use crate::consts::*;

/// Probability that a spawned item is Bonus
pub const BONUS_CHANCE: f32 = 0.05;
/// Rolls below this (and at or above `BONUS_CHANCE`) are Organic
pub const ORGANIC_THRESHOLD: f32 = 0.525;
/// Per-item fall speed varies by this fraction around the level speed
pub const SPEED_JITTER: f32 = 0.1;

/// Spawner phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPhase {
    Spawning,
    /// All items spawned; never leaves this phase
    Finished,
}

/// Spawn scheduler state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    pub spawned_count: u32,
    pub total_to_spawn: u32,
    /// Unset until the first update anchors the timer
    pub last_spawn_ms: Option<u64>,
    pub phase: SpawnPhase,
    fall_speed: f32,
    spawn_interval_ms: u64,
}

impl SpawnScheduler {
    pub fn new(level: &LevelDefinition) -> Self {
        let phase = if level.total_trash == 0 {
            SpawnPhase::Finished
        } else {
            SpawnPhase::Spawning
        };
        Self {
            spawned_count: 0,
            total_to_spawn: level.total_trash,
            last_spawn_ms: None,
            phase,
            fall_speed: level.fall_speed,
            // A zero interval would spawn on every frame
            spawn_interval_ms: level.spawn_interval_ms.max(1),
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.phase == SpawnPhase::Finished
    }

    pub fn spawn_interval_ms(&self) -> u64 {
        self.spawn_interval_ms
    }

    /// Advance the timer. Returns the new item when one is due.
    ///
    /// `id` is called only when an item is actually created.
    pub fn update<R: Rng>(
        &mut self,
        now_ms: u64,
        rng: &mut R,
        id: impl FnOnce() -> u32,
    ) -> Option<Trash> {
        if self.is_finished() {
            return None;
        }

        let Some(last) = self.last_spawn_ms else {
            self.last_spawn_ms = Some(now_ms);
            return None;
        };

        if now_ms.saturating_sub(last) <= self.spawn_interval_ms {
            return None;
        }

        let trash = self.spawn(rng, id());
        self.last_spawn_ms = Some(now_ms);
        if self.spawned_count >= self.total_to_spawn {
            self.phase = SpawnPhase::Finished;
            log::debug!("Spawner finished after {} items", self.spawned_count);
        }
        Some(trash)
    }

    fn spawn<R: Rng>(&mut self, rng: &mut R, id: u32) -> Trash {
        self.spawned_count += 1;
        let category = roll_category(rng.random::<f32>());
        let speed = self.fall_speed * rng.random_range((1.0 - SPEED_JITTER)..=(1.0 + SPEED_JITTER));
        let x = rng.random_range(TRASH_SPAWN_MIN_X..=TRASH_SPAWN_MAX_X) as f32;
        Trash::new(id, category, x, speed)
    }
}

/// Map a uniform roll in [0, 1) to a category: 5% Bonus, the rest split evenly
pub fn roll_category(roll: f32) -> TrashCategory {
    if roll < BONUS_CHANCE {
        TrashCategory::Bonus
    } else if roll < ORGANIC_THRESHOLD {
        TrashCategory::Organic
    } else {
        TrashCategory::Inorganic
    }
}
