//! Simulation types for one level attempt
//!
//! The playfield owns everything an attempt mutates; starting a level builds a
//! fresh one so nothing carries over between attempts.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Resolution;
use super::level::LevelDefinition;
use super::spawner::SpawnScheduler;
use crate::Rect;
use crate::consts::*;

/// What kind of trash an item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrashCategory {
    Organic,
    Inorganic,
    /// Never needs sorting, heals when it lands in the bin
    Bonus,
}

impl TrashCategory {
    /// Categories the bin can be set to
    pub const SORTABLE: [TrashCategory; 2] = [TrashCategory::Organic, TrashCategory::Inorganic];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrashCategory::Organic => "ORGANIC",
            TrashCategory::Inorganic => "INORGANIC",
            TrashCategory::Bonus => "BONUS",
        }
    }

    #[inline]
    pub fn is_bonus(&self) -> bool {
        matches!(self, TrashCategory::Bonus)
    }

    /// The other sortable category. Bonus maps to itself.
    pub fn swapped(&self) -> Self {
        match self {
            TrashCategory::Organic => TrashCategory::Inorganic,
            TrashCategory::Inorganic => TrashCategory::Organic,
            TrashCategory::Bonus => TrashCategory::Bonus,
        }
    }
}

/// The player's bin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Left edge, clamped so the bin stays on screen
    pub x: f32,
    /// Always Organic or Inorganic
    pub category: TrashCategory,
    /// Not clamped on damage; may dip below zero for the tick it happens
    pub health: i32,
    /// Time of the last successful swap
    pub last_swap_ms: Option<u64>,
}

impl Player {
    pub fn new(health: i32) -> Self {
        Self {
            x: (SCREEN_WIDTH - BIN_SIZE) / 2.0,
            category: TrashCategory::Organic,
            health,
            last_swap_ms: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x,
            SCREEN_HEIGHT - BIN_BOTTOM_MARGIN - BIN_SIZE,
            BIN_SIZE,
            BIN_SIZE,
        )
    }

    /// Items whose bottom edge is at or above this line are entering the opening
    pub fn lid_line(&self) -> f32 {
        self.rect().top() + LID_DEPTH
    }

    /// Move horizontally, keeping the bin inside the screen
    pub fn move_by(&mut self, dx: f32) {
        self.x = (self.x + dx).clamp(0.0, SCREEN_WIDTH - BIN_SIZE);
    }

    /// Switch bin category if the cooldown has elapsed. Returns false otherwise.
    pub fn try_swap(&mut self, now_ms: u64, cooldown_ms: u64) -> bool {
        let ready = match self.last_swap_ms {
            Some(last) => now_ms.saturating_sub(last) > cooldown_ms,
            None => true,
        };
        if !ready {
            return false;
        }
        self.last_swap_ms = Some(now_ms);
        self.category = self.category.swapped();
        true
    }

    pub fn damage(&mut self) {
        self.health -= 1;
    }

    pub fn heal(&mut self) {
        self.health += 1;
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// A falling item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trash {
    pub id: u32,
    pub category: TrashCategory,
    /// Top-left; x is fixed at spawn, y accumulates fall distance
    pub pos: Vec2,
    /// Pixels per frame
    pub fall_speed: f32,
}

impl Trash {
    pub fn new(id: u32, category: TrashCategory, x: f32, fall_speed: f32) -> Self {
        Self {
            id,
            category,
            pos: Vec2::new(x, TRASH_SPAWN_Y),
            fall_speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::splat(TRASH_SIZE),
        }
    }

    pub fn fall(&mut self) {
        self.pos.y += self.fall_speed;
    }

    /// Top edge has passed the bottom of the screen
    pub fn is_off_screen(&self) -> bool {
        self.rect().top() > SCREEN_HEIGHT
    }
}

/// Per-attempt scoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub caught: u32,
    pub missed: u32,
    /// Every non-bonus resolution: catch, mismatch, side hit or miss
    pub total_resolved: u32,
}

impl SessionStats {
    /// Catch ratio as a whole percentage (0 before anything resolves)
    pub fn ratio_percent(&self) -> u32 {
        if self.total_resolved == 0 {
            0
        } else {
            self.caught * 100 / self.total_resolved
        }
    }
}

/// Something the simulation wants the host to know about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// An item was caught, collided or missed
    Resolved(Resolution),
    Swapped(TrashCategory),
    MenuClick,
    /// An action was refused (e.g. a locked level)
    Denied,
    LevelStarted(u32),
    LevelCompleted(u32),
    LevelUnlocked(u32),
    GameOver(u32),
}

/// State of one level attempt
#[derive(Debug, Clone)]
pub struct Playfield {
    pub level: LevelDefinition,
    pub player: Player,
    /// Active items, in spawn order
    pub trash: Vec<Trash>,
    pub spawner: SpawnScheduler,
    pub stats: SessionStats,
    pub rng: Pcg32,
    /// Simulation frame counter
    pub frames: u64,
    next_id: u32,
}

impl Playfield {
    pub fn new(level: LevelDefinition, starting_health: i32, seed: u64) -> Self {
        Self {
            level,
            player: Player::new(starting_health),
            trash: Vec::new(),
            spawner: SpawnScheduler::new(&level),
            stats: SessionStats::default(),
            rng: Pcg32::seed_from_u64(seed),
            frames: 0,
            next_id: 1,
        }
    }

    /// Let the spawner create an item if one is due
    pub fn spawn_due(&mut self, now_ms: u64) -> Option<TrashCategory> {
        let trash = self
            .spawner
            .update(now_ms, &mut self.rng, || next_entity_id(&mut self.next_id))?;
        let category = trash.category;
        self.trash.push(trash);
        Some(category)
    }

    /// All items spawned and none left falling
    pub fn is_cleared(&self) -> bool {
        self.spawner.is_finished() && self.trash.is_empty()
    }
}

/// Allocate a new entity ID from a playfield's counter
fn next_entity_id(next_id: &mut u32) -> u32 {
    let id = *next_id;
    *next_id += 1;
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::get_level;

    #[test]
    fn player_starts_centered_on_organic() {
        let p = Player::new(STARTING_HEALTH);
        assert_eq!(p.rect().center_x(), SCREEN_WIDTH / 2.0);
        assert_eq!(p.rect().bottom(), SCREEN_HEIGHT - BIN_BOTTOM_MARGIN);
        assert_eq!(p.category, TrashCategory::Organic);
        assert_eq!(p.health, 3);
    }

    #[test]
    fn player_clamped_to_screen() {
        let mut p = Player::new(3);
        p.move_by(-10_000.0);
        assert_eq!(p.rect().left(), 0.0);
        p.move_by(10_000.0);
        assert_eq!(p.rect().right(), SCREEN_WIDTH);
    }

    #[test]
    fn swap_respects_cooldown() {
        let mut p = Player::new(3);
        assert!(p.try_swap(100, SWAP_COOLDOWN_MS));
        assert_eq!(p.category, TrashCategory::Inorganic);

        // Exactly at the cooldown is still too soon
        assert!(!p.try_swap(600, SWAP_COOLDOWN_MS));
        assert_eq!(p.category, TrashCategory::Inorganic);
        assert_eq!(p.last_swap_ms, Some(100));

        assert!(p.try_swap(601, SWAP_COOLDOWN_MS));
        assert_eq!(p.category, TrashCategory::Organic);
    }

    #[test]
    fn damage_is_not_clamped() {
        let mut p = Player::new(1);
        p.damage();
        p.damage();
        assert_eq!(p.health, -1);
        assert!(p.is_dead());
    }

    #[test]
    fn trash_falls_and_leaves_screen() {
        let mut t = Trash::new(1, TrashCategory::Organic, 100.0, 10.0);
        assert_eq!(t.pos.y, TRASH_SPAWN_Y);
        t.fall();
        assert_eq!(t.pos.y, TRASH_SPAWN_Y + 10.0);
        assert!(!t.is_off_screen());
        t.pos.y = SCREEN_HEIGHT;
        assert!(!t.is_off_screen());
        t.pos.y = SCREEN_HEIGHT + 0.5;
        assert!(t.is_off_screen());
    }

    #[test]
    fn ratio_handles_empty_stats() {
        let mut stats = SessionStats::default();
        assert_eq!(stats.ratio_percent(), 0);
        stats.caught = 2;
        stats.total_resolved = 3;
        assert_eq!(stats.ratio_percent(), 66);
    }

    #[test]
    fn spawned_items_get_sequential_ids() {
        let level = get_level(1);
        let mut field = Playfield::new(level, STARTING_HEALTH, 5);
        let step = level.spawn_interval_ms + 1;

        assert_eq!(field.spawn_due(0), None);
        assert_eq!(field.spawn_due(1), None);
        for k in 1..=3u64 {
            assert!(field.spawn_due(k * step).is_some());
        }
        let ids: Vec<u32> = field.trash.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(field.next_id, 4);
    }
}
