//! Bin Sort - A trash-sorting arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (levels, spawning, collisions, mode machine)
//! - `persistence`: Unlocked-level progress saved as JSON
//! - `settings`: Runtime configuration
//! - `platform`: Input events and the host clock
//! - `audio`: Sound cue requests
//! - `renderer`: Draw requests per game mode
//! - `ui`: Menu buttons

pub mod audio;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use persistence::{PersistedProgress, ProgressError, ProgressStore};
pub use settings::Settings;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Target frame rate; all per-frame speeds assume it
    pub const FPS: u32 = 60;
    /// Nominal frame duration in milliseconds
    pub const FRAME_MS: u64 = 1000 / FPS as u64;

    /// Bin sprite is 32x32 scaled 3x
    pub const BIN_SIZE: f32 = 96.0;
    /// Gap between the bin's bottom edge and the screen bottom
    pub const BIN_BOTTOM_MARGIN: f32 = 20.0;
    /// Depth of the bin opening, measured from the bin's top edge
    pub const LID_DEPTH: f32 = 36.0;
    /// Pointer steering ignores offsets smaller than this
    pub const POINTER_DEAD_ZONE: f32 = 5.0;

    /// Trash sprite is 24x24 scaled 2x
    pub const TRASH_SIZE: f32 = 48.0;
    /// Items appear above the top edge
    pub const TRASH_SPAWN_Y: f32 = -50.0;
    /// Horizontal spawn band (left edge of the item)
    pub const TRASH_SPAWN_MIN_X: i32 = 50;
    pub const TRASH_SPAWN_MAX_X: i32 = SCREEN_WIDTH as i32 - 50;

    /// Gameplay defaults
    pub const PLAYER_SPEED: f32 = 15.0;
    pub const SWAP_COOLDOWN_MS: u64 = 500;
    pub const STARTING_HEALTH: i32 = 3;
    /// Levels up to this one open with a tutorial card
    pub const INTRO_MAX_LEVEL: u32 = 2;
}

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Overlap test; touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Point containment (right/bottom edges exclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}
