//! Gameplay simulation
//!
//! All gameplay logic lives here. It is driven one frame at a time by the
//! host and never renders, plays audio or reads the clock itself:
//! - Timestamps come in as monotonic milliseconds
//! - Seeded RNG only
//! - Side effects leave as `GameEvent`s

pub mod collision;
pub mod level;
pub mod machine;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Entry, Resolution, classify_entry, resolve};
pub use level::{LEVEL_COUNT, LevelDefinition, get_level, levels};
pub use machine::{GameMode, Session};
pub use spawner::{SpawnPhase, SpawnScheduler};
pub use state::{GameEvent, Player, Playfield, SessionStats, Trash, TrashCategory};
pub use tick::{TickInput, autopilot, tick};
