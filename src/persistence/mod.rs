//! Save/load of player progress
//!
//! Features:
//! - Plain JSON file (`{"unlocked_level": N}`)
//! - Write to a temp file, then rename over the save
//! - Corrupt or missing data falls back to a fresh profile

pub mod progress;

pub use progress::{PersistedProgress, ProgressError, ProgressStore};
