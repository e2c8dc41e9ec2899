//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time/ticks
//! - Input events

pub mod input;
pub mod time;

pub use input::{InputEvent, InputState, Key, PointerButton};
pub use time::Clock;
