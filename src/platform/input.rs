//! Discrete input events and held-input tracking
//!
//! The host feeds events once per frame. Movement needs to know what is
//! currently held, so key/pointer releases are events too.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    A,
    D,
    /// Swap bin
    E,
    Escape,
    Enter,
    Space,
    /// Restart after game over
    R,
    /// Back to level select after game over
    B,
    /// Title from the pause screen
    T,
    /// Number row, 0-9
    Digit(u8),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// One input event from the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    PointerMove { x: f32, y: f32 },
    PointerDown(PointerButton),
    PointerUp(PointerButton),
    KeyDown(Key),
    KeyUp(Key),
}

impl InputEvent {
    /// Key or button press (what "any input" means on prompt screens)
    pub fn is_press(&self) -> bool {
        matches!(self, InputEvent::KeyDown(_) | InputEvent::PointerDown(_))
    }
}

/// What is currently held down, plus the last pointer position
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held_keys: HashSet<Key>,
    held_buttons: HashSet<PointerButton>,
    pointer: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMove { x, y } => self.pointer = Some(Vec2::new(x, y)),
            InputEvent::PointerDown(button) => {
                self.held_buttons.insert(button);
            }
            InputEvent::PointerUp(button) => {
                self.held_buttons.remove(&button);
            }
            InputEvent::KeyDown(key) => {
                self.held_keys.insert(key);
            }
            InputEvent::KeyUp(key) => {
                self.held_keys.remove(&key);
            }
            InputEvent::Quit => {}
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held_keys.contains(&key)
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn pointer_held(&self) -> bool {
        self.held_buttons.contains(&PointerButton::Left)
    }

    /// Net horizontal direction from held keys
    pub fn move_dir(&self) -> f32 {
        let left = self.is_held(Key::Left) || self.is_held(Key::A);
        let right = self.is_held(Key::Right) || self.is_held(Key::D);
        match (left, right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Frame input for the simulation
    pub fn tick_input(&self, autopilot: bool) -> TickInput {
        let pointer_x = if self.pointer_held() {
            self.pointer.map(|p| p.x)
        } else {
            None
        };
        TickInput {
            move_dir: self.move_dir(),
            pointer_x,
            swap: false,
            autopilot,
        }
    }

    /// Forget held keys and buttons (e.g. when play starts); pointer position is kept
    pub fn release_all(&mut self) {
        self.held_keys.clear();
        self.held_buttons.clear();
    }
}
