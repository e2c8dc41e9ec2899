//! Menu buttons for the title and level-select screens
//!
//! Buttons only know their rectangle, label and action; locking is decided
//! by the session from saved progress.

use glam::Vec2;

use crate::Rect;
use crate::consts::*;
use crate::sim::level::LEVEL_COUNT;

/// What clicking a button asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    GotoLevelSelect,
    GotoTitle,
    SelectLevel(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
    pub action: UiAction,
    pub hovered: bool,
}

impl Button {
    pub fn new(rect: Rect, label: impl Into<String>, action: UiAction) -> Self {
        Self {
            rect,
            label: label.into(),
            action,
            hovered: false,
        }
    }

    /// Level this button starts, if any
    pub fn level(&self) -> Option<u32> {
        match self.action {
            UiAction::SelectLevel(n) => Some(n),
            _ => None,
        }
    }
}

/// A set of buttons shown together
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Menu {
    pub buttons: Vec<Button>,
}

impl Menu {
    /// Single PLAY button under the title
    pub fn title() -> Self {
        Self {
            buttons: vec![Button::new(
                Rect::new(SCREEN_WIDTH / 2.0 - 100.0, 400.0, 200.0, 50.0),
                "PLAY",
                UiAction::GotoLevelSelect,
            )],
        }
    }

    /// 5-wide grid of level buttons plus a back button
    pub fn level_select() -> Self {
        let mut buttons: Vec<Button> = (1..=LEVEL_COUNT)
            .map(|n| {
                let col = (n - 1) % 5;
                let row = (n - 1) / 5;
                Button::new(
                    Rect::new(150.0 + col as f32 * 100.0, 250.0 + row as f32 * 80.0, 80.0, 60.0),
                    format!("LVL {n}"),
                    UiAction::SelectLevel(n),
                )
            })
            .collect();
        buttons.push(Button::new(
            Rect::new(20.0, 20.0, 150.0, 40.0),
            "< BACK",
            UiAction::GotoTitle,
        ));
        Self { buttons }
    }

    /// Refresh hover flags for a pointer position
    pub fn update_hover(&mut self, pointer: Vec2) {
        for button in &mut self.buttons {
            button.hovered = button.rect.contains(pointer);
        }
    }

    pub fn clear_hover(&mut self) {
        for button in &mut self.buttons {
            button.hovered = false;
        }
    }

    /// Action of the button under the pointer
    pub fn hit(&self, pointer: Vec2) -> Option<UiAction> {
        self.buttons
            .iter()
            .find(|b| b.rect.contains(pointer))
            .map(|b| b.action)
    }
}
