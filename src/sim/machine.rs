//! Top-level game mode machine
//!
//! The session owns every subsystem (progress, settings, input, RNG, the
//! current playfield) and is the only place mode transitions happen.
//!
//! ```text
//! Title -> LevelSelect -> (LevelIntro) -> Playing <-> Paused
//!              ^                            |   \
//!              +------ level cleared -------+    +-> GameOver
//! ```

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::{LEVEL_COUNT, get_level, is_valid_level};
use super::state::{GameEvent, Playfield};
use super::tick::tick;
use crate::Settings;
use crate::persistence::ProgressStore;
use crate::platform::{InputEvent, InputState, Key, PointerButton};
use crate::ui::{Menu, UiAction};

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Title,
    LevelSelect,
    /// Tutorial card before early levels
    LevelIntro,
    Playing,
    Paused,
    GameOver,
}

/// One running game
#[derive(Debug)]
pub struct Session {
    mode: GameMode,
    current_level: u32,
    /// The active attempt; kept through GameOver for the final stats
    field: Option<Playfield>,
    progress: ProgressStore,
    settings: Settings,
    input: InputState,
    rng: Pcg32,
    events: Vec<GameEvent>,
    title_menu: Menu,
    level_menu: Menu,
    running: bool,
}

impl Session {
    pub fn new(settings: Settings, progress: ProgressStore, seed: u64) -> Self {
        log::info!(
            "Session started (seed={}, unlocked_level={})",
            seed,
            progress.unlocked_level()
        );
        Self {
            mode: GameMode::Title,
            current_level: 1,
            field: None,
            progress,
            settings,
            input: InputState::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            title_menu: Menu::title(),
            level_menu: Menu::level_select(),
            running: true,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    pub fn playfield(&self) -> Option<&Playfield> {
        self.field.as_ref()
    }

    pub fn playfield_mut(&mut self) -> Option<&mut Playfield> {
        self.field.as_mut()
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Buttons shown on the current screen, if it has any
    pub fn menu(&self) -> Option<&Menu> {
        match self.mode {
            GameMode::Title => Some(&self.title_menu),
            GameMode::LevelSelect => Some(&self.level_menu),
            _ => None,
        }
    }

    /// False once a quit event arrived
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Feed one input event
    pub fn handle_event(&mut self, event: &InputEvent, now_ms: u64) {
        self.input.apply(event);

        match *event {
            InputEvent::Quit => {
                log::info!("Quit requested");
                self.running = false;
                return;
            }
            InputEvent::PointerMove { .. } => self.refresh_hover(),
            _ => {}
        }

        match self.mode {
            GameMode::Title => match *event {
                InputEvent::PointerDown(PointerButton::Left) => self.click_menu(),
                InputEvent::KeyDown(Key::Enter | Key::Space) => {
                    self.ui_action(UiAction::GotoLevelSelect)
                }
                _ => {}
            },
            GameMode::LevelSelect => match *event {
                InputEvent::PointerDown(PointerButton::Left) => self.click_menu(),
                InputEvent::KeyDown(Key::Escape) => self.ui_action(UiAction::GotoTitle),
                InputEvent::KeyDown(Key::Digit(d)) => {
                    let level = if d == 0 { LEVEL_COUNT } else { u32::from(d) };
                    self.ui_action(UiAction::SelectLevel(level));
                }
                _ => {}
            },
            GameMode::LevelIntro => {
                if event.is_press() {
                    self.set_mode(GameMode::Playing);
                    // The dismissing press should not start moving the bin
                    self.input.release_all();
                }
            }
            GameMode::Playing => match *event {
                InputEvent::KeyDown(Key::Escape) => self.set_mode(GameMode::Paused),
                InputEvent::KeyDown(Key::E) => {
                    self.swap_bin(now_ms);
                }
                _ => {}
            },
            GameMode::Paused => match *event {
                InputEvent::KeyDown(Key::Escape) => self.set_mode(GameMode::Playing),
                InputEvent::KeyDown(Key::T) => {
                    self.field = None;
                    self.set_mode(GameMode::Title);
                }
                _ => {}
            },
            GameMode::GameOver => match *event {
                InputEvent::KeyDown(Key::R) => {
                    self.start_level(self.current_level);
                }
                InputEvent::KeyDown(Key::B) => {
                    self.field = None;
                    self.set_mode(GameMode::LevelSelect);
                }
                _ => {}
            },
        }
    }

    /// Advance one frame. Only the Playing mode simulates.
    pub fn update(&mut self, now_ms: u64) {
        if self.mode != GameMode::Playing {
            return;
        }
        let Some(field) = self.field.as_mut() else {
            return;
        };

        let input = self.input.tick_input(self.settings.autopilot);
        tick(field, &input, now_ms, &self.settings, &mut self.events);

        if field.player.is_dead() {
            log::info!(
                "Game over on level {} (caught {}/{})",
                self.current_level,
                field.stats.caught,
                field.stats.total_resolved
            );
            self.events.push(GameEvent::GameOver(self.current_level));
            self.set_mode(GameMode::GameOver);
        } else if field.is_cleared() {
            self.complete_level();
        }
    }

    /// Begin an attempt at `level` from the level grid, or restart from
    /// GameOver. Locked or unknown levels are refused, as is any other mode.
    pub fn start_level(&mut self, level: u32) -> bool {
        if !matches!(self.mode, GameMode::LevelSelect | GameMode::GameOver) {
            log::debug!("Ignoring start of level {} in {:?}", level, self.mode);
            return false;
        }
        if !is_valid_level(level) || !self.progress.is_unlocked(level) {
            log::debug!(
                "Level {} is locked (unlocked_level={})",
                level,
                self.progress.unlocked_level()
            );
            self.events.push(GameEvent::Denied);
            return false;
        }

        self.events.push(GameEvent::MenuClick);
        self.current_level = level;
        let seed = self.rng.random::<u64>();
        self.field = Some(Playfield::new(
            get_level(level),
            self.settings.starting_health,
            seed,
        ));
        self.input.release_all();
        self.events.push(GameEvent::LevelStarted(level));
        log::info!("Starting level {}", level);

        let next = if level <= self.settings.intro_max_level {
            GameMode::LevelIntro
        } else {
            GameMode::Playing
        };
        self.set_mode(next);
        true
    }

    /// Swap the bin category. Ignored outside Playing or during the cooldown.
    pub fn swap_bin(&mut self, now_ms: u64) -> bool {
        if self.mode != GameMode::Playing {
            return false;
        }
        let Some(field) = self.field.as_mut() else {
            return false;
        };
        if !field.player.try_swap(now_ms, self.settings.swap_cooldown_ms) {
            return false;
        }
        self.events.push(GameEvent::Swapped(field.player.category));
        true
    }

    /// Flush progress once before exit
    pub fn shutdown(&mut self) -> bool {
        log::info!("Shutting down, saving progress");
        self.running = false;
        self.progress.save()
    }

    fn complete_level(&mut self) {
        let level = self.current_level;
        if let Some(field) = &self.field {
            log::info!(
                "Level {} complete (caught {}/{}, ratio {}%)",
                level,
                field.stats.caught,
                field.stats.total_resolved,
                field.stats.ratio_percent()
            );
        }
        let next = (level + 1).min(LEVEL_COUNT);
        if self.progress.unlock(next) {
            self.events.push(GameEvent::LevelUnlocked(next));
        }
        self.events.push(GameEvent::LevelCompleted(level));
        self.field = None;
        self.set_mode(GameMode::LevelSelect);
    }

    fn ui_action(&mut self, action: UiAction) {
        match action {
            UiAction::GotoLevelSelect => {
                self.events.push(GameEvent::MenuClick);
                self.set_mode(GameMode::LevelSelect);
            }
            UiAction::GotoTitle => {
                self.events.push(GameEvent::MenuClick);
                self.set_mode(GameMode::Title);
            }
            UiAction::SelectLevel(level) => {
                self.start_level(level);
            }
        }
    }

    fn click_menu(&mut self) {
        let Some(pointer) = self.input.pointer() else {
            return;
        };
        let action = self.menu().and_then(|menu| menu.hit(pointer));
        if let Some(action) = action {
            self.ui_action(action);
        }
    }

    fn refresh_hover(&mut self) {
        let Some(pointer) = self.input.pointer() else {
            return;
        };
        match self.mode {
            GameMode::Title => self.title_menu.update_hover(pointer),
            GameMode::LevelSelect => self.level_menu.update_hover(pointer),
            _ => {}
        }
    }

    fn set_mode(&mut self, mode: GameMode) {
        if self.mode != mode {
            log::debug!("Mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
            self.title_menu.clear_hover();
            self.level_menu.clear_hover();
            self.refresh_hover();
        }
    }
}
