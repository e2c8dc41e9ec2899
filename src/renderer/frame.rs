//! Frame composition for each game mode

use glam::Vec2;

use super::{Align, BackgroundId, DrawCommand, Frame, Hud, Rgb, SpriteId};
use crate::consts::*;
use crate::sim::{GameMode, Playfield, Session};
use crate::ui::Menu;

const TITLE: &str = "BinSort";

/// Tutorial card lines for levels with an intro
fn intro_lines(level: u32) -> &'static [&'static str] {
    match level {
        1 => &[
            "Move the bin with A/D, the arrow keys or the mouse",
            "Catch trash through the lid, not the sides",
            "Don't let trash hit the ground!",
        ],
        _ => &[
            "Press E to swap between ORGANIC and INORGANIC",
            "Wrong bin costs a heart",
            "Gold items heal you",
        ],
    }
}

/// Text centered horizontally on the screen
fn centered(text: impl Into<String>, size: u32, color: Rgb, y: f32) -> DrawCommand {
    DrawCommand::text(text, size, color, SCREEN_WIDTH / 2.0, y, Align::Center)
}

/// Build the draw list for the session's current mode
pub fn compose(session: &Session) -> Frame {
    let mut frame = Frame::default();
    frame.push(DrawCommand::Clear(Rgb::BLACK));

    match session.mode() {
        GameMode::Title => {
            frame.push(DrawCommand::Background(BackgroundId::Menu));
            frame.push(centered(TITLE, 80, Rgb::GREEN, 200.0));
            if let Some(menu) = session.menu() {
                push_menu(&mut frame, menu, u32::MAX);
            }
        }
        GameMode::LevelSelect => {
            frame.push(DrawCommand::Background(BackgroundId::Menu));
            frame.push(centered("SELECT LEVEL", 40, Rgb::WHITE, 100.0));
            if let Some(menu) = session.menu() {
                push_menu(&mut frame, menu, session.progress().unlocked_level());
            }
        }
        GameMode::LevelIntro => {
            frame.push(DrawCommand::Background(BackgroundId::Game));
            let level = session.current_level();
            frame.push(centered(format!("LEVEL {level}"), 60, Rgb::WHITE, 150.0));
            for (i, line) in intro_lines(level).iter().enumerate() {
                frame.push(centered(*line, 24, Rgb::WHITE, 260.0 + i as f32 * 40.0));
            }
            frame.push(centered("Press any key to start", 20, Rgb::GOLD, 480.0));
        }
        GameMode::Playing => {
            if let Some(field) = session.playfield() {
                push_playfield(&mut frame, field, session.current_level());
            }
        }
        GameMode::Paused => {
            if let Some(field) = session.playfield() {
                push_playfield(&mut frame, field, session.current_level());
            }
            frame.push(DrawCommand::Dim { alpha: 150 });
            frame.push(centered("PAUSED", 60, Rgb::WHITE, 200.0));
            frame.push(centered("[ESC] Resume   [T] Title", 30, Rgb::WHITE, 300.0));
        }
        GameMode::GameOver => {
            frame.push(centered("GAME OVER", 60, Rgb::RED, 200.0));
            frame.push(centered("[R] Restart   [B] Back", 30, Rgb::WHITE, 300.0));
        }
    }

    // Cursor goes on top of everything
    if let Some(pointer) = session.input().pointer() {
        frame.push(DrawCommand::Sprite {
            sprite: SpriteId::Cursor,
            pos: pointer,
        });
    }

    frame
}

/// Buttons numbered above `unlocked_level` are drawn locked
fn push_menu(frame: &mut Frame, menu: &Menu, unlocked_level: u32) {
    for button in &menu.buttons {
        frame.push(DrawCommand::Button {
            rect: button.rect,
            label: button.label.clone(),
            hovered: button.hovered,
            locked: button.level().is_some_and(|n| n > unlocked_level),
        });
    }
}

fn push_playfield(frame: &mut Frame, field: &Playfield, level: u32) {
    frame.push(DrawCommand::Background(BackgroundId::Game));
    frame.push(DrawCommand::Sprite {
        sprite: SpriteId::Bin(field.player.category),
        pos: field.player.rect().pos,
    });
    for item in &field.trash {
        frame.push(DrawCommand::Sprite {
            sprite: SpriteId::Trash(item.category),
            pos: item.pos,
        });
    }

    let hud = Hud {
        health: field.player.health,
        level,
        caught: field.stats.caught,
        total_resolved: field.stats.total_resolved,
        ratio_percent: field.stats.ratio_percent(),
        bin: field.player.category,
    };
    push_hud(frame, &hud);
    frame.hud = Some(hud);
}

fn push_hud(frame: &mut Frame, hud: &Hud) {
    frame.push(DrawCommand::Sprite {
        sprite: SpriteId::Heart,
        pos: Vec2::new(20.0, 24.0),
    });

    let mut line = |text: String, size: u32, color: Rgb, x: f32, y: f32| {
        frame.push(DrawCommand::text(text, size, color, x, y, Align::TopLeft));
    };
    line(format!("HP: {}", hud.health), 30, Rgb::RED, 60.0, 20.0);
    line(format!("Level: {}", hud.level), 20, Rgb::WHITE, 20.0, 60.0);
    let caught = format!("Caught: {}/{}", hud.caught, hud.total_resolved);
    line(caught, 20, Rgb::WHITE, 20.0, 85.0);
    let ratio = format!("Ratio: {}%", hud.ratio_percent);
    line(ratio, 20, Rgb::WHITE, 20.0, 110.0);
    let bin = format!("BIN: {}", hud.bin.as_str());
    line(bin, 30, Rgb::for_category(hud.bin), SCREEN_WIDTH - 250.0, 20.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::persistence::ProgressStore;
    use crate::platform::{InputEvent, Key};
    use crate::renderer::{HeadlessRenderer, Renderer};
    use crate::sim::{Trash, TrashCategory};

    fn session() -> Session {
        Session::new(Settings::default(), ProgressStore::in_memory(), 9)
    }

    fn press(session: &mut Session, key: Key) {
        session.handle_event(&InputEvent::KeyDown(key), 0);
        session.handle_event(&InputEvent::KeyUp(key), 0);
    }

    #[test]
    fn title_frame() {
        let s = session();
        let frame = compose(&s);
        assert_eq!(frame.commands[0], DrawCommand::Clear(Rgb::BLACK));
        assert!(frame.texts().any(|t| t == TITLE));
        assert!(frame.hud.is_none());
        assert!(frame.commands.iter().any(
            |c| matches!(c, DrawCommand::Button { label, .. } if label == "PLAY")
        ));
    }

    #[test]
    fn locked_levels_are_marked() {
        let mut s = session();
        press(&mut s, Key::Enter);
        let frame = compose(&s);
        let locked: Vec<_> = frame
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Button { label, locked, .. } => Some((label.clone(), *locked)),
                _ => None,
            })
            .collect();
        assert_eq!(locked[0], ("LVL 1".to_string(), false));
        assert_eq!(locked[1], ("LVL 2".to_string(), true));
        // Back button is never locked
        assert_eq!(locked.last().unwrap(), &("< BACK".to_string(), false));
    }

    #[test]
    fn intro_card_mentions_swap_on_level_two() {
        let mut progress = ProgressStore::in_memory();
        progress.unlock(2);
        let mut s = Session::new(Settings::default(), progress, 9);
        press(&mut s, Key::Enter);
        s.start_level(2);
        let frame = compose(&s);
        assert!(frame.texts().any(|t| t == "LEVEL 2"));
        assert!(frame.texts().any(|t| t.contains("Press E")));
    }

    #[test]
    fn playing_frame_has_hud_and_sprites() {
        let mut s = session();
        press(&mut s, Key::Enter);
        s.start_level(1);
        press(&mut s, Key::Space);
        s.playfield_mut()
            .unwrap()
            .trash
            .push(Trash::new(1, TrashCategory::Bonus, 100.0, 3.0));

        let frame = compose(&s);
        let hud = frame.hud.expect("hud while playing");
        assert_eq!(hud.health, STARTING_HEALTH);
        assert_eq!(hud.level, 1);
        assert_eq!(hud.bin, TrashCategory::Organic);
        assert!(frame.texts().any(|t| t == "BIN: ORGANIC"));
        assert!(frame.texts().any(|t| t == "Ratio: 0%"));
        assert!(frame.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Sprite { sprite: SpriteId::Trash(TrashCategory::Bonus), .. }
        )));
        assert!(frame.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Sprite { sprite: SpriteId::Bin(TrashCategory::Organic), .. }
        )));
    }

    #[test]
    fn paused_frame_dims_the_playfield() {
        let mut s = session();
        press(&mut s, Key::Enter);
        s.start_level(1);
        press(&mut s, Key::Space);
        press(&mut s, Key::Escape);
        let frame = compose(&s);
        assert!(frame.hud.is_some());
        assert!(frame.commands.contains(&DrawCommand::Dim { alpha: 150 }));
        assert!(frame.texts().any(|t| t == "PAUSED"));
    }

    #[test]
    fn cursor_drawn_last() {
        let mut s = session();
        s.handle_event(&InputEvent::PointerMove { x: 5.0, y: 6.0 }, 0);
        let frame = compose(&s);
        assert_eq!(
            frame.commands.last(),
            Some(&DrawCommand::Sprite {
                sprite: SpriteId::Cursor,
                pos: Vec2::new(5.0, 6.0)
            })
        );
    }

    #[test]
    fn headless_renderer_tracks_hud() {
        let mut s = session();
        let mut renderer = HeadlessRenderer::default();
        renderer.present(&compose(&s));
        assert!(renderer.last_hud.is_none());


        press(&mut s, Key::Enter);
        s.start_level(1);
        press(&mut s, Key::Space);
        renderer.present(&compose(&s));
        assert_eq!(renderer.frames, 2);
        assert_eq!(renderer.last_hud.map(|h| h.level), Some(1));
    }
}
