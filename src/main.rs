//! Bin Sort entry point
//!
//! Runs the game headless: the session is driven by a short scripted menu
//! sequence and the autopilot plays the highest unlocked level. Draw and
//! sound requests go to logging backends.

use bin_sort::audio::{AudioManager, LogBackend};
use bin_sort::consts::FRAME_MS;
use bin_sort::platform::time::seed_from_time;
use bin_sort::platform::{Clock, InputEvent, Key};
use bin_sort::renderer::{HeadlessRenderer, Renderer, compose};
use bin_sort::settings::DEFAULT_SETTINGS_PATH;
use bin_sort::sim::{GameEvent, GameMode, LEVEL_COUNT, Session};
use bin_sort::{ProgressStore, Settings};

/// Hard stop for the demo (10 minutes of frames)
const MAX_FRAMES: u64 = 10 * 60 * 60;

/// Menu inputs: title -> level select -> pick level -> dismiss intro
fn demo_script(level: u32) -> Vec<InputEvent> {
    let digit = (level % 10) as u8;
    vec![
        InputEvent::KeyDown(Key::Enter),
        InputEvent::KeyUp(Key::Enter),
        InputEvent::KeyDown(Key::Digit(digit)),
        InputEvent::KeyUp(Key::Digit(digit)),
        InputEvent::KeyDown(Key::Space),
        InputEvent::KeyUp(Key::Space),
    ]
}

fn main() {
    env_logger::init();
    log::info!("Bin Sort (headless) starting...");

    let mut settings = Settings::load(DEFAULT_SETTINGS_PATH);
    settings.autopilot = true;

    let progress = ProgressStore::open(&settings.save_path);
    let level = progress.unlocked_level().min(LEVEL_COUNT);
    let seed = settings.seed.unwrap_or_else(seed_from_time);

    let mut clock = if settings.realtime {
        Clock::realtime(FRAME_MS)
    } else {
        Clock::simulated(FRAME_MS)
    };
    let mut audio = AudioManager::new(Some(Box::new(LogBackend)), &settings);
    let mut renderer = HeadlessRenderer::default();
    let mut session = Session::new(settings, progress, seed);

    let mut script = demo_script(level).into_iter();
    let mut outcome = None;

    for _ in 0..MAX_FRAMES {
        let now = clock.now_ms();

        // One scripted event per frame until the level is running
        if let Some(event) = script.next() {
            session.handle_event(&event, now);
        }

        session.update(now);

        let events = session.drain_events();
        audio.play_events(&events);
        for event in &events {
            if let GameEvent::LevelCompleted(_) | GameEvent::GameOver(_) = event {
                outcome = Some(*event);
            }
        }

        renderer.present(&compose(&session));

        if outcome.is_some() && session.mode() != GameMode::Playing {
            session.handle_event(&InputEvent::Quit, now);
        }
        if !session.is_running() {
            break;
        }
        clock.advance_frame();
    }

    match outcome {
        Some(GameEvent::LevelCompleted(n)) => log::info!("Autopilot cleared level {}", n),
        Some(GameEvent::GameOver(n)) => log::info!("Autopilot lost on level {}", n),
        _ => log::warn!("Demo stopped before the level ended"),
    }
    log::info!("Rendered {} frames", renderer.frames);

    if !session.shutdown() {
        log::warn!("Progress could not be saved");
    }
}
