//! Per-frame simulation step while a level is being played
//!
//! Order within a frame: bin movement, optional swap, spawning, falling,
//! then collision and miss resolution.

use super::collision;
use super::state::{GameEvent, Playfield, TrashCategory};
use crate::Settings;
use crate::consts::*;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held direction: -1 left, 1 right, 0 none
    pub move_dir: f32,
    /// Steer toward this x while the pointer button is held
    pub pointer_x: Option<f32>,
    /// Swap bin category (subject to cooldown)
    pub swap: bool,
    /// Demo mode - the computer plays
    pub autopilot: bool,
}

/// Advance the playfield by one frame
pub fn tick(
    field: &mut Playfield,
    input: &TickInput,
    now_ms: u64,
    settings: &Settings,
    events: &mut Vec<GameEvent>,
) {
    field.frames += 1;

    let input = if input.autopilot {
        autopilot(field)
    } else {
        input.clone()
    };

    // Movement: pointer steering overrides keys
    let speed = settings.player_speed;
    if let Some(target_x) = input.pointer_x {
        let offset = target_x - field.player.rect().center_x();
        if offset.abs() > POINTER_DEAD_ZONE {
            field.player.move_by(offset.clamp(-speed, speed));
        }
    } else if input.move_dir != 0.0 {
        field.player.move_by(input.move_dir.signum() * speed);
    }

    if input.swap && field.player.try_swap(now_ms, settings.swap_cooldown_ms) {
        events.push(GameEvent::Swapped(field.player.category));
    }

    if let Some(category) = field.spawn_due(now_ms) {
        log::trace!("Spawned {} at frame {}", category.as_str(), field.frames);
    }

    for item in &mut field.trash {
        item.fall();
    }

    let outcomes = collision::resolve(
        &mut field.player,
        &mut field.trash,
        &mut field.stats,
        LID_DEPTH,
    );
    events.extend(outcomes.into_iter().map(GameEvent::Resolved));
}

/// Pick input for the demo player: chase the lowest item that can still land
/// in the lid and swap to its category.
pub fn autopilot(field: &Playfield) -> TickInput {
    let lid_line = field.player.lid_line();
    let target = field
        .trash
        .iter()
        .filter(|t| t.rect().bottom() <= lid_line)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(target) = target else {
        return TickInput {
            pointer_x: Some(SCREEN_WIDTH / 2.0),
            ..Default::default()
        };
    };

    let wants = target.category;
    TickInput {
        pointer_x: Some(target.rect().center_x()),
        swap: wants != TrashCategory::Bonus && wants != field.player.category,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Resolution;
    use crate::sim::level::get_level;
    use crate::sim::state::Trash;

    fn field(level: u32) -> Playfield {
        Playfield::new(get_level(level), STARTING_HEALTH, 12345)
    }

    #[test]
    fn keys_move_the_bin() {
        let settings = Settings::default();
        let mut f = field(1);
        let start = f.player.x;
        let mut events = Vec::new();
        let input = TickInput {
            move_dir: 1.0,
            ..Default::default()
        };
        tick(&mut f, &input, 0, &settings, &mut events);
        assert_eq!(f.player.x, start + settings.player_speed);

        let input = TickInput {
            move_dir: -1.0,
            ..Default::default()
        };
        tick(&mut f, &input, 16, &settings, &mut events);
        tick(&mut f, &input, 32, &settings, &mut events);
        assert_eq!(f.player.x, start - settings.player_speed);
    }

    #[test]
    fn pointer_steering_stops_inside_dead_zone() {
        let settings = Settings::default();
        let mut f = field(1);
        let mut events = Vec::new();
        let center = f.player.rect().center_x();
        let input = TickInput {
            pointer_x: Some(center + 4.0),
            ..Default::default()
        };
        tick(&mut f, &input, 0, &settings, &mut events);
        assert_eq!(f.player.rect().center_x(), center);

        let input = TickInput {
            pointer_x: Some(center + 40.0),
            ..Default::default()
        };
        for frame in 1..10 {
            tick(&mut f, &input, frame * FRAME_MS, &settings, &mut events);
        }
        assert!((f.player.rect().center_x() - (center + 40.0)).abs() <= POINTER_DEAD_ZONE);
    }

    #[test]
    fn swap_emits_event_once_per_cooldown() {
        let settings = Settings::default();
        let mut f = field(1);
        let mut events = Vec::new();
        let input = TickInput {
            swap: true,
            ..Default::default()
        };
        tick(&mut f, &input, 1_000, &settings, &mut events);
        tick(&mut f, &input, 1_016, &settings, &mut events);
        assert_eq!(events, vec![GameEvent::Swapped(TrashCategory::Inorganic)]);
        assert_eq!(f.player.category, TrashCategory::Inorganic);
    }

    #[test]
    fn items_fall_then_resolve() {
        let settings = Settings::default();
        let mut f = field(1);
        let mut events = Vec::new();
        let x = f.player.rect().center_x() - TRASH_SIZE / 2.0;
        f.trash.push(Trash::new(99, TrashCategory::Organic, x, 6.0));

        let mut now = 0;
        while !f.trash.iter().all(|t| t.id != 99) {
            now += FRAME_MS;
            tick(&mut f, &TickInput::default(), now, &settings, &mut events);
            assert!(now < 10_000, "item never resolved");
        }
        assert!(events.contains(&GameEvent::Resolved(Resolution::Caught(TrashCategory::Organic))));
        assert_eq!(f.stats.caught, 1);
    }

    #[test]
    fn level_spawns_everything_and_clears() {
        let settings = Settings::default();
        let mut f = field(1);
        f.player.health = 1_000;
        let mut events = Vec::new();
        let mut now = 0;
        while !f.is_cleared() {
            now += FRAME_MS;
            tick(&mut f, &TickInput::default(), now, &settings, &mut events);
            assert!(now < 200_000, "level never cleared");
        }
        assert_eq!(f.spawner.spawned_count, f.level.total_trash);
        let bonus_outcomes = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    GameEvent::Resolved(
                        Resolution::Healed | Resolution::BonusDeflected | Resolution::BonusLost
                    )
                )
            })
            .count() as u32;
        assert_eq!(f.stats.total_resolved + bonus_outcomes, f.level.total_trash);
    }

    #[test]
    fn autopilot_chases_lowest_catchable_item() {
        let mut f = field(1);
        f.trash.push(Trash::new(1, TrashCategory::Inorganic, 100.0, 3.0));
        let mut low = Trash::new(2, TrashCategory::Organic, 600.0, 3.0);
        low.pos.y = 200.0;
        f.trash.push(low);

        let input = autopilot(&f);
        assert_eq!(input.pointer_x, Some(600.0 + TRASH_SIZE / 2.0));
        assert!(!input.swap);

        f.player.category = TrashCategory::Inorganic;
        assert!(autopilot(&f).swap);
    }

    #[test]
    fn autopilot_ignores_items_below_the_lid() {
        let mut f = field(1);
        let mut sunk = Trash::new(1, TrashCategory::Inorganic, 100.0, 3.0);
        sunk.pos.y = f.player.lid_line();
        f.trash.push(sunk);
        let input = autopilot(&f);
        assert_eq!(input.pointer_x, Some(SCREEN_WIDTH / 2.0));
        assert!(!input.swap);
    }
}
