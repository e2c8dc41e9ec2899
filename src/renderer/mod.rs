//! Draw requests
//!
//! The game describes each frame as a flat list of draw commands; a backend
//! turns them into pixels. Nothing is read back.

pub mod frame;

pub use frame::compose;

use glam::Vec2;

use crate::Rect;
use crate::sim::TrashCategory;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    /// Organic
    pub const GREEN: Rgb = Rgb(50, 200, 50);
    /// Inorganic
    pub const BLUE: Rgb = Rgb(50, 50, 200);
    pub const RED: Rgb = Rgb(200, 50, 50);
    pub const GOLD: Rgb = Rgb(255, 215, 0);

    pub fn for_category(category: TrashCategory) -> Rgb {
        match category {
            TrashCategory::Organic => Rgb::GREEN,
            TrashCategory::Inorganic => Rgb::BLUE,
            TrashCategory::Bonus => Rgb::GOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundId {
    Menu,
    Game,
}

/// Image handles the backend knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    Bin(TrashCategory),
    Trash(TrashCategory),
    Heart,
    Cursor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `pos` is the top-left corner
    TopLeft,
    /// `pos` is the center
    Center,
}

/// Values shown on the in-game HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub health: i32,
    pub level: u32,
    pub caught: u32,
    pub total_resolved: u32,
    pub ratio_percent: u32,
    pub bin: TrashCategory,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb),
    Background(BackgroundId),
    Sprite {
        sprite: SpriteId,
        /// Top-left
        pos: Vec2,
    },
    Text {
        text: String,
        size: u32,
        color: Rgb,
        pos: Vec2,
        align: Align,
    },
    Button {
        rect: Rect,
        label: String,
        hovered: bool,
        locked: bool,
    },
    /// Translucent black over the whole screen
    Dim { alpha: u8 },
}

impl DrawCommand {
    pub fn text(
        text: impl Into<String>,
        size: u32,
        color: Rgb,
        x: f32,
        y: f32,
        align: Align,
    ) -> Self {
        DrawCommand::Text {
            text: text.into(),
            size,
            color,
            pos: Vec2::new(x, y),
            align,
        }
    }
}

/// One frame of draw commands, in painter's order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    /// Present while a level is on screen
    pub hud: Option<Hud>,
}

impl Frame {
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// All text strings in the frame
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Something that can show a frame
pub trait Renderer {
    fn present(&mut self, frame: &Frame);
}

/// Renderer for runs without a window: counts frames and logs the HUD
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub last_hud: Option<Hud>,
}

impl Renderer for HeadlessRenderer {
    fn present(&mut self, frame: &Frame) {
        self.frames += 1;
        if frame.hud != self.last_hud {
            if let Some(hud) = &frame.hud {
                log::debug!(
                    "HUD level {} hp {} caught {}/{} ({}%) bin {}",
                    hud.level,
                    hud.health,
                    hud.caught,
                    hud.total_resolved,
                    hud.ratio_percent,
                    hud.bin.as_str()
                );
            }
            self.last_hud = frame.hud;
        }
    }
}
