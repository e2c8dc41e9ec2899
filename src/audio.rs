//! Sound cue requests
//!
//! The game only names the sound it wants; synthesis belongs to a backend.
//! Each cue carries its tone parameters so any backend can render it
//! without sample files.

use std::str::FromStr;

use thiserror::Error;

use crate::Settings;
use crate::sim::{GameEvent, Resolution};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Item sorted into the right bin
    Catch,
    /// Bin category switched
    Swap,
    /// Damage taken, or an action refused
    Hurt,
    /// Bonus item healed the bin
    Bonus,
    /// Menu button pressed
    Click,
}

/// Oscillator shape for a tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Saw,
    Noise,
}

/// Synthesis parameters: a single oscillator with a linear fade-out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub frequency_hz: f32,
    pub duration_s: f32,
    /// Peak amplitude (0.0 - 1.0) before volume settings
    pub volume: f32,
}

impl SoundCue {
    pub const ALL: [SoundCue; 5] = [
        SoundCue::Catch,
        SoundCue::Swap,
        SoundCue::Hurt,
        SoundCue::Bonus,
        SoundCue::Click,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Catch => "catch",
            SoundCue::Swap => "swap",
            SoundCue::Hurt => "hurt",
            SoundCue::Bonus => "bonus",
            SoundCue::Click => "click",
        }
    }

    pub fn tone(&self) -> Tone {
        let (waveform, frequency_hz, duration_s, volume) = match self {
            SoundCue::Catch => (Waveform::Square, 880.0, 0.1, 0.3),
            SoundCue::Swap => (Waveform::Sine, 600.0, 0.05, 0.4),
            SoundCue::Hurt => (Waveform::Saw, 150.0, 0.3, 0.4),
            SoundCue::Bonus => (Waveform::Sine, 1200.0, 0.2, 0.3),
            SoundCue::Click => (Waveform::Noise, 500.0, 0.05, 0.2),
        };
        Tone {
            waveform,
            frequency_hz,
            duration_s,
            volume,
        }
    }

    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Resolved(resolution) => match resolution {
                Resolution::Caught(_) => Some(SoundCue::Catch),
                Resolution::Healed => Some(SoundCue::Bonus),
                Resolution::Mismatch(_) | Resolution::SideHit(_) | Resolution::Missed(_) => {
                    Some(SoundCue::Hurt)
                }
                Resolution::BonusDeflected | Resolution::BonusLost => None,
            },
            GameEvent::Swapped(_) => Some(SoundCue::Swap),
            GameEvent::MenuClick => Some(SoundCue::Click),
            GameEvent::Denied => Some(SoundCue::Hurt),
            GameEvent::LevelStarted(_)
            | GameEvent::LevelCompleted(_)
            | GameEvent::LevelUnlocked(_)
            | GameEvent::GameOver(_) => None,
        }
    }
}

impl FromStr for SoundCue {
    type Err = UnknownCue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoundCue::ALL
            .into_iter()
            .find(|cue| cue.as_str() == s)
            .ok_or_else(|| UnknownCue(s.to_string()))
    }
}

/// A cue name that matches no `SoundCue`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sound cue: {0}")]
pub struct UnknownCue(pub String);

/// Something that can actually make noise
pub trait AudioBackend {
    /// Fire and forget
    fn play_tone(&mut self, cue: SoundCue, tone: &Tone, volume: f32);
}

/// Backend that only logs what it would play
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_tone(&mut self, cue: SoundCue, tone: &Tone, volume: f32) {
        log::debug!(
            "sfx {} ({:?} {}Hz {}s vol {:.2})",
            cue.as_str(),
            tone.waveform,
            tone.frequency_hz,
            tone.duration_s,
            tone.volume * volume
        );
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    /// A backend of None disables audio
    pub fn new(backend: Option<Box<dyn AudioBackend>>, settings: &Settings) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        let mut manager = Self {
            backend,
            master_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,
        };
        manager.apply_settings(settings);
        manager
    }

    /// Take volume and mute from settings (0.0 - 1.0 volumes)
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.muted = settings.muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound cue
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        backend.play_tone(cue, &cue.tone(), vol);
    }

    /// Play the cue of every event that has one
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(SoundCue::for_event) {
            self.play(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TrashCategory;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct Recorder(Rc<RefCell<Vec<(SoundCue, f32)>>>);

    impl AudioBackend for Recorder {
        fn play_tone(&mut self, cue: SoundCue, _tone: &Tone, volume: f32) {
            self.0.borrow_mut().push((cue, volume));
        }
    }

    #[test]
    fn cue_names_parse() {
        for cue in SoundCue::ALL {
            assert_eq!(cue.as_str().parse::<SoundCue>(), Ok(cue));
        }
        assert_eq!("boom".parse::<SoundCue>(), Err(UnknownCue("boom".to_string())));
    }

    #[test]
    fn events_map_to_cues() {
        use TrashCategory::*;
        let cue = |e: GameEvent| SoundCue::for_event(&e);
        assert_eq!(cue(GameEvent::Resolved(Resolution::Caught(Organic))), Some(SoundCue::Catch));
        assert_eq!(cue(GameEvent::Resolved(Resolution::Missed(Inorganic))), Some(SoundCue::Hurt));
        assert_eq!(cue(GameEvent::Resolved(Resolution::Healed)), Some(SoundCue::Bonus));
        assert_eq!(cue(GameEvent::Resolved(Resolution::BonusLost)), None);
        assert_eq!(cue(GameEvent::Denied), Some(SoundCue::Hurt));
        assert_eq!(cue(GameEvent::Swapped(Organic)), Some(SoundCue::Swap));
        assert_eq!(cue(GameEvent::LevelCompleted(1)), None);
    }

    #[test]
    fn manager_applies_volume_and_mute() {
        let recorder = Recorder::default();
        let log = recorder.0.clone();
        let mut audio = AudioManager::new(Some(Box::new(recorder)), &Settings::default());

        audio.play_events(&[GameEvent::MenuClick, GameEvent::LevelStarted(1)]);
        {
            let played = log.borrow();
            assert_eq!(played.len(), 1);
            assert_eq!(played[0].0, SoundCue::Click);
            assert!((played[0].1 - 0.8).abs() < 1e-6);
        }

        let quieter = Settings {
            master_volume: 0.5,
            sfx_volume: 2.0,
            ..Settings::default()
        };
        audio.apply_settings(&quieter);
        audio.play(SoundCue::Catch);
        {
            let played = log.borrow();
            assert_eq!(played.len(), 2);
            assert!((played[1].1 - 0.5).abs() < 1e-6);
        }

        audio.apply_settings(&Settings {
            muted: true,
            ..Settings::default()
        });
        audio.play(SoundCue::Catch);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn missing_backend_is_silent() {
        let mut audio = AudioManager::new(None, &Settings::default());
        audio.play(SoundCue::Hurt);
    }
}
