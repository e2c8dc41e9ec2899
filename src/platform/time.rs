//! Monotonic millisecond clock for the frame loop
//!
//! The simulation only looks at differences between timestamps, so a
//! simulated clock (fixed step per frame) and the wall clock are
//! interchangeable.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone)]
pub enum Clock {
    /// Wall clock; frames are paced to the target rate
    Realtime {
        start: Instant,
        frame: Duration,
        last_frame: Instant,
    },
    /// Advances by a fixed step per frame, never sleeps
    Simulated { now_ms: u64, step_ms: u64 },
}

impl Clock {
    pub fn realtime(frame_ms: u64) -> Self {
        let now = Instant::now();
        Self::Realtime {
            start: now,
            frame: Duration::from_millis(frame_ms),
            last_frame: now,
        }
    }

    pub fn simulated(step_ms: u64) -> Self {
        Self::Simulated { now_ms: 0, step_ms }
    }

    /// Milliseconds since the clock started
    pub fn now_ms(&self) -> u64 {
        match self {
            Clock::Realtime { start, .. } => start.elapsed().as_millis() as u64,
            Clock::Simulated { now_ms, .. } => *now_ms,
        }
    }

    /// Move to the next frame. The wall clock sleeps off what is left of the
    /// frame budget.
    pub fn advance_frame(&mut self) {
        match self {
            Clock::Realtime {
                frame, last_frame, ..
            } => {
                let elapsed = last_frame.elapsed();
                if elapsed < *frame {
                    std::thread::sleep(*frame - elapsed);
                }
                *last_frame = Instant::now();
            }
            Clock::Simulated { now_ms, step_ms } => *now_ms += *step_ms,
        }
    }
}

/// Seed derived from the wall clock, for runs without a configured seed
pub fn seed_from_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_clock_steps() {
        let mut clock = Clock::simulated(16);
        assert_eq!(clock.now_ms(), 0);
        clock.advance_frame();
        clock.advance_frame();
        assert_eq!(clock.now_ms(), 32);
    }

    #[test]
    fn realtime_clock_is_monotonic() {
        let mut clock = Clock::realtime(1);
        let a = clock.now_ms();
        clock.advance_frame();
        clock.advance_frame();
        assert!(clock.now_ms() >= a);
    }
}
