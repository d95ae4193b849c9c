//! Frame clock and tick limiter
//!
//! Measures wall time between frames and tells the event loop when the next
//! frame is due.

use std::time::{Duration, Instant};

use crate::consts::MAX_FRAME_DT;

#[derive(Debug)]
pub struct FrameClock {
    /// Minimum spacing between frames
    interval: Duration,
    /// When the last frame started
    last_frame: Instant,
}

impl FrameClock {
    /// Create a clock capped at `fps` frames per second
    pub fn new(fps: u32) -> Self {
        Self::starting_at(fps, Instant::now())
    }

    fn starting_at(fps: u32, now: Instant) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            last_frame: now,
        }
    }

    /// Seconds since the previous frame, clamped to `MAX_FRAME_DT`
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        if dt > MAX_FRAME_DT {
            log::debug!("Frame took {:.3}s, clamping to {}", dt, MAX_FRAME_DT);
        }
        dt.min(MAX_FRAME_DT)
    }

    /// Earliest instant the next frame should run
    pub fn next_deadline(&self) -> Instant {
        self.last_frame + self.interval
    }
}
