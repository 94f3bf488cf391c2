//! Frame timing diagnostics
//!
//! Pacing itself is a fixed sleep in the loop; this only measures what the
//! loop actually achieves.

use std::time::{Duration, Instant};

/// Frames per fps report
pub const FPS_WINDOW: u64 = 500;

/// Counts frames and reports the average rate once per window.
#[derive(Debug, Clone)]
pub struct FrameClock {
    window_start: Instant,
    frame_index: u64,
    window: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_window(FPS_WINDOW)
    }

    pub fn with_window(window: u64) -> Self {
        Self {
            window_start: Instant::now(),
            frame_index: 0,
            window: window.max(1),
        }
    }

    /// Frames ticked so far
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Count one presented frame.
    ///
    /// Returns the average fps each time a full window of frames completes.
    pub fn tick(&mut self) -> Option<f32> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<f32> {
        self.frame_index = self.frame_index.wrapping_add(1);
        if self.frame_index % self.window != 0 {
            return None;
        }

        let elapsed = now.saturating_duration_since(self.window_start);
        self.window_start = now;
        Some(fps(self.window, elapsed))
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

fn fps(frames: u64, elapsed: Duration) -> f32 {
    let secs = elapsed.as_secs_f32();
    if secs <= 0.0 {
        return 0.0;
    }
    frames as f32 / secs
}
