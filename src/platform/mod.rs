//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (dt from timestamps)
//! - Input forwarding
//! - Audio playback

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::MAX_FRAME_DT;

/// Turns frame timestamps into simulation deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame, clamped to `[0, MAX_FRAME_DT]`.
    /// The first frame yields zero.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        crate::sanitize_dt(dt).min(MAX_FRAME_DT)
    }

    /// Forget the last timestamp (e.g. after the tab was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
