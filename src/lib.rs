//! Goalie Clicker - a reflex arcade goalie game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pucks, line judging, session state)
//! - `config`: Data-driven layout and difficulty tuning
//! - `audio`: Outcome events to sound cues
//! - `platform`: Browser bindings (wasm32 only)

pub mod audio;
pub mod config;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use config::GameConfig;
pub use error::{ConfigError, SessionError};
pub use settings::Settings;
pub use sim::{GameEvent, GamePhase, GameSession, Side, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Nominal frame rate used by headless runs
    pub const FPS: u32 = 60;
    /// Frame timestep at the nominal frame rate
    pub const FRAME_DT: f32 = 1.0 / FPS as f32;
    /// Longest frame the platform layer will feed into a tick
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// How long the "GOAL!" banner stays up after a miss (seconds)
    pub const GOAL_BANNER_SECS: f32 = 2.0;

    /// Fraction of the viewport the play field may occupy
    pub const VIEWPORT_FILL: f32 = 0.95;

    /// Opacity of a saved puck during its last frame
    pub const FADING_OPACITY: f32 = 0.5;
}

/// Clamp a frame delta to something safe to integrate.
///
/// Negative and non-finite values become zero so they never reach positions.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}
