use thiserror::Error;

/// Rejected configuration or play field geometry
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no spawn points configured")]
    NoSpawnPoints,

    #[error("no target points configured")]
    NoTargetPoints,

    #[error("{kind} point {index} is outside the unit square: ({x_rel}, {y_rel})")]
    PointOutOfRange {
        kind: &'static str,
        index: usize,
        x_rel: f32,
        y_rel: f32,
    },

    #[error("midline must be a fraction in [0, 1], got {0}")]
    InvalidLine(f32),

    #[error("speed ramp time must be positive, got {0}")]
    InvalidRampTime(f32),

    #[error("max speed multiplier must be at least 1, got {0}")]
    InvalidSpeedMult(f32),

    #[error("spawn intervals must be positive: base {base}, min {min}")]
    InvalidSpawnInterval { base: f32, min: f32 },

    #[error("puck speed range must satisfy 0 < min <= max: [{min}, {max}]")]
    InvalidPuckSpeed { min: f32, max: f32 },

    #[error("starting lives must be at least 1")]
    NoLives,

    #[error("aspect ratio must be positive and finite: {w}:{h}")]
    InvalidAspect { w: f32, h: f32 },

    #[error("play field must have positive finite size: {width}x{height}")]
    InvalidField { width: f32, height: f32 },

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Rejected session state transition
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("session is already playing")]
    AlreadyPlaying,
}
