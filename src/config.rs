//! Data-driven game layout and difficulty
//!
//! Every gameplay constant lives in [`GameConfig`] so that one engine can run
//! any rink variant. Coordinates are fractions of the play field.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::field::NormPoint;

/// Complete tuning for one game variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Puck origins
    pub spawns: Vec<NormPoint>,
    /// Puck destinations
    pub targets: Vec<NormPoint>,
    /// Midline height as a fraction of field height
    pub line_y_rel: f32,
    /// Lives at session start
    pub start_lives: u32,
    /// Speed multiplier reached at the end of the ramp
    pub max_speed_mult: f32,
    /// Seconds until the ramp tops out
    pub speed_ramp_time: f32,
    /// Spawn interval at multiplier 1 (seconds)
    pub base_spawn_interval: f32,
    /// Spawn interval floor (seconds)
    pub min_spawn_interval: f32,
    /// Base puck speed range (px/s, before the multiplier)
    pub puck_speed_min: f32,
    pub puck_speed_max: f32,
    /// Puck draw radius (px), for the presentation layer
    pub puck_radius: f32,
    /// Field aspect ratio
    pub aspect_w: f32,
    pub aspect_h: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawns: vec![NormPoint::new(0.288, 0.966), NormPoint::new(0.712, 0.962)],
            targets: vec![NormPoint::new(0.434, 0.627), NormPoint::new(0.57, 0.627)],
            line_y_rel: 0.625,
            start_lives: 3,
            max_speed_mult: 5.0,
            speed_ramp_time: 120.0,
            base_spawn_interval: 0.9,
            min_spawn_interval: 0.35,
            puck_speed_min: 260.0,
            puck_speed_max: 360.0,
            puck_radius: 14.0,
            aspect_w: 16.0,
            aspect_h: 9.0,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawns.is_empty() {
            return Err(ConfigError::NoSpawnPoints);
        }
        if self.targets.is_empty() {
            return Err(ConfigError::NoTargetPoints);
        }
        check_points("spawn", &self.spawns)?;
        check_points("target", &self.targets)?;

        if !(0.0..=1.0).contains(&self.line_y_rel) {
            return Err(ConfigError::InvalidLine(self.line_y_rel));
        }
        if self.start_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if !(self.speed_ramp_time.is_finite() && self.speed_ramp_time > 0.0) {
            return Err(ConfigError::InvalidRampTime(self.speed_ramp_time));
        }
        if !(self.max_speed_mult.is_finite() && self.max_speed_mult >= 1.0) {
            return Err(ConfigError::InvalidSpeedMult(self.max_speed_mult));
        }

        let intervals_ok = [self.base_spawn_interval, self.min_spawn_interval]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);
        if !intervals_ok {
            return Err(ConfigError::InvalidSpawnInterval {
                base: self.base_spawn_interval,
                min: self.min_spawn_interval,
            });
        }

        let speeds_ok = self.puck_speed_min.is_finite()
            && self.puck_speed_max.is_finite()
            && self.puck_speed_min > 0.0
            && self.puck_speed_min <= self.puck_speed_max;
        if !speeds_ok {
            return Err(ConfigError::InvalidPuckSpeed {
                min: self.puck_speed_min,
                max: self.puck_speed_max,
            });
        }

        let aspect_ok = [self.aspect_w, self.aspect_h]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);
        if !aspect_ok {
            return Err(ConfigError::InvalidAspect {
                w: self.aspect_w,
                h: self.aspect_h,
            });
        }

        Ok(())
    }
}

fn check_points(kind: &'static str, points: &[NormPoint]) -> Result<(), ConfigError> {
    match points.iter().position(|p| !p.in_unit_square()) {
        Some(index) => Err(ConfigError::PointOutOfRange {
            kind,
            index,
            x_rel: points[index].x_rel,
            y_rel: points[index].y_rel,
        }),
        None => Ok(()),
    }
}
