//! Play field geometry and the spawn/target registry
//!
//! Layout data is stored as fractions of the field and resolved to absolute
//! field coordinates (origin top-left, y down) whenever the field changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::VIEWPORT_FILL;
use crate::error::ConfigError;

/// A point expressed as fractions of the field size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormPoint {
    pub x_rel: f32,
    pub y_rel: f32,
}

impl NormPoint {
    pub const fn new(x_rel: f32, y_rel: f32) -> Self {
        Self { x_rel, y_rel }
    }

    pub fn in_unit_square(&self) -> bool {
        (0.0..=1.0).contains(&self.x_rel) && (0.0..=1.0).contains(&self.y_rel)
    }

    /// Absolute position inside `field`
    #[inline]
    pub fn resolve(&self, field: PlayField) -> Vec2 {
        Vec2::new(self.x_rel * field.width, self.y_rel * field.height)
    }
}

/// Play field size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
}

/// Placement of the play field inside a viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FieldRect {
    pub fn field(&self) -> PlayField {
        PlayField {
            width: self.width,
            height: self.height,
        }
    }
}

impl PlayField {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(ConfigError::InvalidField { width, height });
        }
        Ok(Self { width, height })
    }

    /// Horizontal center; targets left of it belong to the left goalie
    #[inline]
    pub fn mid_x(&self) -> f32 {
        self.width * 0.5
    }

    /// Largest field with the given aspect ratio that fits in the viewport,
    /// centered. Dimensions are whole pixels.
    pub fn fit(viewport_w: f32, viewport_h: f32, aspect_w: f32, aspect_h: f32) -> FieldRect {
        let max_w = (viewport_w * VIEWPORT_FILL).floor();
        let max_h = (viewport_h * VIEWPORT_FILL).floor();

        let mut width = max_w;
        let mut height = (width * aspect_h / aspect_w).floor();
        if height > max_h {
            height = max_h;
            width = (height * aspect_w / aspect_h).floor();
        }

        FieldRect {
            x: (viewport_w - width) / 2.0,
            y: (viewport_h - height) / 2.0,
            width,
            height,
        }
    }
}

/// Resolve normalized points against a field
pub fn resolve(points: &[NormPoint], field: PlayField) -> Vec<Vec2> {
    points.iter().map(|p| p.resolve(field)).collect()
}

/// Absolute spawn, target and midline coordinates for the current field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub field: PlayField,
    pub spawns: Vec<Vec2>,
    pub targets: Vec<Vec2>,
    pub line_y: f32,
}

impl Layout {
    pub fn resolve(config: &GameConfig, field: PlayField) -> Self {
        Self {
            field,
            spawns: resolve(&config.spawns, field),
            targets: resolve(&config.targets, field),
            line_y: config.line_y_rel * field.height,
        }
    }

    #[inline]
    pub fn mid_x(&self) -> f32 {
        self.field.mid_x()
    }
}
