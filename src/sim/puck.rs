//! Puck entity: straight-line, constant-velocity projectile

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::field::PlayField;
use super::state::Side;
use crate::consts::FADING_OPACITY;

/// A puck traveling from its spawn point toward a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puck {
    pub id: u32,
    pub pos: Vec2,
    pub target: Vec2,
    pub vel: Vec2,
    /// Saved this frame; removed on the next advance
    pub fading: bool,
    pub alive: bool,
    /// Seconds since spawn
    pub age: f32,
}

impl Puck {
    /// Aim a puck at `target`. A zero-length path yields a stationary puck.
    pub fn new(id: u32, spawn: Vec2, target: Vec2, base_speed: f32) -> Self {
        let dir = (target - spawn).normalize_or_zero();
        Self {
            id,
            pos: spawn,
            target,
            vel: dir * base_speed,
            fading: false,
            alive: true,
            age: 0.0,
        }
    }

    /// Integrate one step. A fading puck dies here, after one extra frame.
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.age += dt;
        if self.fading {
            self.alive = false;
        }
    }

    /// Whether this puck can still be judged at the line
    #[inline]
    pub fn is_active(&self) -> bool {
        self.alive && !self.fading
    }

    /// Side of the net this puck is aimed at
    #[inline]
    pub fn target_side(&self, mid_x: f32) -> Side {
        Side::of_target(self.target.x, mid_x)
    }

    /// Normalized opacity for rendering
    pub fn opacity(&self) -> f32 {
        if !self.alive {
            0.0
        } else if self.fading {
            FADING_OPACITY
        } else {
            1.0
        }
    }

    /// Can never reach the line at `line_y` again.
    ///
    /// A puck with no vertical motion never crosses. Otherwise it only goes
    /// stale once it has left the field on the far side of the line and is
    /// still moving away. Age never matters.
    pub fn is_stale(&self, field: PlayField, line_y: f32) -> bool {
        if self.vel.y == 0.0 {
            return true;
        }
        let outside = self.pos.x < 0.0
            || self.pos.x > field.width
            || self.pos.y < 0.0
            || self.pos.y > field.height;
        outside && (self.pos.y - line_y) * self.vel.y > 0.0
    }

    /// Rescale into a resized field, keeping the heading toward the target
    pub fn rescale(&mut self, sx: f32, sy: f32) {
        let scale = Vec2::new(sx, sy);
        self.pos *= scale;
        self.target *= scale;
        self.vel *= scale;
    }
}
