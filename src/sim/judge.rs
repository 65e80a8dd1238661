//! Midline crossing detection and save/miss resolution
//!
//! Pure functions; the tick applies their results to the session.

use serde::{Deserialize, Serialize};

use super::state::Side;

/// Result of a puck reaching the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Save,
    Miss,
}

/// Did the puck move from one side of the line to the other this frame?
///
/// Landing exactly on the line counts as crossing; starting on it does not.
#[inline]
pub fn crosses_line(prev_y: f32, new_y: f32, line_y: f32) -> bool {
    (prev_y < line_y && new_y >= line_y) || (prev_y > line_y && new_y <= line_y)
}

/// Save iff the goalie covers the puck's side
#[inline]
pub fn judge(goalie: Side, target_side: Side) -> Outcome {
    if goalie == target_side {
        Outcome::Save
    } else {
        Outcome::Miss
    }
}
