//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded (or injected) RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod field;
pub mod judge;
pub mod puck;
pub mod ramp;
pub mod session;
pub mod state;
pub mod tick;

pub use field::{FieldRect, Layout, NormPoint, PlayField};
pub use judge::{Outcome, crosses_line, judge};
pub use puck::Puck;
pub use ramp::DifficultyRamp;
pub use session::{GameSession, PuckView, Snapshot};
pub use state::{GameEvent, GamePhase, GameState, GoalBanner, LivesDisplay, Side};
pub use tick::{spawn_puck, tick};
