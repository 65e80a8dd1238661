//! Session state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`].

use serde::{Deserialize, Serialize};

use super::field::{Layout, PlayField};
use super::puck::Puck;
use super::ramp::DifficultyRamp;
use crate::config::GameConfig;
use crate::consts::GOAL_BANNER_SECS;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, nothing simulated yet
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Out of lives; score is frozen
    GameOver,
}

/// Half of the net (and the goalie position covering it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    /// Side a target x-coordinate belongs to
    #[inline]
    pub fn of_target(target_x: f32, mid_x: f32) -> Self {
        if target_x < mid_x { Side::Left } else { Side::Right }
    }

    pub fn toggled(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Outcome notifications for audio/UI. Fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A session began (fresh reset)
    Started,
    /// Goalie covered the puck's side
    Save { score: u64 },
    /// Puck went in on the open side
    Miss { lives: u32 },
    /// Last life lost
    GameOver { final_score: u64 },
}

/// Lives as shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LivesDisplay {
    Count(u32),
    Infinite,
}

/// "GOAL!" banner shown after a miss
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalBanner {
    pub visible: bool,
    pub timer: f32,
}

impl GoalBanner {
    /// Show (or re-show) the banner from zero
    pub fn trigger(&mut self) {
        self.visible = true;
        self.timer = 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        if self.visible {
            self.timer += dt;
            if self.timer >= GOAL_BANNER_SECS {
                self.visible = false;
            }
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub ramp: DifficultyRamp,
    /// Resolved against the current field
    pub layout: Layout,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// Seconds of play in this session
    pub elapsed: f32,
    pub speed_mult: f32,
    pub spawn_timer: f32,
    pub goalie: Side,
    /// Debug override: misses cost nothing
    pub infinite_lives: bool,
    pub pucks: Vec<Puck>,
    pub banner: GoalBanner,
    /// Pending notifications, drained by the presentation layer
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Idle state for an already validated config
    pub fn new(config: GameConfig, field: PlayField) -> Self {
        let layout = Layout::resolve(&config, field);
        let ramp = DifficultyRamp::from_config(&config);
        let lives = config.start_lives;
        Self {
            config,
            ramp,
            layout,
            phase: GamePhase::Idle,
            score: 0,
            lives,
            elapsed: 0.0,
            speed_mult: 1.0,
            spawn_timer: 0.0,
            goalie: Side::default(),
            infinite_lives: false,
            pucks: Vec::new(),
            banner: GoalBanner::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Reinitialize everything a new session starts from.
    /// The debug override survives; it belongs to the player, not the run.
    pub fn reset(&mut self) {
        self.layout = Layout::resolve(&self.config, self.layout.field);
        self.score = 0;
        self.lives = self.config.start_lives;
        self.elapsed = 0.0;
        self.speed_mult = 1.0;
        self.spawn_timer = 0.0;
        self.goalie = Side::default();
        self.pucks.clear();
        self.banner = GoalBanner::default();
        self.next_id = 1;
    }

    /// Allocate a new puck ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn lives_display(&self) -> LivesDisplay {
        if self.infinite_lives {
            LivesDisplay::Infinite
        } else {
            LivesDisplay::Count(self.lives)
        }
    }
}
