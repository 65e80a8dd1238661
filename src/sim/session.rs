//! Session facade used by the presentation layer
//!
//! Owns the [`GameState`] and the random source, and exposes the handful of
//! operations a frontend needs: start, tick, goalie control, resize,
//! snapshot and event draining.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::field::{Layout, PlayField};
use super::state::{GameEvent, GamePhase, GameState, LivesDisplay, Side};
use super::tick::tick;
use crate::config::GameConfig;
use crate::error::{ConfigError, SessionError};
use crate::sanitize_dt;

/// A puck as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PuckView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
}

/// Read-only view of the session for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: LivesDisplay,
    pub goalie: Side,
    pub elapsed: f32,
    pub speed_mult: f32,
    pub goal_banner: bool,
    pub pucks: Vec<PuckView>,
    /// Debug overlay geometry
    pub spawns: Vec<Vec2>,
    pub targets: Vec<Vec2>,
    pub line_y: f32,
}

/// One player's game, from start screen through game over and restarts
pub struct GameSession<R = Pcg32> {
    state: GameState,
    rng: R,
}

impl GameSession<Pcg32> {
    /// Session with a seeded deterministic RNG
    pub fn new(config: GameConfig, field: PlayField, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, field, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    /// Session with a caller-supplied random source
    pub fn with_rng(config: GameConfig, field: PlayField, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        // Re-check in case the field was built by hand
        let field = PlayField::new(field.width, field.height)?;
        Ok(Self {
            state: GameState::new(config, field),
            rng,
        })
    }

    /// Begin a fresh run from the start or game-over screen
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.state.phase == GamePhase::Playing {
            log::warn!("start ignored: session already playing");
            return Err(SessionError::AlreadyPlaying);
        }
        self.state.reset();
        self.state.phase = GamePhase::Playing;
        self.state.events.push(GameEvent::Started);
        log::info!(
            "Session started: {} lives, field {}x{}",
            self.state.lives,
            self.state.layout.field.width,
            self.state.layout.field.height
        );
        Ok(())
    }

    /// Advance one frame. Bad `dt` is treated as zero.
    pub fn tick(&mut self, dt: f32) {
        let clean = sanitize_dt(dt);
        if clean != dt {
            log::debug!("clamped frame dt {} to {}", dt, clean);
        }
        tick(&mut self.state, &mut self.rng, clean);
    }

    pub fn set_goalie_side(&mut self, side: Side) {
        self.state.goalie = side;
    }

    pub fn toggle_goalie_side(&mut self) {
        self.state.goalie = self.state.goalie.toggled();
    }

    pub fn set_debug_infinite_lives(&mut self, enabled: bool) {
        if self.state.infinite_lives != enabled {
            log::info!("Infinite lives: {}", enabled);
        }
        self.state.infinite_lives = enabled;
    }

    /// Apply a new field size. Layout and live pucks move together, so the
    /// next tick sees a consistent geometry.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        let field = PlayField::new(width, height)?;
        let old = self.state.layout.field;
        let (sx, sy) = (field.width / old.width, field.height / old.height);

        self.state.layout = Layout::resolve(&self.state.config, field);
        for puck in &mut self.state.pucks {
            puck.rescale(sx, sy);
        }
        log::debug!("field resized to {}x{}", width, height);
        Ok(())
    }

    /// Take all notifications raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        Snapshot {
            phase: state.phase,
            score: state.score,
            lives: state.lives_display(),
            goalie: state.goalie,
            elapsed: state.elapsed,
            speed_mult: state.speed_mult,
            goal_banner: state.banner.visible,
            pucks: state
                .pucks
                .iter()
                .map(|p| PuckView {
                    id: p.id,
                    x: p.pos.x,
                    y: p.pos.y,
                    opacity: p.opacity(),
                })
                .collect(),
            spawns: state.layout.spawns.clone(),
            targets: state.layout.targets.clone(),
            line_y: state.layout.line_y,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn lives(&self) -> u32 {
        self.state.lives
    }

    pub fn goalie_side(&self) -> Side {
        self.state.goalie
    }

    pub fn config(&self) -> &GameConfig {
        &self.state.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for tools and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::NormPoint;
    use crate::sim::puck::Puck;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    /// One lane from (0, 0.85H) to (0.3W, 0.45H), midline at 0.5H,
    /// with spawning pushed out of the way
    fn lane_config() -> GameConfig {
        GameConfig {
            spawns: vec![NormPoint::new(0.0, 0.85)],
            targets: vec![NormPoint::new(0.3, 0.45)],
            line_y_rel: 0.5,
            base_spawn_interval: 1000.0,
            min_spawn_interval: 1000.0,
            puck_speed_min: 300.0,
            puck_speed_max: 300.0,
            ..Default::default()
        }
    }

    fn lane_session() -> GameSession {
        let field = PlayField::new(1000.0, 1000.0).unwrap();
        let mut session = GameSession::new(lane_config(), field, 42).unwrap();
        session.start().unwrap();
        session.drain_events();
        session
    }

    fn push_lane_puck(session: &mut GameSession) {
        let state = session.state_mut();
        let id = state.next_entity_id();
        let (spawn, target) = (state.layout.spawns[0], state.layout.targets[0]);
        state.pucks.push(Puck::new(id, spawn, target, 300.0));
    }

    #[test]
    fn test_new_session_is_idle() {
        let field = PlayField::new(800.0, 450.0).unwrap();
        let session = GameSession::new(GameConfig::default(), field, 1).unwrap();
        assert_eq!(session.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_invalid_config_fails_at_construction() {
        let config = GameConfig {
            spawns: Vec::new(),
            ..Default::default()
        };
        let field = PlayField::new(800.0, 450.0).unwrap();
        assert!(matches!(
            GameSession::new(config, field, 1),
            Err(ConfigError::NoSpawnPoints)
        ));
    }

    #[test]
    fn test_start_while_playing_rejected() {
        let mut session = lane_session();
        assert_eq!(session.start(), Err(SessionError::AlreadyPlaying));
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let field = PlayField::new(800.0, 450.0).unwrap();
        let mut session = GameSession::new(GameConfig::default(), field, 1).unwrap();
        session.tick(5.0);
        let snap = session.snapshot();
        assert_eq!(snap.elapsed, 0.0);
        assert!(snap.pucks.is_empty());
    }

    // Scenario A: target left of midpoint, goalie left
    #[test]
    fn test_scenario_save() {
        let mut session = lane_session();
        session.state_mut().score = 1;
        push_lane_puck(&mut session);

        session.tick(1.5);
        assert_eq!(session.score(), 2);
        assert_eq!(session.drain_events(), vec![GameEvent::Save { score: 2 }]);
    }

    // Scenario B: same puck, goalie right
    #[test]
    fn test_scenario_miss() {
        let mut session = lane_session();
        session.set_goalie_side(Side::Right);
        push_lane_puck(&mut session);

        session.tick(1.5);
        assert_eq!(session.lives(), 2);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.drain_events(), vec![GameEvent::Miss { lives: 2 }]);
        assert!(session.snapshot().goal_banner);
    }

    // Scenario C: last life
    #[test]
    fn test_scenario_last_life() {
        let mut session = lane_session();
        session.set_goalie_side(Side::Right);
        session.state_mut().lives = 1;
        session.state_mut().score = 7;
        push_lane_puck(&mut session);

        session.tick(1.5);
        assert_eq!(session.lives(), 0);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(
            session.drain_events(),
            vec![
                GameEvent::Miss { lives: 0 },
                GameEvent::GameOver { final_score: 7 }
            ]
        );

        // Frozen afterwards
        push_lane_puck(&mut session);
        let before = session.snapshot();
        session.tick(1.5);
        assert_eq!(session.snapshot(), before);
        assert!(session.drain_events().is_empty());
    }

    // Scenario D: infinite lives keeps the run going
    #[test]
    fn test_scenario_infinite_lives() {
        let mut session = lane_session();
        session.set_goalie_side(Side::Right);
        session.set_debug_infinite_lives(true);
        session.state_mut().lives = 1;
        push_lane_puck(&mut session);

        session.tick(1.5);
        assert_eq!(session.lives(), 1);
        assert_eq!(session.snapshot().lives, LivesDisplay::Infinite);
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_infinite_lives_does_not_affect_saves() {
        let mut session = lane_session();
        session.set_debug_infinite_lives(true);
        push_lane_puck(&mut session);
        session.tick(1.5);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_goalie_change_applies_to_next_crossing() {
        let mut session = lane_session();
        push_lane_puck(&mut session);

        // Just short of the line: 850 - 240 * 1.4 = 514
        session.tick(1.4);
        session.toggle_goalie_side();
        assert_eq!(session.goalie_side(), Side::Right);
        session.tick(0.1);
        assert_eq!(session.lives(), 2);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_restart_after_game_over_resets() {
        let mut session = lane_session();
        session.set_goalie_side(Side::Right);
        session.state_mut().lives = 1;
        session.state_mut().score = 4;
        push_lane_puck(&mut session);
        session.tick(1.5);
        assert_eq!(session.phase(), GamePhase::GameOver);

        session.start().unwrap();
        let snap = session.snapshot();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.lives, LivesDisplay::Count(3));
        assert_eq!(snap.elapsed, 0.0);
        assert_eq!(snap.speed_mult, 1.0);
        assert_eq!(snap.goalie, Side::Left);
        assert!(snap.pucks.is_empty());
        assert!(!snap.goal_banner);
        assert!(session.drain_events().contains(&GameEvent::Started));
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let mut session = lane_session();
        push_lane_puck(&mut session);
        session.tick(-1.0);
        session.tick(f32::NAN);
        session.tick(f32::INFINITY);
        let snap = session.snapshot();
        assert_eq!(snap.elapsed, 0.0);
        assert_eq!(snap.pucks[0].x, 0.0);
        assert_eq!(snap.pucks[0].y, 850.0);
    }

    #[test]
    fn test_resize_rescales_layout_and_pucks() {
        let mut session = lane_session();
        push_lane_puck(&mut session);
        session.tick(1.0);

        session.resize(2000.0, 500.0).unwrap();
        let snap = session.snapshot();
        assert_eq!(snap.line_y, 250.0);
        assert!((snap.targets[0] - Vec2::new(600.0, 225.0)).length() < 1e-3);
        // 850 - 240 = 610 before, halved
        assert!((snap.pucks[0].y - 305.0).abs() < 1e-3);
        // Per-axis scaling: (180, -240) becomes (360, -120), so speed changes too
        let vel = session.state().pucks[0].vel;
        assert!((vel - Vec2::new(360.0, -120.0)).length() < 1e-3);
        assert!((vel.length() - 144_000f32.sqrt()).abs() < 1e-2);

        // Still judged consistently against the new line
        session.tick(1.0);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_resize_rejects_bad_field() {
        let mut session = lane_session();
        assert!(session.resize(0.0, 100.0).is_err());
        assert_eq!(session.snapshot().line_y, 500.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = lane_session();
        let json = serde_json::to_string(&session.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Playing\""));
        assert!(json.contains("\"lives\":{\"Count\":3}"));
    }

    #[test]
    fn test_same_seed_same_run() {
        let field = PlayField::new(1600.0, 900.0).unwrap();
        let mut a = GameSession::new(GameConfig::default(), field, 99999).unwrap();
        let mut b = GameSession::new(GameConfig::default(), field, 99999).unwrap();
        a.start().unwrap();
        b.start().unwrap();
        for i in 0..600 {
            if i % 45 == 0 {
                a.toggle_goalie_side();
                b.toggle_goalie_side();
            }
            a.tick(DT);
            b.tick(DT);
        }
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.drain_events(), b.drain_events());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Random play: score never drops, lives never underflow,
        /// game over fires exactly once and only at zero lives
        #[test]
        fn prop_session_bookkeeping(
            seed in any::<u64>(),
            toggles in proptest::collection::vec(any::<bool>(), 600),
        ) {
            let field = PlayField::new(1600.0, 900.0).unwrap();
            let mut session = GameSession::new(GameConfig::default(), field, seed).unwrap();
            session.start().unwrap();
            prop_assert_eq!(session.drain_events(), vec![GameEvent::Started]);

            let mut last_score = 0;
            let mut game_overs = 0;
            for flip in toggles {
                if flip {
                    session.toggle_goalie_side();
                }
                session.tick(DT);
                prop_assert!(session.score() >= last_score);
                last_score = session.score();

                for event in session.drain_events() {
                    match event {
                        GameEvent::Save { .. } | GameEvent::Miss { .. } => {}
                        GameEvent::GameOver { final_score } => {
                            game_overs += 1;
                            prop_assert_eq!(final_score, session.score());
                            prop_assert_eq!(session.lives(), 0);
                        }
                        GameEvent::Started => prop_assert!(false, "unexpected start"),
                    }
                }
                prop_assert_eq!(session.lives() == 0, session.phase() == GamePhase::GameOver);
            }
            prop_assert!(game_overs <= 1);
        }
    }
}
