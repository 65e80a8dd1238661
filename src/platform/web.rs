//! Browser bindings
//!
//! The page owns the canvas, DOM and input listeners; it calls into
//! [`WebGame`] once per animation frame and renders from `snapshot_json`.

use wasm_bindgen::prelude::*;

use super::FrameClock;
use crate::audio::{AudioDirector, AudioManager};
use crate::config::GameConfig;
use crate::settings::Settings;
use crate::sim::{FieldRect, GamePhase, GameSession, PlayField, Side};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    log::info!("Goalie Clicker starting...");
}

/// Game instance holding all state
#[wasm_bindgen]
pub struct WebGame {
    session: GameSession,
    rect: FieldRect,
    clock: FrameClock,
    settings: Settings,
    director: AudioDirector,
    audio: AudioManager,
}

#[wasm_bindgen]
impl WebGame {
    /// Build a game for a viewport, with an optional JSON config
    #[wasm_bindgen(constructor)]
    pub fn new(
        seed: u64,
        viewport_w: f32,
        viewport_h: f32,
        config_json: Option<String>,
    ) -> Result<WebGame, JsError> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(&json)?,
            None => GameConfig::default(),
        };
        let rect = PlayField::fit(viewport_w, viewport_h, config.aspect_w, config.aspect_h);
        let session = GameSession::new(config, rect.field(), seed)?;
        log::info!("Game initialized with seed: {}", seed);

        Ok(Self {
            session,
            rect,
            clock: FrameClock::new(),
            settings: Settings::default(),
            director: AudioDirector::new(),
            audio: AudioManager::new(),
        })
    }

    /// Start or restart a run
    pub fn start(&mut self) {
        if let Err(e) = self.session.start() {
            log::warn!("start: {}", e);
        }
        self.clock.reset();
    }

    /// Advance to the animation frame timestamp
    pub fn frame(&mut self, now_ms: f64) {
        let dt = self.clock.delta(now_ms);
        self.session.tick(dt);

        let events = self.session.drain_events();
        for cue in self.director.update(dt, &events, &self.settings) {
            self.audio.play(cue, &self.settings);
        }
    }

    pub fn set_goalie_left(&mut self) {
        self.session.set_goalie_side(Side::Left);
    }

    pub fn set_goalie_right(&mut self) {
        self.session.set_goalie_side(Side::Right);
    }

    pub fn toggle_goalie(&mut self) {
        self.session.toggle_goalie_side();
    }

    pub fn set_debug_infinite_lives(&mut self, enabled: bool) {
        self.session.set_debug_infinite_lives(enabled);
    }

    pub fn toggle_debug_overlay(&mut self) -> bool {
        self.settings.toggle_debug_overlay()
    }

    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.settings.toggle_mute();
        let playing = self.session.phase() == GamePhase::Playing;
        if let Some(cue) = self.director.mute_changed(muted, playing) {
            self.audio.play(cue, &self.settings);
        }
        muted
    }

    /// Refit the field into a new viewport
    pub fn resize(&mut self, viewport_w: f32, viewport_h: f32) -> Result<(), JsError> {
        let config = self.session.config();
        let rect = PlayField::fit(viewport_w, viewport_h, config.aspect_w, config.aspect_h);
        self.session.resize(rect.width, rect.height)?;
        self.rect = rect;
        Ok(())
    }

    /// Field placement inside the viewport, as JSON
    pub fn field_rect_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.rect)?)
    }

    /// Everything the renderer needs for this frame, as JSON
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.session.snapshot())?)
    }

    pub fn debug_overlay(&self) -> bool {
        self.settings.debug_overlay
    }
}
