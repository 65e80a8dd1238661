//! Goalie Clicker entry point
//!
//! The web build is driven from JavaScript through `platform::web::WebGame`.
//! Natively this runs a headless session with an autopilot goalie, which is
//! handy for eyeballing difficulty tuning in the logs.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Goalie Clicker (native, headless) starting...");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    if let Err(e) = headless::run(seed) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use goalie_clicker::audio::AudioDirector;
    use goalie_clicker::consts::FRAME_DT;
    use goalie_clicker::sim::{GameEvent, GamePhase, GameSession, PlayField};
    use goalie_clicker::{ConfigError, GameConfig, Settings};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    /// Longest demo run (seconds of game time)
    const MAX_SECONDS: f32 = 300.0;
    /// How far from the line the autopilot starts watching a puck (px)
    const REACTION_DISTANCE: f32 = 120.0;
    /// Chance per puck that the autopilot guesses wrong, at max speed
    const MAX_ERROR_RATE: f64 = 0.35;

    pub fn run(seed: u64) -> Result<(), ConfigError> {
        let config = GameConfig::default();
        let rect = PlayField::fit(1920.0, 1080.0, config.aspect_w, config.aspect_h);
        let max_mult = config.max_speed_mult;
        let mut session = GameSession::new(config, rect.field(), seed)?;
        let mut pilot_rng = Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);
        let settings = Settings::default();
        let mut director = AudioDirector::new();

        log::info!("Seed {}, field {}x{}", seed, rect.width, rect.height);
        if let Err(e) = session.start() {
            log::warn!("{}", e);
        }

        let mut watched: Option<u32> = None;
        let mut cue_count = 0usize;
        let frames = (MAX_SECONDS / FRAME_DT) as u32;
        for _ in 0..frames {
            let snap = session.snapshot();
            if snap.phase != GamePhase::Playing {
                break;
            }

            // Watch the nearest puck still short of the line
            let state = session.state();
            let line_y = state.layout.line_y;
            let mid_x = state.layout.mid_x();
            let next = state
                .pucks
                .iter()
                .filter(|p| p.is_active() && p.pos.y > line_y)
                .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

            if let Some(puck) = next {
                if puck.pos.y - line_y < REACTION_DISTANCE && watched != Some(puck.id) {
                    watched = Some(puck.id);
                    let error_rate = MAX_ERROR_RATE * f64::from(snap.speed_mult / max_mult);
                    let side = puck.target_side(mid_x);
                    let side = if pilot_rng.random_bool(error_rate) {
                        side.toggled()
                    } else {
                        side
                    };
                    session.set_goalie_side(side);
                }
            }

            session.tick(FRAME_DT);

            let events = session.drain_events();
            for event in &events {
                match event {
                    GameEvent::Miss { lives } => log::info!("GOAL! {} lives left", lives),
                    GameEvent::GameOver { final_score } => log::info!(
                        "Game over at {:.1}s, final score {}",
                        session.state().elapsed,
                        final_score
                    ),
                    _ => {}
                }
            }
            cue_count += director.update(FRAME_DT, &events, &settings).len();
        }

        let snap = session.snapshot();
        log::info!(
            "Finished: phase {:?}, score {}, lives {:?}, speed x{:.2}, {} sound cues, goalie {:?}",
            snap.phase,
            snap.score,
            snap.lives,
            snap.speed_mult,
            cue_count,
            snap.goalie
        );
        Ok(())
    }
}
