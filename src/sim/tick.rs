//! Per-frame simulation tick
//!
//! Ramp, spawn, advance, judge, cull. Runs only while playing.

use rand::Rng;

use super::judge::{Outcome, crosses_line, judge};
use super::puck::Puck;
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the session by `dt` seconds.
///
/// `dt` must already be sanitized (finite, non-negative).
pub fn tick<R: Rng>(state: &mut GameState, rng: &mut R, dt: f32) {
    // Idle and GameOver are frozen
    if state.phase != GamePhase::Playing {
        return;
    }

    state.elapsed += dt;
    state.speed_mult = state.ramp.speed_multiplier(state.elapsed);
    let interval = state.ramp.spawn_interval(state.speed_mult);

    // At most one spawn per tick; a long frame drops the backlog
    state.spawn_timer += dt;
    if state.spawn_timer >= interval {
        state.spawn_timer = 0.0;
        spawn_puck(state, rng);
    }

    update_pucks(state, dt);
    state.banner.update(dt);
}

/// Spawn one puck from a random origin toward a random target
pub fn spawn_puck<R: Rng>(state: &mut GameState, rng: &mut R) {
    let layout = &state.layout;
    if layout.spawns.is_empty() || layout.targets.is_empty() {
        log::warn!("spawn skipped: empty spawn/target registry");
        return;
    }

    let spawn = layout.spawns[rng.random_range(0..layout.spawns.len())];
    let target = layout.targets[rng.random_range(0..layout.targets.len())];
    let base = rng.random_range(state.config.puck_speed_min..=state.config.puck_speed_max);

    let id = state.next_entity_id();
    let puck = Puck::new(id, spawn, target, base * state.speed_mult);
    log::trace!("spawn puck {} at {:?} -> {:?}", id, spawn, target);
    state.pucks.push(puck);
}

/// Move every puck, judge line crossings, drop the dead
fn update_pucks(state: &mut GameState, dt: f32) {
    let line_y = state.layout.line_y;
    let mid_x = state.layout.mid_x();
    let field = state.layout.field;

    for puck in &mut state.pucks {
        let prev_y = puck.pos.y;
        puck.advance(dt);

        // After the final life goes, nothing else is judged this tick
        if state.phase != GamePhase::Playing {
            continue;
        }
        if !puck.is_active() || !crosses_line(prev_y, puck.pos.y, line_y) {
            continue;
        }

        match judge(state.goalie, puck.target_side(mid_x)) {
            Outcome::Save => {
                puck.fading = true;
                state.score += 1;
                log::debug!("save: puck {}, score {}", puck.id, state.score);
                state.events.push(GameEvent::Save { score: state.score });
            }
            Outcome::Miss => {
                puck.alive = false;
                if !state.infinite_lives {
                    state.lives = state.lives.saturating_sub(1);
                }
                state.banner.trigger();
                log::debug!("goal: puck {}, lives {}", puck.id, state.lives);
                state.events.push(GameEvent::Miss { lives: state.lives });

                if state.lives == 0 && !state.infinite_lives {
                    state.phase = GamePhase::GameOver;
                    log::info!("Game over, final score {}", state.score);
                    state.events.push(GameEvent::GameOver {
                        final_score: state.score,
                    });
                }
            }
        }
    }

    state.pucks.retain(|p| p.alive && !p.is_stale(field, line_y));
}
