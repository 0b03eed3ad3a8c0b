//! Wave spawning and difficulty scaling

use glam::Vec2;
use rand::Rng;

use super::state::{Ally, Enemy, GameState};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::util::interpolate;

/// Seconds until the next wave, shrinking linearly with score down to
/// the floor (and never below it).
pub fn spawn_interval(tuning: &Tuning, score: u64) -> f32 {
    interpolate(
        0.0,
        tuning.spawn_interval_start,
        tuning.spawn_interval_score_ref as f32,
        tuning.spawn_interval_floor,
        score as f32,
    )
}

/// Enemy speed range scales with cumulative kills: the floor rises at
/// half the rate of the ceiling, so the spread widens over time.
pub fn enemy_speed_range(kills: u32) -> (f32, f32) {
    let kills = kills as f32;
    (
        ENEMY_SPEED_MIN + 0.5 * ENEMY_SPEEDUP_UNIT * kills,
        ENEMY_SPEED_MAX + ENEMY_SPEEDUP_UNIT * kills,
    )
}

/// If a wave is due, spawn exactly one enemy (plus maybe an ally) at the
/// right edge and schedule the next wave. A single step never spawns
/// more than one wave, even after a long frame.
pub fn maybe_spawn(state: &mut GameState, tuning: &Tuning, rng: &mut impl Rng) {
    if state.clock < state.next_spawn {
        return;
    }

    let (min_speed, max_speed) = enemy_speed_range(state.kills);
    state.enemies.push(Enemy {
        pos: Vec2::new(SCREEN_W, rng.random_range(MIN_ENEMY_Y..MAX_ENEMY_Y)),
        speed: rng.random_range(min_speed..max_speed),
    });

    if rng.random_bool(ALLY_SPAWN_PROB) && state.allies.len() < ALLIES_MAX {
        state.allies.push(Ally {
            pos: Vec2::new(SCREEN_W, rng.random_range(0.0..MAX_ENEMY_Y)),
            speed: rng.random_range(ALLY_SPEED_MIN..ALLY_SPEED_MAX),
            angry: false,
        });
    }

    state.next_spawn = state.clock + f64::from(spawn_interval(tuning, state.score));
}
