//! The per-frame update

use rand::Rng;

use super::state::{GameEvent, GamePhase, GameState};
use super::{collision, combo, spawn};
use crate::consts::*;
use crate::tuning::Tuning;

/// Held-key input sampled for one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInput {
    pub left_held: bool,
    pub right_held: bool,
    pub fire_held: bool,
}

/// Advance the simulation by one frame of `delta` seconds (raw frame
/// time; it gets clamped and dilated internally). Returns `false` when
/// the session has just ended or had already ended.
///
/// The session clock always advances by the clamped raw delta. The
/// combo time-dilation factor only scales the motion delta, so spawn
/// scheduling, particle expiry and the death countdown run in real
/// session time even during slow motion.
pub fn step(
    state: &mut GameState,
    input: &StepInput,
    tuning: &Tuning,
    rng: &mut impl Rng,
    delta: f32,
) -> bool {
    if state.phase == GamePhase::Ended {
        return false;
    }

    let raw = delta.clamp(0.0, DELTA_MAX);
    state.clock += f64::from(raw);
    let delta = raw * tuning.time_factor(state.combo);

    spawn::maybe_spawn(state, tuning, rng);

    // Move enemies and allies; drop anything fully off the left edge
    for i in (0..state.enemies.len()).rev() {
        let e = &mut state.enemies[i];
        e.pos.x -= delta * e.speed;
        if e.pos.x < -ENEMY_W {
            state.enemies.swap_remove(i);
        }
    }
    for i in (0..state.allies.len()).rev() {
        let a = &mut state.allies[i];
        a.pos.x -= delta * a.speed;
        if a.pos.x < -ALLY_W {
            state.allies.swap_remove(i);
        }
    }

    collision::resolve_wall_hits(state, rng);

    // Player movement; left wins if both keys are held
    let m = if input.left_held {
        -1.0
    } else if input.right_held {
        1.0
    } else {
        0.0
    };
    state.player_x = crate::util::clamp(
        state.player_x + m * delta * PLAYER_SPEED,
        0.0,
        SCREEN_W - PLAYER_SIZE,
    );

    // Edge-triggered fire: holding the key down fires exactly one shot
    let fire_requested = input.fire_held && !state.prev_fire_down;
    state.prev_fire_down = input.fire_held;

    if let Some(bullet) = &mut state.bullet {
        let bullet_speed = BULLET_SPEED + state.kills as f32 * ENEMY_SPEEDUP_UNIT;
        bullet.pos.y -= bullet_speed * delta;
        if bullet.pos.y < -BULLET_H {
            state.bullet = None;
            combo::reset_streaks(state);
            state.push_event(GameEvent::BulletMissed);
        } else {
            collision::resolve_bullet_hits(state, rng);
        }
    } else if fire_requested {
        state.fire_bullet();
    }

    // Particles: expire, then integrate with gravity
    for i in (0..state.particles.len()).rev() {
        if state.clock > state.particles[i].expiry {
            state.particles.swap_remove(i);
        } else {
            let p = &mut state.particles[i];
            p.pos += p.vel * delta;
            p.vel.y += delta * GRAVITY_ACC;
        }
    }

    if let Some(popup) = &mut state.score_popup {
        popup.pos.y += SCORE_POPUP_Y_SPEED * delta;
        if state.clock > popup.expiry {
            state.score_popup = None;
        }
    }

    if state.combo >= COMBO_MAX {
        combo::blast_board(state, rng);
    }

    if let Some(expiry) = state.death_expiry {
        if state.clock >= expiry {
            state.phase = GamePhase::Ended;
            state.push_event(GameEvent::SessionEnded { score: state.score });
            return false;
        }
    }

    if state.wall_remaining == INIT_WALL_THICKNESS {
        state.intact_wall_time += f64::from(delta);
    }

    true
}
