//! Kill scoring, combo bookkeeping, and the combo-max board clear

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameEvent, GameState, ParticleFill, ScorePopup};
use crate::consts::*;
use crate::util::interpolate;

/// Base point value of a kill at the given enemy y. Kills near the top
/// of the screen are worth the most; the raw interpolated value is
/// rounded to the nearest 50 and floored at the minimum.
pub fn kill_value(enemy_y: f32) -> u32 {
    let raw = interpolate(
        0.0,
        ENEMY_VALUE_MAX as f32,
        SCREEN_H,
        ENEMY_VALUE_MIN as f32,
        enemy_y + ENEMY_H,
    );
    let rounded = ((raw / 50.0).round() * 50.0) as u32;
    rounded.max(ENEMY_VALUE_MIN)
}

/// Record a confirmed enemy kill: counters, combo, score, popup, event.
pub fn score_enemy_kill(state: &mut GameState, enemy: &Enemy) {
    state.kills += 1;
    state.kills_to_send += 1;
    state.kills_in_a_row += 1;
    state.combo += 1;
    if state.combo == COMBO_SFX_LEVEL {
        state.push_event(GameEvent::ComboMilestone { combo: state.combo });
    }

    let bonus = state.combo * COMBO_BONUS;
    let value = kill_value(enemy.pos.y) + bonus;
    state.score += u64::from(value);

    let extra = (state.combo > 1).then(|| format!("{}-COMBO +{}", state.combo, bonus));
    state.score_popup = Some(ScorePopup {
        value,
        pos: enemy.pos + Vec2::new(SCORE_POPUP_XLATE_X, SCORE_POPUP_XLATE_Y),
        expiry: state.clock + SCORE_POPUP_DURATION,
        extra,
    });
    state.push_event(GameEvent::EnemyKilled {
        x: enemy.pos.x,
        y: enemy.pos.y,
        value,
    });
}

/// A miss or an ally hit ends both streaks
pub fn reset_streaks(state: &mut GameState) {
    state.kills_in_a_row = 0;
    state.combo = 0;
}

/// Combo maxed out: every entity on the board disintegrates at once and
/// the combo counter starts over. The kills-in-a-row streak survives.
pub fn blast_board(state: &mut GameState, rng: &mut impl Rng) {
    let enemies = std::mem::take(&mut state.enemies);
    for enemy in &enemies {
        state.disintegrate(enemy.rect(), enemy.pos, ParticleFill::Enemy, rng);
    }
    let allies = std::mem::take(&mut state.allies);
    for ally in &allies {
        state.disintegrate(ally.rect(), ally.pos, ParticleFill::AllyAngry, rng);
    }
    state.combo = 0;
    state.combos_completed += 1;
    state.push_event(GameEvent::BoardCleared);
}
