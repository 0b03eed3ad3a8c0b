//! Collision detection and resolution
//!
//! Everything here is axis-aligned boxes: the bullet against entities,
//! and entity leading edges against the wall boundary. Removal uses
//! `Vec::swap_remove`, which disturbs order, so every sweep iterates
//! backwards.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::combo;
use super::state::{GameEvent, GamePhase, GameState, ParticleFill};
use crate::consts::*;

/// An axis-aligned rectangle, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// AABB overlap test with no gap tolerance: rectangles that merely
    /// share an edge still count as overlapping.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(other.x + other.w < self.x
            || self.x + self.w < other.x
            || other.y + other.h < self.y
            || self.y + self.h < other.y)
    }
}

/// Test the live bullet against allies first, then enemies. At most one
/// hit resolves per frame since the bullet is consumed by any contact.
/// Allies come first so a packet shielding a virus takes the hit.
pub fn resolve_bullet_hits(state: &mut GameState, rng: &mut impl Rng) {
    let Some(bullet) = state.bullet else {
        return;
    };
    let brect = bullet.rect();

    for i in (0..state.allies.len()).rev() {
        let ally = state.allies[i];
        if !brect.overlaps(&ally.rect()) {
            continue;
        }
        if ally.angry {
            // Angry packets can be shot down, but still score nothing.
            state.disintegrate(ally.rect(), bullet.pos, ParticleFill::AllyAngry, rng);
            state.allies.swap_remove(i);
        } else {
            let a = &mut state.allies[i];
            a.angry = true;
            a.speed = ALLY_SPEED_ANGRY;
            state.push_event(GameEvent::AllyAngered);
        }
        combo::reset_streaks(state);
        state.bullet = None;
        return;
    }

    for i in (0..state.enemies.len()).rev() {
        let enemy = state.enemies[i];
        if !brect.overlaps(&enemy.rect()) {
            continue;
        }
        state.disintegrate(enemy.rect(), bullet.pos, ParticleFill::Enemy, rng);
        state.enemies.swap_remove(i);
        combo::score_enemy_kill(state, &enemy);
        state.bullet = None;
        return;
    }
}

/// Remove every enemy, and every angry ally, whose leading edge has
/// crossed the wall boundary, damaging the wall for each. Harmless
/// allies pass through the wall freely.
pub fn resolve_wall_hits(state: &mut GameState, rng: &mut impl Rng) {
    if state.wall_remaining <= 0.0 {
        return;
    }

    for i in (0..state.enemies.len()).rev() {
        let enemy = state.enemies[i];
        if enemy.pos.x < state.wall_remaining {
            apply_wall_damage(state, enemy.rect(), ParticleFill::Enemy, rng);
            state.enemies.swap_remove(i);
        }
    }
    for i in (0..state.allies.len()).rev() {
        let ally = state.allies[i];
        if ally.angry && ally.pos.x < state.wall_remaining {
            apply_wall_damage(state, ally.rect(), ParticleFill::AllyAngry, rng);
            state.allies.swap_remove(i);
        }
    }
}

/// One wall impact: damage, debris bursts, and the death sequence if
/// this was the last piece of wall.
fn apply_wall_damage(state: &mut GameState, entity: Rect, fill: ParticleFill, rng: &mut impl Rng) {
    state.wall_remaining = (state.wall_remaining - WALL_DAMAGE_UNIT).max(0.0);

    // Entity debris plus the chunk of wall it tore off
    let impact = Vec2::new(entity.x, entity.y);
    state.disintegrate(entity, impact, fill, rng);
    state.disintegrate(
        Rect::new(state.wall_remaining, 0.0, WALL_DAMAGE_UNIT, WALL_H),
        Vec2::new(state.wall_remaining, WALL_H / 2.0),
        ParticleFill::Wall,
        rng,
    );
    state.push_event(GameEvent::WallHit {
        remaining: state.wall_remaining,
    });

    if state.wall_remaining <= 0.0 {
        // Last piece gone: show the player disintegrating and arm the
        // end-of-session countdown.
        state.disintegrate(
            Rect::new(
                state.player_x,
                SCREEN_H - PLAYER_SIZE,
                PLAYER_SIZE,
                PLAYER_SIZE,
            ),
            Vec2::new(state.player_x + PLAYER_SIZE / 2.0, SCREEN_H),
            ParticleFill::Player,
            rng,
        );
        state.death_expiry = Some(state.clock + DEATH_ANIM_DURATION);
        state.phase = GamePhase::Dying;
        state.push_event(GameEvent::WallDestroyed);
    }
}
