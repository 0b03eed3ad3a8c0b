//! Game state and core simulation types
//!
//! One `GameState` exists per session, owned exclusively by the session's
//! state machine; every mutation happens synchronously inside a step.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal gameplay
    Active,
    /// Wall destroyed; death animation counting down
    Dying,
    /// Terminal. The end callback has fired; stepping is a no-op.
    Ended,
}

/// A virus marching toward the firewall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    /// Leftward speed, pixels/second
    pub speed: f32,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, ENEMY_W, ENEMY_H)
    }
}

/// A data packet the player must NOT shoot. Harmless until hit once,
/// after which it turns angry and becomes a wall hazard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ally {
    pub pos: Vec2,
    pub speed: f32,
    pub angry: bool,
}

impl Ally {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, ALLY_W, ALLY_H)
    }
}

/// The single in-flight bullet. Travels straight up; base speed scales
/// with cumulative kills.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BULLET_W, BULLET_H)
    }
}

/// Which palette role a particle fragment was torn from, for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleFill {
    Enemy,
    AllyAngry,
    Wall,
    Player,
}

/// A rectangular debris fragment from a disintegration burst
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Session-clock time at which the fragment disappears
    pub expiry: f64,
    pub fill: ParticleFill,
}

/// The floating "+150" readout shown after a scoring kill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePopup {
    pub value: u32,
    pub pos: Vec2,
    pub expiry: f64,
    /// Combo annotation, e.g. "4-COMBO +100"
    pub extra: Option<String>,
}

/// Something notable that happened during a step. Drained by the host
/// each frame for audio cues and service notifications; the simulation
/// never blocks on any of it.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    BulletFired,
    /// An enemy (or angry ally) was shot down at the given position
    EnemyKilled { x: f32, y: f32, value: u32 },
    /// A harmless ally was hit and turned angry
    AllyAngered,
    /// The bullet left the top of the screen without hitting anything
    BulletMissed,
    /// An entity reached the wall; `remaining` is the thickness after damage
    WallHit { remaining: f32 },
    WallDestroyed,
    /// Combo maxed out and the board was cleared
    BoardCleared,
    /// The combo reached the mid-combo milestone level
    ComboMilestone { combo: u32 },
    SessionEnded { score: u64 },
}

/// Complete per-session game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session-relative clock, seconds. Advanced by the clamped raw
    /// frame delta; combo time dilation never touches it.
    pub clock: f64,
    pub phase: GamePhase,
    pub enemies: Vec<Enemy>,
    pub allies: Vec<Ally>,
    pub bullet: Option<Bullet>,
    pub particles: Vec<Particle>,
    /// Player x, clamped to [0, SCREEN_W - PLAYER_SIZE] every frame
    pub player_x: f32,
    /// Wall thickness left; monotonically non-increasing while playing
    pub wall_remaining: f32,
    pub score: u64,
    /// Cumulative kills this session; drives difficulty scaling
    pub kills: u32,
    /// Kills without a miss or ally hit. Unlike `combo`, survives a
    /// combo-max board clear.
    pub kills_in_a_row: u32,
    /// Current combo level in [0, COMBO_MAX]
    pub combo: u32,
    /// Board clears earned by maxing the combo
    pub combos_completed: u32,
    /// Seconds the wall has been at full thickness
    pub intact_wall_time: f64,
    /// Clock time of the next spawn wave
    pub next_spawn: f64,
    /// When set, the session ends once the clock reaches it
    pub death_expiry: Option<f64>,
    pub score_popup: Option<ScorePopup>,
    /// Fire-key state last frame, for edge-triggered firing
    pub prev_fire_down: bool,
    /// Kills not yet submitted to the progression service
    pub kills_to_send: u32,
    /// Clock time of the last incremental achievement submission
    pub last_progress_flush: f64,
    /// Events raised this frame, drained by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            clock: 0.0,
            phase: GamePhase::Active,
            enemies: Vec::new(),
            allies: Vec::new(),
            bullet: None,
            particles: Vec::new(),
            player_x: SCREEN_W / 2.0,
            wall_remaining: INIT_WALL_THICKNESS,
            score: 0,
            kills: 0,
            kills_in_a_row: 0,
            combo: 0,
            combos_completed: 0,
            intact_wall_time: 0.0,
            next_spawn: 0.0,
            death_expiry: None,
            score_popup: None,
            prev_fire_down: false,
            kills_to_send: 0,
            last_progress_flush: 0.0,
            events: Vec::new(),
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain the events raised since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn the bullet at the player's muzzle. No-op if one is already
    /// in flight or the death countdown is running.
    pub fn fire_bullet(&mut self) {
        if self.bullet.is_some() || self.death_expiry.is_some() {
            return;
        }
        self.bullet = Some(Bullet {
            pos: Vec2::new(
                self.player_x + PLAYER_SIZE / 2.0 - BULLET_W / 2.0,
                SCREEN_H - PLAYER_SIZE - BULLET_H,
            ),
        });
        self.push_event(GameEvent::BulletFired);
    }

    /// Tear `rect` into a grid of debris fragments flying away from
    /// `source` (where the disintegration force originates).
    pub fn disintegrate(
        &mut self,
        rect: Rect,
        source: Vec2,
        fill: ParticleFill,
        rng: &mut impl Rng,
    ) {
        let rows = ((rect.h / PART_FRAG_SIZE).round() as usize).max(2);
        let cols = ((rect.w / PART_FRAG_SIZE).round() as usize).max(2);
        let frag = Vec2::new(rect.w / cols as f32, rect.h / rows as f32);
        let expiry = self.clock + PART_DURATION;

        for i in 0..rows {
            for j in 0..cols {
                let pos = Vec2::new(rect.x + j as f32 * frag.x, rect.y + i as f32 * frag.y);
                let vel = Vec2::new(
                    (pos.x - source.x)
                        * PART_VEL_FACTOR
                        * rng.random_range(PART_VEL_MOD_MIN..PART_VEL_MOD_MAX),
                    (pos.y - source.y)
                        * PART_VEL_FACTOR
                        * rng.random_range(PART_VEL_MOD_MIN..PART_VEL_MOD_MAX),
                );
                self.particles.push(Particle {
                    pos,
                    vel,
                    size: frag,
                    expiry,
                    fill,
                });
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_state_starts_intact() {
        let state = GameState::new();
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.wall_remaining, INIT_WALL_THICKNESS);
        assert_eq!(state.player_x, SCREEN_W / 2.0);
        assert!(state.bullet.is_none());
        assert!(state.enemies.is_empty());
        assert!(state.allies.is_empty());
    }

    #[test]
    fn test_fire_bullet_spawns_at_muzzle() {
        let mut state = GameState::new();
        state.fire_bullet();
        let bullet = state.bullet.expect("bullet should exist");
        assert_eq!(
            bullet.pos.x,
            state.player_x + PLAYER_SIZE / 2.0 - BULLET_W / 2.0
        );
        assert_eq!(bullet.pos.y, SCREEN_H - PLAYER_SIZE - BULLET_H);
        assert_eq!(state.take_events(), vec![GameEvent::BulletFired]);
    }

    #[test]
    fn test_fire_bullet_is_noop_when_one_in_flight() {
        let mut state = GameState::new();
        state.fire_bullet();
        let first = state.bullet;
        state.player_x += 100.0;
        state.fire_bullet();
        assert_eq!(state.bullet, first);
    }

    #[test]
    fn test_fire_bullet_is_noop_while_dying() {
        let mut state = GameState::new();
        state.death_expiry = Some(state.clock + DEATH_ANIM_DURATION);
        state.fire_bullet();
        assert!(state.bullet.is_none());
    }

    #[test]
    fn test_disintegrate_fragments_fly_outward() {
        let mut state = GameState::new();
        let mut rng = Pcg32::seed_from_u64(7);
        let rect = Rect::new(100.0, 100.0, ENEMY_W, ENEMY_H);
        // Source at the rect origin: fragments right/below it get
        // positive velocity components.
        state.disintegrate(rect, Vec2::new(100.0, 100.0), ParticleFill::Enemy, &mut rng);
        assert!(!state.particles.is_empty());
        // 50x30 rect at frag size 20 rounds to 3x2 fragments
        assert_eq!(state.particles.len(), 6);
        let far = state.particles.last().unwrap();
        assert!(far.vel.x > 0.0);
        assert!(far.vel.y > 0.0);
        assert!((far.expiry - PART_DURATION).abs() < 1e-9);
    }
}
