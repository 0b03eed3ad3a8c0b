//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, passed in by the caller
//! - Session-relative clock only (no wall-clock reads)
//! - No rendering, audio, or platform dependencies; side effects surface
//!   as `GameEvent`s for the host to consume

pub mod collision;
pub mod combo;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use state::{
    Ally, Bullet, Enemy, GameEvent, GamePhase, GameState, Particle, ParticleFill, ScorePopup,
};
pub use tick::{StepInput, step};
