//! Packet Panic - a firewall-defense arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, combos, game state)
//! - `session`: Session lifecycle, input handling, end-of-game callback
//! - `progress`: Achievement/event bridge to an external progression service
//! - `render`: Abstract draw surface the host implements
//! - `audio`: Sound cues emitted by the simulation
//! - `tuning`: Data-driven game balance
//! - `highscores`: Local leaderboard persistence

pub mod audio;
pub mod highscores;
pub mod progress;
pub mod render;
pub mod session;
pub mod sim;
pub mod tuning;
pub mod util;

pub use highscores::HighScores;
pub use session::Session;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Maximum time between two frames, in seconds. Longer stalls
    /// (tab switch, debugger pause) are clamped so nothing teleports.
    pub const DELTA_MAX: f32 = 0.05;

    /// Gameplay screen dimensions, in pixels
    pub const SCREEN_W: f32 = 1000.0;
    pub const SCREEN_H: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 400.0;

    /// Firewall settings
    pub const INIT_WALL_THICKNESS: f32 = 100.0;
    /// Wall thickness lost per impact
    pub const WALL_DAMAGE_UNIT: f32 = 20.0;
    pub const WALL_H: f32 = 530.0;

    /// Enemy (virus) settings
    pub const ENEMY_W: f32 = 50.0;
    pub const ENEMY_H: f32 = 30.0;
    pub const ENEMY_SPEED_MIN: f32 = 100.0;
    pub const ENEMY_SPEED_MAX: f32 = 150.0;
    /// Minimum points awarded for a kill
    pub const ENEMY_VALUE_MIN: u32 = 20;
    /// Maximum points awarded for a kill
    pub const ENEMY_VALUE_MAX: u32 = 200;
    /// New enemies (and the bullet) get this much extra speed per kill
    pub const ENEMY_SPEEDUP_UNIT: f32 = 3.0;
    /// Vertical band enemies spawn in
    pub const MIN_ENEMY_Y: f32 = 50.0;
    pub const MAX_ENEMY_Y: f32 = 500.0;

    /// Bullet settings
    pub const BULLET_W: f32 = 4.0;
    pub const BULLET_H: f32 = 20.0;
    pub const BULLET_SPEED: f32 = 500.0;

    /// Ally ("data packet") settings. Allies are harmless until shot.
    pub const ALLY_W: f32 = 30.0;
    pub const ALLY_H: f32 = 30.0;
    pub const ALLY_SPEED_MIN: f32 = 30.0;
    pub const ALLY_SPEED_MAX: f32 = 50.0;
    /// Speed once an ally has been hit and turns angry
    pub const ALLY_SPEED_ANGRY: f32 = 300.0;
    pub const ALLY_SPAWN_PROB: f64 = 0.5;
    /// Maximum concurrent allies on screen
    pub const ALLIES_MAX: usize = 6;

    /// Combo settings. Reaching `COMBO_MAX` clears the board.
    pub const COMBO_MAX: u32 = 12;
    /// Bonus points per combo level on each kill
    pub const COMBO_BONUS: u32 = 25;
    /// Combo level at which the mid-combo sound cue fires
    pub const COMBO_SFX_LEVEL: u32 = 6;

    /// Particle effect settings
    pub const PART_FRAG_SIZE: f32 = 20.0;
    pub const PART_VEL_FACTOR: f32 = 10.0;
    pub const PART_DURATION: f64 = 2.0;
    pub const PART_VEL_MOD_MIN: f32 = 0.5;
    pub const PART_VEL_MOD_MAX: f32 = 1.0;
    /// Downward acceleration applied to particles, pixels/s^2
    pub const GRAVITY_ACC: f32 = 600.0;

    /// Score popup settings
    pub const SCORE_POPUP_DURATION: f64 = 1.0;
    pub const SCORE_POPUP_Y_SPEED: f32 = -100.0;
    /// Popup placement relative to the killed entity's origin
    pub const SCORE_POPUP_XLATE_X: f32 = 0.0;
    pub const SCORE_POPUP_XLATE_Y: f32 = 0.0;

    /// How long the death animation plays before the session ends, seconds
    pub const DEATH_ANIM_DURATION: f64 = 3.0;

    /// Key codes delivered by the host (DOM-style)
    pub const KEY_LEFT: u32 = 37;
    pub const KEY_RIGHT: u32 = 39;
    pub const KEY_FIRE: u32 = 32;
}
