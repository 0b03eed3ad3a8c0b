//! A full game session: simulation plus host-facing plumbing
//!
//! `Session` owns the game state, the seeded RNG, the held-key map and
//! the progression bridge, and drives them all from `step()`. The
//! simulation itself stays pure; everything that touches the outside
//! world (progression intents, the end-of-session callback) happens
//! here.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::mpsc::Sender;

use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::progress::{Achievement, ProgressBridge, ProgressIntent};
use crate::sim::{self, GameEvent, GameState, StepInput};
use crate::tuning::{Tuning, TuningError};

/// The hidden key-up sequence: up, up, down, down, left, right, left,
/// right, B, A.
const SECRET_SEQUENCE: [u32; 10] = [38, 38, 40, 40, 37, 39, 37, 39, 66, 65];
/// Seconds allowed between key-ups before the sequence resets
const SECRET_TIMEOUT: f64 = 2.0;

/// Callback invoked once with the final score when the session ends
pub type EndCallback = Box<dyn FnMut(u64)>;

pub struct Session {
    state: GameState,
    tuning: Tuning,
    rng: Pcg32,
    keys: HashMap<u32, bool>,
    bridge: ProgressBridge,
    on_ended: Option<EndCallback>,
    /// Last few key-up codes, oldest first, for the hidden sequence
    recent_key_ups: VecDeque<u32>,
    last_key_up_at: f64,
    easter_egg: bool,
    /// End-of-session flush and event batch already ran
    finalized: bool,
}

impl Session {
    /// Create a session. The tuning tables are validated here so a
    /// misconfigured build fails before the first frame.
    pub fn new(
        seed: u64,
        tuning: Tuning,
        progress_tx: Sender<ProgressIntent>,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            state: GameState::new(),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            keys: HashMap::new(),
            bridge: ProgressBridge::new(progress_tx),
            on_ended: None,
            recent_key_ups: VecDeque::new(),
            last_key_up_at: 0.0,
            easter_egg: false,
            finalized: false,
        })
    }

    /// Register the callback to run once when the session ends
    pub fn on_session_end(&mut self, callback: impl FnMut(u64) + 'static) {
        self.on_ended = Some(Box::new(callback));
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Whether the hidden render mode is currently on
    pub fn easter_egg(&self) -> bool {
        self.easter_egg
    }

    /// Drain the game events raised since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.state.take_events()
    }

    fn key_down(&self, code: u32) -> bool {
        self.keys.get(&code).copied().unwrap_or(false)
    }

    /// Record a key transition from the host's input layer
    pub fn handle_key(&mut self, code: u32, down: bool) {
        self.keys.insert(code, down);
        if !down {
            self.track_secret_sequence(code);
        }
    }

    fn track_secret_sequence(&mut self, code: u32) {
        if self.state.clock > self.last_key_up_at + SECRET_TIMEOUT {
            self.recent_key_ups.clear();
        }
        self.last_key_up_at = self.state.clock;

        self.recent_key_ups.push_back(code);
        if self.recent_key_ups.len() > SECRET_SEQUENCE.len() {
            self.recent_key_ups.pop_front();
        }
        if self.recent_key_ups.iter().eq(SECRET_SEQUENCE.iter()) {
            self.easter_egg = !self.easter_egg;
            self.bridge.unlock(Achievement::Secret);
            if self.state.score % 10 != 1 {
                self.state.score += 1;
            }
            info!("hidden mode toggled: {}", self.easter_egg);
        }
    }

    /// Advance the session by one frame. Returns `false` once the
    /// session has ended; the end callback fires on the first such
    /// frame, after a forced progression flush.
    pub fn step(&mut self, delta: f32) -> bool {
        let input = StepInput {
            left_held: self.key_down(KEY_LEFT),
            right_held: self.key_down(KEY_RIGHT),
            fire_held: self.key_down(KEY_FIRE),
        };
        let running = sim::step(&mut self.state, &input, &self.tuning, &mut self.rng, delta);

        self.bridge.observe(&self.state);
        if running {
            self.bridge
                .flush(&mut self.state, self.tuning.progress_flush_interval, false);
        } else if !self.finalized {
            // Final flush and event batch happen whether or not the
            // host registered a callback.
            self.finalized = true;
            self.bridge
                .flush(&mut self.state, self.tuning.progress_flush_interval, true);
            self.bridge.record_session_events(&self.state);
            info!("session ended with score {}", self.state.score);
            if let Some(mut callback) = self.on_ended.take() {
                callback(self.state.score);
            }
        }
        running
    }
}
