//! Packet Panic entry point
//!
//! Runs a headless demo session: an autopilot plays the game while the
//! frame loop drains sound cues, progression intents and a once-a-second
//! status line to the log. Ends when the wall falls (or after the demo
//! time cap) and records the result in the local high score table.

use std::sync::mpsc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use log::{debug, info};

use packet_panic::audio::{self, AudioSink, SoundCue};
use packet_panic::consts::*;
use packet_panic::render::{self, RenderSurface};
use packet_panic::sim::{Ally, Enemy, GameState, Particle, ScorePopup};
use packet_panic::{HighScores, Session, Tuning};

/// Longest the demo session is allowed to run, in session time
const DEMO_TIME_CAP: f64 = 120.0;

struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        debug!("sound: {cue:?}");
    }
}

/// A render backend that reduces the frame to a status line
#[derive(Default)]
struct StatusLine {
    wall: f32,
    enemies: usize,
    allies: usize,
    particles: usize,
    score: String,
    combo: u32,
}

impl RenderSurface for StatusLine {
    fn set_palette(&mut self, _palette: usize, _hidden_mode: bool) {}
    fn draw_background(&mut self) {}
    fn draw_wall(&mut self, remaining: f32) {
        self.wall = remaining;
    }
    fn draw_player(&mut self, _x: f32, _armed: bool) {}
    fn draw_ally(&mut self, _ally: &Ally) {
        self.allies += 1;
    }
    fn draw_enemy(&mut self, _enemy: &Enemy) {
        self.enemies += 1;
    }
    fn draw_bullet(&mut self, _pos: glam::Vec2) {}
    fn draw_particles(&mut self, particles: &[Particle]) {
        self.particles = particles.len();
    }
    fn draw_score(&mut self, text: &str) {
        self.score = text.to_string();
    }
    fn draw_combo(&mut self, combo: u32) {
        self.combo = combo;
    }
    fn draw_score_popup(&mut self, _popup: &ScorePopup) {}
}

/// Decide this frame's held keys the way a cautious player would:
/// chase the enemy closest to the wall, and only fire when the thing
/// the bullet would hit first is actually a valid target.
fn autopilot(session: &mut Session) {
    let state = session.state();
    let target = state
        .enemies
        .iter()
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
        .copied();

    let (left, right) = match target {
        Some(enemy) => {
            // Lead the target by the time the bullet needs to climb
            let climb = (SCREEN_H - PLAYER_SIZE - enemy.pos.y) / BULLET_SPEED;
            let aim = enemy.pos.x + ENEMY_W / 2.0 - enemy.speed * climb;
            let center = state.player_x + PLAYER_SIZE / 2.0;
            (aim < center - 5.0, aim > center + 5.0)
        }
        None => (false, false),
    };

    let fire = state.bullet.is_none() && first_in_column(state).is_some_and(|hostile| hostile);

    session.handle_key(KEY_LEFT, left);
    session.handle_key(KEY_RIGHT, right);
    session.handle_key(KEY_FIRE, fire);
}

/// What a bullet fired right now would hit first: Some(true) for an
/// enemy or angry ally, Some(false) for a harmless ally, None for
/// nothing in the column.
fn first_in_column(state: &GameState) -> Option<bool> {
    let column = state.player_x + PLAYER_SIZE / 2.0;
    let enemy_hits = state
        .enemies
        .iter()
        .filter(|e| e.pos.x <= column && column <= e.pos.x + ENEMY_W)
        .map(|e| (e.pos.y, true));
    let ally_hits = state
        .allies
        .iter()
        .filter(|a| a.pos.x <= column && column <= a.pos.x + ALLY_W)
        .map(|a| (a.pos.y, a.angry));
    enemy_hits
        .chain(ally_hits)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, hostile)| hostile)
}

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    info!("starting demo session with seed {seed}");

    let (progress_tx, progress_rx) = mpsc::channel();
    let mut session = match Session::new(seed, Tuning::default(), progress_tx) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("bad tuning: {e}");
            std::process::exit(1);
        }
    };
    session.on_session_end(|score| info!("final score reported: {score}"));

    let mut audio_sink = LogAudio;
    let mut last_frame = Instant::now();
    let mut last_status = 0u64;

    loop {
        let now = Instant::now();
        let delta = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        autopilot(&mut session);
        let running = session.step(delta);

        let events = session.take_events();
        audio::play_events(&events, &mut audio_sink);
        for intent in progress_rx.try_iter() {
            info!("progress: {intent:?}");
        }

        let clock = session.state().clock;
        if clock as u64 > last_status {
            last_status = clock as u64;
            let mut status = StatusLine::default();
            render::present(session.state(), session.tuning(), session.easter_egg(), &mut status);
            info!(
                "t={last_status:>3}s score={} combo={} wall={} enemies={} allies={} particles={}",
                status.score, status.combo, status.wall, status.enemies, status.allies,
                status.particles,
            );
        }

        if !running {
            break;
        }
        if clock > DEMO_TIME_CAP {
            info!("demo time cap reached");
            break;
        }
        std::thread::sleep(Duration::from_millis(16));
    }

    let state = session.state();
    println!(
        "session over: score {} with {} kills in {:.1}s",
        state.score, state.kills, state.clock
    );

    let path = HighScores::default_path();
    let mut scores = HighScores::load_from(&path);
    if let Some(rank) = scores.add_score(state.score, state.kills, seed) {
        println!("new high score, rank {rank}");
        if let Err(e) = scores.save_to(&path) {
            eprintln!("could not save high scores: {e}");
        }
    }
    if let Some(top) = scores.top_score() {
        println!("best so far: {top}");
    }
}
