//! Sound cues
//!
//! The simulation raises `GameEvent`s; this module maps them to the
//! cues a host audio backend should play. Playback itself lives behind
//! `AudioSink` so headless hosts and tests can drop it entirely.

use crate::sim::GameEvent;

/// The sound effects the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Bullet fired
    Laser,
    /// Enemy destroyed
    Explosion,
    /// Ally hit and turned angry
    BadHit,
    /// Entity reached the wall
    WallBreak,
    /// Combo maxed out and the board cleared
    Blast,
    /// Combo reached the milestone level
    PowerUp,
}

/// A playback backend
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// The cue for a game event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<SoundCue> {
    match event {
        GameEvent::BulletFired => Some(SoundCue::Laser),
        GameEvent::EnemyKilled { .. } => Some(SoundCue::Explosion),
        GameEvent::AllyAngered => Some(SoundCue::BadHit),
        GameEvent::WallHit { .. } => Some(SoundCue::WallBreak),
        GameEvent::BoardCleared => Some(SoundCue::Blast),
        GameEvent::ComboMilestone { .. } => Some(SoundCue::PowerUp),
        GameEvent::BulletMissed | GameEvent::WallDestroyed | GameEvent::SessionEnded { .. } => None,
    }
}

/// Play the cues for a batch of drained events
pub fn play_events(events: &[GameEvent], sink: &mut impl AudioSink) {
    for event in events {
        if let Some(cue) = cue_for(event) {
            sink.play(cue);
        }
    }
}
