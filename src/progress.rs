//! Bridge between the simulation and the player progression backend
//!
//! The simulation never talks to a network. Instead, the bridge watches
//! the game state for threshold crossings and emits `ProgressIntent`s
//! over a channel; a host-side adapter owns the actual submission.
//! Intents are fire-and-forget: a dropped receiver is logged and play
//! continues.
//!
//! Incremental submissions are throttled because the backend rate-limits
//! increment calls; unlocks go out immediately but at most once each.

use std::collections::HashSet;
use std::sync::mpsc::Sender;

use log::{debug, warn};

use crate::sim::GameState;

/// Kills-in-a-row thresholds for the precision tiers
pub const PRECISION_TIERS: [u32; 4] = [5, 10, 25, 50];
/// Intact-wall-time thresholds (seconds) for the integrity tiers
pub const INTEGRITY_TIERS: [u32; 4] = [30, 60, 120, 300];
/// Total-score thresholds for the rank tiers
pub const RANK_TIERS: [u64; 6] = [1000, 2000, 3000, 5000, 8000, 15000];
/// Cumulative-kill targets for the incremental experience tiers
pub const EXPERIENCE_TIERS: [u32; 4] = [50, 100, 200, 500];
/// Minimum score for a session to count toward the "serious player"
/// incremental achievement
pub const SERIOUS_MIN_SCORE: u64 = 2000;

/// A player achievement known to the progression backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Achievement {
    /// First enemy ever killed
    FirstKill,
    /// Killed this many enemies without a miss or ally hit
    Precision(u32),
    /// Kept the wall intact for this many seconds
    Integrity(u32),
    /// Reached this score in a single session
    Rank(u64),
    /// Incremental: cumulative kills across sessions toward this target
    Experience(u32),
    /// Incremental: sessions played
    Frequent,
    /// Incremental: sessions finished above `SERIOUS_MIN_SCORE`
    Serious,
    /// Hidden achievement for finding the easter egg
    Secret,
}

/// A gameplay event counter known to the progression backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    EnemiesKilled,
    GamesPlayed,
    CombosAchieved,
}

/// One event-counter update inside a `RecordEvents` batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventUpdate {
    pub event: ProgressEvent,
    pub count: u32,
}

/// What the host adapter should submit to the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressIntent {
    Unlock(Achievement),
    Increment { achievement: Achievement, steps: u32 },
    RecordEvents(Vec<EventUpdate>),
}

/// Session-scoped progression watcher
pub struct ProgressBridge {
    tx: Sender<ProgressIntent>,
    unlocked: HashSet<Achievement>,
}

impl ProgressBridge {
    pub fn new(tx: Sender<ProgressIntent>) -> Self {
        Self {
            tx,
            unlocked: HashSet::new(),
        }
    }

    fn send(&self, intent: ProgressIntent) {
        debug!("progress intent: {intent:?}");
        if self.tx.send(intent).is_err() {
            // Receiver gone. Progression is best-effort; the game
            // must keep running without it.
            warn!("progress intent dropped: receiver disconnected");
        }
    }

    /// Emit an unlock for `achievement` unless it was already sent
    /// this session.
    pub fn unlock(&mut self, achievement: Achievement) {
        if self.unlocked.insert(achievement) {
            self.send(ProgressIntent::Unlock(achievement));
        }
    }

    /// Check every threshold-based achievement against the current
    /// state. Cheap to call once per frame; unlocks fire at most once.
    pub fn observe(&mut self, state: &GameState) {
        if state.kills > 0 {
            self.unlock(Achievement::FirstKill);
        }
        for tier in PRECISION_TIERS {
            if state.kills_in_a_row >= tier {
                self.unlock(Achievement::Precision(tier));
            }
        }
        for tier in INTEGRITY_TIERS {
            if state.intact_wall_time >= f64::from(tier) {
                self.unlock(Achievement::Integrity(tier));
            }
        }
        for tier in RANK_TIERS {
            if state.score >= tier {
                self.unlock(Achievement::Rank(tier));
            }
        }
    }

    /// Submit pending incremental progress. Unless `force` is set, the
    /// call is a no-op until `flush_interval` seconds have passed since
    /// the previous submission. At session end the caller forces a
    /// flush so nothing is lost.
    pub fn flush(&mut self, state: &mut GameState, flush_interval: f64, force: bool) {
        if !force && state.clock < state.last_progress_flush + flush_interval {
            return;
        }
        state.last_progress_flush = state.clock;

        if state.kills_to_send > 0 {
            for tier in EXPERIENCE_TIERS {
                self.send(ProgressIntent::Increment {
                    achievement: Achievement::Experience(tier),
                    steps: state.kills_to_send,
                });
            }
            state.kills_to_send = 0;
        }

        if force {
            self.send(ProgressIntent::Increment {
                achievement: Achievement::Frequent,
                steps: 1,
            });
            if state.score >= SERIOUS_MIN_SCORE {
                self.send(ProgressIntent::Increment {
                    achievement: Achievement::Serious,
                    steps: 1,
                });
            }
        }
    }

    /// Submit the session's event counters in one batch. Called once,
    /// at session end.
    pub fn record_session_events(&mut self, state: &GameState) {
        let mut updates = Vec::new();
        if state.kills > 0 {
            updates.push(EventUpdate {
                event: ProgressEvent::EnemiesKilled,
                count: state.kills,
            });
        }
        if state.combos_completed > 0 {
            updates.push(EventUpdate {
                event: ProgressEvent::CombosAchieved,
                count: state.combos_completed,
            });
        }
        updates.push(EventUpdate {
            event: ProgressEvent::GamesPlayed,
            count: 1,
        });
        self.send(ProgressIntent::RecordEvents(updates));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn bridge() -> (ProgressBridge, mpsc::Receiver<ProgressIntent>) {
        let (tx, rx) = mpsc::channel();
        (ProgressBridge::new(tx), rx)
    }

    fn drain(rx: &mpsc::Receiver<ProgressIntent>) -> Vec<ProgressIntent> {
        rx.try_iter().collect()
    }

    #[test]
    fn test_unlock_sent_once() {
        let (mut bridge, rx) = bridge();
        bridge.unlock(Achievement::FirstKill);
        bridge.unlock(Achievement::FirstKill);
        assert_eq!(
            drain(&rx),
            vec![ProgressIntent::Unlock(Achievement::FirstKill)]
        );
    }

    #[test]
    fn test_observe_unlocks_crossed_tiers() {
        let (mut bridge, rx) = bridge();
        let mut state = GameState::new();
        state.kills = 12;
        state.kills_in_a_row = 12;
        state.score = 2500;
        state.intact_wall_time = 45.0;

        bridge.observe(&state);
        let intents = drain(&rx);

        for expected in [
            Achievement::FirstKill,
            Achievement::Precision(5),
            Achievement::Precision(10),
            Achievement::Integrity(30),
            Achievement::Rank(1000),
            Achievement::Rank(2000),
        ] {
            assert!(intents.contains(&ProgressIntent::Unlock(expected)));
        }
        assert!(!intents.contains(&ProgressIntent::Unlock(Achievement::Precision(25))));
        assert!(!intents.contains(&ProgressIntent::Unlock(Achievement::Rank(3000))));

        // A second observe with the same state sends nothing new
        bridge.observe(&state);
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn test_flush_throttled_until_interval() {
        let (mut bridge, rx) = bridge();
        let mut state = GameState::new();
        state.kills_to_send = 3;
        state.clock = 10.0;
        state.last_progress_flush = 5.0;

        bridge.flush(&mut state, 30.0, false);
        assert!(drain(&rx).is_empty());
        assert_eq!(state.kills_to_send, 3);

        state.clock = 40.0;
        bridge.flush(&mut state, 30.0, false);
        let intents = drain(&rx);
        assert_eq!(intents.len(), EXPERIENCE_TIERS.len());
        assert!(intents.contains(&ProgressIntent::Increment {
            achievement: Achievement::Experience(50),
            steps: 3,
        }));
        assert_eq!(state.kills_to_send, 0);
        assert_eq!(state.last_progress_flush, 40.0);
    }

    #[test]
    fn test_forced_flush_ignores_throttle_and_adds_session_increments() {
        let (mut bridge, rx) = bridge();
        let mut state = GameState::new();
        state.kills_to_send = 1;
        state.score = 2500;
        state.clock = 1.0;

        bridge.flush(&mut state, 30.0, true);
        let intents = drain(&rx);

        assert_eq!(state.kills_to_send, 0);
        assert!(intents.contains(&ProgressIntent::Increment {
            achievement: Achievement::Frequent,
            steps: 1,
        }));
        assert!(intents.contains(&ProgressIntent::Increment {
            achievement: Achievement::Serious,
            steps: 1,
        }));
    }

    #[test]
    fn test_low_score_session_is_not_serious() {
        let (mut bridge, rx) = bridge();
        let mut state = GameState::new();
        state.score = SERIOUS_MIN_SCORE - 1;

        bridge.flush(&mut state, 30.0, true);
        let intents = drain(&rx);
        assert!(!intents.contains(&ProgressIntent::Increment {
            achievement: Achievement::Serious,
            steps: 1,
        }));
    }

    #[test]
    fn test_session_events_batched() {
        let (mut bridge, rx) = bridge();
        let mut state = GameState::new();
        state.kills = 7;
        state.combos_completed = 2;

        bridge.record_session_events(&state);
        let intents = drain(&rx);
        assert_eq!(
            intents,
            vec![ProgressIntent::RecordEvents(vec![
                EventUpdate {
                    event: ProgressEvent::EnemiesKilled,
                    count: 7,
                },
                EventUpdate {
                    event: ProgressEvent::CombosAchieved,
                    count: 2,
                },
                EventUpdate {
                    event: ProgressEvent::GamesPlayed,
                    count: 1,
                },
            ])]
        );
    }

    #[test]
    fn test_disconnected_receiver_does_not_panic() {
        let (mut bridge, rx) = bridge();
        drop(rx);
        bridge.unlock(Achievement::Secret);
    }
}
