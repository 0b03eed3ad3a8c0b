//! Local high score table
//!
//! Top 10 scores, persisted as JSON next to the user's home directory.
//! Persistence is best-effort: a missing or corrupt file just means a
//! fresh table.

use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

const SCORES_FILE: &str = ".packet-panic-scores.json";

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Enemies killed in that session
    pub kills: u32,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: u64,
}

/// High score table, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the table
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if it
    /// doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score if it qualifies. Returns the rank achieved
    /// (1-indexed) or None.
    pub fn add_score(&mut self, score: u64, kills: u32, timestamp: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            kills,
            timestamp,
        };

        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Default on-disk location: the user's home directory, falling
    /// back to the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_default()
            .join(SCORES_FILE)
    }

    /// Load the table from `path`; any failure yields a fresh table.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    info!("loaded {} high scores", scores.entries.len());
                    scores
                }
                Err(e) => {
                    warn!("ignoring corrupt high score file: {e}");
                    Self::new()
                }
            },
            Err(_) => {
                info!("no high score file, starting fresh");
                Self::new()
            }
        }
    }

    /// Save the table to `path`
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        std::fs::write(path, json)?;
        info!("high scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_score_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));
    }

    #[test]
    fn test_scores_kept_sorted_and_capped() {
        let mut scores = HighScores::new();
        for s in [500, 100, 900, 300, 700, 200, 800, 400, 600, 1000, 50] {
            scores.add_score(s, 0, 0);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(1000));
        assert!(
            scores
                .entries
                .windows(2)
                .all(|w| w[0].score >= w[1].score)
        );
        // 50 fell off the bottom of a full table
        assert!(!scores.entries.iter().any(|e| e.score == 50));
    }

    #[test]
    fn test_rank_reported() {
        let mut scores = HighScores::new();
        scores.add_score(300, 3, 0);
        scores.add_score(100, 1, 0);
        assert_eq!(scores.potential_rank(200), Some(2));
        assert_eq!(scores.add_score(200, 2, 0), Some(2));
        assert_eq!(scores.entries[1].score, 200);
    }

    #[test]
    fn test_full_table_rejects_low_score() {
        let mut scores = HighScores::new();
        for s in 1..=10 {
            scores.add_score(s * 100, 0, 0);
        }
        assert!(!scores.qualifies(99));
        assert_eq!(scores.add_score(99, 0, 0), None);
        assert_eq!(scores.potential_rank(99), None);
    }

    #[test]
    fn test_roundtrip_through_file() {
        let mut scores = HighScores::new();
        scores.add_score(1234, 17, 1_700_000_000);
        let path = std::env::temp_dir().join("packet-panic-scores-test.json");
        scores.save_to(&path).unwrap();
        let loaded = HighScores::load_from(&path);
        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.entries[0].score, 1234);
        assert_eq!(loaded.entries[0].kills, 17);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_starts_fresh() {
        let loaded = HighScores::load_from(Path::new("/nonexistent/packet-panic.json"));
        assert!(loaded.is_empty());
    }
}
