//! Data-driven game balance
//!
//! Everything a designer might want to retune without touching the
//! simulation lives here. Tables are validated once at session
//! construction; a malformed table is a programmer error, not something
//! the frame loop should have to cope with.

use serde::{Deserialize, Serialize};

/// Tunable balance parameters. `Default` matches shipped gameplay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Motion-delta scale factor indexed by current combo level.
    /// Combos past the end of the table use 1.0. The tail dips below
    /// 1.0 to produce the slow-motion feel at high combos.
    pub time_factor_for_combo: Vec<f32>,
    /// Palette index by combo level; combos past the end use palette 0.
    pub palette_for_combo: Vec<usize>,
    /// Seconds between spawns at score 0
    pub spawn_interval_start: f32,
    /// Seconds between spawns at (and beyond) the reference score
    pub spawn_interval_floor: f32,
    /// Score at which the spawn interval bottoms out
    pub spawn_interval_score_ref: u64,
    /// Minimum seconds between non-forced incremental achievement
    /// submissions (the progression backend rate-limits us)
    pub progress_flush_interval: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            time_factor_for_combo: vec![
                1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.9, 0.8, 0.7, 0.6, 0.5,
            ],
            palette_for_combo: vec![0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3, 3],
            spawn_interval_start: 2.0,
            spawn_interval_floor: 1.0,
            spawn_interval_score_ref: 5000,
            progress_flush_interval: 30.0,
        }
    }
}

impl Tuning {
    /// Validate the tables. Called once when a session is created;
    /// failures here mean the build is misconfigured.
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.time_factor_for_combo.is_empty() {
            return Err(TuningError::EmptyTimeFactorTable);
        }
        if self
            .time_factor_for_combo
            .iter()
            .any(|&f| !f.is_finite() || f <= 0.0)
        {
            return Err(TuningError::NonPositiveTimeFactor);
        }
        if self.palette_for_combo.is_empty() {
            return Err(TuningError::EmptyPaletteTable);
        }
        if self.spawn_interval_start <= 0.0 || self.spawn_interval_floor <= 0.0 {
            return Err(TuningError::NonPositiveSpawnInterval);
        }
        if self.spawn_interval_floor > self.spawn_interval_start {
            return Err(TuningError::InvertedSpawnInterval);
        }
        if self.spawn_interval_score_ref == 0 {
            return Err(TuningError::ZeroScoreReference);
        }
        if self.progress_flush_interval < 0.0 {
            return Err(TuningError::NegativeFlushInterval);
        }
        Ok(())
    }

    /// Motion-delta scale for the given combo level
    pub fn time_factor(&self, combo: u32) -> f32 {
        self.time_factor_for_combo
            .get(combo as usize)
            .copied()
            .unwrap_or(1.0)
    }

    /// Palette index for the given combo level
    pub fn palette(&self, combo: u32) -> usize {
        self.palette_for_combo
            .get(combo as usize)
            .copied()
            .unwrap_or(0)
    }
}

/// Startup-time configuration error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuningError {
    EmptyTimeFactorTable,
    NonPositiveTimeFactor,
    EmptyPaletteTable,
    NonPositiveSpawnInterval,
    InvertedSpawnInterval,
    ZeroScoreReference,
    NegativeFlushInterval,
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            TuningError::EmptyTimeFactorTable => "time_factor_for_combo table is empty",
            TuningError::NonPositiveTimeFactor => {
                "time_factor_for_combo contains a non-positive or non-finite entry"
            }
            TuningError::EmptyPaletteTable => "palette_for_combo table is empty",
            TuningError::NonPositiveSpawnInterval => "spawn intervals must be positive",
            TuningError::InvertedSpawnInterval => {
                "spawn_interval_floor exceeds spawn_interval_start"
            }
            TuningError::ZeroScoreReference => "spawn_interval_score_ref must be non-zero",
            TuningError::NegativeFlushInterval => "progress_flush_interval is negative",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for TuningError {}
