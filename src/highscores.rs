//! Session leaderboard
//!
//! Tracks the top 10 finished runs of one simulation instance. Lives only as
//! long as the process; it serializes so a host can persist it if it wants.

use serde::{Deserialize, Serialize};

/// Maximum number of runs to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Pairs passed
    pub score: u32,
    /// 1-based run number within the session
    pub run: u32,
    /// Seconds survived
    pub elapsed: f32,
    /// Pairs spawned during the run
    pub pairs_spawned: u32,
}

/// Leaderboard, sorted by score descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// A run makes the board if it passed at least one pair and either
    /// there's a free slot or it beats the current last place
    pub fn qualifies(&self, score: u32) -> bool {
        score > 0
            && (self.entries.len() < MAX_HIGH_SCORES
                || self.entries.last().is_some_and(|last| score > last.score))
    }

    /// Record a finished run. Returns its 1-based place, or None if it
    /// didn't make the board. Equal scores rank behind earlier runs.
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }
        let index = self.entries.partition_point(|e| e.score >= entry.score);
        self.entries.insert(index, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(index + 1)
    }

    /// Best score on the board
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}
