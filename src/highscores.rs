//! High score leaderboard system
//!
//! Persisted as JSON, tracks the top 10 scores. The session only talks to
//! [`HighScoreService`]; how entries are entered and shown belongs to the
//! front end.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// High-score flow the session hands control to when a run ends
pub trait HighScoreService {
    /// Record `score` (if it ranks) and open the high-score window
    fn enter_and_show(&mut self, score: u32);
    /// Open the high-score window without recording anything
    fn show(&mut self);
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Name typed in by the player
    pub name: String,
    /// Snowflakes caught
    pub score: u32,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Index `score` would be inserted at, or None if it stays off the board.
    /// Entries are sorted descending; a tie lands below the older entry.
    fn slot_for(&self, score: u32) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let slot = self.entries.partition_point(|e| e.score >= score);
        (slot < MAX_HIGH_SCORES).then_some(slot)
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        self.slot_for(score).is_some()
    }

    /// Rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        self.slot_for(score).map(|slot| slot + 1)
    }

    /// Record a run under `name`. Returns the rank achieved (1-indexed).
    pub fn add_score(&mut self, name: &str, score: u32, timestamp: u64) -> Option<usize> {
        let slot = self.slot_for(score)?;
        self.entries.insert(
            slot,
            HighScoreEntry {
                name: name.trim().to_string(),
                score,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(slot + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score on the board, shown in the start banner
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from a JSON file, starting fresh if it is missing or unreadable
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                return Self::new();
            }
            Err(e) => {
                log::warn!("Could not read high scores from {}: {e}", path.display());
                return Self::new();
            }
        };

        match serde_json::from_str::<HighScores>(&json) {
            Ok(mut scores) => {
                scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Discarding corrupt high score file {}: {e}", path.display());
                Self::new()
            }
        }
    }

    /// Save high scores as JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(scores: &[u32]) -> HighScores {
        let mut board = HighScores::new();
        for (i, &score) in scores.iter().enumerate() {
            board.add_score(&format!("p{i}"), score, i as u64);
        }
        board
    }

    #[test]
    fn test_zero_never_qualifies() {
        let board = HighScores::new();
        assert!(!board.qualifies(0));
        assert_eq!(board.potential_rank(0), None);
    }

    #[test]
    fn test_entries_sorted_descending() {
        let board = board_with(&[3, 9, 5]);
        let scores: Vec<u32> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![9, 5, 3]);
        assert_eq!(board.top_score(), Some(9));
    }

    #[test]
    fn test_tie_ranks_below_existing() {
        let mut board = board_with(&[5]);
        assert_eq!(board.add_score("late", 5, 99), Some(2));
        assert_eq!(board.entries[0].name, "p0");
    }

    #[test]
    fn test_full_board_keeps_top_ten() {
        let mut board = board_with(&[10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
        assert!(!board.qualifies(10));
        assert_eq!(board.potential_rank(15), Some(10));
        assert_eq!(board.add_score("new", 15, 0), Some(10));
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries.last().map(|e| e.score), Some(15));
    }

    #[test]
    fn test_rank_matches_insert_position() {
        let mut board = board_with(&[50, 30, 30, 10]);
        assert_eq!(board.potential_rank(30), Some(4));
        assert_eq!(board.add_score("mid", 30, 9), Some(4));
        assert_eq!(board.potential_rank(60), Some(1));
        assert_eq!(board.add_score("top", 60, 10), Some(1));
        assert_eq!(board.top_score(), Some(60));
        assert_eq!(board.entries[4].name, "mid");
    }

    #[test]
    fn test_name_is_trimmed() {
        let mut board = HighScores::new();
        board.add_score("  Hanna \n", 4, 0);
        assert_eq!(board.entries[0].name, "Hanna");
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("snowfall_scores_{}.json", std::process::id()));
        let board = board_with(&[7, 2]);
        board.save(&path).unwrap();
        let loaded = HighScores::load(&path);
        assert_eq!(loaded.entries, board.entries);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_starts_fresh() {
        let path = std::env::temp_dir().join(format!("snowfall_bad_{}.json", std::process::id()));
        fs::write(&path, "not json").unwrap();
        assert!(HighScores::load(&path).is_empty());
        let _ = fs::remove_file(&path);
    }
}
