//! High score leaderboard system
//!
//! Persisted as a JSON array under a fixed key, tracks the top 5 scores.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HIGH_SCORES;
use crate::persistence::{self, KeyValueStore};

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player name as typed on the start menu
    pub name: String,
    /// Final score of the run
    pub score: u32,
}

impl fmt::Display for HighScoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.score)
    }
}

/// Where finished runs are recorded
pub trait ScoreStore {
    /// Current leaderboard, best first, at most [`MAX_HIGH_SCORES`] entries
    fn load(&self) -> Vec<HighScoreEntry>;
    /// Insert a result, re-sort, trim to the top entries and persist
    fn record(&mut self, name: &str, score: u32);
}

/// Leaderboard backed by a key/value store
#[derive(Debug, Clone)]
pub struct HighScores<S: KeyValueStore> {
    entries: Vec<HighScoreEntry>,
    store: S,
}

impl<S: KeyValueStore> HighScores<S> {
    /// Storage key, shared with earlier releases of the game
    pub const STORAGE_KEY: &'static str = "highScores";

    /// Read the leaderboard from `store`; missing or unreadable data starts fresh
    pub fn open(store: S) -> Self {
        let entries = match persistence::load_json::<Vec<HighScoreEntry>, _>(&store, Self::STORAGE_KEY) {
            Ok(Some(mut entries)) => {
                log::info!("Loaded {} high scores", entries.len());
                sort_and_trim(&mut entries);
                entries
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Vec::new()
            }
            Err(e) => {
                log::warn!("Discarding stored high scores: {}", e);
                Vec::new()
            }
        };
        Self { entries, store }
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    fn save(&mut self) {
        match persistence::save_json(&mut self.store, Self::STORAGE_KEY, &self.entries) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
            Err(e) => log::warn!("Failed to save high scores: {}", e),
        }
    }
}

impl<S: KeyValueStore> ScoreStore for HighScores<S> {
    fn load(&self) -> Vec<HighScoreEntry> {
        self.entries.clone()
    }

    fn record(&mut self, name: &str, score: u32) {
        self.entries.push(HighScoreEntry {
            name: name.to_string(),
            score,
        });
        sort_and_trim(&mut self.entries);
        self.save();
    }
}

/// Stable sort, best first; equal scores keep insertion order
fn sort_and_trim(entries: &mut Vec<HighScoreEntry>) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(MAX_HIGH_SCORES);
}
