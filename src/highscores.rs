//! High score leaderboard system
//!
//! Persisted to key-value storage, tracks top 10 scores.

use serde::{Deserialize, Serialize};

use crate::platform::{KeyValueStore, StorageError};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Current on-disk envelope version
const FORMAT_VERSION: u32 = 1;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player name
    pub name: String,
    /// Final score
    pub score: u64,
    /// Unique token for keyed UI lists
    pub id: String,
}

/// Versioned storage envelope
#[derive(Debug, Serialize, Deserialize)]
struct StoredScores {
    version: u32,
    entries: Vec<HighScoreEntry>,
}

/// High score leaderboard
#[derive(Debug, Clone, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
    next_token: u32,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "sky_high_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Ties with the lowest entry lose to the earlier one
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, name: &str, score: u64, timestamp_ms: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let id = self.make_id(timestamp_ms);
        self.entries.push(HighScoreEntry {
            name: name.to_string(),
            score,
            id: id.clone(),
        });
        self.normalize();

        self.entries.iter().position(|e| e.id == id).map(|i| i + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Stable descending sort, then trim
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    fn make_id(&mut self, timestamp_ms: f64) -> String {
        self.next_token = self.next_token.wrapping_add(1);
        let mut id = format!("{:x}-{}", timestamp_ms.max(0.0) as u64, self.next_token);
        // Loaded entries may already use the same counter
        while self.entries.iter().any(|e| e.id == id) {
            self.next_token = self.next_token.wrapping_add(1);
            id = format!("{:x}-{}", timestamp_ms.max(0.0) as u64, self.next_token);
        }
        id
    }

    /// Parse a stored payload; anything unreadable yields an empty table
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<StoredScores>(json) {
            Ok(stored) if stored.version == FORMAT_VERSION => {
                let mut scores = Self {
                    entries: stored.entries,
                    next_token: 0,
                };
                scores.normalize();
                scores
            }
            Ok(stored) => {
                log::warn!(
                    "Discarding high scores with unknown version {}",
                    stored.version
                );
                Self::new()
            }
            Err(e) => {
                log::warn!("Discarding unreadable high scores: {}", e);
                Self::new()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        let stored = StoredScores {
            version: FORMAT_VERSION,
            entries: self.entries.clone(),
        };
        Ok(serde_json::to_string(&stored)?)
    }

    /// Load high scores, treating missing or corrupted data as empty
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => {
                let scores = Self::from_json(&json);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("High score storage unreadable: {}", e);
                Self::new()
            }
        }
    }

    /// Save high scores
    ///
    /// On failure, retries once with the top half of the table. The
    /// in-memory table is never modified.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        let first = self
            .to_json()
            .and_then(|json| store.set(Self::STORAGE_KEY, &json));
        let Err(e) = first else {
            log::info!("High scores saved ({} entries)", self.entries.len());
            return Ok(());
        };

        log::warn!("High score save failed ({}), retrying with fewer entries", e);
        let reduced = Self {
            entries: self.entries[..self.entries.len() / 2].to_vec(),
            next_token: self.next_token,
        };
        match reduced
            .to_json()
            .and_then(|json| store.set(Self::STORAGE_KEY, &json))
        {
            Ok(()) => {
                log::info!("High scores saved ({} entries, reduced)", reduced.entries.len());
                Ok(())
            }
            Err(e) => {
                log::error!("High scores kept in memory only: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    fn table(scores: &[u64]) -> HighScores {
        let mut hs = HighScores::new();
        for (i, s) in scores.iter().enumerate() {
            hs.add_score(&format!("p{i}"), *s, 1_000.0 + i as f64);
        }
        hs
    }

    #[test]
    fn test_sorted_descending_and_capped() {
        let hs = table(&[10, 50, 30, 70, 20, 90, 40, 60, 80, 100, 110, 5]);
        let scores: Vec<u64> = hs.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![110, 100, 90, 80, 70, 60, 50, 40, 30, 20]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut hs = HighScores::new();
        hs.add_score("first", 50, 1.0);
        hs.add_score("second", 50, 2.0);
        let rank = hs.add_score("third", 50, 3.0);
        assert_eq!(rank, Some(3));
        let names: Vec<&str> = hs.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_rank_and_qualification() {
        let hs = table(&[100, 90, 80, 70, 60, 50, 40, 30, 20, 10]);
        assert!(!hs.qualifies(10));
        assert!(hs.qualifies(11));
        assert_eq!(hs.potential_rank(85), Some(3));
        assert_eq!(hs.potential_rank(5), None);
    }

    #[test]
    fn test_scoreless_run_is_recorded() {
        let mut hs = HighScores::new();
        assert!(hs.qualifies(0));
        assert_eq!(hs.add_score("early crash", 0, 1.0), Some(1));
        assert_eq!(hs.top_score(), Some(0));

        // A full table still turns it away
        let full = table(&[100, 90, 80, 70, 60, 50, 40, 30, 20, 10]);
        assert!(!full.qualifies(0));
    }

    #[test]
    fn test_ids_are_unique() {
        let hs = table(&[10, 10, 10, 10]);
        let mut ids: Vec<&str> = hs.entries.iter().map(|e| e.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let hs = table(&[30, 10, 20]);
        hs.save(&mut store).unwrap();
        let loaded = HighScores::load(&store);
        assert_eq!(loaded.entries, hs.entries);
    }

    #[test]
    fn test_legacy_number_list_discarded() {
        let mut store = MemoryStore::new();
        store.set(HighScores::STORAGE_KEY, "[120, 80, 40]").unwrap();
        assert!(HighScores::load(&store).is_empty());
    }

    #[test]
    fn test_corrupted_payload_discarded() {
        assert!(HighScores::from_json("{\"version\":1,\"entries\":[{\"name\":").is_empty());
        assert!(HighScores::from_json("{\"version\":7,\"entries\":[]}").is_empty());
    }

    #[test]
    fn test_loaded_table_is_renormalized() {
        let json = r#"{"version":1,"entries":[
            {"name":"a","score":5,"id":"1"},
            {"name":"b","score":50,"id":"2"}
        ]}"#;
        let hs = HighScores::from_json(json);
        assert_eq!(hs.top_score(), Some(50));
    }

    #[test]
    fn test_save_retries_with_reduced_table() {
        let hs = table(&[100, 90, 80, 70, 60, 50, 40, 30, 20, 10]);
        let full = hs.to_json().unwrap().len() + HighScores::STORAGE_KEY.len();
        let mut store = MemoryStore::with_quota(full - 1);
        hs.save(&mut store).unwrap();
        let loaded = HighScores::load(&store);
        assert_eq!(loaded.entries.len(), 5);
        assert_eq!(hs.entries.len(), 10);
    }

    #[test]
    fn test_save_failure_reported() {
        let hs = table(&[100, 90]);
        let mut store = MemoryStore::with_quota(4);
        assert!(hs.save(&mut store).is_err());
    }
}
