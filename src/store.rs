// Score persistence: a JSON snapshot of the full leaderboard, rewritten
// wholesale on every mutation.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One leaderboard entry. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player: String,
    pub score: u32,
    pub date: NaiveDateTime,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write leaderboard file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize leaderboard: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed score store.
///
/// Reads treat the file on disk as the source of truth and reload it in
/// full; writes rewrite the whole snapshot from the in-memory list.
/// Concurrent writers race on that read-modify-write and can lose
/// updates; expected usage is a single writer.
pub struct ScoreStore {
    path: PathBuf,
    entries: Mutex<Vec<ScoreEntry>>,
}

impl ScoreStore {
    /// Open a store over the given snapshot path. A missing or unreadable
    /// file is treated as an empty leaderboard.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_snapshot(&path);
        ScoreStore {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Append an entry, re-sort descending by score and persist the full
    /// snapshot. Equal scores keep their insertion order.
    pub fn add(&self, entry: ScoreEntry) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap();
        entries.push(entry);
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.persist(&entries)
    }

    /// Return up to `limit` entries in persisted order, reloading the
    /// snapshot from disk first. When `filter` is given, only entries
    /// whose player name contains it case-insensitively are returned.
    pub fn list(&self, filter: Option<&str>, limit: usize) -> Vec<ScoreEntry> {
        let mut entries = self.entries.lock().unwrap();
        *entries = load_snapshot(&self.path);

        let filtered: Vec<ScoreEntry> = match filter {
            Some(q) => {
                let needle = q.to_lowercase();
                entries
                    .iter()
                    .filter(|e| e.player.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
            None => entries.clone(),
        };

        filtered.into_iter().take(limit).collect()
    }

    /// Drop all entries and persist the empty snapshot.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap();
        entries.clear();
        self.persist(&entries)
    }

    fn persist(&self, entries: &[ScoreEntry]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Load the snapshot from disk. Missing or malformed files yield an empty
/// leaderboard rather than an error.
fn load_snapshot(path: &Path) -> Vec<ScoreEntry> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };
    match serde_json::from_str(&contents) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "malformed leaderboard file, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(player: &str, score: u32) -> ScoreEntry {
        ScoreEntry {
            player: player.to_string(),
            score,
            date: "2024-01-01T00:00:00".parse().unwrap(),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::new(dir.path().join("nope.json"));
        assert!(store.list(None, 10).is_empty());
    }

    #[test]
    fn test_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = ScoreStore::new(&path);
        assert!(store.list(None, 10).is_empty());
    }

    #[test]
    fn test_add_sorts_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        let store = ScoreStore::new(&path);

        store.add(entry("Bo", 80)).unwrap();
        store.add(entry("Ana", 120)).unwrap();
        store.add(entry("Cy", 100)).unwrap();

        // A fresh store sees the same ordering from disk.
        let reopened = ScoreStore::new(&path);
        let list = reopened.list(None, 10);
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].player, "Ana");
        assert_eq!(list[1].player, "Cy");
        assert_eq!(list[2].player, "Bo");
    }

    #[test]
    fn test_equal_scores_keep_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::new(dir.path().join("leaderboard.json"));
        store.add(entry("First", 50)).unwrap();
        store.add(entry("Second", 50)).unwrap();

        let list = store.list(None, 10);
        assert_eq!(list[0].player, "First");
        assert_eq!(list[1].player, "Second");
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::new(dir.path().join("leaderboard.json"));
        store.add(entry("Ana", 120)).unwrap();
        store.add(entry("Bo", 80)).unwrap();
        store.add(entry("banana", 10)).unwrap();

        let list = store.list(Some("AN"), 10);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].player, "Ana");
        assert_eq!(list[1].player, "banana");
    }

    #[test]
    fn test_limit_caps_results() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::new(dir.path().join("leaderboard.json"));
        for i in 0..15 {
            store.add(entry(&format!("p{i}"), i * 10)).unwrap();
        }
        assert_eq!(store.list(None, 10).len(), 10);
    }

    #[test]
    fn test_clear_persists_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        let store = ScoreStore::new(&path);
        store.add(entry("Ana", 120)).unwrap();
        store.clear().unwrap();

        assert!(store.list(None, 10).is_empty());
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(serde_json::from_str::<Vec<ScoreEntry>>(&raw).unwrap(), vec![]);
    }

    #[test]
    fn test_list_reloads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        let store = ScoreStore::new(&path);

        // Another writer replaces the file behind our back.
        let other = ScoreStore::new(&path);
        other.add(entry("Ana", 120)).unwrap();

        let list = store.list(None, 10);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].player, "Ana");
    }

    #[test]
    fn test_date_roundtrip() {
        let e = entry("Ana", 120);
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"date\":\"2024-01-01T00:00:00\""));
        let back: ScoreEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}
