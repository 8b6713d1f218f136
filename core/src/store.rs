use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Storage write failed: {0}")]
pub struct StorageError(pub String);

/// String key-value persistence, such as the browser's `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> core::result::Result<(), StorageError>;
}

/// In-memory store, used natively and in tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> core::result::Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Result of submitting a score.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub board: Leaderboard,
    /// 1-based rank achieved, `None` when the score did not make the board.
    pub rank: Option<usize>,
}

/// Reads and writes leaderboards, one storage key per game.
///
/// Missing or unreadable data is treated as an empty board and never reported
/// to the caller. Write failures are logged and otherwise ignored.
#[derive(Clone, Debug)]
pub struct LeaderboardStore<S> {
    storage: S,
}

impl<S: KeyValueStore> LeaderboardStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn read(&self, config: &LeaderboardConfig) -> Leaderboard {
        match self.load_record::<Vec<ScoreEntry>>(config.key) {
            Some(entries) => Leaderboard::from_entries(config, entries),
            None => Leaderboard::new(),
        }
    }

    pub fn submit(&mut self, config: &LeaderboardConfig, entry: ScoreEntry) -> Submission {
        let mut board = self.read(config);
        log::info!(
            "submitting {} for {:?} to {}",
            entry.score(),
            entry.name(),
            config.key
        );
        let rank = board.insert(config, entry);
        if rank.is_some() {
            self.save_record(config.key, &board);
        } else {
            log::debug!("score did not place on {}", config.key);
        }
        Submission { board, rank }
    }

    /// Reads any JSON value stored under `key`.
    pub fn load_record<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.storage.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("discarding unreadable data in {}: {}", key, err);
                None
            }
        }
    }

    pub fn save_record<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(err) => {
                log::error!("failed to serialize {}: {}", key, err);
                return;
            }
        };
        if let Err(err) = self.storage.set(key, &json) {
            log::warn!("{} ({})", err, key);
        }
    }
}
