use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use serde::{Deserialize, Serialize};

use crate::*;

/// One persisted leaderboard record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    name: String,
    score: Score,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<String>,
}

impl ScoreEntry {
    pub fn new(name: &Nickname, score: Score) -> Self {
        Self {
            name: String::from(name.as_str()),
            score,
            date: None,
        }
    }

    /// Attaches an ISO-8601 timestamp.
    pub fn with_date(self, date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Trims the stored name, dropping entries left without one.
    fn normalized(self) -> Option<Self> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        if name.len() == self.name.len() {
            return Some(self);
        }
        Some(Self {
            name: String::from(name),
            ..self
        })
    }
}

/// Which end of the score range ranks first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    HigherIsBetter,
    LowerIsBetter,
}

impl SortOrder {
    /// `Ordering::Less` means `a` ranks ahead of `b`.
    pub fn compare(self, a: Score, b: Score) -> Ordering {
        match self {
            Self::HigherIsBetter => b.cmp(&a),
            Self::LowerIsBetter => a.cmp(&b),
        }
    }

    pub fn is_better(self, a: Score, b: Score) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergePolicy {
    /// Every submission becomes its own row.
    Append,
    /// One row per name, holding that name's best score.
    BestPerName,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardConfig {
    pub key: &'static str,
    pub capacity: usize,
    pub order: SortOrder,
    pub merge: MergePolicy,
}

impl LeaderboardConfig {
    pub const fn new(
        key: &'static str,
        capacity: usize,
        order: SortOrder,
        merge: MergePolicy,
    ) -> Self {
        Self {
            key,
            capacity,
            order,
            merge,
        }
    }
}

/// Ranked list of results, serialized as a bare JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from arbitrary entries, trimming names, dropping nameless
    /// ones and restoring order and capacity.
    pub fn from_entries(config: &LeaderboardConfig, entries: Vec<ScoreEntry>) -> Self {
        let mut board = Self::new();
        for entry in entries.into_iter().filter_map(ScoreEntry::normalized) {
            board.insert(config, entry);
        }
        board
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top ranked entry.
    pub fn best(&self) -> Option<&ScoreEntry> {
        self.entries.first()
    }

    /// Merges `entry` according to `config` and returns the 1-based rank it
    /// holds afterwards, or `None` when the board did not take it.
    pub fn insert(&mut self, config: &LeaderboardConfig, entry: ScoreEntry) -> Option<usize> {
        if config.capacity == 0 {
            return None;
        }

        if config.merge == MergePolicy::BestPerName {
            if let Some(existing) = self.entries.iter().position(|e| e.name == entry.name) {
                if !config.order.is_better(entry.score, self.entries[existing].score) {
                    return None;
                }
                self.entries.remove(existing);
            }
        }

        // after existing equal scores, so earlier results keep their rank
        let pos = self
            .entries
            .iter()
            .position(|e| config.order.is_better(entry.score, e.score))
            .unwrap_or(self.entries.len());

        if pos >= config.capacity {
            self.entries.truncate(config.capacity);
            return None;
        }

        self.entries.insert(pos, entry);
        self.entries.truncate(config.capacity);
        Some(pos + 1)
    }

    /// Display rows in rank order, with `label` formatting each score.
    pub fn rows(&self, label: impl Fn(Score) -> String) -> Vec<LeaderboardRow> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| LeaderboardRow {
                rank: i + 1,
                name: entry.name.clone(),
                score_label: label(entry.score),
                medal: Medal::for_rank(i + 1),
            })
            .collect()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub const fn for_rank(rank: usize) -> Option<Self> {
        match rank {
            1 => Some(Self::Gold),
            2 => Some(Self::Silver),
            3 => Some(Self::Bronze),
            _ => None,
        }
    }

    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Gold => "medal-gold",
            Self::Silver => "medal-silver",
            Self::Bronze => "medal-bronze",
        }
    }
}

/// Plain-text view of one leaderboard line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub name: String,
    pub score_label: String,
    pub medal: Option<Medal>,
}
