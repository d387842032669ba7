//! Bounded result log
//!
//! Every bridge or RPC outcome becomes one immutable [`ResultItem`]; the log
//! keeps the most recent entries first and caps itself at twenty.

use std::collections::VecDeque;

use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

/// Maximum number of entries the log retains
pub const MAX_RESULTS: usize = 20;

/// Category of a logged outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
    /// Neutral status message
    Info,
}

/// A single timestamped outcome entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// Unique entry token
    pub id: Uuid,
    /// Human-readable message
    pub text: String,
    /// Outcome category
    pub kind: ResultKind,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

impl ResultItem {
    fn new(text: impl Into<String>, kind: ResultKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            kind,
            timestamp: Utc::now(),
        }
    }
}

/// Most-recent-first log of outcomes, capped at [`MAX_RESULTS`]
#[derive(Debug)]
pub struct ResultLog {
    entries: VecDeque<ResultItem>,
    capacity: usize,
}

impl ResultLog {
    /// Empty log with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(MAX_RESULTS)
    }

    /// Empty log with a custom capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record an outcome at the front, evicting the oldest entry when full
    pub fn push(&mut self, text: impl Into<String>, kind: ResultKind) {
        self.entries.push_front(ResultItem::new(text, kind));
        self.entries.truncate(self.capacity);
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries, most recent first
    pub fn iter(&self) -> impl Iterator<Item = &ResultItem> {
        self.entries.iter()
    }

    /// Owned copy of the entries, most recent first
    pub fn snapshot(&self) -> Vec<ResultItem> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for ResultLog {
    fn default() -> Self {
        Self::new()
    }
}
