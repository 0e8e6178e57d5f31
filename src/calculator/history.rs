//! Sliding window of recent evaluations.

use std::collections::VecDeque;
use std::fmt;

/// Maximum number of entries kept in the log.
pub const HISTORY_LIMIT: usize = 5;

/// A successful evaluation: the expression and its formatted result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub source: String,
    pub result: String,
}

impl HistoryEntry {
    pub fn new(source: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            result: result.into(),
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.source, self.result)
    }
}

/// Bounded, insertion-ordered log; the oldest entry is evicted first.
#[derive(Clone, Debug)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_LIMIT + 1),
        }
    }

    /// Append an entry, dropping from the front beyond [`HISTORY_LIMIT`].
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > HISTORY_LIMIT {
            self.entries.pop_front();
        }
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
