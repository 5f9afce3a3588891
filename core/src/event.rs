//! The progress log — human-readable flow messages tagged by
//! originator, rendered newest-first on the rental screens.
//!
//! RULE: append-only from the engine's perspective. The only removals
//! are the cap-driven truncation and the full clear on reset/begin.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

pub const LOG_LIMIT: usize = 40;

/// Who a log line is attributed to in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogSource {
    Client,
    Server,
    Vehicle,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Unique per append, even for same-millisecond appends.
    pub id: String,
    pub source: LogSource,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    limit: usize,
}

impl EventLog {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
        }
    }

    /// Prepend an entry, dropping the oldest past the cap.
    pub fn push(&mut self, now: DateTime<Utc>, source: LogSource, message: impl Into<String>) {
        let id = format!("{}-{:08x}", now.timestamp_millis(), rand::random::<u32>());
        self.entries.push_front(LogEntry {
            id,
            source,
            message: message.into(),
            timestamp: now,
        });
        self.entries.truncate(self.limit);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Owned copy, newest first, for the snapshot.
    pub fn to_vec(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(LOG_LIMIT)
    }
}
