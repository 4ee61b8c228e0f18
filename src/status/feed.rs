use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Maximum number of entries kept in the feed
pub const FEED_CAPACITY: usize = 4;

/// Severity of a status entry (drives the entry's color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

/// A single human-readable status notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEntry {
    /// Unique id so a front end can dismiss individual entries
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    /// When the entry was reported
    pub timestamp: DateTime<Utc>,
}

/// Bounded, newest-first feed of status entries
#[derive(Debug, Clone, Default)]
pub struct StatusFeed {
    entries: VecDeque<StatusEntry>,
}

impl StatusFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend an entry, evicting the oldest once the feed exceeds capacity
    pub fn report(&mut self, message: impl Into<String>, severity: Severity) {
        let entry = StatusEntry {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            timestamp: Utc::now(),
        };

        self.entries.push_front(entry);
        self.entries.truncate(FEED_CAPACITY);
    }

    /// Remove a single entry (user dismissed it)
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Most recent entry, if any
    pub fn latest(&self) -> Option<&StatusEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in display order (newest first)
    pub fn entries(&self) -> Vec<StatusEntry> {
        self.entries.iter().cloned().collect()
    }
}
