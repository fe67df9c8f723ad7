//! Request/response activity log.
//!
//! An injected, bounded, append-only log that consumers can replay and
//! subscribe to. It records the request/response timeline of the query
//! client so operators can reconstruct what happened after the fact.
//!
//! Entries are also mirrored to `tracing` at the matching level, so a
//! configured subscriber sees the same timeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// Severity of an activity entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Normal progress
    Info,
    /// Degraded but recovered
    Warn,
    /// Failure
    Error,
}

/// One activity entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogEntry {
    /// When the entry was recorded
    pub timestamp: DateTime<Utc>,
    /// Severity
    pub level: LogLevel,
    /// Human-readable message
    pub message: String,
    /// Structured context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Bounded, replayable activity log (cloneable - shares one buffer)
///
/// Holds at most `capacity` entries; the oldest entry is evicted when a new
/// one would exceed it.
#[derive(Clone)]
pub struct ActivityLog {
    history: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
    tx: broadcast::Sender<LogEntry>,
}

impl ActivityLog {
    /// Create a log retaining at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel(capacity);
        Self {
            history: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
            tx,
        }
    }

    /// Record an info entry
    pub fn info(&self, message: impl Into<String>, data: Option<serde_json::Value>) {
        self.record(LogLevel::Info, message.into(), data);
    }

    /// Record a warning entry
    pub fn warn(&self, message: impl Into<String>, data: Option<serde_json::Value>) {
        self.record(LogLevel::Warn, message.into(), data);
    }

    /// Record an error entry
    pub fn error(&self, message: impl Into<String>, data: Option<serde_json::Value>) {
        self.record(LogLevel::Error, message.into(), data);
    }

    fn record(&self, level: LogLevel, message: String, data: Option<serde_json::Value>) {
        match level {
            LogLevel::Info => tracing::info!(data = ?data, "{}", message),
            LogLevel::Warn => tracing::warn!(data = ?data, "{}", message),
            LogLevel::Error => tracing::error!(data = ?data, "{}", message),
        }

        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            message,
            data,
        };

        // Holding the lock across send keeps replay + live delivery gap-free
        // for subscribers that attach concurrently.
        let mut history = match self.history.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if history.len() == self.capacity {
            history.pop_front();
        }
        history.push_back(entry.clone());
        // No subscribers is fine
        self.tx.send(entry).ok();
    }

    /// Snapshot of retained entries, oldest first
    pub fn history(&self) -> Vec<LogEntry> {
        match self.history.lock() {
            Ok(guard) => guard.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    /// Replay retained entries and subscribe to new ones
    ///
    /// The returned history and receiver never overlap or leave a gap.
    pub fn subscribe(&self) -> (Vec<LogEntry>, broadcast::Receiver<LogEntry>) {
        let history = match self.history.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let rx = self.tx.subscribe();
        (history.iter().cloned().collect(), rx)
    }

    /// Maximum number of retained entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.history().len()
    }

    /// Whether nothing has been retained
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all retained entries
    pub fn clear(&self) {
        match self.history.lock() {
            Ok(mut guard) => guard.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(crate::config::ActivityConfig::default().capacity)
    }
}

impl std::fmt::Debug for ActivityLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityLog")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}
