//! In-memory record store fed by pipeline updates.
//!
//! A [`Gallery`] holds one slot per discovered card. Slots start as
//! `Loading` and are replaced once with their terminal record; later writes
//! to an already settled slot are ignored.

use crate::sink::ProgressSink;
use crate::types::{CardDetails, CardRecord, Progress};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Display orderings for a gallery
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Most recently acquired first
    #[default]
    AcquiredAt,
    /// Highest sale price first
    SalePrice,
    /// Highest 15-game average first
    AverageScore15,
    /// Player name, alphabetical
    PlayerName,
}

/// Slot store of card records
#[derive(Clone, Debug, Default)]
pub struct Gallery {
    records: Vec<CardRecord>,
    progress: Progress,
}

impl Gallery {
    /// Create an empty gallery
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in discovery order
    pub fn records(&self) -> &[CardRecord] {
        &self.records
    }

    /// Record at a slot
    pub fn get(&self, slot: usize) -> Option<&CardRecord> {
        self.records.get(slot)
    }

    /// Latest progress
    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the gallery has no slots
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Slots still loading
    pub fn loading_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_loading()).count()
    }

    /// Slots that failed
    pub fn failed_count(&self) -> usize {
        self.records.iter().filter(|r| r.error().is_some()).count()
    }

    /// Drop every slot
    pub fn clear(&mut self) {
        self.records.clear();
        self.progress = Progress::default();
    }

    /// Records in display order
    ///
    /// Loading records always come first. Failed records, and records
    /// missing the sort key, sort as if the key were zero or empty. The sort
    /// is stable so ties keep discovery order.
    pub fn sorted(&self, by: SortOption) -> Vec<&CardRecord> {
        let mut sorted: Vec<&CardRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| {
            b.is_loading()
                .cmp(&a.is_loading())
                .then_with(|| compare(a, b, by))
        });
        sorted
    }
}

fn compare(a: &CardRecord, b: &CardRecord, by: SortOption) -> Ordering {
    match by {
        SortOption::AcquiredAt => acquired_millis(b).cmp(&acquired_millis(a)),
        SortOption::SalePrice => {
            numeric_key(b, |d| d.sale_price).total_cmp(&numeric_key(a, |d| d.sale_price))
        }
        SortOption::AverageScore15 => numeric_key(b, |d| d.average_score_15)
            .total_cmp(&numeric_key(a, |d| d.average_score_15)),
        SortOption::PlayerName => player_name_key(a).cmp(&player_name_key(b)),
    }
}

fn acquired_millis(record: &CardRecord) -> i64 {
    record
        .identifier()
        .acquired_at
        .map(|t| t.timestamp_millis())
        .unwrap_or(0)
}

fn numeric_key(record: &CardRecord, key: impl Fn(&CardDetails) -> Option<f64>) -> f64 {
    record.details().and_then(key).unwrap_or(0.0)
}

fn player_name_key(record: &CardRecord) -> String {
    record
        .details()
        .and_then(|d| d.player_name.as_deref())
        .unwrap_or("")
        .to_lowercase()
}

impl ProgressSink for Gallery {
    fn on_run_started(&mut self) {
        self.clear();
    }

    fn on_discovered(&mut self, records: &[CardRecord]) {
        self.records = records.to_vec();
        self.progress = Progress {
            completed: 0,
            total: records.len(),
        };
    }

    fn on_progress(&mut self, progress: Progress) {
        self.progress = progress;
    }

    fn on_record_ready(&mut self, slot: usize, record: CardRecord) {
        match self.records.get_mut(slot) {
            Some(current) if current.is_loading() => *current = record,
            Some(_) => {
                tracing::warn!(slot, slug = %record.slug(), "ignoring update for settled slot");
            }
            None => {
                tracing::warn!(slot, slug = %record.slug(), "ignoring update for unknown slot");
            }
        }
    }
}
