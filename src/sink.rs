//! Consumer contract for incremental pipeline updates.

use crate::types::{CardRecord, Event, Progress};
use tokio::sync::broadcast;

/// Receives pipeline updates as they happen
///
/// Methods are only ever called from the task driving the run, one at a
/// time, so implementations need no internal locking.
pub trait ProgressSink: Send {
    /// A new run started; anything kept from a previous run is stale
    fn on_run_started(&mut self) {}

    /// Every discovered card, all in the `Loading` state, in discovery order
    fn on_discovered(&mut self, _records: &[CardRecord]) {}

    /// A batch of `size` cards started (`batch` is 1-based)
    fn on_batch_started(&mut self, _batch: usize, _batches: usize, _size: usize) {}

    /// Enrichment progress after one more card settled
    fn on_progress(&mut self, progress: Progress);

    /// The record at `slot` reached its terminal state
    fn on_record_ready(&mut self, slot: usize, record: CardRecord);
}

/// Sink that ignores every update
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn on_progress(&mut self, _progress: Progress) {}
    fn on_record_ready(&mut self, _slot: usize, _record: CardRecord) {}
}

/// Forwards updates to an inner sink and publishes them as [`Event`]s
pub struct EventSink<'a> {
    inner: &'a mut dyn ProgressSink,
    event_tx: broadcast::Sender<Event>,
}

impl<'a> EventSink<'a> {
    /// Wrap `inner`, publishing on `event_tx`
    pub fn new(inner: &'a mut dyn ProgressSink, event_tx: broadcast::Sender<Event>) -> Self {
        Self { inner, event_tx }
    }

    fn emit(&self, event: Event) {
        // no subscribers is fine
        self.event_tx.send(event).ok();
    }
}

impl ProgressSink for EventSink<'_> {
    fn on_run_started(&mut self) {
        self.inner.on_run_started();
    }

    fn on_discovered(&mut self, records: &[CardRecord]) {
        self.inner.on_discovered(records);
    }

    fn on_batch_started(&mut self, batch: usize, batches: usize, size: usize) {
        self.inner.on_batch_started(batch, batches, size);
        self.emit(Event::BatchStarted {
            batch,
            batches,
            size,
        });
    }

    fn on_progress(&mut self, progress: Progress) {
        self.inner.on_progress(progress);
        self.emit(Event::Progress(progress));
    }

    fn on_record_ready(&mut self, slot: usize, record: CardRecord) {
        self.emit(Event::RecordReady {
            slot,
            record: record.clone(),
        });
        self.inner.on_record_ready(slot, record);
    }
}
