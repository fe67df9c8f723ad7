//! Batched enrichment with bounded concurrency.
//!
//! Identifiers are split into contiguous batches of `batch_size`. Batches run
//! one after another; inside a batch every card is enriched concurrently with
//! at most `min(batch_size, max_in_flight)` detail fetches outstanding. The
//! next batch starts only once every member of the current one settled.
//!
//! Results are handed to the [`ProgressSink`] from the driving task in
//! completion order, each tagged with the card's slot (its position in the
//! discovered list).

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use crate::config::PipelineConfig;
use crate::enrichment::DetailEnricher;
use crate::sink::ProgressSink;
use crate::types::{CardRecord, ItemIdentifier, Progress, RunSummary};
use futures::stream::{self, StreamExt};

/// Drives enrichment of discovered cards in sequential batches
#[derive(Clone, Debug)]
pub struct BatchScheduler {
    enricher: DetailEnricher,
    batch_size: usize,
    concurrency: usize,
}

impl BatchScheduler {
    /// Create a scheduler using the pipeline's batch size and in-flight cap
    pub fn new(enricher: DetailEnricher, pipeline: &PipelineConfig) -> Self {
        Self {
            enricher,
            batch_size: pipeline.batch_size.max(1),
            concurrency: pipeline.concurrency(),
        }
    }

    /// Cards per batch
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Maximum detail fetches outstanding at once
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Enrich every identifier, reporting each settled card to `sink`
    ///
    /// Every slot receives exactly one terminal record, followed by one
    /// progress update. A failed card never stops the run. An empty input
    /// reports a single `0/0` progress update.
    pub async fn run(
        &self,
        identifiers: &[ItemIdentifier],
        sink: &mut dyn ProgressSink,
    ) -> RunSummary {
        let total = identifiers.len();
        let batches = total.div_ceil(self.batch_size);
        let mut summary = RunSummary {
            total,
            batches,
            ..Default::default()
        };

        if total == 0 {
            sink.on_progress(Progress::default());
            return summary;
        }

        let mut completed = 0;
        for (index, batch) in identifiers.chunks(self.batch_size).enumerate() {
            let offset = index * self.batch_size;
            tracing::debug!(batch = index + 1, batches, size = batch.len(), "starting enrichment batch");
            sink.on_batch_started(index + 1, batches, batch.len());

            let enricher = &self.enricher;
            let mut settled = stream::iter(batch.iter().enumerate())
                .map(|(position, identifier)| async move {
                    (offset + position, identifier, enricher.enrich(identifier).await)
                })
                .buffer_unordered(self.concurrency);

            while let Some((slot, identifier, result)) = settled.next().await {
                let record = match result {
                    Ok(details) => {
                        summary.succeeded += 1;
                        CardRecord::Ready(Box::new(details))
                    }
                    Err(e) => {
                        summary.failed += 1;
                        tracing::warn!(slug = %identifier.slug, slot, error = %e, "card enrichment failed");
                        CardRecord::Failed {
                            identifier: identifier.clone(),
                            error: e.to_string(),
                        }
                    }
                };
                completed += 1;
                sink.on_record_ready(slot, record);
                sink.on_progress(Progress { completed, total });
            }
        }

        tracing::info!(
            total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            batches,
            "enrichment complete"
        );
        summary
    }
}
