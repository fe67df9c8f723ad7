//! Top-level handle wiring config, client, activity log and events together.

use crate::activity::ActivityLog;
use crate::client::{HttpQueryClient, QueryExecutor};
use crate::config::Config;
use crate::discovery::Paginator;
use crate::enrichment::DetailEnricher;
use crate::error::{Error, Result};
use crate::scheduler::BatchScheduler;
use crate::sink::{EventSink, ProgressSink};
use crate::types::{CardRecord, Event, RunSummary};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::{Stream, StreamExt};

/// Loads and enriches an owner's card collection (cloneable - shares state)
#[derive(Clone)]
pub struct CollectionLoader {
    config: Arc<Config>,
    executor: Arc<dyn QueryExecutor>,
    activity: ActivityLog,
    /// Event broadcast channel sender (multiple subscribers supported)
    event_tx: broadcast::Sender<Event>,
}

impl CollectionLoader {
    /// Create a loader talking to the configured GraphQL endpoint
    ///
    /// Validates the configuration and builds the HTTP client.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let activity = ActivityLog::new(config.activity.capacity);
        let client = HttpQueryClient::new(
            &config.api,
            activity.clone(),
            config.activity.body_preview_chars,
        )?;
        Ok(Self::build(config, Arc::new(client), activity))
    }

    /// Create a loader over a custom [`QueryExecutor`]
    pub fn with_executor(config: Config, executor: Arc<dyn QueryExecutor>) -> Result<Self> {
        config.validate()?;
        let activity = ActivityLog::new(config.activity.capacity);
        Ok(Self::build(config, executor, activity))
    }

    fn build(config: Config, executor: Arc<dyn QueryExecutor>, activity: ActivityLog) -> Self {
        let (event_tx, _rx) = broadcast::channel(1000);
        Self {
            config: Arc::new(config),
            executor,
            activity,
            event_tx,
        }
    }

    /// Subscribe to run events
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Run events as a stream; events missed by a slow consumer are skipped
    pub fn event_stream(&self) -> impl Stream<Item = Event> + Send + 'static {
        BroadcastStream::new(self.subscribe()).filter_map(|item| match item {
            Ok(event) => Some(event),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event subscriber lagged, events dropped");
                None
            }
        })
    }

    /// The activity log shared with the query client
    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Discover and enrich every card of `owner_key`
    ///
    /// `sink` is told a run started before discovery begins, so a failed
    /// rerun never leaves the previous run's records behind. It then receives
    /// every discovered card as `Loading`, followed by one terminal record
    /// and one progress update per card.
    ///
    /// # Errors
    /// Fails only when the owner key is blank or discovery fails. Cards whose
    /// detail fetch fails are reported as `Failed` records and counted in the
    /// summary instead.
    pub async fn run(&self, owner_key: &str, sink: &mut dyn ProgressSink) -> Result<RunSummary> {
        let owner = owner_key.trim();
        if owner.is_empty() {
            return Err(Error::InvalidOwner(owner_key.to_string()));
        }

        let mut events = EventSink::new(sink, self.event_tx.clone());
        events.on_run_started();

        tracing::info!(owner = %owner, "loading card collection");
        self.activity
            .info(format!("Fetching all cards for user: {}", owner), None);
        self.emit(Event::DiscoveryStarted {
            owner: owner.to_string(),
        });

        let paginator = Paginator::new(self.executor.clone(), &self.config.pipeline);
        let event_tx = &self.event_tx;
        let discovered = paginator
            .discover_all_with(owner, |report| {
                event_tx
                    .send(Event::PageFetched {
                        page: report.page,
                        count: report.count,
                        discovered: report.discovered,
                    })
                    .ok();
            })
            .await;

        let identifiers = match discovered {
            Ok(identifiers) => identifiers,
            Err(e) => {
                tracing::error!(owner = %owner, error = %e, "card discovery failed");
                self.activity.error(
                    "Failed to fetch card collection",
                    Some(json!({ "owner": owner, "error": e.to_string() })),
                );
                self.emit(Event::RunFailed {
                    error: e.to_string(),
                });
                return Err(e.into());
            }
        };

        let total = identifiers.len();
        self.activity.info(
            format!("Found {} cards, fetching details", total),
            Some(json!({ "total": total })),
        );
        self.emit(Event::DiscoveryComplete { total });

        let records: Vec<CardRecord> = identifiers
            .iter()
            .map(|identifier| CardRecord::Loading {
                identifier: identifier.clone(),
            })
            .collect();
        events.on_discovered(&records);

        let enricher = DetailEnricher::new(self.executor.clone(), self.config.pricing.clone());
        let scheduler = BatchScheduler::new(enricher, &self.config.pipeline);
        let summary = scheduler.run(&identifiers, &mut events).await;

        self.activity.info(
            format!(
                "Finished loading {} cards ({} failed)",
                summary.total, summary.failed
            ),
            Some(json!(summary)),
        );
        self.emit(Event::RunComplete(summary));
        Ok(summary)
    }

    fn emit(&self, event: Event) {
        // no subscribers is fine
        self.event_tx.send(event).ok();
    }
}

impl std::fmt::Debug for CollectionLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionLoader")
            .field("config", &self.config)
            .field("activity", &self.activity)
            .finish_non_exhaustive()
    }
}
