//! # card-gallery
//!
//! Discovery and enrichment pipeline for a collectible card gallery backed by
//! a GraphQL API.
//!
//! ## Design Philosophy
//!
//! card-gallery is designed to be:
//! - **Progressive** - every card is visible as soon as it is discovered and
//!   fills in as its details arrive
//! - **Failure-contained** - one card failing never sinks the run; only
//!   discovery can abort it
//! - **Bounded** - detail fetches run in sequential batches with a hard
//!   in-flight cap
//! - **Library-first** - no CLI or UI, purely a Rust crate for embedding
//!
//! ## Quick Start
//!
//! ```no_run
//! use card_gallery::{CollectionLoader, Config, Gallery, SortOption};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.api.api_key = Some("my-api-key".to_string());
//!
//!     let loader = CollectionLoader::new(config)?;
//!
//!     // Subscribe to events
//!     let mut events = loader.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let mut gallery = Gallery::new();
//!     let summary = loader.run("some-manager", &mut gallery).await?;
//!     println!("{} cards, {} failed", summary.total, summary.failed);
//!
//!     for record in gallery.sorted(SortOption::SalePrice) {
//!         println!("{}", record.slug());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Request/response activity log
pub mod activity;
/// GraphQL query execution
pub mod client;
/// Configuration types
pub mod config;
/// Collection discovery (pagination)
pub mod discovery;
/// Per-card enrichment
pub mod enrichment;
/// Error types
pub mod error;
/// Record slot store and sort orders
pub mod gallery;
/// Top-level loader
pub mod loader;
/// Sale amount normalization
pub mod pricing;
/// Batched enrichment scheduling
pub mod scheduler;
/// Owner key persistence
pub mod session;
/// Progress sink contract
pub mod sink;
/// Core types and events
pub mod types;
/// Utility functions
pub mod utils;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod test_helpers;

// Re-export commonly used types
pub use activity::{ActivityLog, LogEntry, LogLevel};
pub use client::{HttpQueryClient, QueryExecutor, QueryResult};
pub use config::{
    ActivityConfig, ApiConfig, Config, DuplicatePolicy, FiatCurrency, PipelineConfig, PricingConfig,
};
pub use discovery::Paginator;
pub use enrichment::DetailEnricher;
pub use error::{DetailFetchError, DiscoveryError, Error, GraphQlError, QueryError, Result};
pub use gallery::{Gallery, SortOption};
pub use loader::CollectionLoader;
pub use pricing::normalize;
pub use scheduler::BatchScheduler;
pub use session::{Session, SessionStore};
pub use sink::{EventSink, NullSink, ProgressSink};
pub use types::{
    CardDetails, CardRecord, Event, FloorPrices, ItemIdentifier, Progress, Rarity, RunSummary,
};
