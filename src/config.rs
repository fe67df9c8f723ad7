//! Configuration types for card-gallery

use crate::error::{Error, Result};
use crate::types::Rarity;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// GraphQL endpoint settings (URL, fixed headers, timeout)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// GraphQL endpoint (default: "https://api.sorare.com/graphql")
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key sent with every request (None = header omitted)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Header name carrying the API key (default: "APIKEY")
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,

    /// Header name carrying the API version (default: "X-Sorare-ApiVersion")
    #[serde(default = "default_api_version_header")]
    pub api_version_header: String,

    /// API version value (default: "v1")
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Per-request timeout (default: 30 seconds)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User agent for outgoing requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            api_key_header: default_api_key_header(),
            api_version_header: default_api_version_header(),
            api_version: default_api_version(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// How repeated slugs returned across discovery pages are handled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep every occurrence; each one gets its own record slot
    #[default]
    Keep,
    /// Keep the first occurrence of a slug and skip later ones
    DropRepeats,
}

/// Discovery and enrichment pipeline settings
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of cards per enrichment batch (default: 10)
    ///
    /// Batches run one after another; every card inside a batch is enriched
    /// concurrently.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Hard cap on concurrently outstanding enrichments (default: 10)
    ///
    /// The effective concurrency is `min(batch_size, max_in_flight)`.
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,

    /// Rarities requested during discovery
    #[serde(default = "default_rarities")]
    pub rarities: Vec<Rarity>,

    /// Handling of repeated slugs across pages
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    /// Maximum number of discovery pages (None = unlimited)
    #[serde(default)]
    pub max_pages: Option<u32>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_in_flight: default_max_in_flight(),
            rarities: default_rarities(),
            duplicate_policy: DuplicatePolicy::default(),
            max_pages: None,
        }
    }
}

impl PipelineConfig {
    /// Number of enrichments allowed in flight at once
    pub fn concurrency(&self) -> usize {
        self.batch_size.min(self.max_in_flight).max(1)
    }
}

/// Fiat currency that prices are normalized into
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FiatCurrency {
    /// Euro
    #[default]
    Eur,
    /// US dollar
    Usd,
    /// Pound sterling
    Gbp,
}

impl FiatCurrency {
    /// Upper-case ISO code, as reported by the API's `referenceCurrency`
    pub fn code(&self) -> &'static str {
        match self {
            FiatCurrency::Eur => "EUR",
            FiatCurrency::Usd => "USD",
            FiatCurrency::Gbp => "GBP",
        }
    }
}

/// Price normalization settings
///
/// Rates are fixed configuration, never fetched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Currency every price is normalized into (default: EUR)
    #[serde(default)]
    pub reference_currency: FiatCurrency,

    /// Value of one ETH in the reference currency (default: 3200.0)
    #[serde(default = "default_eth_rate")]
    pub eth_rate: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            reference_currency: FiatCurrency::default(),
            eth_rate: default_eth_rate(),
        }
    }
}

/// Activity log settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActivityConfig {
    /// Maximum entries retained for replay (default: 500, oldest evicted first)
    #[serde(default = "default_log_capacity")]
    pub capacity: usize,

    /// Maximum characters of a response body kept in a log entry (default: 500)
    #[serde(default = "default_body_preview")]
    pub body_preview_chars: usize,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            capacity: default_log_capacity(),
            body_preview_chars: default_body_preview(),
        }
    }
}

/// Main configuration for [`CollectionLoader`](crate::CollectionLoader)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// GraphQL endpoint settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Discovery and enrichment settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Price normalization settings
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Activity log settings
    #[serde(default)]
    pub activity: ActivityConfig,
}

impl Config {
    /// Check settings that would otherwise fail deep inside a run
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api.endpoint)
            .map_err(|e| Error::config("api.endpoint", format!("invalid URL: {}", e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(
                "api.endpoint",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.api.timeout.is_zero() {
            return Err(Error::config("api.timeout", "must be greater than 0"));
        }
        if self.pipeline.batch_size == 0 {
            return Err(Error::config("pipeline.batch_size", "must be greater than 0"));
        }
        if self.pipeline.max_in_flight == 0 {
            return Err(Error::config(
                "pipeline.max_in_flight",
                "must be greater than 0",
            ));
        }
        if self.pipeline.rarities.is_empty() {
            return Err(Error::config(
                "pipeline.rarities",
                "at least one rarity is required",
            ));
        }
        if self.pipeline.max_pages == Some(0) {
            return Err(Error::config("pipeline.max_pages", "must be greater than 0"));
        }
        if !self.pricing.eth_rate.is_finite() || self.pricing.eth_rate <= 0.0 {
            return Err(Error::config("pricing.eth_rate", "must be a positive number"));
        }
        if self.activity.capacity == 0 {
            return Err(Error::config("activity.capacity", "must be greater than 0"));
        }
        Ok(())
    }
}

fn default_endpoint() -> String {
    "https://api.sorare.com/graphql".to_string()
}

fn default_api_key_header() -> String {
    "APIKEY".to_string()
}

fn default_api_version_header() -> String {
    "X-Sorare-ApiVersion".to_string()
}

fn default_api_version() -> String {
    "v1".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    concat!("card-gallery/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_batch_size() -> usize {
    10
}

fn default_max_in_flight() -> usize {
    10
}

fn default_rarities() -> Vec<Rarity> {
    vec![Rarity::Limited, Rarity::Rare, Rarity::SuperRare, Rarity::Unique]
}

fn default_eth_rate() -> f64 {
    3200.0
}

fn default_log_capacity() -> usize {
    500
}

fn default_body_preview() -> usize {
    500
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
