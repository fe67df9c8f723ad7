//! Error types for card-gallery
//!
//! Errors are scoped to the smallest unit that can fail without corrupting
//! shared state:
//! - [`QueryError`] - a single GraphQL request (transport, HTTP, decode, GraphQL errors)
//! - [`DiscoveryError`] - pagination over the owner's collection, fatal to a run
//! - [`DetailFetchError`] - the primary detail fetch for one card, contained to that card
//! - [`Error`] - crate-level failures surfaced to the caller

use thiserror::Error;

/// Result type alias for card-gallery operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for card-gallery
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "pipeline.batch_size")
        key: Option<String>,
    },

    /// Owner key is empty or whitespace
    #[error("invalid owner key: {0:?}")]
    InvalidOwner(String),

    /// Card discovery failed; no partial collection is returned
    #[error("discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    /// HTTP client could not be built
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a configuration error tied to a specific key
    pub(crate) fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}

/// A single entry of a GraphQL `errors` array
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GraphQlError {
    /// Error message reported by the server
    pub message: String,
}

/// Failure of one GraphQL request
///
/// Every failure path of the query client ends up here; the client never
/// panics or returns a transport error any other way.
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// Server answered with a status outside 2xx
    #[error("HTTP error {status}: the API rejected the request")]
    Http {
        /// HTTP status code
        status: u16,
    },

    /// Response body was not a GraphQL JSON envelope, or `data` had the wrong shape
    #[error("failed to parse response: {0}")]
    Decode(String),

    /// Request could not complete (DNS, connect, timeout, ...)
    #[error("network error: {0}")]
    Transport(String),

    /// Server returned a non-empty `errors` array
    #[error("{}", first_message(.0))]
    GraphQl(Vec<GraphQlError>),
}

fn first_message(errors: &[GraphQlError]) -> String {
    errors
        .first()
        .map(|e| e.message.clone())
        .unwrap_or_else(|| "unknown GraphQL error".to_string())
}

impl QueryError {
    /// All messages carried by this error, in server order
    pub fn messages(&self) -> Vec<String> {
        match self {
            QueryError::GraphQl(errors) => errors.iter().map(|e| e.message.clone()).collect(),
            other => vec![other.to_string()],
        }
    }
}

/// Discovery (pagination) failure
#[derive(Debug, Clone, Error)]
pub enum DiscoveryError {
    /// A page request failed
    #[error("page {page}: {source}")]
    Page {
        /// 1-based page number that failed
        page: u32,
        /// Underlying query failure
        #[source]
        source: QueryError,
    },

    /// The response did not contain the owner's card connection
    #[error("failed to fetch user cards for {owner}")]
    MissingCollection {
        /// Owner key that was queried
        owner: String,
    },

    /// A page claimed more results but gave no cursor to continue from
    #[error("page {page} reported more results without an end cursor")]
    MissingCursor {
        /// 1-based page number
        page: u32,
    },

    /// The configured page cap was reached before the end of the collection
    #[error("page limit of {limit} reached before the end of the collection")]
    PageLimit {
        /// Configured maximum number of pages
        limit: u32,
    },
}

/// Primary detail fetch failure for one card
///
/// Displays as the underlying message only, since it ends up verbatim on the
/// card's error record.
#[derive(Debug, Clone, Error)]
pub enum DetailFetchError {
    /// Detail query failed
    #[error("{0}")]
    Query(#[from] QueryError),

    /// Query succeeded but the card was absent
    #[error("failed to fetch details for {slug}")]
    NotFound {
        /// Card slug
        slug: String,
    },
}
