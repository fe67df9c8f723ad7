//! GraphQL query execution.
//!
//! [`QueryExecutor`] is the seam between the pipeline and the transport.
//! Every failure, from DNS errors to GraphQL `errors` arrays, comes back as a
//! [`QueryError`] value; nothing panics and nothing is retried here.

mod http;


pub use http::HttpQueryClient;

use crate::error::{GraphQlError, QueryError};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::OnceLock;

/// Outcome of one query: the `data` payload or the failure
pub type QueryResult = std::result::Result<serde_json::Value, QueryError>;

/// Executes a single GraphQL query
#[async_trait::async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run `query` with `variables`, returning the `data` payload
    async fn execute(&self, query: &str, variables: serde_json::Value) -> QueryResult;
}

/// Run a query and decode its `data` payload into `T`
///
/// A payload of the wrong shape becomes [`QueryError::Decode`].
pub async fn execute_as<T: DeserializeOwned>(
    executor: &dyn QueryExecutor,
    query: &str,
    variables: serde_json::Value,
) -> std::result::Result<T, QueryError> {
    let data = executor.execute(query, variables).await?;
    serde_json::from_value(data).map_err(|e| QueryError::Decode(e.to_string()))
}

/// Raw GraphQL response envelope
#[derive(Debug, Default, Deserialize)]
pub(crate) struct GraphQlEnvelope {
    #[serde(default)]
    pub(crate) data: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) errors: Option<Vec<GraphQlError>>,
}

impl GraphQlEnvelope {
    /// Errors take precedence over data, matching how callers treat partial results
    pub(crate) fn into_result(self) -> QueryResult {
        match (self.data, self.errors) {
            (_, Some(errors)) if !errors.is_empty() => Err(QueryError::GraphQl(errors)),
            (Some(data), _) => Ok(data),
            (None, _) => Err(QueryError::Decode(
                "response contained neither data nor errors".to_string(),
            )),
        }
    }
}

/// Operation name declared by `query Name ...`, for log context
pub fn operation_name(query: &str) -> &str {
    static PATTERN: OnceLock<Option<regex::Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| regex::Regex::new(r"(?:query|mutation)\s+(\w+)").ok())
        .as_ref()
        .and_then(|re| re.captures(query))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or("GraphQL Query")
}
