//! HTTP transport for [`QueryExecutor`]: one POST endpoint with fixed headers.

use super::{GraphQlEnvelope, QueryExecutor, QueryResult, operation_name};
use crate::activity::ActivityLog;
use crate::config::ApiConfig;
use crate::error::{Error, QueryError, Result};
use crate::utils::truncate_chars;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::json;

/// GraphQL client over HTTP
///
/// Sends `{ query, variables }` as JSON to the configured endpoint. Each
/// request leaves a trail in the [`ActivityLog`]: one entry before sending,
/// one on receipt, and one per failure or success.
#[derive(Clone, Debug)]
pub struct HttpQueryClient {
    http: reqwest::Client,
    endpoint: String,
    activity: ActivityLog,
    body_preview_chars: usize,
}

impl HttpQueryClient {
    /// Build a client from endpoint settings
    ///
    /// # Errors
    /// Returns [`Error::Config`] if a header name or value is invalid, or
    /// [`Error::Network`] if the HTTP client cannot be created.
    pub fn new(api: &ApiConfig, activity: ActivityLog, body_preview_chars: usize) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(key) = &api.api_key {
            let name = HeaderName::from_bytes(api.api_key_header.as_bytes())
                .map_err(|e| Error::config("api.api_key_header", e.to_string()))?;
            let mut value = HeaderValue::from_str(key)
                .map_err(|e| Error::config("api.api_key", e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }

        let version_name = HeaderName::from_bytes(api.api_version_header.as_bytes())
            .map_err(|e| Error::config("api.api_version_header", e.to_string()))?;
        let version_value = HeaderValue::from_str(&api.api_version)
            .map_err(|e| Error::config("api.api_version", e.to_string()))?;
        headers.insert(version_name, version_value);

        let http = reqwest::Client::builder()
            .timeout(api.timeout)
            .user_agent(api.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            endpoint: api.endpoint.clone(),
            activity,
            body_preview_chars,
        })
    }

    /// Endpoint this client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl QueryExecutor for HttpQueryClient {
    async fn execute(&self, query: &str, variables: serde_json::Value) -> QueryResult {
        let op = operation_name(query);
        self.activity.info(
            format!("Executing {}", op),
            Some(json!({ "variables": &variables })),
        );

        let body = json!({ "query": query, "variables": variables });
        let response = match self.http.post(&self.endpoint).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                self.activity.error(
                    format!("Network request failed for {}", op),
                    Some(json!({
                        "message": e.to_string(),
                        "timeout": e.is_timeout(),
                        "connect": e.is_connect(),
                    })),
                );
                return Err(QueryError::Transport(e.to_string()));
            }
        };

        let status = response.status();
        self.activity.info(
            format!("[{}] Received response with status {}", op, status.as_u16()),
            None,
        );

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                self.activity.error(
                    format!("Failed to read response body for {}", op),
                    Some(json!({ "status": status.as_u16(), "message": e.to_string() })),
                );
                return Err(QueryError::Transport(e.to_string()));
            }
        };

        if !status.is_success() {
            self.activity.error(
                format!("HTTP error {} for {}", status.as_u16(), op),
                Some(json!({
                    "status": status.as_u16(),
                    "body": truncate_chars(&text, self.body_preview_chars),
                })),
            );
            return Err(QueryError::Http {
                status: status.as_u16(),
            });
        }

        let envelope: GraphQlEnvelope = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(e) => {
                self.activity.error(
                    format!("Failed to parse JSON response from {}", op),
                    Some(json!({
                        "status": status.as_u16(),
                        "body": truncate_chars(&text, self.body_preview_chars),
                    })),
                );
                return Err(QueryError::Decode(e.to_string()));
            }
        };

        let result = envelope.into_result();
        match &result {
            Ok(_) => self
                .activity
                .info(format!("[{}] Request successful", op), None),
            Err(QueryError::GraphQl(errors)) => self.activity.warn(
                format!("GraphQL API returned errors for {}", op),
                Some(json!({ "errors": errors })),
            ),
            Err(e) => self.activity.error(
                format!("Unusable response from {}", op),
                Some(json!({ "message": e.to_string() })),
            ),
        }
        result
    }
}
