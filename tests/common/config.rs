//! Test configuration helpers

use card_gallery::{ApiConfig, CollectionLoader, Config};
use std::time::Duration;
use wiremock::MockServer;

/// Config pointing at a mock server's `/graphql` endpoint
pub fn mock_config(server: &MockServer) -> Config {
    Config {
        api: ApiConfig {
            endpoint: format!("{}/graphql", server.uri()),
            api_key: Some("test-key".to_string()),
            timeout: Duration::from_secs(5),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Loader talking to a mock server over HTTP
pub fn mock_loader(server: &MockServer) -> CollectionLoader {
    CollectionLoader::new(mock_config(server)).expect("valid mock config")
}

/// Whether the live API tests have what they need (`.env` is honoured)
pub fn has_live_credentials() -> bool {
    dotenvy::dotenv().ok();
    std::env::var("CARD_GALLERY_API_KEY").is_ok() && std::env::var("CARD_GALLERY_OWNER").is_ok()
}

/// Loader for the real API, configured from the environment
pub fn live_loader() -> CollectionLoader {
    dotenvy::dotenv().ok();
    let mut config = Config::default();
    config.api.api_key = std::env::var("CARD_GALLERY_API_KEY").ok();
    if let Ok(endpoint) = std::env::var("CARD_GALLERY_ENDPOINT") {
        config.api.endpoint = endpoint;
    }
    CollectionLoader::new(config).expect("valid live config")
}
