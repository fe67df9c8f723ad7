//! Collection discovery: cursor pagination over the owner's cards.
//!
//! Pages are fetched strictly one after another because each cursor comes
//! from the previous page. The whole list is materialized before returning
//! since enrichment needs the total up front. Any failed page aborts
//! discovery; a partial list is never returned.

use crate::client::{QueryExecutor, execute_as};
use crate::config::{DuplicatePolicy, PipelineConfig};
use crate::error::DiscoveryError;
use crate::types::{ItemIdentifier, Rarity};
use crate::utils::parse_timestamp;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

/// Paginated card listing, keyed by `$userSlug`
pub const ALL_CARDS_QUERY: &str = r#"query AllCardsFromUser($userSlug: String!, $rarities: [Rarity!], $cursor: String) {
  user(slug: $userSlug) {
    cards(rarities: $rarities, after: $cursor) {
      nodes { slug ownerSince }
      pageInfo { endCursor hasNextPage }
    }
  }
}"#;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AllCardsData {
    user: Option<WireUser>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireUser {
    cards: Option<WireConnection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WireConnection {
    nodes: Vec<WireNode>,
    page_info: WirePageInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WireNode {
    slug: String,
    owner_since: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WirePageInfo {
    end_cursor: Option<String>,
    has_next_page: bool,
}

/// Summary of one fetched page, reported while discovery runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageReport {
    /// 1-based page number
    pub page: u32,
    /// Cards returned on this page
    pub count: usize,
    /// Cards kept so far
    pub discovered: usize,
}

/// Discovers every card of an owner
#[derive(Clone)]
pub struct Paginator {
    executor: Arc<dyn QueryExecutor>,
    rarities: Vec<Rarity>,
    duplicate_policy: DuplicatePolicy,
    max_pages: Option<u32>,
}

impl Paginator {
    /// Create a paginator using the pipeline's rarity filter and page settings
    pub fn new(executor: Arc<dyn QueryExecutor>, pipeline: &PipelineConfig) -> Self {
        Self {
            executor,
            rarities: pipeline.rarities.clone(),
            duplicate_policy: pipeline.duplicate_policy,
            max_pages: pipeline.max_pages,
        }
    }

    /// Fetch every page and return identifiers in API order
    pub async fn discover_all(
        &self,
        owner_key: &str,
    ) -> std::result::Result<Vec<ItemIdentifier>, DiscoveryError> {
        self.discover_all_with(owner_key, |_| {}).await
    }

    /// Like [`discover_all`](Self::discover_all), calling `on_page` after each page
    pub async fn discover_all_with<F>(
        &self,
        owner_key: &str,
        mut on_page: F,
    ) -> std::result::Result<Vec<ItemIdentifier>, DiscoveryError>
    where
        F: FnMut(PageReport) + Send,
    {
        let rarities: Vec<&str> = self.rarities.iter().map(Rarity::as_str).collect();
        let mut identifiers = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut cursor: Option<String> = None;
        let mut page: u32 = 0;

        loop {
            if let Some(limit) = self.max_pages
                && page >= limit
            {
                return Err(DiscoveryError::PageLimit { limit });
            }
            page += 1;
            tracing::debug!(owner = %owner_key, page, cursor = ?cursor, "fetching card page");

            let data: AllCardsData = execute_as(
                self.executor.as_ref(),
                ALL_CARDS_QUERY,
                json!({
                    "userSlug": owner_key,
                    "cursor": cursor,
                    "rarities": rarities,
                }),
            )
            .await
            .map_err(|source| DiscoveryError::Page { page, source })?;

            let connection = data.user.and_then(|u| u.cards).ok_or_else(|| {
                DiscoveryError::MissingCollection {
                    owner: owner_key.to_string(),
                }
            })?;

            let count = connection.nodes.len();
            for node in connection.nodes {
                if self.duplicate_policy == DuplicatePolicy::DropRepeats
                    && !seen.insert(node.slug.clone())
                {
                    tracing::debug!(slug = %node.slug, "dropping repeated card");
                    continue;
                }
                let acquired_at = node.owner_since.as_deref().and_then(parse_timestamp);
                identifiers.push(ItemIdentifier::new(node.slug, acquired_at));
            }

            on_page(PageReport {
                page,
                count,
                discovered: identifiers.len(),
            });

            if !connection.page_info.has_next_page {
                break;
            }
            match connection.page_info.end_cursor {
                Some(next) => cursor = Some(next),
                None => return Err(DiscoveryError::MissingCursor { page }),
            }
        }

        tracing::info!(owner = %owner_key, pages = page, cards = identifiers.len(), "discovery complete");
        Ok(identifiers)
    }
}
