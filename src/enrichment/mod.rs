//! Per-card enrichment.
//!
//! [`DetailEnricher::enrich`] turns one discovered [`ItemIdentifier`] into a
//! [`CardDetails`]:
//! 1. fetch the card detail record (failure fails this card only)
//! 2. fetch the player's six floor prices (failure downgrades to unknown floors)
//! 3. derive score averages, availability summaries and the next fixture
//! 4. merge everything into one record

pub mod queries;
pub mod stats;
mod wire;


use crate::client::{QueryExecutor, execute_as};
use crate::config::PricingConfig;
use crate::error::DetailFetchError;
use crate::pricing::normalize;
use crate::types::{CardDetails, FloorPrices, ItemIdentifier};
use queries::{CARD_DETAILS_QUERY, FLOOR_PRICES_QUERY};
use serde_json::json;
use std::sync::Arc;
use wire::{CardDetailsData, FloorPricesData, WireCard, WireFloorCard};

/// Enriches discovered cards with detail and floor price data
#[derive(Clone)]
pub struct DetailEnricher {
    executor: Arc<dyn QueryExecutor>,
    pricing: PricingConfig,
}

impl DetailEnricher {
    /// Create an enricher over a query executor
    pub fn new(executor: Arc<dyn QueryExecutor>, pricing: PricingConfig) -> Self {
        Self { executor, pricing }
    }

    /// Fetch and merge everything known about one card
    ///
    /// # Errors
    /// Only the primary detail fetch can fail the card; floor price problems
    /// leave the floors unknown instead.
    pub async fn enrich(
        &self,
        identifier: &ItemIdentifier,
    ) -> std::result::Result<CardDetails, DetailFetchError> {
        let data: CardDetailsData = execute_as(
            self.executor.as_ref(),
            CARD_DETAILS_QUERY,
            json!({ "cardSlug": identifier.slug }),
        )
        .await?;

        let card = data.any_card.ok_or_else(|| DetailFetchError::NotFound {
            slug: identifier.slug.clone(),
        })?;

        let floors = match card.player.as_ref().and_then(|p| p.slug.as_deref()) {
            Some(player_slug) => self.fetch_floor_prices(player_slug).await,
            None => FloorPrices::default(),
        };

        Ok(self.merge(identifier, card, floors))
    }

    /// Best-effort lookup of a player's six floor prices
    ///
    /// Any failure yields all-unknown floors.
    pub async fn fetch_floor_prices(&self, player_slug: &str) -> FloorPrices {
        let result: std::result::Result<FloorPricesData, _> = execute_as(
            self.executor.as_ref(),
            FLOOR_PRICES_QUERY,
            json!({ "playerSlug": player_slug }),
        )
        .await;

        let data = match result {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(player = %player_slug, error = %e, "floor price lookup failed, floors unknown");
                return FloorPrices::default();
            }
        };

        let Some(player) = data.football.and_then(|f| f.player) else {
            tracing::debug!(player = %player_slug, "no floor price data for player");
            return FloorPrices::default();
        };

        let price = |floor: &Option<WireFloorCard>| {
            normalize(floor.as_ref().and_then(|f| f.amounts()), &self.pricing)
        };
        FloorPrices {
            classic_limited: price(&player.limited_classic),
            classic_rare: price(&player.rare_classic),
            classic_super_rare: price(&player.super_rare_classic),
            in_season_limited: price(&player.limited_in_season),
            in_season_rare: price(&player.rare_in_season),
            in_season_super_rare: price(&player.super_rare_in_season),
        }
    }

    fn merge(&self, identifier: &ItemIdentifier, card: WireCard, floors: FloorPrices) -> CardDetails {
        let sale_price = normalize(
            card.live_single_sale_offer.as_ref().and_then(|o| o.amounts()),
            &self.pricing,
        );
        let player = card.player.unwrap_or_default();

        let scores: Vec<f64> = player
            .player_game_scores
            .unwrap_or_default()
            .into_iter()
            .filter_map(|s| s.score)
            .collect();

        let (next_game, next_game_date) = stats::next_game(player.active_club.as_ref());

        CardDetails {
            identifier: identifier.clone(),
            rarity: card.rarity_typed.unwrap_or_default(),
            picture_url: card.picture_url,
            season_start_year: card.season.and_then(|s| s.start_year),
            grade: card.grade,
            xp: card.xp,
            xp_needed_for_next_grade: card.xp_needed_for_next_grade,
            in_season: card.in_season_eligible.unwrap_or(false),
            sale_price,
            player_name: player.display_name,
            player_slug: player.slug,
            position: player.position,
            club_name: player.active_club.as_ref().and_then(|c| c.name.clone()),
            u23_eligible: player.u23_eligible.unwrap_or(false),
            last_five_appearances: player.last_five_so5_appearances,
            last_fifteen_appearances: player.last_fifteen_so5_appearances,
            average_score_3: stats::recent_average(&scores, 3),
            average_score_5: stats::recent_average(&scores, 5),
            average_score_15: stats::recent_average(&scores, 15),
            last_five_scores: stats::recent_scores_label(&scores, 5),
            next_game,
            next_game_date,
            injury_info: stats::injury_summary(player.active_injuries.as_deref().unwrap_or(&[])),
            suspension_info: stats::suspension_summary(
                player.active_suspensions.as_deref().unwrap_or(&[]),
            ),
            floors,
        }
    }
}

impl std::fmt::Debug for DetailEnricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailEnricher")
            .field("pricing", &self.pricing)
            .finish_non_exhaustive()
    }
}
