//! Response shapes of the enrichment queries.
//!
//! Every field is optional: the API returns `null` liberally and a missing
//! secondary field must never fail a card.

use crate::pricing::SaleAmounts;
use crate::types::Rarity;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct CardDetailsData {
    pub(crate) any_card: Option<WireCard>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct WireCard {
    pub(crate) rarity_typed: Option<Rarity>,
    pub(crate) grade: Option<i64>,
    pub(crate) xp: Option<i64>,
    pub(crate) xp_needed_for_next_grade: Option<i64>,
    pub(crate) live_single_sale_offer: Option<WireOffer>,
    pub(crate) picture_url: Option<String>,
    pub(crate) season: Option<WireSeason>,
    pub(crate) in_season_eligible: Option<bool>,
    pub(crate) player: Option<WirePlayer>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct WireOffer {
    pub(crate) receiver_side: Option<WireReceiverSide>,
}

impl WireOffer {
    pub(crate) fn amounts(&self) -> Option<&SaleAmounts> {
        self.receiver_side.as_ref()?.amounts.as_ref()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WireReceiverSide {
    pub(crate) amounts: Option<SaleAmounts>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct WireSeason {
    pub(crate) start_year: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct WirePlayer {
    pub(crate) slug: Option<String>,
    pub(crate) display_name: Option<String>,
    pub(crate) position: Option<String>,
    pub(crate) last_five_so5_appearances: Option<i64>,
    pub(crate) last_fifteen_so5_appearances: Option<i64>,
    pub(crate) player_game_scores: Option<Vec<WireScore>>,
    pub(crate) active_injuries: Option<Vec<WireInjury>>,
    pub(crate) active_suspensions: Option<Vec<WireSuspension>>,
    pub(crate) active_club: Option<WireClub>,
    pub(crate) u23_eligible: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WireScore {
    pub(crate) score: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct WireInjury {
    pub(crate) status: Option<String>,
    pub(crate) expected_end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct WireSuspension {
    pub(crate) reason: Option<String>,
    pub(crate) end_date: Option<String>,
    pub(crate) competition: Option<WireCompetition>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct WireCompetition {
    pub(crate) display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct WireClub {
    pub(crate) name: Option<String>,
    pub(crate) upcoming_games: Option<Vec<WireGame>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct WireGame {
    pub(crate) date: Option<String>,
    pub(crate) home_team: Option<WireTeam>,
    pub(crate) away_team: Option<WireTeam>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WireTeam {
    pub(crate) name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct FloorPricesData {
    pub(crate) football: Option<WireFootball>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WireFootball {
    pub(crate) player: Option<WirePlayerFloors>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WirePlayerFloors {
    #[serde(rename = "L_IN")]
    pub(crate) limited_in_season: Option<WireFloorCard>,
    #[serde(rename = "L_ANY")]
    pub(crate) limited_classic: Option<WireFloorCard>,
    #[serde(rename = "R_IN")]
    pub(crate) rare_in_season: Option<WireFloorCard>,
    #[serde(rename = "R_ANY")]
    pub(crate) rare_classic: Option<WireFloorCard>,
    #[serde(rename = "SR_IN")]
    pub(crate) super_rare_in_season: Option<WireFloorCard>,
    #[serde(rename = "SR_ANY")]
    pub(crate) super_rare_classic: Option<WireFloorCard>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct WireFloorCard {
    pub(crate) live_single_sale_offer: Option<WireOffer>,
}

impl WireFloorCard {
    pub(crate) fn amounts(&self) -> Option<&SaleAmounts> {
        self.live_single_sale_offer.as_ref()?.amounts()
    }
}
