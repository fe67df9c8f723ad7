//! GraphQL response fixtures and wiremock helpers

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Wrap a `data` payload in a GraphQL envelope
pub fn envelope(data: Value) -> Value {
    json!({ "data": data })
}

/// GraphQL envelope carrying a single error
pub fn error_envelope(message: &str) -> Value {
    json!({ "data": null, "errors": [{ "message": message }] })
}

/// One `AllCardsFromUser` page
pub fn cards_page(slugs: &[&str], next_cursor: Option<&str>) -> Value {
    let nodes: Vec<Value> = slugs
        .iter()
        .enumerate()
        .map(|(i, slug)| json!({ "slug": slug, "ownerSince": format!("2024-01-{:02}T12:00:00Z", i + 1) }))
        .collect();
    envelope(json!({
        "user": { "cards": {
            "nodes": nodes,
            "pageInfo": { "endCursor": next_cursor, "hasNextPage": next_cursor.is_some() }
        } }
    }))
}

/// `GetCardDetails` response for a card of `player_slug`, on sale for `eur_cents`
pub fn card_details(player_slug: &str, player_name: &str, eur_cents: &str) -> Value {
    envelope(json!({
        "anyCard": {
            "rarityTyped": "rare",
            "grade": 5,
            "xp": 5400,
            "xpNeededForNextGrade": 6000,
            "pictureUrl": format!("https://img.example.com/{player_slug}.png"),
            "season": { "startYear": 2024 },
            "inSeasonEligible": true,
            "liveSingleSaleOffer": { "receiverSide": { "amounts": {
                "eurCents": eur_cents, "wei": null, "referenceCurrency": "EUR"
            } } },
            "player": {
                "slug": player_slug,
                "displayName": player_name,
                "position": "Midfielder",
                "u23Eligible": false,
                "lastFiveSo5Appearances": 5,
                "lastFifteenSo5Appearances": 14,
                "playerGameScores": [{ "score": 72.5 }, { "score": 61.0 }, { "score": 48.5 }],
                "activeInjuries": [],
                "activeSuspensions": [{
                    "reason": "Red card",
                    "endDate": "2024-06-01T00:00:00Z",
                    "competition": { "displayName": "Cup" }
                }],
                "activeClub": {
                    "name": "Rovers",
                    "upcomingGames": [{
                        "date": "2024-05-18T15:00:00Z",
                        "homeTeam": { "name": "Rovers" },
                        "awayTeam": { "name": "Wanderers" }
                    }]
                }
            }
        }
    }))
}

/// `GetSinglePlayerFloorPrices` response with only the rare floors priced, in wei
pub fn rare_floors_in_wei(classic_wei: &str, in_season_wei: &str) -> Value {
    let offer = |wei: &str| {
        json!({ "liveSingleSaleOffer": { "receiverSide": { "amounts": {
            "eurCents": null, "wei": wei, "referenceCurrency": "ETH"
        } } } })
    };
    envelope(json!({
        "football": { "player": {
            "L_IN": null, "L_ANY": null,
            "R_IN": offer(in_season_wei), "R_ANY": offer(classic_wei),
            "SR_IN": null, "SR_ANY": null
        } }
    }))
}

/// Answer requests whose JSON body contains `partial` with `response`
pub async fn mount_graphql(server: &MockServer, partial: Value, response: Value) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(partial))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(server)
        .await;
}
