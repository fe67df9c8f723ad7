//! Shared test helpers: a scripted query executor and response fixtures.

use crate::client::{QueryExecutor, QueryResult, operation_name};
use crate::error::{GraphQlError, QueryError};
use serde_json::{Value, json};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type Handler = Box<dyn Fn(&str, &Value) -> QueryResult + Send + Sync>;
type DelayFn = Box<dyn Fn(&Value) -> Duration + Send + Sync>;

/// Start or end of one call, keyed by `cardSlug` (or the operation name)
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum CallMark {
    Started(String),
    Finished(String),
}

/// [`QueryExecutor`] answering from a closure keyed by operation name and variables.
///
/// Tracks every call, the order calls start and finish in, and the peak
/// number of concurrently outstanding calls.
pub(crate) struct ScriptedExecutor {
    handler: Handler,
    delay: Option<DelayFn>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: Mutex<Vec<(String, Value)>>,
    timeline: Mutex<Vec<CallMark>>,
}

impl ScriptedExecutor {
    pub(crate) fn new(
        handler: impl Fn(&str, &Value) -> QueryResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            delay: None,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
            timeline: Mutex::new(Vec::new()),
        }
    }

    /// Hold every call open for `delay` so concurrent calls overlap
    pub(crate) fn with_delay(self, delay: Duration) -> Self {
        self.with_delay_for(move |_| delay)
    }

    /// Hold each call open for a duration picked from its variables
    pub(crate) fn with_delay_for(
        mut self,
        delay: impl Fn(&Value) -> Duration + Send + Sync + 'static,
    ) -> Self {
        self.delay = Some(Box::new(delay));
        self
    }

    pub(crate) fn timeline(&self) -> Vec<CallMark> {
        self.timeline.lock().unwrap().clone()
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub(crate) fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(op, _)| op == operation)
            .count()
    }
}

#[async_trait::async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn execute(&self, query: &str, variables: Value) -> QueryResult {
        let op = operation_name(query).to_string();
        let key = variables["cardSlug"].as_str().unwrap_or(&op).to_string();
        self.calls
            .lock()
            .unwrap()
            .push((op.clone(), variables.clone()));
        self.timeline
            .lock()
            .unwrap()
            .push(CallMark::Started(key.clone()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(&variables)).await;
        }
        let result = (self.handler)(&op, &variables);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.timeline.lock().unwrap().push(CallMark::Finished(key));
        result
    }
}

/// GraphQL error result with a single message
pub(crate) fn graphql_error(message: &str) -> QueryResult {
    Err(QueryError::GraphQl(vec![GraphQlError {
        message: message.to_string(),
    }]))
}

/// `GetCardDetails` payload for a limited card owned by `player_slug`
pub(crate) fn card_payload(player_slug: Option<&str>) -> Value {
    let player = player_slug.map(|slug| {
        json!({
            "slug": slug,
            "displayName": "Test Player",
            "position": "Forward",
            "lastFiveSo5Appearances": 4,
            "lastFifteenSo5Appearances": 12,
            "playerGameScores": [
                { "score": 70.0 }, { "score": 50.0 }, { "score": 60.0 },
                { "score": 40.0 }, { "score": 30.0 }, { "score": 20.0 }
            ],
            "activeInjuries": [],
            "activeSuspensions": [],
            "activeClub": {
                "name": "Home FC",
                "upcomingGames": [{
                    "id": "game-1",
                    "date": "2024-05-04T14:00:00Z",
                    "competition": { "displayName": "League" },
                    "homeTeam": { "name": "Home FC" },
                    "awayTeam": { "name": "Away United" }
                }]
            },
            "u23Eligible": true
        })
    });
    json!({
        "anyCard": {
            "rarityTyped": "limited",
            "grade": 2,
            "xp": 2500,
            "xpNeededForNextGrade": 3000,
            "liveSingleSaleOffer": {
                "receiverSide": { "amounts": {
                    "eurCents": "1050", "usdCents": null, "gbpCents": null,
                    "wei": null, "referenceCurrency": "EUR"
                } }
            },
            "pictureUrl": "https://img.example.com/card.png",
            "season": { "startYear": 2023 },
            "inSeasonEligible": true,
            "player": player
        }
    })
}

/// `GetSinglePlayerFloorPrices` payload; every floor priced in euro cents
pub(crate) fn floors_payload() -> Value {
    let offer = |cents: &str| {
        json!({ "liveSingleSaleOffer": { "receiverSide": { "amounts": {
            "eurCents": cents, "wei": null, "referenceCurrency": "EUR"
        } } } })
    };
    json!({
        "football": { "player": {
            "L_IN": offer("500"),
            "L_ANY": offer("300"),
            "R_IN": offer("4000"),
            "R_ANY": offer("2500"),
            "SR_IN": null,
            "SR_ANY": offer("20000")
        } }
    })
}

/// `AllCardsFromUser` page payload
pub(crate) fn page_payload(slugs: &[&str], has_next: bool, cursor: Option<&str>) -> Value {
    let nodes: Vec<Value> = slugs
        .iter()
        .map(|slug| json!({ "slug": slug, "ownerSince": "2024-01-15T10:00:00Z" }))
        .collect();
    json!({
        "user": { "cards": {
            "nodes": nodes,
            "pageInfo": { "endCursor": cursor, "hasNextPage": has_next }
        } }
    })
}
