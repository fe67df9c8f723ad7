//! Core types and events for card-gallery

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Card rarity tier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    /// Common (free) cards
    Common,
    /// Limited
    Limited,
    /// Rare
    Rare,
    /// Super rare
    SuperRare,
    /// Unique
    Unique,
    /// A tier this crate does not know about
    #[default]
    #[serde(other)]
    Unknown,
}

impl Rarity {
    /// Wire name used in GraphQL variables and enum literals
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Limited => "limited",
            Rarity::Rare => "rare",
            Rarity::SuperRare => "super_rare",
            Rarity::Unique => "unique",
            Rarity::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One card discovered in the owner's collection
///
/// Immutable once discovered. The slug is the identity key for the whole
/// pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemIdentifier {
    /// Unique card slug
    pub slug: String,
    /// When the current owner acquired the card
    pub acquired_at: Option<DateTime<Utc>>,
}

impl ItemIdentifier {
    /// Create an identifier
    pub fn new(slug: impl Into<String>, acquired_at: Option<DateTime<Utc>>) -> Self {
        Self {
            slug: slug.into(),
            acquired_at,
        }
    }
}

/// Enrichment progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Cards that reached a terminal state
    pub completed: usize,
    /// Cards discovered, fixed once discovery ends
    pub total: usize,
}

impl Progress {
    /// Percentage complete (0.0 to 100.0); an empty collection counts as done
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        (self.completed as f32 / self.total as f32) * 100.0
    }

    /// Whether every card has settled
    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }
}

/// Lowest live sale price per rarity, for one player, in the reference currency
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorPrices {
    /// Limited, any season
    pub classic_limited: Option<f64>,
    /// Rare, any season
    pub classic_rare: Option<f64>,
    /// Super rare, any season
    pub classic_super_rare: Option<f64>,
    /// Limited, in-season
    pub in_season_limited: Option<f64>,
    /// Rare, in-season
    pub in_season_rare: Option<f64>,
    /// Super rare, in-season
    pub in_season_super_rare: Option<f64>,
}

impl FloorPrices {
    /// Floors matching a card's rarity as `(classic, in_season)`
    pub fn for_rarity(&self, rarity: Rarity) -> (Option<f64>, Option<f64>) {
        match rarity {
            Rarity::Limited => (self.classic_limited, self.in_season_limited),
            Rarity::Rare => (self.classic_rare, self.in_season_rare),
            Rarity::SuperRare => (self.classic_super_rare, self.in_season_super_rare),
            _ => (None, None),
        }
    }
}

/// Fully enriched card
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDetails {
    /// Card identity
    pub identifier: ItemIdentifier,

    /// Rarity tier
    pub rarity: Rarity,
    /// Card picture
    pub picture_url: Option<String>,
    /// Season start year of the card
    pub season_start_year: Option<i32>,
    /// Current grade
    pub grade: Option<i64>,
    /// Experience points
    pub xp: Option<i64>,
    /// Experience points needed to reach the next grade
    pub xp_needed_for_next_grade: Option<i64>,
    /// Whether the card is eligible for in-season competitions
    pub in_season: bool,
    /// Live single sale price in the reference currency
    pub sale_price: Option<f64>,

    /// Player display name
    pub player_name: Option<String>,
    /// Player slug, used for floor price lookups
    pub player_slug: Option<String>,
    /// Player position
    pub position: Option<String>,
    /// Club the player currently plays for
    pub club_name: Option<String>,
    /// Whether the player is under-23 eligible
    pub u23_eligible: bool,

    /// Appearances over the last 5 games
    pub last_five_appearances: Option<i64>,
    /// Appearances over the last 15 games
    pub last_fifteen_appearances: Option<i64>,
    /// Average of the 3 most recent scores
    pub average_score_3: Option<f64>,
    /// Average of the 5 most recent scores
    pub average_score_5: Option<f64>,
    /// Average of the 15 most recent scores
    pub average_score_15: Option<f64>,
    /// The 5 most recent scores, comma separated
    pub last_five_scores: String,

    /// Next fixture of the player's club ("Home vs Away")
    pub next_game: String,
    /// Kickoff of the next fixture
    pub next_game_date: Option<DateTime<Utc>>,

    /// Active injuries ("None" when fit)
    pub injury_info: String,
    /// Active suspensions ("None" when available)
    pub suspension_info: String,

    /// Player floor prices
    pub floors: FloorPrices,
}

impl CardDetails {
    /// Progress through the current grade, 0.0 to 100.0
    ///
    /// A grade starts at `grade * 1000` xp. A non-positive span to the next
    /// grade counts as maxed out; missing inputs count as no progress.
    pub fn xp_progress_percent(&self) -> f64 {
        let (Some(xp), Some(needed), Some(grade)) =
            (self.xp, self.xp_needed_for_next_grade, self.grade)
        else {
            return 0.0;
        };
        let level_start = grade * 1000;
        let span = needed - level_start;
        if span <= 0 {
            return 100.0;
        }
        let percent = (xp - level_start) as f64 / span as f64 * 100.0;
        percent.clamp(0.0, 100.0)
    }
}

/// State of one record slot
///
/// Created as `Loading` right after discovery, then moved exactly once to
/// `Ready` or `Failed`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CardRecord {
    /// Enrichment not finished
    Loading {
        /// Card identity
        identifier: ItemIdentifier,
    },
    /// Enrichment succeeded
    Ready(Box<CardDetails>),
    /// Primary detail fetch failed
    Failed {
        /// Card identity
        identifier: ItemIdentifier,
        /// Failure message
        error: String,
    },
}

impl CardRecord {
    /// Card identity, whatever the state
    pub fn identifier(&self) -> &ItemIdentifier {
        match self {
            CardRecord::Loading { identifier } | CardRecord::Failed { identifier, .. } => {
                identifier
            }
            CardRecord::Ready(details) => &details.identifier,
        }
    }

    /// Card slug
    pub fn slug(&self) -> &str {
        &self.identifier().slug
    }

    /// Whether the record is still loading
    pub fn is_loading(&self) -> bool {
        matches!(self, CardRecord::Loading { .. })
    }

    /// Whether the record reached `Ready` or `Failed`
    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    /// Enriched details, if ready
    pub fn details(&self) -> Option<&CardDetails> {
        match self {
            CardRecord::Ready(details) => Some(details),
            _ => None,
        }
    }

    /// Failure message, if failed
    pub fn error(&self) -> Option<&str> {
        match self {
            CardRecord::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Outcome of a completed run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Cards discovered
    pub total: usize,
    /// Cards enriched successfully
    pub succeeded: usize,
    /// Cards whose primary detail fetch failed
    pub failed: usize,
    /// Sequential batch rounds executed
    pub batches: usize,
}

/// Events emitted by the loader
///
/// Consumers subscribe via [`CollectionLoader::subscribe`](crate::CollectionLoader::subscribe).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Discovery started for an owner
    DiscoveryStarted {
        /// Owner key
        owner: String,
    },

    /// One discovery page was fetched
    PageFetched {
        /// 1-based page number
        page: u32,
        /// Cards on this page
        count: usize,
        /// Cards discovered so far
        discovered: usize,
    },

    /// Discovery finished; enrichment is about to start
    DiscoveryComplete {
        /// Cards discovered
        total: usize,
    },

    /// An enrichment batch started
    BatchStarted {
        /// 1-based batch number
        batch: usize,
        /// Number of batches in the run
        batches: usize,
        /// Cards in this batch
        size: usize,
    },

    /// Enrichment progress
    Progress(Progress),

    /// A record slot reached its terminal state
    RecordReady {
        /// Position of the record in discovery order
        slot: usize,
        /// Terminal record
        record: CardRecord,
    },

    /// The run finished (individual cards may have failed)
    RunComplete(RunSummary),

    /// Discovery failed and the run was aborted
    RunFailed {
        /// Error message
        error: String,
    },
}
