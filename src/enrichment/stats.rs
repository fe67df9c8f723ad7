//! Derived statistics and summaries computed from a card's player data.

use super::wire::{WireClub, WireInjury, WireSuspension};
use crate::utils::{display_date, parse_timestamp, round_cents};
use chrono::{DateTime, Utc};

/// Sentinel for an empty availability list
pub const NONE_SENTINEL: &str = "None";

/// Label used when the club has no scheduled fixture
pub const NO_UPCOMING_GAME: &str = "No upcoming game";

/// Average of the `window` most recent scores
///
/// Scores are ordered most recent first. Averages over however many scores
/// exist up to `window` (no zero padding), rounded to 2 decimals; `None`
/// when there are no scores.
pub fn recent_average(scores: &[f64], window: usize) -> Option<f64> {
    let recent = &scores[..scores.len().min(window)];
    if recent.is_empty() {
        return None;
    }
    let sum: f64 = recent.iter().sum();
    Some(round_cents(sum / recent.len() as f64))
}

/// The `count` most recent scores, comma separated
pub fn recent_scores_label(scores: &[f64], count: usize) -> String {
    scores
        .iter()
        .take(count)
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// "{status} until {date}" per injury, or "None"
pub(crate) fn injury_summary(injuries: &[WireInjury]) -> String {
    let parts: Vec<String> = injuries
        .iter()
        .map(|injury| {
            let status = injury.status.as_deref().unwrap_or("Injured");
            match injury.expected_end_date.as_deref() {
                Some(date) => format!("{} until {}", status, display_date(date)),
                None => status.to_string(),
            }
        })
        .collect();
    join_or_none(parts)
}

/// "{reason} ({competition}) until {date}" per suspension, or "None"
///
/// Competition and date are included only when known.
pub(crate) fn suspension_summary(suspensions: &[WireSuspension]) -> String {
    let parts: Vec<String> = suspensions
        .iter()
        .map(|suspension| {
            let mut text = suspension
                .reason
                .clone()
                .unwrap_or_else(|| "Suspended".to_string());
            if let Some(competition) = suspension
                .competition
                .as_ref()
                .and_then(|c| c.display_name.as_deref())
            {
                text.push_str(&format!(" ({})", competition));
            }
            if let Some(date) = suspension.end_date.as_deref() {
                text.push_str(&format!(" until {}", display_date(date)));
            }
            text
        })
        .collect();
    join_or_none(parts)
}

/// Label and kickoff of the club's next fixture
pub(crate) fn next_game(club: Option<&WireClub>) -> (String, Option<DateTime<Utc>>) {
    let Some(game) = club
        .and_then(|c| c.upcoming_games.as_ref())
        .and_then(|games| games.first())
    else {
        return (NO_UPCOMING_GAME.to_string(), None);
    };

    let team_name = |team: &Option<super::wire::WireTeam>| {
        team.as_ref()
            .and_then(|t| t.name.clone())
            .unwrap_or_else(|| "TBD".to_string())
    };
    let label = format!("{} vs {}", team_name(&game.home_team), team_name(&game.away_team));
    let date = game.date.as_deref().and_then(parse_timestamp);
    (label, date)
}

fn join_or_none(parts: Vec<String>) -> String {
    if parts.is_empty() {
        NONE_SENTINEL.to_string()
    } else {
        parts.join(", ")
    }
}
