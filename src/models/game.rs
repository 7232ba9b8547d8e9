//! Match model — a single recorded game between two players.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MatchId;

/// A finished match. Immutable once written, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    /// Unique identifier, assigned at insert time
    pub id: MatchId,

    /// Winning player's user id
    pub winner: String,

    /// Losing player's user id
    pub loser: String,

    /// Final score as (winner's goals, loser's goals)
    pub score: [u32; 2],

    /// When the match was played, if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,

    /// Competitive season the match belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<i64>,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Create a new MatchRecord with a freshly generated ID.
    pub fn new(winner: String, loser: String, score: [u32; 2]) -> Self {
        Self {
            id: MatchId::generate(),
            winner,
            loser,
            score,
            date: None,
            season: None,
            created_at: Utc::now(),
        }
    }

    /// Builder method to set the match date.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Builder method to set the season.
    pub fn with_season(mut self, season: i64) -> Self {
        self.season = Some(season);
        self
    }

    /// Whether the given user took part in this match.
    pub fn involves(&self, user: &str) -> bool {
        self.winner == user || self.loser == user
    }
}
