//! Derived statistics models.
//!
//! Nothing here is persisted: stats are recomputed from the match list on
//! every read. Percentages and averages stay `f64` through the pipeline and
//! are rendered as fixed-2-decimal strings only when serialized, so ordering
//! always happens on the numeric value.

use serde::{Serialize, Serializer};

/// Serialize an `f64` as a fixed-2-decimal string at the response boundary.
pub fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{value:.2}"))
}

/// Per-user aggregate metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Matches the user appears in, as winner or loser
    pub matches_played: u32,

    /// Matches the user won
    pub matches_won: u32,

    /// Won/played as a percentage (0-100); 0.0 for users with no matches
    #[serde(serialize_with = "two_decimals")]
    pub win_percentage: f64,

    /// Goals scored across all matches
    pub goals_scored: u32,

    /// Goals conceded across all matches
    pub goals_conceded: u32,

    /// Scored/played; 0.0 for users with no matches
    #[serde(serialize_with = "two_decimals")]
    pub average_goals: f64,
}

/// The six fixed ranking dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardCategory {
    MatchesPlayed,
    MatchesWon,
    WinPercentage,
    GoalsScored,
    GoalsConceded,
    AverageGoals,
}

impl LeaderboardCategory {
    pub const ALL: [LeaderboardCategory; 6] = [
        LeaderboardCategory::MatchesPlayed,
        LeaderboardCategory::MatchesWon,
        LeaderboardCategory::WinPercentage,
        LeaderboardCategory::GoalsScored,
        LeaderboardCategory::GoalsConceded,
        LeaderboardCategory::AverageGoals,
    ];

    /// Response-mapping keys, in category order.
    pub const KEYS: [&'static str; 6] = [
        "matchesPlayed",
        "matchesWon",
        "winPercentage",
        "goalsScored",
        "goalsConceded",
        "averageGoals",
    ];

    /// The key this category appears under in the response mapping.
    pub fn key(&self) -> &'static str {
        match self {
            LeaderboardCategory::MatchesPlayed => "matchesPlayed",
            LeaderboardCategory::MatchesWon => "matchesWon",
            LeaderboardCategory::WinPercentage => "winPercentage",
            LeaderboardCategory::GoalsScored => "goalsScored",
            LeaderboardCategory::GoalsConceded => "goalsConceded",
            LeaderboardCategory::AverageGoals => "averageGoals",
        }
    }

    /// Human-facing leaderboard title.
    pub fn leaderboard_name(&self) -> &'static str {
        match self {
            LeaderboardCategory::MatchesPlayed => "Most Matches Played",
            LeaderboardCategory::MatchesWon => "Most Matches Won",
            LeaderboardCategory::WinPercentage => "Best Win Percentage",
            LeaderboardCategory::GoalsScored => "Most Goals Scored",
            LeaderboardCategory::GoalsConceded => "Most Goals Conceded",
            LeaderboardCategory::AverageGoals => "Best Average Goals",
        }
    }

    /// Short label for the ranked dimension.
    pub fn category_name(&self) -> &'static str {
        match self {
            LeaderboardCategory::MatchesPlayed => "Matches Played",
            LeaderboardCategory::MatchesWon => "Matches Won",
            LeaderboardCategory::WinPercentage => "Win Percentage",
            LeaderboardCategory::GoalsScored => "Goals Scored",
            LeaderboardCategory::GoalsConceded => "Goals Conceded",
            LeaderboardCategory::AverageGoals => "Average Goals",
        }
    }

    /// Parse a response-mapping key back into a category.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Extract this category's value from a user's stats.
    pub fn stat_of(&self, stats: &UserStats) -> StatValue {
        match self {
            LeaderboardCategory::MatchesPlayed => StatValue::Count(stats.matches_played),
            LeaderboardCategory::MatchesWon => StatValue::Count(stats.matches_won),
            LeaderboardCategory::WinPercentage => StatValue::Rate(stats.win_percentage),
            LeaderboardCategory::GoalsScored => StatValue::Count(stats.goals_scored),
            LeaderboardCategory::GoalsConceded => StatValue::Count(stats.goals_conceded),
            LeaderboardCategory::AverageGoals => StatValue::Rate(stats.average_goals),
        }
    }
}

/// A single stat value: plain counts serialize as numbers, rates as
/// fixed-2-decimal strings. Comparison is always numeric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue {
    Count(u32),
    Rate(f64),
}

impl StatValue {
    /// Numeric value used for ordering.
    pub fn as_f64(&self) -> f64 {
        match self {
            StatValue::Count(n) => f64::from(*n),
            StatValue::Rate(r) => *r,
        }
    }
}

impl Serialize for StatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StatValue::Count(n) => serializer.serialize_u32(*n),
            StatValue::Rate(r) => serializer.serialize_str(&format!("{r:.2}")),
        }
    }
}

/// One row of a leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub stat: StatValue,
}

/// A fully ranked category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub leaderboard_name: &'static str,
    pub category_name: &'static str,
    pub leaderboard: Vec<LeaderboardEntry>,
}
