//! Statistics calculation engine.
//!
//! Computes derived metrics from stored match data:
//! - Per-user aggregates (matches, win percentage, goals)
//! - Six-category leaderboards
//!
//! Everything here is pure: stats are recomputed from the match list on each
//! request, in O(matches).

use crate::models::{
    Leaderboard, LeaderboardCategory, LeaderboardEntry, MatchRecord, UserStats,
};

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Aggregate a user's stats from the matches they appear in.
///
/// Matches not involving the user are ignored, so callers may pass either a
/// pre-filtered list or the whole collection. A user with zero matches
/// reports 0.0 for both ratios.
pub fn compute_user_stats(user: &str, matches: &[MatchRecord]) -> UserStats {
    let mut stats = UserStats::default();

    for m in matches.iter().filter(|m| m.involves(user)) {
        stats.matches_played += 1;
        if m.winner == user {
            stats.matches_won += 1;
            stats.goals_scored += m.score[0];
            stats.goals_conceded += m.score[1];
        } else {
            stats.goals_scored += m.score[1];
            stats.goals_conceded += m.score[0];
        }
    }

    if stats.matches_played > 0 {
        let played = f64::from(stats.matches_played);
        stats.win_percentage = round2(f64::from(stats.matches_won) / played * 100.0);
        stats.average_goals = round2(f64::from(stats.goals_scored) / played);
    }

    stats
}

/// Rank every user on one category.
///
/// Input order is store order; the sort is stable and strictly by numeric
/// value, so ties keep their original order.
pub fn build_leaderboard(
    category: LeaderboardCategory,
    stats: &[(String, UserStats)],
) -> Leaderboard {
    let mut entries: Vec<LeaderboardEntry> = stats
        .iter()
        .map(|(username, s)| LeaderboardEntry {
            username: username.clone(),
            stat: category.stat_of(s),
        })
        .collect();

    entries.sort_by(|a, b| {
        b.stat
            .as_f64()
            .partial_cmp(&a.stat.as_f64())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Leaderboard {
        leaderboard_name: category.leaderboard_name(),
        category_name: category.category_name(),
        leaderboard: entries,
    }
}
