//! Six-category leaderboards.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::state::AppState;
use crate::api::{check_request, ApiError};
use crate::calculate::{build_leaderboard, compute_user_stats};
use crate::models::{Leaderboard, LeaderboardCategory, UserStats};
use crate::validate::schemas;

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub category: Option<String>,
}

/// Response mapping from category key to its ranked list. Only the requested
/// categories are present; the rest serialize away.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches_played: Option<Leaderboard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches_won: Option<Leaderboard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_percentage: Option<Leaderboard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals_scored: Option<Leaderboard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals_conceded: Option<Leaderboard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_goals: Option<Leaderboard>,
}

impl LeaderboardsResponse {
    fn set(&mut self, category: LeaderboardCategory, board: Leaderboard) {
        let slot = match category {
            LeaderboardCategory::MatchesPlayed => &mut self.matches_played,
            LeaderboardCategory::MatchesWon => &mut self.matches_won,
            LeaderboardCategory::WinPercentage => &mut self.win_percentage,
            LeaderboardCategory::GoalsScored => &mut self.goals_scored,
            LeaderboardCategory::GoalsConceded => &mut self.goals_conceded,
            LeaderboardCategory::AverageGoals => &mut self.average_goals,
        };
        *slot = Some(board);
    }
}

/// GET /leaderboard — rank every user on all six categories, or on one when
/// the validated `category` parameter is present.
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardsResponse>, ApiError> {
    let mut data = serde_json::Map::new();
    if let Some(ref category) = params.category {
        data.insert("category".to_string(), Value::from(category.clone()));
    }
    check_request(&Value::Object(data), &schemas::LEADERBOARD_QUERY)?;

    let users = state.users.list().await?;
    let matches = state.matches.all().await?;

    let stats: Vec<(String, UserStats)> = users
        .into_iter()
        .map(|u| {
            let s = compute_user_stats(&u.id, &matches);
            (u.id, s)
        })
        .collect();

    let selected = match params
        .category
        .as_deref()
        .and_then(LeaderboardCategory::from_key)
    {
        Some(category) => vec![category],
        None => LeaderboardCategory::ALL.to_vec(),
    };

    let mut response = LeaderboardsResponse::default();
    for category in selected {
        response.set(category, build_leaderboard(category, &stats));
    }

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::models::{LeaderboardCategory, MatchRecord};
    use crate::storage::{MatchRepository, MemoryStore};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    async fn seeded_store() -> Arc<MemoryStore> {
        // alice: 2 played, 2 won; bob: 3 played, 1 won; charlie: 1 played, 0 won
        let store = Arc::new(MemoryStore::new().with_users(&["alice", "bob", "charlie"]));
        for m in [
            MatchRecord::new("alice".to_string(), "bob".to_string(), [11, 7]),
            MatchRecord::new("alice".to_string(), "bob".to_string(), [11, 9]),
            MatchRecord::new("bob".to_string(), "charlie".to_string(), [11, 2]),
        ] {
            MatchRepository::insert(&*store, m).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_leaderboard_all_categories() {
        let app = build_router(AppState::from_store(seeded_store().await));

        let (status, json) = get_json(app, "/leaderboard").await;

        assert_eq!(status, StatusCode::OK);
        for key in LeaderboardCategory::KEYS {
            let board = &json[key];
            assert!(board.is_object(), "missing category {key}");
            assert_eq!(board["leaderboard"].as_array().unwrap().len(), 3);
        }

        assert_eq!(json["matchesPlayed"]["leaderboardName"], "Most Matches Played");
        assert_eq!(json["matchesPlayed"]["leaderboard"][0]["username"], "bob");
        assert_eq!(json["matchesPlayed"]["leaderboard"][0]["stat"], 3);

        assert_eq!(json["matchesWon"]["leaderboard"][0]["username"], "alice");
        assert_eq!(json["matchesWon"]["leaderboard"][0]["stat"], 2);
    }

    #[tokio::test]
    async fn test_leaderboard_rates_sort_numerically() {
        // alice 100.00 must outrank bob 33.33 even though "100.00" < "33.33"
        // as strings.
        let app = build_router(AppState::from_store(seeded_store().await));

        let (_, json) = get_json(app, "/leaderboard").await;

        let rows = json["winPercentage"]["leaderboard"].as_array().unwrap();
        assert_eq!(rows[0]["username"], "alice");
        assert_eq!(rows[0]["stat"], "100.00");
        assert_eq!(rows[1]["username"], "bob");
        assert_eq!(rows[1]["stat"], "33.33");
        assert_eq!(rows[2]["stat"], "0.00");
    }

    #[tokio::test]
    async fn test_leaderboard_category_filter_applies() {
        let app = build_router(AppState::from_store(seeded_store().await));

        let (status, json) = get_json(app, "/leaderboard?category=goalsScored").await;

        assert_eq!(status, StatusCode::OK);
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(object.contains_key("goalsScored"));
        assert_eq!(json["goalsScored"]["categoryName"], "Goals Scored");
    }

    #[tokio::test]
    async fn test_leaderboard_invalid_category() {
        let app = build_router(AppState::from_store(seeded_store().await));

        let (status, json) = get_json(app, "/leaderboard?category=bestHair").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["msg"], "Invalid value for \"category\"");
    }

    #[tokio::test]
    async fn test_leaderboard_empty_store() {
        let app = build_router(AppState::from_store(Arc::new(MemoryStore::new())));

        let (status, json) = get_json(app, "/leaderboard").await;

        assert_eq!(status, StatusCode::OK);
        for key in LeaderboardCategory::KEYS {
            assert!(json[key]["leaderboard"].as_array().unwrap().is_empty());
        }
    }
}
