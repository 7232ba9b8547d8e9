//! User endpoints: listings, per-user stats, and the all-users digest.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::api::state::AppState;
use crate::api::{check_request, ApiError};
use crate::calculate::compute_user_stats;
use crate::models::{MatchRecord, User, UserStats};
use crate::validate::schemas;

/// GET /users — every user document, verbatim.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users.list().await?))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailResponse {
    #[serde(flatten)]
    pub stats: UserStats,
    pub match_history: Vec<MatchRecord>,
}

/// Coerce raw query parameters into the JSON object the schema expects.
/// A season string that parses becomes an integer; one that doesn't stays a
/// string so the schema reports it as invalid.
fn coerce_query(params: &HashMap<String, String>) -> Value {
    let mut data = serde_json::Map::new();
    for (key, value) in params {
        let coerced = if key == "season" {
            value
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::from(value.clone()))
        } else {
            Value::from(value.clone())
        };
        data.insert(key.clone(), coerced);
    }
    Value::Object(data)
}

/// GET /user — aggregated stats plus match history for one user, optionally
/// narrowed to a season.
pub async fn user_detail(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<UserDetailResponse>, ApiError> {
    let data = coerce_query(&params);
    check_request(&data, &schemas::USER_QUERY)?;

    let user = params.get("user").cloned().ok_or(ApiError::Unclassified)?;
    let season = params.get("season").and_then(|s| s.parse::<i64>().ok());

    if state.users.get(&user).await?.is_none() {
        return Err(ApiError::UnknownUser(user));
    }

    let match_history = state.matches.for_user(&user, season).await?;
    let stats = compute_user_stats(&user, &match_history);

    Ok(Json(UserDetailResponse {
        stats,
        match_history,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoEntry {
    pub user: String,
    #[serde(flatten)]
    pub stats: UserStats,
    pub match_history: Vec<MatchRecord>,
}

/// GET /user-info — stats and match history for every user, in store order.
pub async fn user_info(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserInfoEntry>>, ApiError> {
    let users = state.users.list().await?;
    let matches = state.matches.all().await?;

    let entries = users
        .into_iter()
        .map(|u| {
            let match_history: Vec<MatchRecord> = matches
                .iter()
                .filter(|m| m.involves(&u.id))
                .cloned()
                .collect();
            let stats = compute_user_stats(&u.id, &match_history);
            UserInfoEntry {
                user: u.id,
                stats,
                match_history,
            }
        })
        .collect();

    Ok(Json(entries))
}
