//! Match submission.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::api::state::AppState;
use crate::api::{check_request, ApiError};
use crate::models::{MatchId, MatchRecord};
use crate::validate::schemas;

#[derive(Debug, Serialize)]
pub struct AddMatchResponse {
    pub success: bool,
    pub id: MatchId,
}

fn field_str<'a>(data: &'a Value, name: &str) -> Result<&'a str, ApiError> {
    data.get(name)
        .and_then(Value::as_str)
        .ok_or(ApiError::Unclassified)
}

fn goals(value: &Value) -> Result<u32, ApiError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(ApiError::Unclassified)
}

fn field_score(data: &Value) -> Result<[u32; 2], ApiError> {
    let pair = data
        .get("score")
        .and_then(Value::as_array)
        .ok_or(ApiError::Unclassified)?;
    match pair.as_slice() {
        [a, b] => Ok([goals(a)?, goals(b)?]),
        _ => Err(ApiError::Unclassified),
    }
}

/// POST /match — validate, check both players exist (winner first), insert.
pub async fn add_match(
    State(state): State<AppState>,
    Json(data): Json<Value>,
) -> Result<Json<AddMatchResponse>, ApiError> {
    check_request(&data, &schemas::ADD_MATCH)?;

    let winner = field_str(&data, "winner")?;
    let loser = field_str(&data, "loser")?;

    // One query resolves both ids; membership is then checked winner first.
    let known = state.users.resolve(&[winner, loser]).await?;
    if !known.iter().any(|id| id == winner) {
        return Err(ApiError::UnknownUser(winner.to_string()));
    }
    if !known.iter().any(|id| id == loser) {
        return Err(ApiError::UnknownUser(loser.to_string()));
    }

    let mut record = MatchRecord::new(winner.to_string(), loser.to_string(), field_score(&data)?);
    if let Some(date) = data.get("date").and_then(Value::as_str) {
        let parsed = DateTime::parse_from_rfc3339(date)
            .map_err(|_| ApiError::Validation("Invalid value for \"date\""))?;
        record = record.with_date(parsed.with_timezone(&Utc));
    }
    if let Some(season) = data.get("season").and_then(Value::as_i64) {
        record = record.with_season(season);
    }

    let id = state.matches.insert(record).await?;
    info!(%id, winner, loser, "recorded match");

    Ok(Json(AddMatchResponse { success: true, id }))
}
