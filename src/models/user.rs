//! User model.
//!
//! The identifier doubles as the display name in this domain. Users are
//! created through the CLI, never through the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered player.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier, also shown as the player's name
    pub id: String,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: String) -> Self {
        Self {
            id,
            created_at: Utc::now(),
        }
    }
}
