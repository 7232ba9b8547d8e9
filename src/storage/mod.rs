//! Document storage.
//!
//! The store is addressed as collections of JSON documents. Handlers never
//! touch files directly: they go through the [`UserRepository`] and
//! [`MatchRepository`] traits, so the backing store can be swapped (the
//! JSONL store in production, an in-memory store in tests).

mod jsonl;
mod memory;

pub use jsonl::{Collection, JsonlReader, JsonlStore, JsonlWriter};
pub use memory::MemoryStore;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{MatchId, MatchRecord, User};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn collections_dir(&self) -> PathBuf {
        self.data_dir.join("collections")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Read access to user documents. Users are created externally (via the
/// CLI), so the API only ever reads them.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a single user by id.
    async fn get(&self, id: &str) -> Result<Option<User>, StorageError>;

    /// All users, in store order.
    async fn list(&self) -> Result<Vec<User>, StorageError>;

    /// Resolve which of the given ids exist, in one query.
    async fn resolve(&self, ids: &[&str]) -> Result<Vec<String>, StorageError>;

    /// Insert a user document.
    async fn insert(&self, user: User) -> Result<(), StorageError>;
}

/// Read/write access to match documents.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Insert a match document, returning its id.
    async fn insert(&self, record: MatchRecord) -> Result<MatchId, StorageError>;

    /// Matches the user appears in (as winner or loser), optionally
    /// restricted to one season.
    async fn for_user(
        &self,
        user: &str,
        season: Option<i64>,
    ) -> Result<Vec<MatchRecord>, StorageError>;

    /// All matches, in store order.
    async fn all(&self) -> Result<Vec<MatchRecord>, StorageError>;
}
