//! In-memory document store, for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{MatchRepository, StorageError, UserRepository};
use crate::models::{MatchId, MatchRecord, User};

/// Keeps both collections in memory. Store order is insertion order, same as
/// the JSONL store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    matches: Mutex<Vec<MatchRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the user collection.
    pub fn with_users(self, ids: &[&str]) -> Self {
        {
            let mut users = self.users.lock().unwrap();
            for id in ids {
                users.push(User::new(id.to_string()));
            }
        }
        self
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn get(&self, id: &str) -> Result<Option<User>, StorageError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, StorageError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn resolve(&self, ids: &[&str]) -> Result<Vec<String>, StorageError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| ids.contains(&u.id.as_str()))
            .map(|u| u.id.clone())
            .collect())
    }

    async fn insert(&self, user: User) -> Result<(), StorageError> {
        self.users.lock().unwrap().push(user);
        Ok(())
    }
}

#[async_trait]
impl MatchRepository for MemoryStore {
    async fn insert(&self, record: MatchRecord) -> Result<MatchId, StorageError> {
        let id = record.id.clone();
        self.matches.lock().unwrap().push(record);
        Ok(id)
    }

    async fn for_user(
        &self,
        user: &str,
        season: Option<i64>,
    ) -> Result<Vec<MatchRecord>, StorageError> {
        Ok(self
            .matches
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.involves(user) && season.is_none_or(|s| m.season == Some(s)))
            .cloned()
            .collect())
    }

    async fn all(&self) -> Result<Vec<MatchRecord>, StorageError> {
        Ok(self.matches.lock().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_users() {
        let store = MemoryStore::new().with_users(&["alice", "bob"]);

        assert!(store.get("alice").await.unwrap().is_some());
        assert!(store.get("ghost").await.unwrap().is_none());
        assert_eq!(UserRepository::list(&store).await.unwrap().len(), 2);
        assert_eq!(
            store.resolve(&["bob", "ghost"]).await.unwrap(),
            vec!["bob".to_string()]
        );
    }

    #[tokio::test]
    async fn test_memory_store_matches() {
        let store = MemoryStore::new();
        let m = MatchRecord::new("alice".to_string(), "bob".to_string(), [11, 5]).with_season(2);

        let id = MatchRepository::insert(&store, m).await.unwrap();

        let for_alice = store.for_user("alice", Some(2)).await.unwrap();
        assert_eq!(for_alice.len(), 1);
        assert_eq!(for_alice[0].id, id);
        assert!(store.for_user("alice", Some(9)).await.unwrap().is_empty());
    }
}
