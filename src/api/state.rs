use std::sync::Arc;

use crate::storage::{MatchRepository, UserRepository};

/// Shared handler state: the two repository handles. Both usually point at
/// the same store; the split keeps handlers honest about what they touch.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub matches: Arc<dyn MatchRepository>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>, matches: Arc<dyn MatchRepository>) -> Self {
        Self { users, matches }
    }

    /// Build state from one store implementing both repositories.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository + MatchRepository + 'static,
    {
        Self {
            users: store.clone(),
            matches: store,
        }
    }
}
