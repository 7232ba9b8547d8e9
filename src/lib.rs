//! # Matchpoint
//!
//! A ping-pong match tracker: stores match results and user records, and
//! derives per-user statistics and six-category leaderboards on read.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (users, matches, derived stats)
//! - **storage**: JSONL document store behind repository traits
//! - **validate**: Declarative request schemas and the failure table
//! - **calculate**: Statistics and leaderboard computation
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;
pub mod validate;

pub use models::*;
