//! Core data models for the match tracker.

mod game;
mod ids;
mod stats;
mod user;

pub use game::*;
pub use ids::*;
pub use stats::*;
pub use user::*;
