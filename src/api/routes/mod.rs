pub mod leaderboard;
pub mod matches;
pub mod users;
