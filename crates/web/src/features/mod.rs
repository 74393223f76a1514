pub mod admin;
pub mod events;
pub mod leaderboard;
pub mod picks;
pub mod results;
pub mod users;
