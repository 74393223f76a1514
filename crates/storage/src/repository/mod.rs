pub mod event;
pub mod filters;
pub mod leaderboard;
pub mod pick;
pub mod stats;
pub mod user;
