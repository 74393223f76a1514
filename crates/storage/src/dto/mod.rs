pub mod common;
pub mod event;
pub mod leaderboard;
pub mod pick;
pub mod scoring;
pub mod user;

mod validation;
