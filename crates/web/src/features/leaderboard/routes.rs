use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{get_event_leaderboard, get_global_leaderboard};

pub fn routes() -> Router<Database> {
    Router::new().route("/", get(get_global_leaderboard))
}

pub fn event_routes() -> Router<Database> {
    Router::new().route("/:slug/leaderboard", get(get_event_leaderboard))
}
