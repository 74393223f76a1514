use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{create_user, get_user, get_user_stats, list_user_picks};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", post(create_user))
        .route("/:user_id", get(get_user))
        .route("/:user_id/stats", get(get_user_stats))
        .route("/:user_id/picks", get(list_user_picks))
}
