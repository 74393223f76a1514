use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{get_pick_sheet, submit_picks};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/:slug/picks", post(submit_picks))
        .route("/:slug/picks/:user_id", get(get_pick_sheet))
}
