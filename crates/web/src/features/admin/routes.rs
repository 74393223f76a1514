use axum::{Router, middleware, routing::post};
use storage::Database;

use super::handlers::{recalculate_all_stats, recalculate_user_stats, rescore_event};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route("/stats/recalculate", post(recalculate_all_stats))
        .route(
            "/users/:user_id/stats/recalculate",
            post(recalculate_user_stats),
        )
        .route("/events/:slug/rescore", post(rescore_event))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
