use axum::{
    Router, middleware,
    routing::{delete, put},
};
use storage::Database;

use super::handlers::{clear_result, submit_results};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route("/:slug/results", put(submit_results))
        .route("/:slug/results/:fight_id", delete(clear_result))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
