use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use storage::Database;

use super::handlers::{
    add_fight, create_event, deactivate_event, get_event, list_events, restore_event,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_event))
        .route("/:slug", delete(deactivate_event))
        .route("/:slug/fights", post(add_fight))
        .route("/:slug/restore", post(restore_event))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_events))
        .route("/:slug", get(get_event))
        .merge(protected)
}
