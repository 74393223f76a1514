use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::scoring::{EventScoringSummary, RecalculationSummary},
    models::UserStats,
};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/admin/stats/recalculate",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Statistics rebuilt for every user; per-user failures are listed", body = RecalculationSummary),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin"
)]
pub async fn recalculate_all_stats(State(db): State<Database>) -> Result<Response, WebError> {
    let summary = services::recalculate_all_stats(db.pool()).await?;

    Ok(Json(summary).into_response())
}

#[utoipa::path(
    post,
    path = "/api/admin/users/{user_id}/stats/recalculate",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Statistics rebuilt", body = UserStats),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "admin"
)]
pub async fn recalculate_user_stats(
    State(db): State<Database>,
    Path(user_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let stats = services::recalculate_user_stats(db.pool(), user_id).await?;

    Ok(Json(stats).into_response())
}

#[utoipa::path(
    post,
    path = "/api/admin/events/{slug}/rescore",
    params(
        ("slug" = String, Path, description = "Event slug")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Event re-scored", body = EventScoringSummary),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "admin"
)]
pub async fn rescore_event(
    State(db): State<Database>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let summary = services::rescore_event(db.pool(), &slug).await?;

    Ok(Json(summary).into_response())
}
