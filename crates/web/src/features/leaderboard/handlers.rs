use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        leaderboard::{EventLeaderboardEntry, LeaderboardEntry},
    },
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(PaginationParams),
    responses(
        (status = 200, description = "Global leaderboard retrieved successfully", body = PaginatedResponse<LeaderboardEntry>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "leaderboard"
)]
pub async fn get_global_leaderboard(
    State(db): State<Database>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (entries, total_items) = services::get_global_leaderboard(db.pool(), &pagination).await?;

    let response = PaginatedResponse::new(
        entries,
        pagination.page,
        pagination.page_size,
        total_items,
    );

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{slug}/leaderboard",
    params(
        ("slug" = String, Path, description = "Event slug"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Event leaderboard retrieved successfully", body = PaginatedResponse<EventLeaderboardEntry>),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "Event not found")
    ),
    tag = "leaderboard"
)]
pub async fn get_event_leaderboard(
    State(db): State<Database>,
    Path(slug): Path<String>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (entries, total_items) =
        services::get_event_leaderboard(db.pool(), &slug, &pagination).await?;

    let response = PaginatedResponse::new(
        entries,
        pagination.page,
        pagination.page_size,
        total_items,
    );

    Ok(Json(response).into_response())
}
