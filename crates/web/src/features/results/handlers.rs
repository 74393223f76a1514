use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::scoring::{EventScoringSummary, SubmitResultsRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    put,
    path = "/api/events/{slug}/results",
    params(
        ("slug" = String, Path, description = "Event slug")
    ),
    request_body = SubmitResultsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Results stored, event re-scored and participant stats rebuilt", body = EventScoringSummary),
        (status = 400, description = "Invalid result"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "results"
)]
pub async fn submit_results(
    State(db): State<Database>,
    Path(slug): Path<String>,
    Json(req): Json<SubmitResultsRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let summary = services::submit_results(db.pool(), &slug, &req.results).await?;

    Ok(Json(summary).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/events/{slug}/results/{fight_id}",
    params(
        ("slug" = String, Path, description = "Event slug"),
        ("fight_id" = Uuid, Path, description = "Fight ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Result cleared and event re-scored", body = EventScoringSummary),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event or result not found")
    ),
    tag = "results"
)]
pub async fn clear_result(
    State(db): State<Database>,
    Path((slug, fight_id)): Path<(String, Uuid)>,
) -> Result<Response, WebError> {
    let summary = services::clear_result(db.pool(), &slug, fight_id).await?;

    Ok(Json(summary).into_response())
}
