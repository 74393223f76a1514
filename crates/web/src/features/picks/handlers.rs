use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::pick::{PickSheetResponse, SubmitPicksRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/events/{slug}/picks",
    params(
        ("slug" = String, Path, description = "Event slug")
    ),
    request_body = SubmitPicksRequest,
    responses(
        (status = 200, description = "Pick sheet stored", body = PickSheetResponse),
        (status = 400, description = "Invalid pick"),
        (status = 404, description = "Event or user not found"),
        (status = 409, description = "Pick deadline has passed")
    ),
    tag = "picks"
)]
pub async fn submit_picks(
    State(db): State<Database>,
    Path(slug): Path<String>,
    Json(req): Json<SubmitPicksRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let sheet = services::submit_picks(db.pool(), &slug, &req).await?;

    Ok(Json(sheet).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{slug}/picks/{user_id}",
    params(
        ("slug" = String, Path, description = "Event slug"),
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "The user's pick sheet with scores", body = PickSheetResponse),
        (status = 404, description = "No pick sheet for this user and event")
    ),
    tag = "picks"
)]
pub async fn get_pick_sheet(
    State(db): State<Database>,
    Path((slug, user_id)): Path<(String, Uuid)>,
) -> Result<Response, WebError> {
    let sheet = services::get_pick_sheet(db.pool(), &slug, user_id).await?;

    Ok(Json(sheet).into_response())
}
