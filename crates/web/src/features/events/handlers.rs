use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        event::{CreateEventRequest, CreateFightRequest, EventDetailResponse},
        scoring::EventActivationResponse,
    },
    models::{Event, Fight},
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "Active events, most recent first", body = Vec<Event>)
    ),
    tag = "events"
)]
pub async fn list_events(State(db): State<Database>) -> Result<Response, WebError> {
    let events = services::list_events(db.pool()).await?;

    Ok(Json(events).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/{slug}",
    params(
        ("slug" = String, Path, description = "Event slug")
    ),
    responses(
        (status = 200, description = "Event with its fight card and results", body = EventDetailResponse),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn get_event(
    State(db): State<Database>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let event = services::get_event_detailed(db.pool(), &slug).await?;

    Ok(Json(event).into_response())
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Slug already exists")
    ),
    tag = "events"
)]
pub async fn create_event(
    State(db): State<Database>,
    Json(req): Json<CreateEventRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_deadline()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let event = services::create_event(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(event)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/events/{slug}/fights",
    params(
        ("slug" = String, Path, description = "Event slug")
    ),
    request_body = CreateFightRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Fight added to the card", body = Fight),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found"),
        (status = 409, description = "Bout order already used")
    ),
    tag = "events"
)]
pub async fn add_fight(
    State(db): State<Database>,
    Path(slug): Path<String>,
    Json(req): Json<CreateFightRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_rounds()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let fight = services::add_fight(db.pool(), &slug, &req).await?;

    Ok((StatusCode::CREATED, Json(fight)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/events/{slug}",
    params(
        ("slug" = String, Path, description = "Event slug")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Event deactivated and participant stats rebuilt", body = EventActivationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn deactivate_event(
    State(db): State<Database>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let response = services::set_event_active(db.pool(), &slug, false).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/events/{slug}/restore",
    params(
        ("slug" = String, Path, description = "Event slug")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Event restored and participant stats rebuilt", body = EventActivationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn restore_event(
    State(db): State<Database>,
    Path(slug): Path<String>,
) -> Result<Response, WebError> {
    let response = services::set_event_active(db.pool(), &slug, true).await?;

    Ok(Json(response).into_response())
}
