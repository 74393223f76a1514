use chrono::Utc;
use sqlx::PgPool;
use storage::{
    dto::pick::{PickSheetResponse, SubmitPicksRequest},
    error::Result,
    repository::{event::EventRepository, pick::PickRepository},
    services::pick_submission,
};
use uuid::Uuid;

/// Submit or replace a pick sheet for an active event
pub async fn submit_picks(
    pool: &PgPool,
    slug: &str,
    request: &SubmitPicksRequest,
) -> Result<PickSheetResponse> {
    let event = EventRepository::new(pool).find_active_by_slug(slug).await?;
    pick_submission::submit_picks(pool, event.event_id, request, Utc::now()).await
}

/// Get one user's pick sheet for an active event
pub async fn get_pick_sheet(pool: &PgPool, slug: &str, user_id: Uuid) -> Result<PickSheetResponse> {
    let event = EventRepository::new(pool).find_active_by_slug(slug).await?;
    PickRepository::new(pool)
        .find_sheet(user_id, event.event_id)
        .await
}
