use std::collections::HashMap;

use sqlx::PgPool;
use storage::{
    dto::{
        event::{CreateEventRequest, CreateFightRequest, EventDetailResponse, FightCard},
        scoring::EventActivationResponse,
    },
    error::Result,
    models::{Event, Fight},
    repository::event::EventRepository,
    services::event_scoring,
};

/// List active events
pub async fn list_events(pool: &PgPool) -> Result<Vec<Event>> {
    let repo = EventRepository::new(pool);
    repo.list_active().await
}

/// Get an active event with its fight card and any results
pub async fn get_event_detailed(pool: &PgPool, slug: &str) -> Result<EventDetailResponse> {
    let repo = EventRepository::new(pool);
    let event = repo.find_active_by_slug(slug).await?;

    let fights = repo.list_fights(event.event_id).await?;
    let mut results: HashMap<_, _> = repo
        .list_results(event.event_id)
        .await?
        .into_iter()
        .map(|r| (r.fight_id, r))
        .collect();

    let fights = fights
        .into_iter()
        .map(|fight| FightCard {
            result: results.remove(&fight.fight_id),
            fight,
        })
        .collect();

    Ok(EventDetailResponse { event, fights })
}

/// Create a new event
pub async fn create_event(pool: &PgPool, request: &CreateEventRequest) -> Result<Event> {
    let repo = EventRepository::new(pool);
    repo.create(request).await
}

/// Add a fight to an event's card
pub async fn add_fight(pool: &PgPool, slug: &str, request: &CreateFightRequest) -> Result<Fight> {
    let repo = EventRepository::new(pool);
    let event = repo.find_by_slug(slug).await?;
    repo.create_fight(event.event_id, request).await
}

/// Soft-delete or restore an event
pub async fn set_event_active(
    pool: &PgPool,
    slug: &str,
    is_active: bool,
) -> Result<EventActivationResponse> {
    let repo = EventRepository::new(pool);
    let event = repo.find_by_slug(slug).await?;
    event_scoring::set_event_active(pool, event.event_id, is_active).await
}
