use sqlx::PgPool;
use storage::{
    dto::scoring::{EventScoringSummary, FightResultInput},
    error::Result,
    repository::event::EventRepository,
    services::event_scoring,
};
use uuid::Uuid;

/// Enter or correct results, re-scoring the event
pub async fn submit_results(
    pool: &PgPool,
    slug: &str,
    results: &[FightResultInput],
) -> Result<EventScoringSummary> {
    let event = EventRepository::new(pool).find_by_slug(slug).await?;
    event_scoring::submit_results(pool, event.event_id, results).await
}

/// Clear the result of one fight, re-scoring the event
pub async fn clear_result(pool: &PgPool, slug: &str, fight_id: Uuid) -> Result<EventScoringSummary> {
    let event = EventRepository::new(pool).find_by_slug(slug).await?;
    event_scoring::clear_result(pool, event.event_id, fight_id).await
}
