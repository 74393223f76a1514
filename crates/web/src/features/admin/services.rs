use sqlx::PgPool;
use storage::{
    dto::scoring::{EventScoringSummary, RecalculationSummary},
    error::Result,
    models::UserStats,
    repository::event::EventRepository,
    services::{event_scoring, stats_computation},
};
use uuid::Uuid;

/// Recalculate statistics for every user
pub async fn recalculate_all_stats(pool: &PgPool) -> Result<RecalculationSummary> {
    stats_computation::recalculate_all_user_stats(pool).await
}

/// Recalculate statistics for one user
pub async fn recalculate_user_stats(pool: &PgPool, user_id: Uuid) -> Result<UserStats> {
    stats_computation::recalculate_user_stats(pool, user_id).await
}

/// Re-score an event against its stored results
pub async fn rescore_event(pool: &PgPool, slug: &str) -> Result<EventScoringSummary> {
    let event = EventRepository::new(pool).find_by_slug(slug).await?;
    event_scoring::rescore_event(pool, event.event_id).await
}
