use sqlx::PgPool;
use storage::{
    dto::{
        common::PaginationParams,
        leaderboard::{EventLeaderboardEntry, LeaderboardEntry},
    },
    error::Result,
    repository::{event::EventRepository, leaderboard::LeaderboardRepository},
};

/// Get the global leaderboard
pub async fn get_global_leaderboard(
    pool: &PgPool,
    pagination: &PaginationParams,
) -> Result<(Vec<LeaderboardEntry>, i64)> {
    let repo = LeaderboardRepository::new(pool);
    repo.global(pagination).await
}

/// Get the leaderboard of a single active event
pub async fn get_event_leaderboard(
    pool: &PgPool,
    slug: &str,
    pagination: &PaginationParams,
) -> Result<(Vec<EventLeaderboardEntry>, i64)> {
    let event = EventRepository::new(pool).find_active_by_slug(slug).await?;

    let repo = LeaderboardRepository::new(pool);
    repo.for_event(event.event_id, pagination).await
}
