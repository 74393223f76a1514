use sqlx::PgPool;
use storage::{
    dto::{pick::UserPickSummary, user::CreateUserRequest},
    error::Result,
    models::{User, UserStats},
    repository::{pick::PickRepository, stats::StatsRepository, user::UserRepository},
    services::stats_computation,
};
use uuid::Uuid;

/// Register a new user
pub async fn create_user(pool: &PgPool, request: &CreateUserRequest) -> Result<User> {
    let repo = UserRepository::new(pool);
    repo.create(request).await
}

/// Get user by ID
pub async fn get_user(pool: &PgPool, user_id: Uuid) -> Result<User> {
    let repo = UserRepository::new(pool);
    repo.find_by_id(user_id).await
}

/// Get a user's statistics, building them on first access
pub async fn get_user_stats(pool: &PgPool, user_id: Uuid) -> Result<UserStats> {
    let repo = StatsRepository::new(pool);

    match repo.find_by_user(user_id).await? {
        Some(stats) => Ok(stats),
        None => stats_computation::recalculate_user_stats(pool, user_id).await,
    }
}

/// List a user's picks on active events
pub async fn list_user_picks(pool: &PgPool, user_id: Uuid) -> Result<Vec<UserPickSummary>> {
    UserRepository::new(pool).find_by_id(user_id).await?;

    let repo = PickRepository::new(pool);
    repo.list_for_user(user_id).await
}
