use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::UserStats;

pub struct StatsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StatsRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<UserStats>> {
        let stats = sqlx::query_as::<_, UserStats>(
            r#"
            SELECT user_id, total_picks, correct_picks, total_points, events_participated,
                   best_event_score, current_streak, longest_streak, average_accuracy, updated_at
            FROM user_stats
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(stats)
    }
}
