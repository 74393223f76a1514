use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::filters::push_active_event_filter;
use crate::dto::common::PaginationParams;
use crate::dto::leaderboard::{EventLeaderboardEntry, LeaderboardEntry};
use crate::error::Result;

pub struct LeaderboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeaderboardRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Global standings from the recomputed user statistics
    ///
    /// Ties on points share a rank; correct picks then username order the rows.
    pub async fn global(
        &self,
        pagination: &PaginationParams,
    ) -> Result<(Vec<LeaderboardEntry>, i64)> {
        let total_items =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_stats WHERE total_picks > 0")
                .fetch_one(self.pool)
                .await?;

        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT RANK() OVER (ORDER BY s.total_points DESC) AS rank,
                   u.user_id, u.username, u.display_name,
                   s.total_points, s.correct_picks, s.total_picks, s.events_participated,
                   s.average_accuracy, s.current_streak, s.longest_streak
            FROM user_stats s
            INNER JOIN users u ON u.user_id = s.user_id
            WHERE s.total_picks > 0
            ORDER BY s.total_points DESC, s.correct_picks DESC, u.username
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(self.pool)
        .await?;

        Ok((entries, total_items))
    }

    /// Standings for a single active event, built from its scored picks
    pub async fn for_event(
        &self,
        event_id: Uuid,
        pagination: &PaginationParams,
    ) -> Result<(Vec<EventLeaderboardEntry>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new(
            r#"
            SELECT COUNT(*)
            FROM picks p
            INNER JOIN events e ON e.event_id = p.event_id
            WHERE p.is_submitted = TRUE AND p.is_scored = TRUE AND p.event_id =
            "#,
        );
        count.push_bind(event_id);
        push_active_event_filter(&mut count);

        let total_items = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT RANK() OVER (ORDER BY p.total_points DESC) AS rank,
                   u.user_id, u.username, u.display_name, p.total_points, p.correct_picks
            FROM picks p
            INNER JOIN events e ON e.event_id = p.event_id
            INNER JOIN users u ON u.user_id = p.user_id
            WHERE p.is_submitted = TRUE AND p.is_scored = TRUE AND p.event_id =
            "#,
        );
        query.push_bind(event_id);
        push_active_event_filter(&mut query);
        query.push(" ORDER BY p.total_points DESC, p.correct_picks DESC, u.username LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let entries = query
            .build_query_as::<EventLeaderboardEntry>()
            .fetch_all(self.pool)
            .await?;

        Ok((entries, total_items))
    }
}
