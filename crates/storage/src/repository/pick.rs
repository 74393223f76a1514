use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::filters::push_active_event_filter;
use crate::dto::pick::{PickSheetResponse, UserPickSummary};
use crate::error::{Result, StorageError};
use crate::models::{Pick, PickDetail};

#[derive(FromRow)]
struct UserPickRow {
    pick_id: Uuid,
    event_id: Uuid,
    event_name: String,
    event_slug: String,
    event_date: NaiveDate,
    submitted_at: Option<DateTime<Utc>>,
    is_scored: bool,
    total_points: i32,
    correct_picks: i32,
}

pub struct PickRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PickRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// A user's submitted picks on active events, newest event first
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<UserPickSummary>> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT p.pick_id, p.event_id, e.name AS event_name, e.slug AS event_slug,
                   e.event_date, p.submitted_at, p.is_scored, p.total_points, p.correct_picks
            FROM picks p
            INNER JOIN events e ON e.event_id = p.event_id
            WHERE p.is_submitted = TRUE AND p.user_id =
            "#,
        );
        query.push_bind(user_id);
        push_active_event_filter(&mut query);
        query.push(" ORDER BY e.event_date DESC, e.created_at DESC");

        let rows: Vec<UserPickRow> = query.build_query_as().fetch_all(self.pool).await?;

        let pick_ids: Vec<Uuid> = rows.iter().map(|row| row.pick_id).collect();
        let mut details = self.details_by_pick(&pick_ids).await?;

        let summaries = rows
            .into_iter()
            .map(|row| UserPickSummary {
                details: details.remove(&row.pick_id).unwrap_or_default(),
                pick_id: row.pick_id,
                event_id: row.event_id,
                event_name: row.event_name,
                event_slug: row.event_slug,
                event_date: row.event_date,
                submitted_at: row.submitted_at,
                is_scored: row.is_scored,
                total_points: row.total_points,
                correct_picks: row.correct_picks,
            })
            .collect();

        Ok(summaries)
    }

    pub async fn find_sheet(&self, user_id: Uuid, event_id: Uuid) -> Result<PickSheetResponse> {
        let pick = sqlx::query_as::<_, Pick>(
            r#"
            SELECT pick_id, user_id, event_id, is_submitted, submitted_at, is_scored,
                   total_points, correct_picks, created_at
            FROM picks
            WHERE user_id = $1 AND event_id = $2
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        let details = self
            .details_by_pick(&[pick.pick_id])
            .await?
            .remove(&pick.pick_id)
            .unwrap_or_default();

        Ok(PickSheetResponse { pick, details })
    }

    async fn details_by_pick(&self, pick_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<PickDetail>>> {
        if pick_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let details = sqlx::query_as::<_, PickDetail>(
            r#"
            SELECT pd.pick_detail_id, pd.pick_id, pd.fight_id, pd.predicted_winner,
                   pd.predicted_method, pd.predicted_round, pd.predicted_time,
                   pd.points_earned, pd.is_correct
            FROM pick_details pd
            INNER JOIN fights f ON f.fight_id = pd.fight_id
            WHERE pd.pick_id = ANY($1)
            ORDER BY f.bout_order
            "#,
        )
        .bind(pick_ids)
        .fetch_all(self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<PickDetail>> = HashMap::new();
        for detail in details {
            grouped.entry(detail.pick_id).or_default().push(detail);
        }

        Ok(grouped)
    }
}
