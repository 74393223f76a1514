use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::filters::push_active_event_filter;
use crate::dto::event::{CreateEventRequest, CreateFightRequest};
use crate::error::{Result, StorageError};
use crate::models::{Event, Fight, FightResult};

const EVENT_COLUMNS: &str = "e.event_id, e.name, e.slug, e.venue, e.event_date, e.pick_deadline, e.is_active, e.created_at";

/// Repository for events and their fight cards
pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active events, most recent first
    pub async fn list_active(&self) -> Result<Vec<Event>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT ");
        query.push(EVENT_COLUMNS);
        query.push(" FROM events e WHERE 1=1");
        push_active_event_filter(&mut query);
        query.push(" ORDER BY e.event_date DESC, e.created_at DESC");

        let events = query.build_query_as::<Event>().fetch_all(self.pool).await?;

        Ok(events)
    }

    /// Find an active event by slug
    pub async fn find_active_by_slug(&self, slug: &str) -> Result<Event> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT ");
        query.push(EVENT_COLUMNS);
        query.push(" FROM events e WHERE e.slug = ");
        query.push_bind(slug);
        push_active_event_filter(&mut query);

        let event = query
            .build_query_as::<Event>()
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Find an event by slug whether or not it is active
    pub async fn find_by_slug(&self, slug: &str) -> Result<Event> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT ");
        query.push(EVENT_COLUMNS);
        query.push(" FROM events e WHERE e.slug = ");
        query.push_bind(slug);

        let event = query
            .build_query_as::<Event>()
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    pub async fn create(&self, req: &CreateEventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (name, slug, venue, event_date, pick_deadline)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING event_id, name, slug, venue, event_date, pick_deadline, is_active, created_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.slug)
        .bind(&req.venue)
        .bind(req.event_date)
        .bind(req.pick_deadline)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation("Slug already exists"))?;

        Ok(event)
    }

    pub async fn list_fights(&self, event_id: Uuid) -> Result<Vec<Fight>> {
        let fights = sqlx::query_as::<_, Fight>(
            r#"
            SELECT fight_id, event_id, fighter1_name, fighter2_name, weight_class,
                   bout_order, scheduled_rounds, created_at
            FROM fights
            WHERE event_id = $1
            ORDER BY bout_order
            "#,
        )
        .bind(event_id)
        .fetch_all(self.pool)
        .await?;

        Ok(fights)
    }

    pub async fn create_fight(&self, event_id: Uuid, req: &CreateFightRequest) -> Result<Fight> {
        let fight = sqlx::query_as::<_, Fight>(
            r#"
            INSERT INTO fights (event_id, fighter1_name, fighter2_name, weight_class,
                                bout_order, scheduled_rounds)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING fight_id, event_id, fighter1_name, fighter2_name, weight_class,
                      bout_order, scheduled_rounds, created_at
            "#,
        )
        .bind(event_id)
        .bind(&req.fighter1_name)
        .bind(&req.fighter2_name)
        .bind(&req.weight_class)
        .bind(req.bout_order)
        .bind(req.scheduled_rounds)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e).on_unique_violation("Bout order already used on this card")
        })?;

        Ok(fight)
    }

    pub async fn list_results(&self, event_id: Uuid) -> Result<Vec<FightResult>> {
        results_for_event(self.pool, event_id).await
    }
}

/// Results of every fight on an event, on a pool or inside a transaction
pub async fn results_for_event<'e, E>(executor: E, event_id: Uuid) -> Result<Vec<FightResult>>
where
    E: Executor<'e, Database = Postgres>,
{
    let results = sqlx::query_as::<_, FightResult>(
        r#"
        SELECT fr.fight_id, fr.winner, fr.method, fr.round, fr.time, fr.entered_at
        FROM fight_results fr
        INNER JOIN fights f ON f.fight_id = fr.fight_id
        WHERE f.event_id = $1
        "#,
    )
    .bind(event_id)
    .fetch_all(executor)
    .await?;

    Ok(results)
}
