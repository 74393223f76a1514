//! Re-scoring of an event whenever its results change
//!
//! Entering, correcting or clearing a result re-scores every submitted pick
//! on the event against the full current result set, then rebuilds the
//! statistics of every user holding one of those picks. All of it commits as
//! a single transaction with the event row locked.

use std::collections::{BTreeSet, HashMap};

use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::scoring::{SheetScore, score_sheet};
use super::stats_computation::recalculate_user_stats_in_tx;
use crate::dto::scoring::{EventActivationResponse, EventScoringSummary, FightResultInput};
use crate::error::{Result, StorageError};
use crate::models::{FightResult, PickDetail};
use crate::repository::event::results_for_event;

#[derive(FromRow)]
struct SubmittedPick {
    pick_id: Uuid,
    user_id: Uuid,
}

#[derive(FromRow)]
struct FightRounds {
    fight_id: Uuid,
    scheduled_rounds: i16,
}

/// Stores results for an event and re-scores it
pub async fn submit_results(
    pool: &PgPool,
    event_id: Uuid,
    inputs: &[FightResultInput],
) -> Result<EventScoringSummary> {
    let mut tx = pool.begin().await?;
    lock_event(&mut tx, event_id).await?;

    let fights: HashMap<Uuid, i16> = sqlx::query_as::<_, FightRounds>(
        "SELECT fight_id, scheduled_rounds FROM fights WHERE event_id = $1",
    )
    .bind(event_id)
    .fetch_all(&mut *tx)
    .await?
    .into_iter()
    .map(|f| (f.fight_id, f.scheduled_rounds))
    .collect();

    for input in inputs {
        let scheduled_rounds = fights.get(&input.fight_id).ok_or_else(|| {
            StorageError::InvalidInput(format!(
                "fight {} is not on this event's card",
                input.fight_id
            ))
        })?;

        let outcome = input.outcome().map_err(StorageError::InvalidInput)?;
        if outcome.round.is_some_and(|round| round > *scheduled_rounds) {
            return Err(StorageError::InvalidInput(format!(
                "fight {} is scheduled for {} rounds",
                input.fight_id, scheduled_rounds
            )));
        }

        sqlx::query(
            r#"
            INSERT INTO fight_results (fight_id, winner, method, round, time)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (fight_id)
            DO UPDATE SET
                winner = EXCLUDED.winner,
                method = EXCLUDED.method,
                round = EXCLUDED.round,
                time = EXCLUDED.time,
                entered_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(input.fight_id)
        .bind(outcome.winner)
        .bind(outcome.method)
        .bind(outcome.round)
        .bind(outcome.time.map(|t| t.to_string()))
        .execute(&mut *tx)
        .await?;
    }

    let summary = rescore_event_in_tx(&mut tx, event_id).await?;
    tx.commit().await?;

    tracing::info!(
        %event_id,
        results = inputs.len(),
        picks = summary.picks_rescored,
        users = summary.users_recalculated,
        "Results entered and event re-scored"
    );

    Ok(summary)
}

/// Removes the result of one fight and re-scores the event
pub async fn clear_result(
    pool: &PgPool,
    event_id: Uuid,
    fight_id: Uuid,
) -> Result<EventScoringSummary> {
    let mut tx = pool.begin().await?;
    lock_event(&mut tx, event_id).await?;

    let deleted = sqlx::query(
        r#"
        DELETE FROM fight_results fr
        USING fights f
        WHERE fr.fight_id = f.fight_id AND f.event_id = $1 AND fr.fight_id = $2
        "#,
    )
    .bind(event_id)
    .bind(fight_id)
    .execute(&mut *tx)
    .await?;

    if deleted.rows_affected() == 0 {
        return Err(StorageError::NotFound);
    }

    let summary = rescore_event_in_tx(&mut tx, event_id).await?;
    tx.commit().await?;

    tracing::info!(%event_id, %fight_id, "Result cleared and event re-scored");

    Ok(summary)
}

/// Re-scores an event against the results already stored
pub async fn rescore_event(pool: &PgPool, event_id: Uuid) -> Result<EventScoringSummary> {
    let mut tx = pool.begin().await?;
    lock_event(&mut tx, event_id).await?;

    let summary = rescore_event_in_tx(&mut tx, event_id).await?;
    tx.commit().await?;

    tracing::info!(
        %event_id,
        picks = summary.picks_rescored,
        pending = summary.details_pending,
        "Event re-scored"
    );

    Ok(summary)
}

/// Soft-deletes or restores an event
///
/// Flipping the flag moves the event's picks in or out of every aggregate, so
/// the statistics of its participants are rebuilt in the same transaction.
pub async fn set_event_active(
    pool: &PgPool,
    event_id: Uuid,
    is_active: bool,
) -> Result<EventActivationResponse> {
    let mut tx = pool.begin().await?;
    lock_event(&mut tx, event_id).await?;

    sqlx::query("UPDATE events SET is_active = $2 WHERE event_id = $1")
        .bind(event_id)
        .bind(is_active)
        .execute(&mut *tx)
        .await?;

    let user_ids = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT user_id
        FROM picks
        WHERE event_id = $1 AND is_submitted = TRUE
        ORDER BY user_id
        "#,
    )
    .bind(event_id)
    .fetch_all(&mut *tx)
    .await?;

    for user_id in &user_ids {
        recalculate_user_stats_in_tx(&mut tx, *user_id).await?;
    }

    tx.commit().await?;

    tracing::info!(%event_id, is_active, users = user_ids.len(), "Event activation changed");

    Ok(EventActivationResponse {
        event_id,
        is_active,
        users_recalculated: user_ids.len() as u32,
    })
}

async fn lock_event(tx: &mut Transaction<'_, Postgres>, event_id: Uuid) -> Result<()> {
    sqlx::query_scalar::<_, Uuid>("SELECT event_id FROM events WHERE event_id = $1 FOR UPDATE")
        .bind(event_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(StorageError::NotFound)?;

    Ok(())
}

/// Current results of every fight on the event, keyed by fight
pub(super) async fn load_results(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
) -> Result<HashMap<Uuid, FightResult>> {
    let results = results_for_event(&mut **tx, event_id)
        .await?
        .into_iter()
        .map(|r| (r.fight_id, r))
        .collect();

    Ok(results)
}

/// Overwrites the stored score of a pick and all of its details
pub(super) async fn store_sheet_score(
    tx: &mut Transaction<'_, Postgres>,
    pick_id: Uuid,
    sheet: &SheetScore,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE picks
        SET total_points = $2, correct_picks = $3, is_scored = $4
        WHERE pick_id = $1
        "#,
    )
    .bind(pick_id)
    .bind(sheet.total_points)
    .bind(sheet.correct_picks)
    .bind(sheet.is_scored())
    .execute(&mut **tx)
    .await?;

    if sheet.details.is_empty() {
        return Ok(());
    }

    let detail_ids: Vec<Uuid> = sheet.details.iter().map(|d| d.pick_detail_id).collect();
    let points: Vec<i32> = sheet
        .details
        .iter()
        .map(|d| d.score.map_or(0, |s| s.points))
        .collect();
    let correct: Vec<Option<bool>> = sheet
        .details
        .iter()
        .map(|d| d.score.map(|s| s.is_correct))
        .collect();

    sqlx::query(
        r#"
        UPDATE pick_details pd
        SET points_earned = v.points_earned, is_correct = v.is_correct
        FROM UNNEST($1::uuid[], $2::int[], $3::bool[]) AS v(pick_detail_id, points_earned, is_correct)
        WHERE pd.pick_detail_id = v.pick_detail_id
        "#,
    )
    .bind(&detail_ids)
    .bind(&points)
    .bind(&correct)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Scores every submitted pick on the event from scratch and rebuilds the
/// statistics of their owners. The caller must hold the event lock.
async fn rescore_event_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
) -> Result<EventScoringSummary> {
    let results = load_results(tx, event_id).await?;

    let picks = sqlx::query_as::<_, SubmittedPick>(
        r#"
        SELECT pick_id, user_id
        FROM picks
        WHERE event_id = $1 AND is_submitted = TRUE
        "#,
    )
    .bind(event_id)
    .fetch_all(&mut **tx)
    .await?;

    let mut details_by_pick: HashMap<Uuid, Vec<PickDetail>> = HashMap::new();
    let details = sqlx::query_as::<_, PickDetail>(
        r#"
        SELECT pd.pick_detail_id, pd.pick_id, pd.fight_id, pd.predicted_winner,
               pd.predicted_method, pd.predicted_round, pd.predicted_time,
               pd.points_earned, pd.is_correct
        FROM pick_details pd
        INNER JOIN picks p ON p.pick_id = pd.pick_id
        WHERE p.event_id = $1 AND p.is_submitted = TRUE
        "#,
    )
    .bind(event_id)
    .fetch_all(&mut **tx)
    .await?;
    for detail in details {
        details_by_pick.entry(detail.pick_id).or_default().push(detail);
    }

    let mut summary = EventScoringSummary {
        event_id,
        ..Default::default()
    };
    let mut users = BTreeSet::new();

    for pick in &picks {
        let details = details_by_pick.remove(&pick.pick_id).unwrap_or_default();
        let sheet = score_sheet(&details, &results);
        store_sheet_score(tx, pick.pick_id, &sheet).await?;

        summary.picks_rescored += 1;
        summary.details_scored += sheet.scored_details as u32;
        summary.details_pending += sheet.pending_details as u32;
        users.insert(pick.user_id);
    }

    for user_id in &users {
        recalculate_user_stats_in_tx(tx, *user_id).await?;
    }
    summary.users_recalculated = users.len() as u32;

    Ok(summary)
}
