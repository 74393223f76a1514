use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::event_scoring::{load_results, store_sheet_score};
use super::scoring::score_sheet;
use super::stats_computation::recalculate_user_stats_in_tx;
use crate::dto::pick::{PickSheetResponse, SubmitPicksRequest};
use crate::error::{Result, StorageError};
use crate::models::{Pick, PickDetail};

#[derive(FromRow)]
struct EventWindow {
    is_active: bool,
    pick_deadline: DateTime<Utc>,
}

#[derive(FromRow)]
struct FightRounds {
    fight_id: Uuid,
    scheduled_rounds: i16,
}

/// Creates or replaces a user's pick sheet for an event
///
/// The whole sheet is rewritten: details missing from the request are
/// dropped and the new predictions are scored against whatever results the
/// event already has.
pub async fn submit_picks(
    pool: &PgPool,
    event_id: Uuid,
    request: &SubmitPicksRequest,
    now: DateTime<Utc>,
) -> Result<PickSheetResponse> {
    request
        .validate_unique_fights()
        .map_err(StorageError::InvalidInput)?;

    let mut tx = pool.begin().await?;

    let window = sqlx::query_as::<_, EventWindow>(
        "SELECT is_active, pick_deadline FROM events WHERE event_id = $1 FOR SHARE",
    )
    .bind(event_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(StorageError::NotFound)?;

    if !window.is_active {
        return Err(StorageError::NotFound);
    }
    if now >= window.pick_deadline {
        return Err(StorageError::ConstraintViolation(
            "Pick deadline has passed".to_string(),
        ));
    }

    sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM users WHERE user_id = $1")
        .bind(request.user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

    let fights: HashMap<Uuid, i16> = sqlx::query_as::<_, FightRounds>(
        "SELECT fight_id, scheduled_rounds FROM fights WHERE event_id = $1",
    )
    .bind(event_id)
    .fetch_all(&mut *tx)
    .await?
    .into_iter()
    .map(|f| (f.fight_id, f.scheduled_rounds))
    .collect();

    let mut predictions = Vec::with_capacity(request.picks.len());
    for input in &request.picks {
        let scheduled_rounds = fights.get(&input.fight_id).ok_or_else(|| {
            StorageError::InvalidInput(format!(
                "fight {} is not on this event's card",
                input.fight_id
            ))
        })?;

        let prediction = input.prediction().map_err(StorageError::InvalidInput)?;
        if prediction.round.is_some_and(|round| round > *scheduled_rounds) {
            return Err(StorageError::InvalidInput(format!(
                "fight {} is scheduled for {} rounds",
                input.fight_id, scheduled_rounds
            )));
        }

        predictions.push((input.fight_id, prediction));
    }

    let mut pick = sqlx::query_as::<_, Pick>(
        r#"
        INSERT INTO picks (user_id, event_id, is_submitted, submitted_at)
        VALUES ($1, $2, TRUE, $3)
        ON CONFLICT (user_id, event_id)
        DO UPDATE SET
            is_submitted = TRUE,
            submitted_at = EXCLUDED.submitted_at,
            is_scored = FALSE,
            total_points = 0,
            correct_picks = 0
        RETURNING pick_id, user_id, event_id, is_submitted, submitted_at, is_scored,
                  total_points, correct_picks, created_at
        "#,
    )
    .bind(request.user_id)
    .bind(event_id)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM pick_details WHERE pick_id = $1")
        .bind(pick.pick_id)
        .execute(&mut *tx)
        .await?;

    let mut details = Vec::with_capacity(predictions.len());
    for (fight_id, prediction) in predictions {
        let detail = sqlx::query_as::<_, PickDetail>(
            r#"
            INSERT INTO pick_details (pick_id, fight_id, predicted_winner, predicted_method,
                                      predicted_round, predicted_time)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING pick_detail_id, pick_id, fight_id, predicted_winner, predicted_method,
                      predicted_round, predicted_time, points_earned, is_correct
            "#,
        )
        .bind(pick.pick_id)
        .bind(fight_id)
        .bind(prediction.winner)
        .bind(prediction.method)
        .bind(prediction.round)
        .bind(prediction.time.map(|t| t.to_string()))
        .fetch_one(&mut *tx)
        .await?;

        details.push(detail);
    }

    let results = load_results(&mut tx, event_id).await?;
    if !results.is_empty() {
        let sheet = score_sheet(&details, &results);
        store_sheet_score(&mut tx, pick.pick_id, &sheet).await?;

        pick.total_points = sheet.total_points;
        pick.correct_picks = sheet.correct_picks;
        pick.is_scored = sheet.is_scored();
        for (detail, scored) in details.iter_mut().zip(&sheet.details) {
            detail.points_earned = scored.score.map_or(0, |s| s.points);
            detail.is_correct = scored.score.map(|s| s.is_correct);
        }
    }

    recalculate_user_stats_in_tx(&mut tx, request.user_id).await?;

    tx.commit().await?;

    tracing::info!(
        user_id = %request.user_id,
        %event_id,
        picks = details.len(),
        "Pick sheet submitted"
    );

    Ok(PickSheetResponse { pick, details })
}
