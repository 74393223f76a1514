//! Lifetime user statistics, always rebuilt from the user's scored picks
//!
//! Nothing here adds to a stored value. Every recalculation reads the
//! qualifying picks and replaces the stats row as a whole, so running it any
//! number of times over the same picks yields the same row.

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use crate::dto::scoring::RecalculationSummary;
use crate::error::{Result, StorageError};
use crate::models::UserStats;
use crate::repository::filters::push_active_event_filter;
use crate::repository::user::UserRepository;

/// Per-event totals for one of the user's scored picks
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EventTally {
    pub event_id: Uuid,
    pub total_points: i32,
    pub correct_picks: i32,
    pub scored_picks: i32,
}

impl EventTally {
    /// An event extends a streak at 50% accuracy or any points earned
    pub fn is_win(&self) -> bool {
        let half_right = self.scored_picks > 0 && self.correct_picks * 2 >= self.scored_picks;
        half_right || self.total_points > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub total_picks: i32,
    pub correct_picks: i32,
    pub total_points: i32,
    pub events_participated: i32,
    pub best_event_score: i32,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub average_accuracy: Decimal,
}

impl StatsSnapshot {
    /// Folds tallies given in event order into lifetime statistics
    pub fn from_tallies(tallies: &[EventTally]) -> Self {
        let mut snapshot = Self::default();
        let mut streak = 0;

        for tally in tallies {
            snapshot.total_picks += tally.scored_picks;
            snapshot.correct_picks += tally.correct_picks;
            snapshot.total_points += tally.total_points;
            snapshot.events_participated += 1;
            snapshot.best_event_score = snapshot.best_event_score.max(tally.total_points);

            streak = if tally.is_win() { streak + 1 } else { 0 };
            snapshot.longest_streak = snapshot.longest_streak.max(streak);
        }

        snapshot.current_streak = streak;
        snapshot.average_accuracy = accuracy(snapshot.correct_picks, snapshot.total_picks);

        snapshot
    }
}

/// Percentage of correct picks, two decimal places
fn accuracy(correct: i32, total: i32) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }

    (Decimal::from(correct) * Decimal::from(100) / Decimal::from(total)).round_dp(2)
}

/// Recalculates one user's statistics in its own transaction
pub async fn recalculate_user_stats(pool: &PgPool, user_id: Uuid) -> Result<UserStats> {
    let mut tx = pool.begin().await?;
    let stats = recalculate_user_stats_in_tx(&mut tx, user_id).await?;
    tx.commit().await?;

    Ok(stats)
}

/// Recalculates one user's statistics as part of a wider unit of work
///
/// The user row is locked so concurrent recalculations for the same user
/// apply one after the other.
pub async fn recalculate_user_stats_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
) -> Result<UserStats> {
    sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM users WHERE user_id = $1 FOR UPDATE")
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(StorageError::NotFound)?;

    let tallies = load_event_tallies(tx, user_id).await?;
    let snapshot = StatsSnapshot::from_tallies(&tallies);

    replace_user_stats(tx, user_id, &snapshot).await
}

/// Recalculates every user, carrying on past individual failures
pub async fn recalculate_all_user_stats(pool: &PgPool) -> Result<RecalculationSummary> {
    let user_ids = UserRepository::new(pool).list_ids().await?;
    let mut summary = RecalculationSummary::default();

    for user_id in user_ids {
        match recalculate_user_stats(pool, user_id).await {
            Ok(_) => summary.record_success(),
            Err(e) => {
                tracing::warn!(%user_id, error = %e, "Failed to recalculate user stats");
                summary.record_failure(user_id, e);
            }
        }
    }

    tracing::info!(
        processed = summary.processed,
        succeeded = summary.succeeded,
        failed = summary.failed.len(),
        "User stats recalculation finished"
    );

    Ok(summary)
}

/// Scored, submitted picks on active events in chronological event order
fn event_tally_query(user_id: Uuid) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::<Postgres>::new(
        r#"
        SELECT p.event_id,
               COALESCE(SUM(pd.points_earned) FILTER (WHERE pd.is_correct IS NOT NULL), 0)::INT AS total_points,
               (COUNT(pd.pick_detail_id) FILTER (WHERE pd.is_correct))::INT AS correct_picks,
               (COUNT(pd.pick_detail_id) FILTER (WHERE pd.is_correct IS NOT NULL))::INT AS scored_picks
        FROM picks p
        INNER JOIN events e ON e.event_id = p.event_id
        LEFT JOIN pick_details pd ON pd.pick_id = p.pick_id
        WHERE p.is_submitted = TRUE AND p.is_scored = TRUE AND p.user_id =
        "#,
    );
    query.push_bind(user_id);
    push_active_event_filter(&mut query);
    query.push(
        r#"
        GROUP BY p.pick_id, p.event_id, e.event_date, e.created_at
        ORDER BY e.event_date, e.created_at, p.event_id
        "#,
    );

    query
}

async fn load_event_tallies(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
) -> Result<Vec<EventTally>> {
    let tallies = event_tally_query(user_id)
        .build_query_as::<EventTally>()
        .fetch_all(&mut **tx)
        .await?;

    Ok(tallies)
}

async fn replace_user_stats(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    snapshot: &StatsSnapshot,
) -> Result<UserStats> {
    let stats = sqlx::query_as::<_, UserStats>(
        r#"
        INSERT INTO user_stats (
            user_id, total_picks, correct_picks, total_points, events_participated,
            best_event_score, current_streak, longest_streak, average_accuracy, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, CURRENT_TIMESTAMP)
        ON CONFLICT (user_id)
        DO UPDATE SET
            total_picks = EXCLUDED.total_picks,
            correct_picks = EXCLUDED.correct_picks,
            total_points = EXCLUDED.total_points,
            events_participated = EXCLUDED.events_participated,
            best_event_score = EXCLUDED.best_event_score,
            current_streak = EXCLUDED.current_streak,
            longest_streak = EXCLUDED.longest_streak,
            average_accuracy = EXCLUDED.average_accuracy,
            updated_at = EXCLUDED.updated_at
        RETURNING user_id, total_picks, correct_picks, total_points, events_participated,
                  best_event_score, current_streak, longest_streak, average_accuracy, updated_at
        "#,
    )
    .bind(user_id)
    .bind(snapshot.total_picks)
    .bind(snapshot.correct_picks)
    .bind(snapshot.total_points)
    .bind(snapshot.events_participated)
    .bind(snapshot.best_event_score)
    .bind(snapshot.current_streak)
    .bind(snapshot.longest_streak)
    .bind(snapshot.average_accuracy)
    .fetch_one(&mut **tx)
    .await?;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(total_points: i32, correct_picks: i32, scored_picks: i32) -> EventTally {
        EventTally {
            event_id: Uuid::new_v4(),
            total_points,
            correct_picks,
            scored_picks,
        }
    }

    #[test]
    fn test_empty_history_is_all_zero() {
        assert_eq!(StatsSnapshot::from_tallies(&[]), StatsSnapshot::default());
    }

    #[test]
    fn test_two_events_sum_and_best_score() {
        let snapshot = StatsSnapshot::from_tallies(&[tally(10, 3, 5), tally(6, 2, 5)]);

        assert_eq!(snapshot.total_points, 16);
        assert_eq!(snapshot.events_participated, 2);
        assert_eq!(snapshot.best_event_score, 10);
        assert_eq!(snapshot.total_picks, 10);
        assert_eq!(snapshot.correct_picks, 5);
        assert_eq!(snapshot.average_accuracy, Decimal::from(50));
    }

    #[test]
    fn test_accuracy_rounds_to_two_places() {
        let snapshot = StatsSnapshot::from_tallies(&[tally(3, 1, 3)]);
        assert_eq!(snapshot.average_accuracy, Decimal::new(3333, 2));

        let snapshot = StatsSnapshot::from_tallies(&[tally(9, 2, 3)]);
        assert_eq!(snapshot.average_accuracy, Decimal::new(6667, 2));
    }

    #[test]
    fn test_streak_resets_on_a_shutout() {
        let snapshot = StatsSnapshot::from_tallies(&[
            tally(4, 1, 4),
            tally(12, 3, 4),
            tally(0, 0, 4),
            tally(7, 2, 5),
            tally(3, 1, 6),
        ]);

        assert_eq!(snapshot.longest_streak, 2);
        assert_eq!(snapshot.current_streak, 2);
    }

    #[test]
    fn test_longest_streak_outlives_current() {
        let snapshot = StatsSnapshot::from_tallies(&[
            tally(5, 2, 3),
            tally(6, 2, 3),
            tally(4, 1, 3),
            tally(0, 0, 3),
        ]);

        assert_eq!(snapshot.longest_streak, 3);
        assert_eq!(snapshot.current_streak, 0);
    }

    #[test]
    fn test_win_rule() {
        assert!(tally(0, 2, 4).is_win());
        assert!(tally(3, 1, 5).is_win());
        assert!(!tally(0, 0, 5).is_win());
        assert!(!tally(0, 0, 0).is_win());
    }

    #[test]
    fn test_recalculation_is_idempotent() {
        let tallies = vec![tally(10, 3, 5), tally(0, 0, 4), tally(6, 2, 5)];
        let first = StatsSnapshot::from_tallies(&tallies);
        let second = StatsSnapshot::from_tallies(&tallies);
        assert_eq!(first, second);
    }

    #[test]
    fn test_tally_query_only_reads_scored_picks_on_active_events() {
        let query = event_tally_query(Uuid::nil());
        let sql = query.sql();

        assert!(sql.contains("p.is_submitted = TRUE AND p.is_scored = TRUE"));
        assert!(sql.contains(crate::repository::filters::ACTIVE_EVENT));
        assert!(sql.contains("ORDER BY e.event_date, e.created_at, p.event_id"));
    }

    #[test]
    fn test_deactivated_event_drops_out_of_stats() {
        let best = tally(15, 4, 5);
        let shutout = tally(0, 0, 4);
        let regular = [tally(6, 2, 5), tally(4, 1, 5)];

        let all_active =
            StatsSnapshot::from_tallies(&[regular[0].clone(), best, shutout, regular[1].clone()]);
        assert_eq!(all_active.total_points, 25);
        assert_eq!(all_active.events_participated, 4);
        assert_eq!(all_active.best_event_score, 15);
        assert_eq!(all_active.longest_streak, 2);
        assert_eq!(all_active.current_streak, 1);

        // the top event and the shutout were soft-deleted, so their tallies never load
        let after_deactivation = StatsSnapshot::from_tallies(&regular);
        assert_eq!(after_deactivation.total_points, 10);
        assert_eq!(after_deactivation.events_participated, 2);
        assert_eq!(after_deactivation.best_event_score, 6);
        assert_eq!(after_deactivation.total_picks, 10);
        assert_eq!(after_deactivation.correct_picks, 3);
        assert_eq!(after_deactivation.longest_streak, 2);
        assert_eq!(after_deactivation.current_streak, 2);
    }
}
