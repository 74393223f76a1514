use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifetime statistics for a user, rebuilt from scratch by the stats service
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserStats {
    pub user_id: Uuid,
    pub total_picks: i32,
    pub correct_picks: i32,
    pub total_points: i32,
    pub events_participated: i32,
    pub best_event_score: i32,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub average_accuracy: Decimal,
    pub updated_at: DateTime<Utc>,
}
