use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub user_id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub total_points: i32,
    pub correct_picks: i32,
    pub total_picks: i32,
    pub events_participated: i32,
    pub average_accuracy: Decimal,
    pub current_streak: i32,
    pub longest_streak: i32,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EventLeaderboardEntry {
    pub rank: i64,
    pub user_id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub total_points: i32,
    pub correct_picks: i32,
}
