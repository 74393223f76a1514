use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Corner, FinishMethod, Outcome};

/// A user's pick sheet for one event
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Pick {
    pub pick_id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub is_submitted: bool,
    pub submitted_at: Option<DateTime<Utc>>,
    pub is_scored: bool,
    pub total_points: i32,
    pub correct_picks: i32,
    pub created_at: DateTime<Utc>,
}

/// One prediction on one fight. `is_correct` stays `None` until the fight
/// has a result to be scored against.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PickDetail {
    pub pick_detail_id: Uuid,
    pub pick_id: Uuid,
    pub fight_id: Uuid,
    pub predicted_winner: Corner,
    pub predicted_method: FinishMethod,
    pub predicted_round: Option<i16>,
    pub predicted_time: Option<String>,
    pub points_earned: i32,
    pub is_correct: Option<bool>,
}

impl PickDetail {
    pub fn prediction(&self) -> Outcome {
        Outcome {
            winner: self.predicted_winner,
            method: self.predicted_method,
            round: self.predicted_round,
            time: self.predicted_time.as_deref().and_then(|t| t.parse().ok()),
        }
    }
}
