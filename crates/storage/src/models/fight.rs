use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::FightTime;

/// Which side of the bout a winner refers to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "fight_corner", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    Fighter1,
    Fighter2,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "finish_method", rename_all = "snake_case")]
pub enum FinishMethod {
    #[serde(rename = "Decision")]
    Decision,
    #[serde(rename = "KO/TKO")]
    KoTko,
    #[serde(rename = "Submission")]
    Submission,
}

impl FinishMethod {
    /// Round and time only exist for fights that ended before the final bell
    pub fn is_finish(&self) -> bool {
        !matches!(self, Self::Decision)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Fight {
    pub fight_id: Uuid,
    pub event_id: Uuid,
    pub fighter1_name: String,
    pub fighter2_name: String,
    pub weight_class: Option<String>,
    pub bout_order: i16,
    pub scheduled_rounds: i16,
    pub created_at: DateTime<Utc>,
}

/// Admin-entered ground truth for one fight
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FightResult {
    pub fight_id: Uuid,
    pub winner: Corner,
    pub method: FinishMethod,
    pub round: Option<i16>,
    pub time: Option<String>,
    pub entered_at: DateTime<Utc>,
}

impl FightResult {
    pub fn outcome(&self) -> Outcome {
        Outcome {
            winner: self.winner,
            method: self.method,
            round: self.round,
            // stored values are always written from a parsed FightTime
            time: self.time.as_deref().and_then(|t| t.parse().ok()),
        }
    }
}

/// The shape shared by a fight result and a prediction of it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub winner: Corner,
    pub method: FinishMethod,
    pub round: Option<i16>,
    pub time: Option<FightTime>,
}

impl Outcome {
    pub fn decision(winner: Corner) -> Self {
        Self {
            winner,
            method: FinishMethod::Decision,
            round: None,
            time: None,
        }
    }

    pub fn finish(winner: Corner, method: FinishMethod, round: i16, time: FightTime) -> Self {
        Self {
            winner,
            method,
            round: Some(round),
            time: Some(time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_method_json_names() {
        assert_eq!(
            serde_json::to_string(&FinishMethod::KoTko).unwrap(),
            "\"KO/TKO\""
        );
        let method: FinishMethod = serde_json::from_str("\"Submission\"").unwrap();
        assert_eq!(method, FinishMethod::Submission);
    }

    #[test]
    fn test_corner_json_names() {
        let corner: Corner = serde_json::from_str("\"fighter2\"").unwrap();
        assert_eq!(corner, Corner::Fighter2);
    }

    #[test]
    fn test_result_outcome_parses_stored_time() {
        let result = FightResult {
            fight_id: Uuid::new_v4(),
            winner: Corner::Fighter2,
            method: FinishMethod::KoTko,
            round: Some(2),
            time: Some("3:45".to_string()),
            entered_at: Utc::now(),
        };

        let outcome = result.outcome();
        assert_eq!(outcome.time, Some(FightTime::from_seconds(225)));
        assert!(outcome.method.is_finish());
    }
}
