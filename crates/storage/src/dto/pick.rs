use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Corner, FightTime, FinishMethod, Outcome, Pick, PickDetail};

/// One prediction within a pick sheet
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PickDetailInput {
    pub fight_id: Uuid,
    pub predicted_winner: Corner,
    pub predicted_method: FinishMethod,
    #[validate(range(min = 1, max = 5, message = "Round must be between 1 and 5"))]
    pub predicted_round: Option<i16>,
    #[schema(value_type = Option<String>, example = "3:45")]
    pub predicted_time: Option<FightTime>,
}

impl PickDetailInput {
    /// Round and time are optional guesses for a finish and meaningless for a
    /// decision
    pub fn prediction(&self) -> Result<Outcome, String> {
        if !self.predicted_method.is_finish()
            && (self.predicted_round.is_some() || self.predicted_time.is_some())
        {
            return Err(format!(
                "fight {}: round and time cannot be predicted for a decision",
                self.fight_id
            ));
        }

        Ok(Outcome {
            winner: self.predicted_winner,
            method: self.predicted_method,
            round: self.predicted_round,
            time: self.predicted_time,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitPicksRequest {
    pub user_id: Uuid,

    #[validate(length(min = 1, message = "At least one pick is required"))]
    #[validate(nested)]
    pub picks: Vec<PickDetailInput>,
}

impl SubmitPicksRequest {
    pub fn validate_unique_fights(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for pick in &self.picks {
            if !seen.insert(pick.fight_id) {
                return Err(format!("fight {} is picked more than once", pick.fight_id));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PickSheetResponse {
    #[serde(flatten)]
    pub pick: Pick,
    pub details: Vec<PickDetail>,
}

/// A user's pick on an active event, as shown in their pick history
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserPickSummary {
    pub pick_id: Uuid,
    pub event_id: Uuid,
    pub event_name: String,
    pub event_slug: String,
    pub event_date: NaiveDate,
    pub submitted_at: Option<DateTime<Utc>>,
    pub is_scored: bool,
    pub total_points: i32,
    pub correct_picks: i32,
    pub details: Vec<PickDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(fight_id: Uuid, method: FinishMethod, round: Option<i16>) -> PickDetailInput {
        PickDetailInput {
            fight_id,
            predicted_winner: Corner::Fighter2,
            predicted_method: method,
            predicted_round: round,
            predicted_time: None,
        }
    }

    #[test]
    fn test_finish_prediction_may_omit_round_and_time() {
        let prediction = pick(Uuid::new_v4(), FinishMethod::KoTko, None)
            .prediction()
            .unwrap();
        assert_eq!(prediction.round, None);
    }

    #[test]
    fn test_decision_prediction_rejects_round() {
        assert!(
            pick(Uuid::new_v4(), FinishMethod::Decision, Some(2))
                .prediction()
                .is_err()
        );
    }

    #[test]
    fn test_duplicate_fights_rejected() {
        let fight_id = Uuid::new_v4();
        let request = SubmitPicksRequest {
            user_id: Uuid::new_v4(),
            picks: vec![
                pick(fight_id, FinishMethod::Decision, None),
                pick(fight_id, FinishMethod::KoTko, Some(1)),
            ],
        };
        assert!(request.validate().is_ok());
        assert!(request.validate_unique_fights().is_err());
    }
}
