use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Corner, FightTime, FinishMethod, Outcome};

/// Result for one fight as entered by an admin
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct FightResultInput {
    pub fight_id: Uuid,
    pub winner: Corner,
    pub method: FinishMethod,
    #[validate(range(min = 1, max = 5, message = "Round must be between 1 and 5"))]
    pub round: Option<i16>,
    #[schema(value_type = Option<String>, example = "3:45")]
    pub time: Option<FightTime>,
}

impl FightResultInput {
    /// A decision carries no round or time; a finish must carry both
    pub fn outcome(&self) -> Result<Outcome, String> {
        match (self.method.is_finish(), self.round, self.time) {
            (false, None, None) => Ok(Outcome::decision(self.winner)),
            (false, _, _) => Err(format!(
                "fight {}: round and time must be empty for a decision",
                self.fight_id
            )),
            (true, Some(round), Some(time)) => {
                Ok(Outcome::finish(self.winner, self.method, round, time))
            }
            (true, _, _) => Err(format!(
                "fight {}: round and time are required for a finish",
                self.fight_id
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitResultsRequest {
    #[validate(length(min = 1, message = "At least one result is required"))]
    #[validate(nested)]
    pub results: Vec<FightResultInput>,
}

/// What a re-scoring pass over one event touched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventScoringSummary {
    pub event_id: Uuid,
    pub picks_rescored: u32,
    pub details_scored: u32,
    /// Details whose fight has no result yet
    pub details_pending: u32,
    pub users_recalculated: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecalculationFailure {
    pub user_id: Uuid,
    pub error: String,
}

/// Outcome of recalculating statistics for many users
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RecalculationSummary {
    pub processed: u32,
    pub succeeded: u32,
    pub failed: Vec<RecalculationFailure>,
}

impl RecalculationSummary {
    pub fn record_success(&mut self) {
        self.processed += 1;
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, user_id: Uuid, error: impl ToString) {
        self.processed += 1;
        self.failed.push(RecalculationFailure {
            user_id,
            error: error.to_string(),
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventActivationResponse {
    pub event_id: Uuid,
    pub is_active: bool,
    pub users_recalculated: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(method: FinishMethod, round: Option<i16>, time: Option<&str>) -> FightResultInput {
        FightResultInput {
            fight_id: Uuid::new_v4(),
            winner: Corner::Fighter1,
            method,
            round,
            time: time.map(|t| t.parse().unwrap()),
        }
    }

    #[test]
    fn test_decision_must_not_carry_round_or_time() {
        assert!(input(FinishMethod::Decision, None, None).outcome().is_ok());
        assert!(input(FinishMethod::Decision, Some(3), None).outcome().is_err());
        assert!(input(FinishMethod::Decision, None, Some("5:00")).outcome().is_err());
    }

    #[test]
    fn test_finish_requires_round_and_time() {
        let outcome = input(FinishMethod::Submission, Some(1), Some("2:30"))
            .outcome()
            .unwrap();
        assert_eq!(outcome.round, Some(1));
        assert!(input(FinishMethod::KoTko, Some(1), None).outcome().is_err());
        assert!(input(FinishMethod::KoTko, None, Some("2:30")).outcome().is_err());
    }

    #[test]
    fn test_round_range_is_validated() {
        let request = SubmitResultsRequest {
            results: vec![input(FinishMethod::KoTko, Some(6), Some("1:00"))],
        };
        assert!(request.validate().is_err());

        let empty = SubmitResultsRequest { results: vec![] };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = RecalculationSummary::default();
        summary.record_success();
        summary.record_failure(Uuid::nil(), "Not found");
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed[0].error, "Not found");
    }
}
