//! Pick scoring rules
//!
//! The winner gates everything: a wrong winner earns nothing, a right one
//! earns [`WINNER_POINTS`] plus one point per matching detail. Round and time
//! only count for fights that ended inside the distance.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{FightResult, Outcome, PickDetail};

pub const WINNER_POINTS: i32 = 3;
pub const METHOD_POINTS: i32 = 1;
pub const ROUND_POINTS: i32 = 1;
pub const TIME_POINTS: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickScore {
    pub points: i32,
    pub is_correct: bool,
}

impl PickScore {
    const MISS: Self = Self {
        points: 0,
        is_correct: false,
    };
}

/// Scores one prediction against the actual outcome of the same fight
pub fn score_prediction(prediction: &Outcome, actual: &Outcome) -> PickScore {
    if prediction.winner != actual.winner {
        return PickScore::MISS;
    }

    let mut points = WINNER_POINTS;

    if prediction.method == actual.method {
        points += METHOD_POINTS;
    }

    if actual.method.is_finish() {
        if actual.round.is_some() && prediction.round == actual.round {
            points += ROUND_POINTS;
        }
        if actual.time.is_some() && prediction.time == actual.time {
            points += TIME_POINTS;
        }
    }

    PickScore {
        points,
        is_correct: true,
    }
}

/// Score for one pick detail, or `None` while its fight has no result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailScore {
    pub pick_detail_id: Uuid,
    pub score: Option<PickScore>,
}

/// A whole pick sheet scored against the results known so far
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SheetScore {
    pub details: Vec<DetailScore>,
    pub total_points: i32,
    pub correct_picks: i32,
    pub scored_details: i32,
    pub pending_details: i32,
}

impl SheetScore {
    /// A sheet counts as scored once any of its fights has been decided
    pub fn is_scored(&self) -> bool {
        self.scored_details > 0
    }
}

/// Scores every detail of a pick sheet from nothing
///
/// Totals are rebuilt only from the current results, so a sheet scored
/// against a corrected result carries no trace of the result it replaced.
pub fn score_sheet(details: &[PickDetail], results: &HashMap<Uuid, FightResult>) -> SheetScore {
    let mut sheet = SheetScore::default();

    for detail in details {
        let score = results
            .get(&detail.fight_id)
            .map(|result| score_prediction(&detail.prediction(), &result.outcome()));

        match score {
            Some(score) => {
                sheet.total_points += score.points;
                sheet.scored_details += 1;
                if score.is_correct {
                    sheet.correct_picks += 1;
                }
            }
            None => {
                tracing::debug!(
                    pick_detail_id = %detail.pick_detail_id,
                    fight_id = %detail.fight_id,
                    "No result for fight yet, leaving pick pending"
                );
                sheet.pending_details += 1;
            }
        }

        sheet.details.push(DetailScore {
            pick_detail_id: detail.pick_detail_id,
            score,
        });
    }

    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Corner, FightTime, FinishMethod};
    use chrono::Utc;

    fn time(s: &str) -> FightTime {
        s.parse().unwrap()
    }

    fn ko_round_two() -> Outcome {
        Outcome::finish(Corner::Fighter2, FinishMethod::KoTko, 2, time("3:45"))
    }

    fn detail(fight_id: Uuid, prediction: Outcome) -> PickDetail {
        PickDetail {
            pick_detail_id: Uuid::new_v4(),
            pick_id: Uuid::nil(),
            fight_id,
            predicted_winner: prediction.winner,
            predicted_method: prediction.method,
            predicted_round: prediction.round,
            predicted_time: prediction.time.map(|t| t.to_string()),
            points_earned: 0,
            is_correct: None,
        }
    }

    fn result(fight_id: Uuid, outcome: Outcome) -> FightResult {
        FightResult {
            fight_id,
            winner: outcome.winner,
            method: outcome.method,
            round: outcome.round,
            time: outcome.time.map(|t| t.to_string()),
            entered_at: Utc::now(),
        }
    }

    #[test]
    fn test_exact_finish_prediction_scores_six() {
        let score = score_prediction(&ko_round_two(), &ko_round_two());
        assert_eq!(
            score,
            PickScore {
                points: 6,
                is_correct: true
            }
        );
    }

    #[test]
    fn test_wrong_method_keeps_round_and_time_credit() {
        let prediction =
            Outcome::finish(Corner::Fighter2, FinishMethod::Submission, 2, time("3:45"));
        let score = score_prediction(&prediction, &ko_round_two());
        assert_eq!(score.points, 4);
        assert!(score.is_correct);
    }

    #[test]
    fn test_wrong_winner_scores_nothing() {
        let prediction = Outcome::finish(Corner::Fighter1, FinishMethod::KoTko, 2, time("3:45"));
        assert_eq!(score_prediction(&prediction, &ko_round_two()), PickScore::MISS);
    }

    #[test]
    fn test_decision_scoring() {
        let actual = Outcome::decision(Corner::Fighter1);

        let exact = score_prediction(&Outcome::decision(Corner::Fighter1), &actual);
        assert_eq!(exact.points, 4);

        let predicted_ko = Outcome::finish(Corner::Fighter1, FinishMethod::KoTko, 3, time("1:10"));
        let winner_only = score_prediction(&predicted_ko, &actual);
        assert_eq!(winner_only.points, 3);
        assert!(winner_only.is_correct);
    }

    #[test]
    fn test_time_match_ignores_zero_padding() {
        let prediction = Outcome::finish(Corner::Fighter2, FinishMethod::KoTko, 2, time("03:45"));
        assert_eq!(score_prediction(&prediction, &ko_round_two()).points, 6);
    }

    #[test]
    fn test_time_off_by_one_second_misses_time_point() {
        let prediction = Outcome::finish(Corner::Fighter2, FinishMethod::KoTko, 2, time("3:44"));
        assert_eq!(score_prediction(&prediction, &ko_round_two()).points, 5);
    }

    #[test]
    fn test_score_bounds_over_prediction_grid() {
        let corners = [Corner::Fighter1, Corner::Fighter2];
        let methods = [
            FinishMethod::Decision,
            FinishMethod::KoTko,
            FinishMethod::Submission,
        ];
        let rounds = [None, Some(1), Some(2)];
        let times = [None, Some(time("3:45")), Some(time("0:30"))];
        let actuals = [
            ko_round_two(),
            Outcome::decision(Corner::Fighter2),
            Outcome::finish(Corner::Fighter1, FinishMethod::Submission, 1, time("0:30")),
        ];

        for actual in &actuals {
            for winner in corners {
                for method in methods {
                    for round in rounds {
                        for t in times {
                            let prediction = Outcome {
                                winner,
                                method,
                                round,
                                time: t,
                            };
                            let score = score_prediction(&prediction, actual);

                            if winner != actual.winner {
                                assert_eq!(score, PickScore::MISS);
                            } else if actual.method.is_finish() {
                                assert!(score.is_correct);
                                assert!((3..=6).contains(&score.points));
                                let all_match = method == actual.method
                                    && round == actual.round
                                    && t == actual.time;
                                assert_eq!(score.points == 6, all_match);
                            } else {
                                assert!(score.is_correct);
                                let expected = if method == actual.method { 4 } else { 3 };
                                assert_eq!(score.points, expected);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_sheet_leaves_unresulted_fights_pending() {
        let decided = Uuid::new_v4();
        let upcoming = Uuid::new_v4();
        let details = vec![
            detail(decided, ko_round_two()),
            detail(upcoming, Outcome::decision(Corner::Fighter1)),
        ];
        let results = HashMap::from([(decided, result(decided, ko_round_two()))]);

        let sheet = score_sheet(&details, &results);

        assert_eq!(sheet.total_points, 6);
        assert_eq!(sheet.correct_picks, 1);
        assert_eq!(sheet.scored_details, 1);
        assert_eq!(sheet.pending_details, 1);
        assert!(sheet.is_scored());
        assert_eq!(sheet.details[1].score, None);
    }

    #[test]
    fn test_sheet_without_results_is_not_scored() {
        let details = vec![detail(Uuid::new_v4(), ko_round_two())];
        let sheet = score_sheet(&details, &HashMap::new());
        assert!(!sheet.is_scored());
        assert_eq!(sheet.total_points, 0);
    }

    #[test]
    fn test_rescoring_leaves_no_residue_from_previous_result() {
        let fight_id = Uuid::new_v4();
        let mut details = vec![detail(fight_id, ko_round_two())];

        let first = score_sheet(
            &details,
            &HashMap::from([(fight_id, result(fight_id, ko_round_two()))]),
        );
        assert_eq!(first.total_points, 6);

        // write the first scoring back the way the service does
        details[0].points_earned = first.total_points;
        details[0].is_correct = Some(true);

        let corrected = HashMap::from([(
            fight_id,
            result(fight_id, Outcome::decision(Corner::Fighter1)),
        )]);
        let rescored = score_sheet(&details, &corrected);
        let fresh = score_sheet(&[detail(fight_id, ko_round_two())], &corrected);

        assert_eq!(rescored.total_points, 0);
        assert_eq!(rescored.total_points, fresh.total_points);
        assert_eq!(rescored.correct_picks, fresh.correct_picks);
    }
}
