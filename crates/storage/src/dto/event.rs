use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::validate_slug;
use crate::models::{Event, Fight, FightResult};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Slug must be between 1 and 255 characters"
    ))]
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,

    #[validate(length(max = 255))]
    pub venue: Option<String>,

    pub event_date: NaiveDate,

    /// Picks close at this instant
    pub pick_deadline: DateTime<Utc>,
}

impl CreateEventRequest {
    pub fn validate_deadline(&self) -> Result<(), &'static str> {
        let latest = self
            .event_date
            .succ_opt()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc());

        match latest {
            Some(latest) if self.pick_deadline >= latest => {
                Err("Pick deadline must be before the end of the event day")
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFightRequest {
    #[validate(length(min = 1, max = 255))]
    pub fighter1_name: String,

    #[validate(length(min = 1, max = 255))]
    pub fighter2_name: String,

    #[validate(length(max = 100))]
    pub weight_class: Option<String>,

    #[validate(range(min = 1, max = 50, message = "Bout order must be between 1 and 50"))]
    pub bout_order: i16,

    #[serde(default = "default_scheduled_rounds")]
    pub scheduled_rounds: i16,
}

fn default_scheduled_rounds() -> i16 {
    3
}

impl CreateFightRequest {
    pub fn validate_rounds(&self) -> Result<(), &'static str> {
        if self.scheduled_rounds != 3 && self.scheduled_rounds != 5 {
            return Err("Scheduled rounds must be 3 or 5");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FightCard {
    #[serde(flatten)]
    pub fight: Fight,
    pub result: Option<FightResult>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub event: Event,
    pub fights: Vec<FightCard>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(pick_deadline: DateTime<Utc>) -> CreateEventRequest {
        CreateEventRequest {
            name: "UFC 300".to_string(),
            slug: "ufc-300".to_string(),
            venue: Some("T-Mobile Arena".to_string()),
            event_date: NaiveDate::from_ymd_opt(2024, 4, 13).unwrap(),
            pick_deadline,
        }
    }

    #[test]
    fn test_deadline_on_event_day_is_accepted() {
        let deadline = NaiveDate::from_ymd_opt(2024, 4, 13)
            .unwrap()
            .and_hms_opt(22, 0, 0)
            .unwrap()
            .and_utc();
        assert!(request(deadline).validate_deadline().is_ok());
    }

    #[test]
    fn test_deadline_after_event_day_is_rejected() {
        let deadline = NaiveDate::from_ymd_opt(2024, 4, 14)
            .unwrap()
            .and_hms_opt(1, 0, 0)
            .unwrap()
            .and_utc();
        assert!(request(deadline).validate_deadline().is_err());
    }

    #[test]
    fn test_fight_rounds() {
        let mut fight = CreateFightRequest {
            fighter1_name: "Alex Pereira".to_string(),
            fighter2_name: "Jamahal Hill".to_string(),
            weight_class: Some("Light Heavyweight".to_string()),
            bout_order: 1,
            scheduled_rounds: 5,
        };
        assert!(fight.validate().is_ok());
        assert!(fight.validate_rounds().is_ok());

        fight.scheduled_rounds = 4;
        assert!(fight.validate_rounds().is_err());

        fight.bout_order = 0;
        assert!(fight.validate().is_err());
    }
}
