use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A fight card users submit picks for
///
/// `is_active = false` is the soft-deleted state: the event and its picks stay
/// in the database but no longer count anywhere picks are aggregated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub event_id: Uuid,
    pub name: String,
    pub slug: String,
    pub venue: Option<String>,
    pub event_date: NaiveDate,
    pub pick_deadline: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Picks can no longer be created or changed once the deadline is reached
    pub fn picks_locked_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.pick_deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event_with_deadline(pick_deadline: DateTime<Utc>) -> Event {
        Event {
            event_id: Uuid::new_v4(),
            name: "UFC 300".to_string(),
            slug: "ufc-300".to_string(),
            venue: None,
            event_date: pick_deadline.date_naive(),
            pick_deadline,
            is_active: true,
            created_at: pick_deadline - Duration::days(30),
        }
    }

    #[test]
    fn test_picks_open_before_deadline() {
        let deadline = Utc::now();
        let event = event_with_deadline(deadline);
        assert!(!event.picks_locked_at(deadline - Duration::seconds(1)));
    }

    #[test]
    fn test_picks_locked_at_and_after_deadline() {
        let deadline = Utc::now();
        let event = event_with_deadline(deadline);
        assert!(event.picks_locked_at(deadline));
        assert!(event.picks_locked_at(deadline + Duration::minutes(5)));
    }
}
