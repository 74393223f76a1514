use sqlx::{Postgres, QueryBuilder};

/// Condition on the `events e` alias that keeps soft-deleted events out of
/// every read path aggregating picks
pub const ACTIVE_EVENT: &str = "e.is_active = TRUE";

/// Appends ` AND <active event>` to a query whose WHERE clause is already open
pub fn push_active_event_filter(query: &mut QueryBuilder<'_, Postgres>) {
    query.push(" AND ");
    query.push(ACTIVE_EVENT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_appends_condition() {
        let mut query = QueryBuilder::<Postgres>::new("SELECT 1 FROM events e WHERE 1=1");
        push_active_event_filter(&mut query);
        assert_eq!(
            query.sql(),
            "SELECT 1 FROM events e WHERE 1=1 AND e.is_active = TRUE"
        );
    }
}
