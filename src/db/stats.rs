//! Aggregate progress statistics for the word-review feature.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result};
use serde::Serialize;

use super::{get_due_count, get_review_count_since, get_word_count};

/// Repetition count at which a card counts as learned (growing intervals).
const LEARNED_REPETITIONS: i64 = 3;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReviewStats {
    pub total_words: i64,
    pub due_now: i64,
    pub learned_words: i64,
    pub reviews_today: i64,
}

pub fn get_review_stats(conn: &Connection, now: DateTime<Utc>) -> Result<ReviewStats> {
    let total_words = get_word_count(conn)?;
    let due_now = get_due_count(conn, now)?;

    let learned_words: i64 = conn.query_row(
        "SELECT COUNT(*) FROM favorite_words WHERE repetitions >= ?1",
        [LEARNED_REPETITIONS],
        |row| row.get(0),
    )?;

    let today_start = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc();
    let reviews_today = get_review_count_since(conn, today_start)?;

    Ok(ReviewStats {
        total_words,
        due_now,
        learned_words,
        reviews_today,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{insert_review_log, insert_word};
    use crate::domain::{FavoriteWord, ReviewLog};
    use crate::testing::TestEnv;
    use chrono::Duration;

    #[test]
    fn test_stats_on_empty_store() {
        let env = TestEnv::new().unwrap();
        let stats = get_review_stats(&env.user_conn, Utc::now()).unwrap();
        assert_eq!(stats.total_words, 0);
        assert_eq!(stats.due_now, 0);
        assert_eq!(stats.learned_words, 0);
        assert_eq!(stats.reviews_today, 0);
    }

    #[test]
    fn test_stats_counts() {
        let env = TestEnv::new().unwrap();
        let conn = &env.user_conn;
        let now = Utc::now();

        // One due card still learning, one learned card not due yet
        let due = FavoriteWord::new("due".to_string(), "d".to_string(), String::new());
        insert_word(conn, &due).unwrap();

        let mut learned = FavoriteWord::new("learned".to_string(), "d".to_string(), String::new());
        learned.repetitions = 4;
        learned.next_review = now + Duration::days(20);
        insert_word(conn, &learned).unwrap();

        insert_review_log(conn, &ReviewLog::new(1, 4, true)).unwrap();

        let stats = get_review_stats(conn, now).unwrap();
        assert_eq!(stats.total_words, 2);
        assert_eq!(stats.due_now, 1);
        assert_eq!(stats.learned_words, 1);
        assert_eq!(stats.reviews_today, 1);
    }
}
