//! Append-only review logging.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::ReviewLog;

pub fn insert_review_log(conn: &Connection, log: &ReviewLog) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO review_logs (word_id, quality, is_correct, reviewed_at)
    VALUES (?1, ?2, ?3, ?4)
    "#,
        params![
            log.word_id,
            log.quality,
            if log.is_correct { 1 } else { 0 },
            log.reviewed_at.to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Number of reviews submitted at or after `since`.
pub fn get_review_count_since(conn: &Connection, since: DateTime<Utc>) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM review_logs WHERE reviewed_at >= ?1",
        params![since.to_rfc3339()],
        |row| row.get(0),
    )
}

/// Review history for one card, oldest first.
pub fn get_logs_for_word(conn: &Connection, word_id: i64) -> Result<Vec<ReviewLog>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, word_id, quality, is_correct, reviewed_at
    FROM review_logs
    WHERE word_id = ?1
    ORDER BY reviewed_at ASC, id ASC
    "#,
    )?;

    let logs = stmt
        .query_map(params![word_id], |row| {
            let is_correct: i64 = row.get(3)?;
            let reviewed_at_str: String = row.get(4)?;
            Ok(ReviewLog {
                id: row.get(0)?,
                word_id: row.get(1)?,
                quality: row.get(2)?,
                is_correct: is_correct != 0,
                reviewed_at: DateTime::parse_from_rfc3339(&reviewed_at_str)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now()),
            })
        })?
        .collect::<Result<Vec<_>>>()?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::run_migrations;
    use chrono::Duration;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_insert_and_fetch_logs() {
        let conn = test_conn();
        insert_review_log(&conn, &ReviewLog::new(1, 2, false)).unwrap();
        insert_review_log(&conn, &ReviewLog::new(1, 4, true)).unwrap();
        insert_review_log(&conn, &ReviewLog::new(2, 5, true)).unwrap();

        let logs = get_logs_for_word(&conn, 1).unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].quality, 2);
        assert!(!logs[0].is_correct);
        assert_eq!(logs[1].quality, 4);
    }

    #[test]
    fn test_review_count_since() {
        let conn = test_conn();
        insert_review_log(&conn, &ReviewLog::new(1, 4, true)).unwrap();
        insert_review_log(&conn, &ReviewLog::new(1, 3, true)).unwrap();

        let hour_ago = Utc::now() - Duration::hours(1);
        assert_eq!(get_review_count_since(&conn, hour_ago).unwrap(), 2);

        let in_an_hour = Utc::now() + Duration::hours(1);
        assert_eq!(get_review_count_since(&conn, in_an_hour).unwrap(), 0);
    }
}
