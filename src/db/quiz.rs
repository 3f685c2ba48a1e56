//! Quiz-result history.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::QuizResult;

pub fn insert_quiz_result(conn: &Connection, result: &QuizResult) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO quiz_results (slug, video_id, movie_title, channel_name, category, level,
                              score, total, taken_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
    "#,
        params![
            result.slug,
            result.video_id,
            result.movie_title,
            result.channel_name,
            result.category,
            result.level,
            result.score,
            result.total,
            result.taken_at.to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Full quiz history, newest first.
pub fn get_quiz_history(conn: &Connection) -> Result<Vec<QuizResult>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, slug, video_id, movie_title, channel_name, category, level, score, total, taken_at
    FROM quiz_results
    ORDER BY taken_at DESC, id DESC
    "#,
    )?;

    let results = stmt
        .query_map([], row_to_quiz_result)?
        .collect::<Result<Vec<_>>>()?;
    Ok(results)
}

pub fn get_quiz_count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM quiz_results", [], |row| row.get(0))
}

fn row_to_quiz_result(row: &rusqlite::Row) -> Result<QuizResult> {
    let taken_at_str: String = row.get(9)?;
    Ok(QuizResult {
        id: row.get(0)?,
        slug: row.get(1)?,
        video_id: row.get(2)?,
        movie_title: row.get(3)?,
        channel_name: row.get(4)?,
        category: row.get(5)?,
        level: row.get(6)?,
        score: row.get(7)?,
        total: row.get(8)?,
        taken_at: DateTime::parse_from_rfc3339(&taken_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}
