//! Favorite-word store: CRUD, due-set queries, and the post-review update.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result};

use crate::domain::FavoriteWord;
use crate::srs::{sm2::MIN_EASINESS, ScheduleUpdate};

const WORD_COLUMNS: &str = "id, word, definition, example, easiness, interval_days, repetitions, \
                            next_review, last_reviewed, favorited_at, total_reviews, correct_reviews";

pub fn insert_word(conn: &Connection, word: &FavoriteWord) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO favorite_words (word, definition, example, easiness, interval_days, repetitions,
                                next_review, last_reviewed, favorited_at, total_reviews, correct_reviews)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
    "#,
        params![
            word.word,
            word.definition,
            word.example,
            word.easiness,
            word.interval_days,
            word.repetitions,
            word.next_review.to_rfc3339(),
            word.last_reviewed.map(|dt| dt.to_rfc3339()),
            word.favorited_at.to_rfc3339(),
            word.total_reviews,
            word.correct_reviews,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_word(conn: &Connection, word: &str) -> Result<Option<FavoriteWord>> {
    conn.query_row(
        &format!("SELECT {} FROM favorite_words WHERE word = ?1", WORD_COLUMNS),
        params![word],
        row_to_word,
    )
    .optional()
}

/// All favorites, newest first.
pub fn get_all_words(conn: &Connection) -> Result<Vec<FavoriteWord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM favorite_words ORDER BY favorited_at DESC, id DESC",
        WORD_COLUMNS
    ))?;

    let words = stmt
        .query_map([], row_to_word)?
        .collect::<Result<Vec<_>>>()?;
    Ok(words)
}

/// Cards due at `now`, most overdue first. The `word` tiebreak keeps the
/// order stable when several cards share a due timestamp.
pub fn get_due_words(conn: &Connection, now: DateTime<Utc>) -> Result<Vec<FavoriteWord>> {
    let mut stmt = conn.prepare(&format!(
        r#"
    SELECT {}
    FROM favorite_words
    WHERE next_review <= ?1
    ORDER BY next_review ASC, word ASC
    "#,
        WORD_COLUMNS
    ))?;

    let words = stmt
        .query_map(params![now.to_rfc3339()], row_to_word)?
        .collect::<Result<Vec<_>>>()?;
    Ok(words)
}

pub fn get_due_count(conn: &Connection, now: DateTime<Utc>) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM favorite_words WHERE next_review <= ?1",
        params![now.to_rfc3339()],
        |row| row.get(0),
    )
}

pub fn get_word_count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM favorite_words", [], |row| row.get(0))
}

/// Un-favorite. Returns false when the word was not stored.
pub fn delete_word(conn: &Connection, word: &str) -> Result<bool> {
    let deleted = conn.execute(
        "DELETE FROM favorite_words WHERE word = ?1",
        params![word],
    )?;
    Ok(deleted > 0)
}

/// Persist one computed schedule update. The review is only considered
/// applied once this single UPDATE lands.
pub fn update_word_after_review(
    conn: &Connection,
    word_id: i64,
    update: &ScheduleUpdate,
    correct: bool,
) -> Result<()> {
    conn.execute(
        r#"
    UPDATE favorite_words
    SET easiness = ?1, interval_days = ?2, repetitions = ?3, next_review = ?4,
        last_reviewed = ?5, total_reviews = total_reviews + 1,
        correct_reviews = correct_reviews + ?6
    WHERE id = ?7
    "#,
        params![
            update.easiness,
            update.interval_days,
            update.repetitions,
            update.next_review.to_rfc3339(),
            update.last_reviewed.to_rfc3339(),
            if correct { 1 } else { 0 },
            word_id,
        ],
    )?;
    Ok(())
}

/// Convert a database row to a FavoriteWord.
///
/// Out-of-range scheduling values from old or hand-edited databases are
/// clamped here, once, so the scheduler can insist on valid input.
fn row_to_word(row: &rusqlite::Row) -> Result<FavoriteWord> {
    let easiness: f64 = row.get(4)?;
    let interval_days: i64 = row.get(5)?;
    let repetitions: i64 = row.get(6)?;
    let next_review_str: String = row.get(7)?;
    let last_reviewed_str: Option<String> = row.get(8)?;
    let favorited_at_str: String = row.get(9)?;

    Ok(FavoriteWord {
        id: row.get(0)?,
        word: row.get(1)?,
        definition: row.get(2)?,
        example: row.get(3)?,
        easiness: easiness.max(MIN_EASINESS),
        interval_days: interval_days.max(1),
        repetitions: repetitions.max(0),
        next_review: parse_timestamp(&next_review_str),
        last_reviewed: last_reviewed_str.as_deref().and_then(|s| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        }),
        favorited_at: parse_timestamp(&favorited_at_str),
        total_reviews: row.get(10)?,
        correct_reviews: row.get(11)?,
    })
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
