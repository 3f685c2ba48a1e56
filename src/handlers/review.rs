//! Word-review endpoints: the orchestration layer around the scheduler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::json_error;
use crate::auth::AuthContext;
use crate::db::{self, LogOnError};
use crate::domain::{ReviewLog, ReviewPhase};
use crate::srs::{self, ScheduleError};

#[derive(Deserialize)]
pub struct ReviewRequest {
    pub word: String,
    pub quality: u8,
}

/// Updated schedule returned after a review is applied.
#[derive(Serialize)]
pub struct ReviewResponse {
    pub word: String,
    pub quality: u8,
    pub easiness: f64,
    pub interval_days: i64,
    pub repetitions: i64,
    pub next_review: DateTime<Utc>,
    pub last_reviewed: DateTime<Utc>,
    pub phase: ReviewPhase,
}

/// GET /api/review/due - cards due now, most overdue first
pub async fn due_words(auth: AuthContext) -> Response {
    let conn = match auth.user_db.lock() {
        Ok(conn) => conn,
        Err(_) => return json_error(StatusCode::SERVICE_UNAVAILABLE, "database unavailable"),
    };

    let due = db::get_due_words(&conn, Utc::now()).log_warn_default("Failed to get due words");
    Json(due).into_response()
}

/// POST /api/review - apply one review to one card.
///
/// The card is read, rescheduled, and rewritten under a single connection
/// lock, so two submissions for the same card cannot interleave.
pub async fn submit_review(auth: AuthContext, Json(req): Json<ReviewRequest>) -> Response {
    let conn = match auth.user_db.lock() {
        Ok(conn) => conn,
        Err(_) => return json_error(StatusCode::SERVICE_UNAVAILABLE, "database unavailable"),
    };

    let card = match db::get_word(&conn, &req.word) {
        Ok(Some(card)) => card,
        Ok(None) => return json_error(StatusCode::NOT_FOUND, "word is not favorited"),
        Err(_) => return json_error(StatusCode::INTERNAL_SERVER_ERROR, "database error"),
    };

    let update = match srs::compute_next_state(req.quality, card.scheduling(), Utc::now()) {
        Ok(update) => update,
        Err(e @ ScheduleError::InvalidQuality(_)) => {
            return json_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string());
        }
        Err(e @ ScheduleError::InvalidState(_)) => {
            // The store boundary clamps on read, so this means the record
            // changed shape in a way clamping doesn't cover
            tracing::error!("Card '{}' has unusable scheduling state: {}", card.word, e);
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "corrupt scheduling state");
        }
    };

    let correct = srs::is_passing(req.quality);
    if let Err(e) = db::update_word_after_review(&conn, card.id, &update, correct) {
        tracing::error!("Failed to save review for '{}': {}", card.word, e);
        return json_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to save review");
    }

    // The audit log is best-effort; the schedule update above is what counts
    let _ = db::insert_review_log(&conn, &ReviewLog::new(card.id, req.quality, correct))
        .log_warn("Failed to log review");

    let mut card = card;
    card.easiness = update.easiness;
    card.interval_days = update.interval_days;
    card.repetitions = update.repetitions;
    card.next_review = update.next_review;
    card.last_reviewed = Some(update.last_reviewed);
    card.total_reviews += 1;
    if correct {
        card.correct_reviews += 1;
    }

    Json(ReviewResponse {
        word: card.word.clone(),
        quality: req.quality,
        easiness: card.easiness,
        interval_days: card.interval_days,
        repetitions: card.repetitions,
        next_review: card.next_review,
        last_reviewed: update.last_reviewed,
        phase: card.phase(),
    })
    .into_response()
}

/// GET /api/review/stats - aggregate progress numbers
pub async fn review_stats(auth: AuthContext) -> Response {
    let conn = match auth.user_db.lock() {
        Ok(conn) => conn,
        Err(_) => return json_error(StatusCode::SERVICE_UNAVAILABLE, "database unavailable"),
    };

    let stats = db::get_review_stats(&conn, Utc::now()).log_warn_default("Failed to get stats");
    Json(stats).into_response()
}
