//! Quiz catalog and quiz-result endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::json_error;
use crate::auth::AuthContext;
use crate::config;
use crate::content;
use crate::db::{self, LogOnError};
use crate::domain::QuizResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(default = "default_count")]
    pub count: usize,
}

fn default_count() -> usize {
    config::DEFAULT_QUIZ_LIST_LIMIT
}

#[derive(Deserialize)]
pub struct QuizResultRequest {
    pub slug: String,
    #[serde(default)]
    pub video_id: String,
    pub movie_title: String,
    #[serde(default)]
    pub channel_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub level: String,
    pub score: i64,
    pub total: i64,
}

/// GET /api/quizzes?count=N - newest quizzes first (public)
pub async fn list_quizzes(State(state): State<AppState>, Query(params): Query<ListParams>) -> Response {
    Json(content::list_quizzes(&state.content_dir, params.count)).into_response()
}

/// GET /api/quizzes/{slug} - full quiz document (public)
pub async fn get_quiz(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match content::load_quiz(&state.content_dir, &slug) {
        Some(doc) => Json(doc).into_response(),
        None => json_error(StatusCode::NOT_FOUND, "no such quiz"),
    }
}

/// POST /api/quiz-results - record a completed quiz
pub async fn submit_quiz_result(
    auth: AuthContext,
    Json(req): Json<QuizResultRequest>,
) -> Response {
    if req.total <= 0 || req.score < 0 || req.score > req.total {
        return json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "score must be between 0 and total",
        );
    }

    let conn = match auth.user_db.lock() {
        Ok(conn) => conn,
        Err(_) => return json_error(StatusCode::SERVICE_UNAVAILABLE, "database unavailable"),
    };

    let result = QuizResult {
        id: 0,
        slug: req.slug,
        video_id: req.video_id,
        movie_title: req.movie_title,
        channel_name: req.channel_name,
        category: req.category,
        level: req.level,
        score: req.score,
        total: req.total,
        taken_at: Utc::now(),
    };

    match db::insert_quiz_result(&conn, &result) {
        Ok(_) => (StatusCode::CREATED, Json(result)).into_response(),
        Err(e) => {
            tracing::error!("Failed to record quiz result: {}", e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to record result")
        }
    }
}

/// GET /api/quiz-results - quiz history, newest first
pub async fn quiz_history(auth: AuthContext) -> Response {
    let conn = match auth.user_db.lock() {
        Ok(conn) => conn,
        Err(_) => return json_error(StatusCode::SERVICE_UNAVAILABLE, "database unavailable"),
    };

    let history = db::get_quiz_history(&conn).log_warn_default("Failed to get quiz history");
    Json(history).into_response()
}
