//! JSON API handlers and the application router.

pub mod account;
pub mod quiz;
pub mod review;
pub mod words;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::auth;
use crate::paths;
use crate::state::AppState;

/// Uniform JSON error body
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({"error": message.into()}))).into_response()
}

/// GET / - service info
pub async fn index() -> Response {
    Json(json!({
        "name": "sabacan",
        "version": env!("CARGO_PKG_VERSION"),
    }))
    .into_response()
}

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/account", get(account::account))
        .route("/api/quizzes", get(quiz::list_quizzes))
        .route("/api/quizzes/{slug}", get(quiz::get_quiz))
        .route(
            "/api/quiz-results",
            get(quiz::quiz_history).post(quiz::submit_quiz_result),
        )
        .route("/api/words", get(words::list_words).post(words::favorite_word))
        .route("/api/words/{word}", delete(words::unfavorite_word))
        .route("/api/review/due", get(review::due_words))
        .route("/api/review/stats", get(review::review_stats))
        .route("/api/review", post(review::submit_review))
        .nest_service("/img", ServeDir::new(paths::images_dir()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
