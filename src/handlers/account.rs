//! Account profile endpoint.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::json_error;
use crate::auth::{db as auth_db, AuthContext};
use crate::db::{self, LogOnError};
use crate::state::AppState;

/// GET /api/account - profile plus favorite/quiz counts
pub async fn account(State(state): State<AppState>, auth: AuthContext) -> Response {
    let profile = {
        let conn = match db::try_lock(&state.auth_db) {
            Ok(conn) => conn,
            Err(_) => return json_error(StatusCode::SERVICE_UNAVAILABLE, "database unavailable"),
        };
        match auth_db::get_user_profile(&conn, auth.user_id) {
            Ok(Some(profile)) => profile,
            Ok(None) => return json_error(StatusCode::NOT_FOUND, "account not found"),
            Err(_) => return json_error(StatusCode::INTERNAL_SERVER_ERROR, "database error"),
        }
    };

    let (favorite_words, quiz_results) = match auth.user_db.lock() {
        Ok(conn) => (
            db::get_word_count(&conn).log_warn_default("Failed to count favorites"),
            db::get_quiz_count(&conn).log_warn_default("Failed to count quiz results"),
        ),
        Err(_) => return json_error(StatusCode::SERVICE_UNAVAILABLE, "database unavailable"),
    };

    Json(json!({
        "username": profile.username,
        "nickname": profile.nickname,
        "created_at": profile.created_at,
        "favorite_words": favorite_words,
        "quiz_results": quiz_results,
    }))
    .into_response()
}
