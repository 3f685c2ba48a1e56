//! Favorite-word endpoints.

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::json_error;
use crate::auth::AuthContext;
use crate::db::{self, LogOnError};
use crate::domain::FavoriteWord;

#[derive(Deserialize)]
pub struct FavoriteRequest {
    pub word: String,
    pub definition: String,
    #[serde(default)]
    pub example: String,
}

/// GET /api/words - all favorites, newest first
pub async fn list_words(auth: AuthContext) -> Response {
    let conn = match auth.user_db.lock() {
        Ok(conn) => conn,
        Err(_) => return json_error(StatusCode::SERVICE_UNAVAILABLE, "database unavailable"),
    };

    let words = db::get_all_words(&conn).log_warn_default("Failed to list favorite words");
    Json(words).into_response()
}

/// POST /api/words - favorite a word, creating its review card
pub async fn favorite_word(auth: AuthContext, Json(req): Json<FavoriteRequest>) -> Response {
    let word = req.word.trim();
    if word.is_empty() {
        return json_error(StatusCode::UNPROCESSABLE_ENTITY, "word must not be empty");
    }

    let conn = match auth.user_db.lock() {
        Ok(conn) => conn,
        Err(_) => return json_error(StatusCode::SERVICE_UNAVAILABLE, "database unavailable"),
    };

    // Re-favoriting an existing word keeps its review history
    match db::get_word(&conn, word) {
        Ok(Some(existing)) => return Json(existing).into_response(),
        Ok(None) => {}
        Err(_) => return json_error(StatusCode::INTERNAL_SERVER_ERROR, "database error"),
    }

    let card = FavoriteWord::new(
        word.to_string(),
        req.definition.trim().to_string(),
        req.example.trim().to_string(),
    );
    if let Err(e) = db::insert_word(&conn, &card) {
        tracing::warn!("Failed to favorite '{}': {}", word, e);
        return json_error(StatusCode::INTERNAL_SERVER_ERROR, "database error");
    }

    match db::get_word(&conn, word) {
        Ok(Some(stored)) => (StatusCode::CREATED, Json(stored)).into_response(),
        _ => json_error(StatusCode::INTERNAL_SERVER_ERROR, "database error"),
    }
}

/// DELETE /api/words/{word} - un-favorite, dropping the card entirely
pub async fn unfavorite_word(auth: AuthContext, Path(word): Path<String>) -> Response {
    let conn = match auth.user_db.lock() {
        Ok(conn) => conn,
        Err(_) => return json_error(StatusCode::SERVICE_UNAVAILABLE, "database unavailable"),
    };

    match db::delete_word(&conn, &word) {
        Ok(true) => Json(json!({"ok": true})).into_response(),
        Ok(false) => json_error(StatusCode::NOT_FOUND, "word is not favorited"),
        Err(_) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "database error"),
    }
}
