//! Authentication middleware and extractors.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde_json::json;

use super::db as auth_db;
use crate::config;
use crate::db::{self, LogOnError};
use crate::state::{AppState, UserDb};

pub const SESSION_COOKIE_NAME: &str = "sabacan_session";

/// Authenticated request context.
/// Add this as a handler parameter to require authentication.
/// Rejects with 401 when no valid session cookie is present.
#[derive(Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub username: String,
    pub user_db: UserDb,
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "authentication required"})),
    )
        .into_response()
}

fn server_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": message})),
    )
        .into_response()
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract cookies
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| unauthorized())?;

        // Get session cookie
        let session_id = jar
            .get(SESSION_COOKIE_NAME)
            .map(|c| c.value().to_string())
            .ok_or_else(unauthorized)?;

        // Validate session
        let auth_db = db::try_lock(&state.auth_db)
            .map_err(|_| server_error("auth database unavailable"))?;

        // Sweep expired sessions occasionally (~10% of requests)
        if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
            let _ = auth_db::cleanup_expired_sessions(&auth_db)
                .log_warn("Failed to clean up sessions");
        }

        let (user_id, username) = auth_db::get_session_user(&auth_db, &session_id)
            .map_err(|_| server_error("auth database error"))?
            .ok_or_else(unauthorized)?;

        drop(auth_db); // Release lock before opening user db

        // Open the user's learning database, migrating it if needed
        let user_db = db::init_db(&state.user_db_path(&username))
            .map_err(|_| server_error("failed to open user database"))?;

        Ok(AuthContext {
            user_id,
            username,
            user_db,
        })
    }
}
