//! Authentication handlers for register, login, and logout.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::json;

use super::db as auth_db;
use super::middleware::SESSION_COOKIE_NAME;
use super::password;
use crate::db;
use crate::handlers::json_error;
use crate::session::generate_session_id;
use crate::state::AppState;

/// Session duration in hours (1 week)
const SESSION_DURATION_HOURS: i64 = 24 * 7;

const USERNAME_MIN_LEN: usize = 3;
const USERNAME_MAX_LEN: usize = 32;
const PASSWORD_MIN_LEN: usize = 8;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub nickname: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

fn valid_username(username: &str) -> bool {
    (USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&username.len())
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn session_cookie(session_id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RegisterRequest>,
) -> Response {
    if !valid_username(&req.username) {
        return json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "username must be 3-32 characters: letters, digits, '_' or '-'",
        );
    }
    if req.password.len() < PASSWORD_MIN_LEN {
        return json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "password must be at least 8 characters",
        );
    }

    let conn = match db::try_lock(&state.auth_db) {
        Ok(conn) => conn,
        Err(_) => return json_error(StatusCode::SERVICE_UNAVAILABLE, "database unavailable"),
    };

    match auth_db::username_exists(&conn, &req.username) {
        Ok(true) => return json_error(StatusCode::CONFLICT, "username already taken"),
        Ok(false) => {}
        Err(_) => return json_error(StatusCode::INTERNAL_SERVER_ERROR, "database error"),
    }

    let password_hash = match password::hash_password(&req.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "registration failed");
        }
    };

    let nickname = if req.nickname.trim().is_empty() {
        req.username.clone()
    } else {
        req.nickname.trim().to_string()
    };

    let user_id = match auth_db::create_user(&conn, &req.username, &nickname, &password_hash) {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "registration failed");
        }
    };

    let session_id = generate_session_id();
    if auth_db::create_session(&conn, user_id, &session_id, SESSION_DURATION_HOURS).is_err() {
        return json_error(StatusCode::INTERNAL_SERVER_ERROR, "registration failed");
    }

    tracing::info!("Registered user '{}'", req.username);
    (
        StatusCode::CREATED,
        jar.add(session_cookie(session_id)),
        Json(json!({"username": req.username, "nickname": nickname})),
    )
        .into_response()
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Response {
    if req.username.is_empty() || req.password.is_empty() {
        return json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "username and password are required",
        );
    }

    let conn = match db::try_lock(&state.auth_db) {
        Ok(conn) => conn,
        Err(_) => return json_error(StatusCode::SERVICE_UNAVAILABLE, "database unavailable"),
    };

    let (user_id, stored_hash) = match auth_db::get_user_by_username(&conn, &req.username) {
        Ok(Some(user)) => user,
        Ok(None) => return json_error(StatusCode::UNAUTHORIZED, "invalid username or password"),
        Err(_) => return json_error(StatusCode::INTERNAL_SERVER_ERROR, "database error"),
    };

    if !password::verify_password(&req.password, &stored_hash) {
        return json_error(StatusCode::UNAUTHORIZED, "invalid username or password");
    }

    let session_id = generate_session_id();
    if auth_db::create_session(&conn, user_id, &session_id, SESSION_DURATION_HOURS).is_err() {
        return json_error(StatusCode::INTERNAL_SERVER_ERROR, "login failed");
    }
    let _ = auth_db::update_last_login(&conn, user_id);

    tracing::info!("User '{}' logged in", req.username);
    (
        StatusCode::OK,
        jar.add(session_cookie(session_id)),
        Json(json!({"username": req.username})),
    )
        .into_response()
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        if let Ok(conn) = db::try_lock(&state.auth_db) {
            let _ = auth_db::delete_session(&conn, cookie.value());
        }
    }

    let mut removal = Cookie::from(SESSION_COOKIE_NAME);
    removal.set_path("/");
    (jar.remove(removal), Json(json!({"ok": true}))).into_response()
}
