//! Project path functions - single source of truth for all file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//! - `PORT`: Override the server port (see config.rs)
//!
//! This allows running multiple isolated server instances for E2E testing:
//! ```bash
//! DATA_DIR=data/test/a PORT=3001 cargo run
//! DATA_DIR=data/test/b PORT=3002 cargo run
//! ```

use std::env;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
    DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// Auth database path (shared, multi-user)
pub fn auth_db_path() -> String {
    format!("{}/app.db", data_dir())
}

/// Users directory (contains per-user learning.db)
pub fn users_dir() -> String {
    format!("{}/users", data_dir())
}

/// Get user directory path
pub fn user_dir(username: &str) -> String {
    format!("{}/{username}", users_dir())
}

/// Get user learning database path
pub fn user_db_path(username: &str) -> String {
    format!("{}/{username}/learning.db", users_dir())
}

/// Shared content directory
pub fn content_dir() -> String {
    format!("{}/content", data_dir())
}

/// Quiz catalog directory (category-*.json documents)
pub fn category_dir() -> String {
    format!("{}/content/category", data_dir())
}

/// Quiz thumbnail images, served at /img
pub fn images_dir() -> String {
    format!("{}/img", data_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: We can't easily test env var override because OnceLock
    // initializes once. These tests verify the default behavior.

    #[test]
    fn test_data_dir_default() {
        let dir = data_dir();
        assert!(!dir.is_empty());
    }

    #[test]
    fn test_auth_db_path_format() {
        let path = auth_db_path();
        assert!(path.ends_with("/app.db"));
    }

    #[test]
    fn test_users_dir_format() {
        let path = users_dir();
        assert!(path.ends_with("/users"));
    }

    #[test]
    fn test_user_db_path() {
        let path = user_db_path("alice");
        assert!(path.contains("/alice/learning.db"));
    }

    #[test]
    fn test_category_dir_format() {
        let path = category_dir();
        assert!(path.ends_with("/content/category"));
    }
}
