//! Application configuration constants and config.toml loading.

use serde::Deserialize;
use std::path::PathBuf;

use crate::paths;

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
    server: Option<ServerConfig>,
    content: Option<ContentConfig>,
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
    addr: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct ContentConfig {
    dir: Option<String>,
}

// ==================== Server Configuration ====================

/// Default server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Default server port
pub const SERVER_PORT: u16 = 3000;

/// Server bind address with priority: config.toml > PORT env > defaults
pub fn server_bind_addr() -> String {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let mut addr = SERVER_ADDR.to_string();
    let mut port = SERVER_PORT;

    if let Some(server) = read_config().and_then(|c| c.server) {
        if let Some(a) = server.addr {
            addr = a;
        }
        if let Some(p) = server.port {
            port = p;
        }
    } else if let Some(p) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
        port = p;
    }

    format!("{}:{}", addr, port)
}

/// Content directory with priority: config.toml > CONTENT_DIR env > default
pub fn load_content_dir() -> PathBuf {
    let _ = dotenvy::dotenv();

    if let Some(dir) = read_config().and_then(|c| c.content).and_then(|c| c.dir) {
        tracing::info!("Using content dir from config.toml: {}", dir);
        return PathBuf::from(dir);
    }

    if let Ok(dir) = std::env::var("CONTENT_DIR") {
        tracing::info!("Using content dir from CONTENT_DIR env: {}", dir);
        return PathBuf::from(dir);
    }

    PathBuf::from(paths::category_dir())
}

fn read_config() -> Option<AppConfig> {
    let contents = std::fs::read_to_string("config.toml").ok()?;
    match toml::from_str(&contents) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Ignoring malformed config.toml: {}", e);
            None
        }
    }
}

// ==================== Session Configuration ====================

/// Probability threshold for expired-session cleanup (0-255, lower = more frequent)
/// Value of 25 means ~10% chance (25/256) on each authenticated request
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

// ==================== Catalog Configuration ====================

/// Default number of quizzes returned by the catalog listing
pub const DEFAULT_QUIZ_LIST_LIMIT: usize = 24;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_addr_shape() {
        // No config.toml in the test working directory; falls back to defaults
        let addr = server_bind_addr();
        assert!(addr.contains(':'));
    }

    #[test]
    fn test_default_content_dir() {
        let dir = load_content_dir();
        assert!(dir.to_string_lossy().ends_with("category"));
    }
}
