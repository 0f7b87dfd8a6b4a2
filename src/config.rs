//! Server configuration, loaded from environment variables.
//!
//! Every key has a default, so a bare `cargo run` serves a working wall on
//! port 3000 backed by `/tmp/wall-images.json`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_FILE: &str = "/tmp/wall-images.json";
/// Images travel as base64 data URIs, so saves are far above axum's 2 MB default.
const DEFAULT_BODY_LIMIT_MB: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen port (`PORT`).
    pub port: u16,
    /// JSON file holding the wall (`WALL_DATA_FILE`).
    pub data_file: PathBuf,
    /// Built frontend to serve for non-API paths (`WALL_STATIC_DIR`).
    pub static_dir: Option<PathBuf>,
    /// Largest accepted request body in bytes (`WALL_BODY_LIMIT_MB`).
    pub body_limit_bytes: usize,
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            data_file: env_path("WALL_DATA_FILE").unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
            static_dir: env_path("WALL_STATIC_DIR"),
            body_limit_bytes: env_parse("WALL_BODY_LIMIT_MB", DEFAULT_BODY_LIMIT_MB).saturating_mul(1024 * 1024),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// A non-empty path from `key`.
fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
