//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Client configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `API_BASE_URL`: backend API root (default: `"http://localhost:8080/api"`)
/// - `API_TIMEOUT_SECS`: per-request timeout in seconds (default: `10`)
/// - `CART_SNAPSHOT_DIR`: directory for cart and auth snapshots (default: `".restaurant"`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub snapshot_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),
            timeout_secs: std::env::var("API_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            snapshot_dir: std::env::var("CART_SNAPSHOT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.snapshot_dir),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Joins `path` onto the API base URL.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 10,
            snapshot_dir: PathBuf::from(".restaurant"),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.snapshot_dir, PathBuf::from(".restaurant"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_url_formatting() {
        let config = Config {
            api_base_url: "http://10.0.0.2:8080/api/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.url_for("/orders/3"), "http://10.0.0.2:8080/api/orders/3");
        assert_eq!(config.url_for("tables"), "http://10.0.0.2:8080/api/tables");
    }
}
