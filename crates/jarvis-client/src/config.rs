//! Client configuration.
//!
//! All settings are resolved once at startup from environment variables
//! with sensible defaults, mirroring the build-time configuration surface
//! of the backend deployment.

use std::time::Duration;

/// Environment variable for the API base URL.
const ENV_API_BASE: &str = "JARVIS_API_BASE";
/// Environment variable for the display name of the application.
const ENV_APP_NAME: &str = "JARVIS_APP_NAME";
/// Environment variable for the build mode label.
const ENV_MODE: &str = "JARVIS_MODE";
/// Environment variable for the optional transport timeout in seconds.
const ENV_TIMEOUT_SECS: &str = "JARVIS_TIMEOUT_SECS";

/// Default API base when none is configured.
const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the job API (e.g. `http://localhost:3000/api`).
    pub api_base: String,
    /// Application display name.
    pub app_name: String,
    /// Application version (from the build).
    pub app_version: String,
    /// Build mode label ("development" / "production").
    pub mode: String,
    /// Optional transport timeout. `None` leaves the transport default in
    /// place; a stalled backend then pins the UI in its loading state.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Resolve configuration from the environment.
    pub fn from_env() -> Self {
        let api_base = std::env::var(ENV_API_BASE)
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let app_name =
            std::env::var(ENV_APP_NAME).unwrap_or_else(|_| "JarvisAI".to_string());
        let mode = std::env::var(ENV_MODE).unwrap_or_else(|_| default_mode().to_string());
        let request_timeout = std::env::var(ENV_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs);

        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            app_name,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            mode,
            request_timeout,
        }
    }

    /// URL of the job-submission endpoint.
    pub fn jobs_url(&self) -> String {
        format!("{}/jobs", self.api_base)
    }

    /// URL of the agents-info endpoint.
    pub fn agents_url(&self) -> String {
        format!("{}/jobs/agents", self.api_base)
    }

    /// URL of the health endpoint.
    ///
    /// The health route is mounted on the server root rather than under
    /// the API prefix, so the trailing `/api` segment is stripped.
    pub fn health_url(&self) -> String {
        let root = self
            .api_base
            .strip_suffix("/api")
            .unwrap_or(&self.api_base);
        format!("{root}/health")
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            app_name: "JarvisAI".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            mode: default_mode().to_string(),
            request_timeout: None,
        }
    }
}

fn default_mode() -> &'static str {
    if cfg!(debug_assertions) {
        "development"
    } else {
        "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base, "http://localhost:3000/api");
        assert_eq!(config.app_name, "JarvisAI");
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_endpoint_urls() {
        let config = ClientConfig::default();
        assert_eq!(config.jobs_url(), "http://localhost:3000/api/jobs");
        assert_eq!(config.agents_url(), "http://localhost:3000/api/jobs/agents");
    }

    #[test]
    fn test_health_url_strips_api_suffix() {
        let config = ClientConfig::default();
        assert_eq!(config.health_url(), "http://localhost:3000/health");
    }

    #[test]
    fn test_health_url_without_api_suffix() {
        let config = ClientConfig {
            api_base: "http://localhost:4000".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(config.health_url(), "http://localhost:4000/health");
    }
}
