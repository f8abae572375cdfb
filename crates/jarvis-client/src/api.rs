//! HTTP client for the agent backend.
//!
//! Three endpoints: job submission (`POST /jobs`), server health
//! (`GET /health`, mounted above the API prefix), and agent info
//! (`GET /jobs/agents`). Any non-2xx status is treated as a failure.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClientConfig;

/// Body for the job-submission endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    /// The raw user prompt.
    pub user_prompt: String,
}

/// Result payload nested inside a successful job response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobResult {
    /// The agent-produced response text.
    pub response: Option<String>,
    /// Agent that produced the final response.
    pub agent: Option<String>,
    /// Whether the backend considers the job complete.
    pub is_completed: bool,
    /// Number of internal iterations performed.
    pub total_iterations: Option<u64>,
}

/// Response from the job-submission endpoint.
///
/// The backend omits absent fields rather than sending null, so every
/// field defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobResponse {
    /// Backend job identifier.
    pub job_id: Option<String>,
    /// Total processing time in milliseconds.
    pub processing_time: Option<u64>,
    /// Ordered agents the job traversed.
    pub agent_chain: Option<Vec<String>>,
    /// Nested result payload.
    pub result: Option<JobResult>,
    /// Top-level message, used as a fallback when no result is present.
    pub message: Option<String>,
}

/// Response from the health endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemStatus {
    /// Overall server status label (e.g. "ok").
    pub status: String,
    /// Server uptime in seconds.
    pub uptime: f64,
    /// Datastore connection state; healthy when "connected".
    pub mongodb: String,
    /// Agent subsystem state; healthy when "initialized".
    pub agents: String,
}

impl SystemStatus {
    /// Whether the datastore reports a healthy connection.
    pub fn mongodb_healthy(&self) -> bool {
        self.mongodb == "connected"
    }

    /// Whether the agent subsystem reports healthy initialization.
    pub fn agents_healthy(&self) -> bool {
        self.agents == "initialized"
    }
}

/// One agent as reported by the agents-info endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentSummary {
    /// Agent name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Implementation status; the backend omits it for implemented agents.
    pub status: Option<String>,
    /// Capability tags.
    pub capabilities: Vec<String>,
}

/// Aggregate agent statistics.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentStats {
    /// Total tasks processed.
    pub total_tasks: u64,
    /// Currently active agents.
    pub active_agents: Vec<String>,
    /// Average processing time in milliseconds.
    pub avg_processing_time: Option<f64>,
}

/// Response from the agents-info endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentInfo {
    /// Agents the backend can dispatch to.
    pub available_agents: Vec<AgentSummary>,
    /// Aggregate statistics.
    pub stats: Option<AgentStats>,
}

/// Errors returned by the API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent (connection refused, timeout, ...).
    #[error("request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("server returned HTTP {0}")]
    Status(StatusCode),

    /// The response body could not be decoded as the expected JSON shape.
    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// The background task running the request was cancelled or panicked.
    #[error("request task failed")]
    TaskFailed,
}

/// Client for the agent backend.
///
/// Cheap to clone; the underlying `reqwest::Client` is a handle to a
/// shared connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ApiClient {
    /// Build a client from the resolved configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::Http)?;
        Ok(Self { config, http })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submit a prompt as a job and wait for its result.
    pub async fn submit_job(&self, prompt: &str) -> Result<JobResponse, ApiError> {
        let url = self.config.jobs_url();
        debug!(%url, "submitting job");

        let response = self
            .http
            .post(&url)
            .json(&JobRequest {
                user_prompt: prompt.to_string(),
            })
            .send()
            .await
            .map_err(ApiError::Http)?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        response.json().await.map_err(ApiError::Decode)
    }

    /// Fetch the server health status.
    pub async fn fetch_health(&self) -> Result<SystemStatus, ApiError> {
        self.get_json(&self.config.health_url()).await
    }

    /// Fetch agent availability and statistics.
    pub async fn fetch_agents(&self) -> Result<AgentInfo, ApiError> {
        self.get_json(&self.config.agents_url()).await
    }

    /// Fetch health and agent info concurrently.
    ///
    /// The two requests are independent; a failure of either fails the
    /// whole fetch, which is what the status panel's single error state
    /// wants.
    pub async fn fetch_system_info(&self) -> Result<(SystemStatus, AgentInfo), ApiError> {
        let (health, agents) = tokio::join!(self.fetch_health(), self.fetch_agents());
        Ok((health?, agents?))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(%url, "fetching");
        let response = self.http.get(url).send().await.map_err(ApiError::Http)?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        response.json().await.map_err(ApiError::Decode)
    }
}
