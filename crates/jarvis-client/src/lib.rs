//! jarvis-client: Headless client for the JarvisAI agent backend
//!
//! This crate provides everything below the terminal UI, including:
//! - Configuration resolved from the environment
//! - The conversation model and request lifecycle
//! - The HTTP API client (jobs, health, agent info)
//! - Display formatting helpers

pub mod api;
pub mod config;
pub mod conversation;
pub mod format;
pub mod message;

// Re-export commonly used types
pub use api::{
    AgentInfo, AgentStats, AgentSummary, ApiClient, ApiError, JobRequest, JobResponse, JobResult,
    SystemStatus,
};
pub use config::ClientConfig;
pub use conversation::{
    Conversation, CLEARED_GREETING, EMPTY_RESPONSE_FALLBACK, INITIAL_GREETING,
    SEND_FAILURE_APOLOGY,
};
pub use message::{Message, MessageMetadata, Sender};

/// Returns the client version.
pub fn client_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_version() {
        let version = client_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
