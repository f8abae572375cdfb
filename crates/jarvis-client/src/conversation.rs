//! Conversation state and request lifecycle.
//!
//! [`Conversation`] owns the message list, the id counter, and the
//! single-request in-flight guard. The UI drives it through three
//! operations: [`Conversation::begin_send`] before issuing the HTTP
//! request, [`Conversation::complete_send`] with the request's outcome,
//! and [`Conversation::clear`].

use tracing::error;

use crate::api::{ApiError, JobResponse};
use crate::message::{Message, MessageMetadata};

/// Greeting shown when the app starts.
pub const INITIAL_GREETING: &str = "Hello! I'm JarvisAI, your intelligent assistant. \
    I can help you with web browsing, data extraction, research, and many other tasks. \
    What would you like me to do today?";

/// Greeting shown after the chat is cleared.
pub const CLEARED_GREETING: &str = "Chat cleared! How can I help you today?";

/// Body used when a successful response carries no text at all.
pub const EMPTY_RESPONSE_FALLBACK: &str =
    "I completed your request, but no response was provided.";

/// Body of the error message appended when a send fails. The underlying
/// error is logged, never shown verbatim.
pub const SEND_FAILURE_APOLOGY: &str = "Sorry, I encountered an error while processing \
    your request. Please try again or check if the backend server is running.";

/// The conversation thread: an append-only message list plus the state of
/// the one request that may be in flight.
#[derive(Debug)]
pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
    in_flight: bool,
}

impl Conversation {
    /// Create a conversation seeded with the initial greeting.
    pub fn new() -> Self {
        let mut conv = Self {
            messages: Vec::new(),
            next_id: 1,
            in_flight: false,
        };
        let id = conv.allocate_id();
        conv.messages.push(Message::assistant(id, INITIAL_GREETING));
        conv
    }

    /// The messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether a send is currently in flight.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// The newest assistant message, if any.
    pub fn last_assistant(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| !m.is_user())
    }

    /// Start a send: append the user message and raise the in-flight
    /// guard, returning the prompt to submit.
    ///
    /// Returns `None` (a complete no-op) when the input is empty or
    /// whitespace-only, or when a request is already in flight.
    pub fn begin_send(&mut self, input: &str) -> Option<String> {
        if input.trim().is_empty() || self.in_flight {
            return None;
        }

        let id = self.allocate_id();
        self.messages.push(Message::user(id, input));
        self.in_flight = true;
        Some(input.to_string())
    }

    /// Finish a send with the request's outcome.
    ///
    /// Appends exactly one assistant message, either the mapped response
    /// or the fixed apology, and clears the in-flight guard in both
    /// cases.
    pub fn complete_send(&mut self, outcome: Result<JobResponse, ApiError>) {
        let id = self.allocate_id();
        let message = match outcome {
            Ok(response) => assistant_from_response(id, response),
            Err(e) => {
                error!(error = %e, "job submission failed");
                Message::error(id, SEND_FAILURE_APOLOGY)
            }
        };
        self.messages.push(message);
        self.in_flight = false;
    }

    /// Atomically replace the whole list with the cleared-chat greeting.
    /// Irreversible; no confirmation, no undo.
    pub fn clear(&mut self) {
        let id = self.allocate_id();
        self.messages = vec![Message::assistant(id, CLEARED_GREETING)];
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a successful job response to an assistant message.
///
/// Content fallback chain: `result.response`, then the top-level
/// `message`, then the fixed placeholder.
fn assistant_from_response(id: u64, response: JobResponse) -> Message {
    let result = response.result.unwrap_or_default();
    let content = result
        .response
        .or(response.message)
        .unwrap_or_else(|| EMPTY_RESPONSE_FALLBACK.to_string());

    let metadata = MessageMetadata {
        job_id: response.job_id,
        processing_time_ms: response.processing_time,
        agent: result.agent,
        is_completed: result.is_completed,
        total_iterations: result.total_iterations,
        agent_chain: response.agent_chain.unwrap_or_default(),
    };

    Message::assistant(id, content).with_metadata(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn mock_success() -> JobResponse {
        serde_json::from_str(
            r#"{
                "jobId": "job-1",
                "processingTime": 1500,
                "agentChain": ["router", "research"],
                "result": {
                    "response": "Paris is the capital",
                    "agent": "research",
                    "isCompleted": true,
                    "totalIterations": 3
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_starts_with_greeting() {
        let conv = Conversation::new();
        assert_eq!(conv.messages().len(), 1);
        assert_eq!(conv.messages()[0].content, INITIAL_GREETING);
        assert!(!conv.is_in_flight());
    }

    #[test]
    fn test_whitespace_input_is_noop() {
        let mut conv = Conversation::new();
        assert!(conv.begin_send("").is_none());
        assert!(conv.begin_send("   \n\t  ").is_none());
        assert_eq!(conv.messages().len(), 1);
        assert!(!conv.is_in_flight());
    }

    #[test]
    fn test_begin_send_appends_one_user_message() {
        let mut conv = Conversation::new();
        let prompt = conv.begin_send("What is the capital of France?");
        assert_eq!(prompt.as_deref(), Some("What is the capital of France?"));
        assert_eq!(conv.messages().len(), 2);
        assert!(conv.messages()[1].is_user());
        assert!(conv.is_in_flight());
    }

    #[test]
    fn test_second_send_while_in_flight_is_noop() {
        let mut conv = Conversation::new();
        assert!(conv.begin_send("first").is_some());
        assert!(conv.begin_send("second").is_none());
        assert_eq!(conv.messages().len(), 2);
    }

    #[test]
    fn test_successful_send_round_trip() {
        let mut conv = Conversation::new();
        conv.begin_send("What is the capital of France?").unwrap();
        conv.complete_send(Ok(mock_success()));

        assert!(!conv.is_in_flight());
        assert_eq!(conv.messages().len(), 3);

        let reply = conv.messages().last().unwrap();
        assert_eq!(reply.content, "Paris is the capital");
        assert!(!reply.is_error);

        let meta = reply.metadata.as_ref().unwrap();
        assert!(meta.is_completed);
        assert_eq!(meta.agent.as_deref(), Some("research"));
        assert_eq!(meta.processing_time_ms, Some(1500));
        assert_eq!(meta.total_iterations, Some(3));
        assert_eq!(meta.agent_chain, vec!["router", "research"]);
        assert_eq!(meta.job_id.as_deref(), Some("job-1"));
    }

    #[test]
    fn test_failed_send_appends_apology() {
        let mut conv = Conversation::new();
        conv.begin_send("hello").unwrap();
        conv.complete_send(Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR)));

        assert!(!conv.is_in_flight());
        let reply = conv.messages().last().unwrap();
        assert!(reply.is_error);
        assert_eq!(reply.content, SEND_FAILURE_APOLOGY);
        assert!(reply.metadata.is_none());
    }

    #[test]
    fn test_send_allowed_again_after_completion() {
        let mut conv = Conversation::new();
        conv.begin_send("first").unwrap();
        conv.complete_send(Err(ApiError::Status(StatusCode::BAD_GATEWAY)));
        assert!(conv.begin_send("second").is_some());
    }

    #[test]
    fn test_content_falls_back_to_message() {
        let mut conv = Conversation::new();
        conv.begin_send("hi").unwrap();
        let response: JobResponse =
            serde_json::from_str(r#"{"message": "Job accepted"}"#).unwrap();
        conv.complete_send(Ok(response));
        assert_eq!(conv.messages().last().unwrap().content, "Job accepted");
    }

    #[test]
    fn test_content_falls_back_to_placeholder() {
        let mut conv = Conversation::new();
        conv.begin_send("hi").unwrap();
        conv.complete_send(Ok(JobResponse::default()));
        assert_eq!(
            conv.messages().last().unwrap().content,
            EMPTY_RESPONSE_FALLBACK
        );
    }

    #[test]
    fn test_clear_resets_to_single_greeting() {
        let mut conv = Conversation::new();
        conv.begin_send("one").unwrap();
        conv.complete_send(Ok(mock_success()));
        conv.begin_send("two").unwrap();
        conv.complete_send(Ok(mock_success()));
        assert!(conv.messages().len() > 1);

        conv.clear();
        assert_eq!(conv.messages().len(), 1);
        assert_eq!(conv.messages()[0].content, CLEARED_GREETING);
    }

    #[test]
    fn test_ids_are_unique_and_monotonic() {
        let mut conv = Conversation::new();
        conv.begin_send("one").unwrap();
        conv.complete_send(Ok(JobResponse::default()));
        conv.begin_send("two").unwrap();
        conv.complete_send(Ok(JobResponse::default()));

        let ids: Vec<u64> = conv.messages().iter().map(|m| m.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len());
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
