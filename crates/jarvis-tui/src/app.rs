//! Application state and update logic for the jarvis TUI.

use crate::event::Action;
use crate::ui::widgets::TextInputState;
use jarvis_client::{
    AgentInfo, ApiError, ClientConfig, Conversation, JobResponse, SystemStatus,
};

/// Ticks a copy confirmation stays visible (8 ticks at 250ms = 2s).
const COPY_CONFIRM_TICKS: usize = 8;

/// Ticks a notification stays visible.
const NOTIFICATION_TICKS: usize = 12;

/// State of the system info overlay's fetch cycle.
#[derive(Debug, Default)]
pub struct SystemInfoState {
    /// Whether a fetch is currently in flight.
    pub loading: bool,
    /// Error from the last fetch, if it failed.
    pub error: Option<String>,
    /// Server status from the last successful fetch.
    pub health: Option<SystemStatus>,
    /// Agent roster from the last successful fetch.
    pub agents: Option<AgentInfo>,
}

impl SystemInfoState {
    /// Whether we have nothing to show yet (first open, fetch pending).
    pub fn is_empty(&self) -> bool {
        self.health.is_none() && self.agents.is_none() && self.error.is_none()
    }
}

/// Application state.
#[allow(clippy::struct_excessive_bools)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Whether the system info overlay is visible.
    pub show_system_info: bool,

    /// Client configuration (API endpoints, app identity).
    pub config: ClientConfig,

    /// Chat history and send lifecycle.
    pub conversation: Conversation,

    /// Prompt input field state.
    pub input: TextInputState,

    /// System info overlay state.
    pub system_info: SystemInfoState,

    /// Scroll offset into the message list (lines from the top).
    pub scroll: usize,

    /// Whether to keep the view pinned to the newest message.
    pub follow: bool,

    /// Tick counter for animations.
    pub tick: usize,

    /// Ticks remaining on the copy confirmation indicator.
    copied_ttl: usize,

    /// Notification message (displayed temporarily, cleared after some ticks).
    pub notification: Option<String>,

    /// Ticks remaining until notification is cleared.
    notification_ttl: usize,
}

impl App {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            show_system_info: false,
            config,
            conversation: Conversation::new(),
            input: TextInputState::default(),
            system_info: SystemInfoState::default(),
            scroll: 0,
            follow: true,
            tick: 0,
            copied_ttl: 0,
            notification: None,
            notification_ttl: 0,
        }
    }

    /// Handle a UI action. Returns side effects for the run loop via state
    /// flags (`should_quit`, `pending` markers checked by the caller).
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Help => self.show_help = !self.show_help,
            Action::ToggleSystemInfo => {
                self.show_system_info = !self.show_system_info;
            }
            Action::ClearChat => {
                if !self.conversation.is_in_flight() {
                    self.conversation.clear();
                    self.scroll = 0;
                    self.follow = true;
                    self.set_notification("Chat cleared".to_string());
                }
            }
            Action::CopyLast => self.copy_last_reply(),
            Action::ScrollUp => {
                self.follow = false;
                self.scroll = self.scroll.saturating_sub(5);
            }
            Action::ScrollDown => {
                self.scroll = self.scroll.saturating_add(5);
            }
            Action::Back => {
                if self.show_help {
                    self.show_help = false;
                } else if self.show_system_info {
                    self.show_system_info = false;
                }
            }
            Action::Refresh | Action::None => {}
        }
    }

    /// Take the prompt out of the input field and record the outgoing user
    /// message. Returns the prompt to submit, or `None` if nothing should be
    /// sent (blank input, or a request already in flight).
    pub fn begin_send(&mut self) -> Option<String> {
        let draft = self.input.content().to_string();
        let prompt = self.conversation.begin_send(&draft)?;
        self.input.submit();
        self.follow = true;
        Some(prompt)
    }

    /// Record the outcome of a completed send task.
    pub fn complete_send(&mut self, outcome: Result<JobResponse, ApiError>) {
        self.conversation.complete_send(outcome);
        self.follow = true;
    }

    /// Mark the system info fetch as started. Returns false if one is
    /// already in flight.
    pub fn begin_refresh(&mut self) -> bool {
        if self.system_info.loading {
            return false;
        }
        self.system_info.loading = true;
        self.system_info.error = None;
        true
    }

    /// Record the outcome of a system info fetch.
    pub fn complete_refresh(&mut self, outcome: Result<(SystemStatus, AgentInfo), ApiError>) {
        self.system_info.loading = false;
        match outcome {
            Ok((health, agents)) => {
                self.system_info.health = Some(health);
                self.system_info.agents = Some(agents);
                self.system_info.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "system info fetch failed");
                self.system_info.error = Some(format!("Failed to fetch system information: {e}"));
            }
        }
    }

    /// Copy the newest assistant reply to the system clipboard.
    fn copy_last_reply(&mut self) {
        let Some(message) = self.conversation.last_assistant() else {
            return;
        };
        let content = message.content.clone();
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(content)) {
            Ok(()) => {
                self.copied_ttl = COPY_CONFIRM_TICKS;
            }
            Err(e) => {
                tracing::warn!(error = %e, "clipboard copy failed");
                self.set_notification("Copy failed: no clipboard available".to_string());
            }
        }
    }

    /// Whether the copy confirmation indicator is currently showing.
    pub fn copy_confirmed(&self) -> bool {
        self.copied_ttl > 0
    }

    /// Set a temporary notification message.
    pub fn set_notification(&mut self, msg: String) {
        self.notification = Some(msg);
        self.notification_ttl = NOTIFICATION_TICKS;
    }

    /// Advance animation and expire timed indicators.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        if self.copied_ttl > 0 {
            self.copied_ttl -= 1;
        }

        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }
    }

    /// Current spinner frame for the thinking indicator.
    pub fn spinner_frame(&self) -> &'static str {
        use crate::ui::theme::Symbols;
        Symbols::SPINNER[self.tick % Symbols::SPINNER.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(ClientConfig::default())
    }

    #[test]
    fn test_begin_send_consumes_input() {
        let mut a = app();
        a.input.insert_str("find flight prices");
        let prompt = a.begin_send();
        assert_eq!(prompt.as_deref(), Some("find flight prices"));
        assert!(a.input.is_empty());
        assert!(a.conversation.is_in_flight());
    }

    #[test]
    fn test_begin_send_rejects_blank_input() {
        let mut a = app();
        a.input.insert_str("   ");
        assert!(a.begin_send().is_none());
        assert!(!a.conversation.is_in_flight());
    }

    #[test]
    fn test_begin_send_rejects_while_in_flight() {
        let mut a = app();
        a.input.insert_str("first");
        assert!(a.begin_send().is_some());
        a.input.insert_str("second");
        assert!(a.begin_send().is_none());
        // The draft stays in the input for when the reply lands.
        assert_eq!(a.input.content(), "second");
    }

    #[test]
    fn test_clear_chat_blocked_while_in_flight() {
        let mut a = app();
        a.input.insert_str("hello");
        let _ = a.begin_send();
        let before = a.conversation.messages().len();
        a.handle_action(Action::ClearChat);
        assert_eq!(a.conversation.messages().len(), before);
    }

    #[test]
    fn test_refresh_guard() {
        let mut a = app();
        assert!(a.begin_refresh());
        assert!(!a.begin_refresh());
        a.complete_refresh(Err(ApiError::Status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        )));
        assert!(!a.system_info.loading);
        assert!(a.system_info.error.is_some());
        assert!(a.begin_refresh());
    }

    #[test]
    fn test_notification_expires() {
        let mut a = app();
        a.set_notification("saved".to_string());
        assert!(a.notification.is_some());
        for _ in 0..NOTIFICATION_TICKS {
            a.tick();
        }
        assert!(a.notification.is_none());
    }

    #[test]
    fn test_copy_confirmation_expires_after_two_seconds() {
        let mut a = app();
        a.copied_ttl = COPY_CONFIRM_TICKS;
        assert!(a.copy_confirmed());
        for _ in 0..COPY_CONFIRM_TICKS {
            a.tick();
        }
        assert!(!a.copy_confirmed());
    }

    #[test]
    fn test_escape_closes_overlays() {
        let mut a = app();
        a.show_help = true;
        a.handle_action(Action::Back);
        assert!(!a.show_help);
        a.show_system_info = true;
        a.handle_action(Action::Back);
        assert!(!a.show_system_info);
    }
}
