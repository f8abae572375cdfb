//! jarvis-tui: Terminal UI for the JarvisAI agent backend
//!
//! This crate provides the chat interface for jarvis, including:
//! - Conversation view with markdown rendering
//! - Prompt input with history
//! - System info overlay (server health, agent roster)

pub mod app;
pub mod event;
pub mod markdown;
mod screens;
mod ui;

use screens::Screen as ScreenTrait;

pub use app::{App, SystemInfoState};
pub use event::{Action, Event, EventHandler};
pub use jarvis_client;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use jarvis_client::{AgentInfo, ApiClient, ApiError, ClientConfig, JobResponse, SystemStatus};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit.
pub async fn run_tui(config: ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = ApiClient::new(config.clone())?;

    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    // Create event handler (4 Hz tick rate = 250ms)
    let mut events = EventHandler::new(250);

    let result = run_loop(&mut terminal, &mut app, &mut events, &client).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    client: &ApiClient,
) -> Result<(), Box<dyn std::error::Error>> {
    // At most one send and one status fetch in flight at a time
    let mut send_handle: Option<tokio::task::JoinHandle<Result<JobResponse, ApiError>>> = None;
    let mut status_handle: Option<
        tokio::task::JoinHandle<Result<(SystemStatus, AgentInfo), ApiError>>,
    > = None;

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();

            screens::chat::ChatScreen.render(app, area, buf);

            if app.show_system_info {
                screens::system_info::render_system_info_overlay(app, area, buf);
            }
            if app.show_help {
                screens::render_help_overlay(area, buf);
            }
        })?;

        // Collect the finished send task, if any (non-blocking)
        if send_handle.as_ref().is_some_and(tokio::task::JoinHandle::is_finished) {
            if let Some(handle) = send_handle.take() {
                match handle.await {
                    Ok(outcome) => app.complete_send(outcome),
                    Err(e) => {
                        tracing::error!(error = %e, "send task panicked");
                        app.complete_send(Err(ApiError::TaskFailed));
                    }
                }
            }
        }

        // Collect the finished status fetch, if any
        if status_handle.as_ref().is_some_and(tokio::task::JoinHandle::is_finished) {
            if let Some(handle) = status_handle.take() {
                match handle.await {
                    Ok(outcome) => app.complete_refresh(outcome),
                    Err(e) => {
                        tracing::error!(error = %e, "status task panicked");
                        app.complete_refresh(Err(ApiError::TaskFailed));
                    }
                }
            }
        }

        // Opening the overlay with nothing loaded kicks off a fetch
        if app.show_system_info && app.system_info.is_empty() && !app.system_info.loading {
            start_refresh(app, client, &mut status_handle);
        }

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if handle_input_key(app, key, client, &mut send_handle) {
                        continue;
                    }
                    let action = event::key_to_action(key);
                    if action == Action::Refresh && app.show_system_info {
                        start_refresh(app, client, &mut status_handle);
                    }
                    app.handle_action(action);
                    // A fresh fetch every time the overlay opens
                    if action == Action::ToggleSystemInfo && app.show_system_info {
                        start_refresh(app, client, &mut status_handle);
                    }
                }
                Event::Mouse(mouse) => {
                    use crossterm::event::MouseEventKind;
                    match mouse.kind {
                        MouseEventKind::ScrollUp => app.handle_action(Action::ScrollUp),
                        MouseEventKind::ScrollDown => app.handle_action(Action::ScrollDown),
                        _ => {}
                    }
                }
                Event::Tick => {
                    app.tick();
                }
                Event::Resize(_, _) => {
                    // Terminal handles resize on the next draw
                }
            }
        }

        if app.should_quit {
            if let Some(handle) = send_handle.take() {
                handle.abort();
            }
            if let Some(handle) = status_handle.take() {
                handle.abort();
            }
            break;
        }
    }

    Ok(())
}

fn start_refresh(
    app: &mut App,
    client: &ApiClient,
    status_handle: &mut Option<tokio::task::JoinHandle<Result<(SystemStatus, AgentInfo), ApiError>>>,
) {
    if !app.begin_refresh() {
        return;
    }
    let client = client.clone();
    *status_handle = Some(tokio::spawn(
        async move { client.fetch_system_info().await },
    ));
}

/// Handle key input for the prompt field.
///
/// Returns true if the key was consumed (should not be processed as an
/// action). Control combinations fall through to the action mapping.
fn handle_input_key(
    app: &mut App,
    key: KeyEvent,
    client: &ApiClient,
    send_handle: &mut Option<tokio::task::JoinHandle<Result<JobResponse, ApiError>>>,
) -> bool {
    // Overlays swallow plain keys so typing does not leak into the prompt
    if app.show_help || app.show_system_info {
        return false;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        // Ctrl+J inserts a newline, everything else is an action
        if key.code == KeyCode::Char('j') {
            app.input.insert('\n');
            return true;
        }
        return false;
    }

    match key.code {
        KeyCode::Enter => {
            if let Some(prompt) = app.begin_send() {
                let client = client.clone();
                *send_handle = Some(tokio::spawn(
                    async move { client.submit_job(&prompt).await },
                ));
            }
            true
        }
        KeyCode::Char(c) => {
            app.input.insert(c);
            true
        }
        KeyCode::Backspace => {
            app.input.backspace();
            true
        }
        KeyCode::Delete => {
            app.input.delete();
            true
        }
        KeyCode::Left => {
            app.input.move_left();
            true
        }
        KeyCode::Right => {
            app.input.move_right();
            true
        }
        KeyCode::Home => {
            app.input.move_home();
            true
        }
        KeyCode::End => {
            app.input.move_end();
            true
        }
        KeyCode::Up if app.input.is_empty() || app.input.history_active() => {
            app.input.history_prev();
            true
        }
        KeyCode::Down if app.input.history_active() => {
            app.input.history_next();
            true
        }
        _ => false,
    }
}
