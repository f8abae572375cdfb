//! Chat screen, the main conversation view.
//!
//! Message list on top, prompt input below, key hints in the status bar.

use crate::app::App;
use crate::markdown::render_markdown;
use crate::screens::Screen;
use crate::ui::chat_layout;
use crate::ui::theme::{Styles, Symbols};
use crate::ui::widgets::{KeyHint, StatusBar, TextInput};
use jarvis_client::format::{format_agent_chain, format_clock, format_millis};
use jarvis_client::{Message, MessageMetadata};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// The chat screen.
pub struct ChatScreen;

impl Screen for ChatScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let (messages_area, input_area, status_area) = chat_layout(area);

        render_messages(app, messages_area, buf);
        render_input(app, input_area, buf);
        render_status(app, status_area, buf);
    }
}

fn render_messages(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(format!(" {} ", app.config.app_name))
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border())
        .style(Styles::default());

    let inner = block.inner(area);
    block.render(area, buf);

    let wrap_width = usize::from(inner.width.saturating_sub(2)).max(20);

    let mut lines: Vec<Line<'static>> = Vec::new();
    for message in app.conversation.messages() {
        lines.extend(message_lines(message, wrap_width));
        lines.push(Line::from(""));
    }

    if app.conversation.is_in_flight() {
        lines.push(Line::from(vec![
            Span::styled(app.spinner_frame().to_string(), Styles::dim()),
            Span::styled(" JarvisAI is thinking...", Styles::dim()),
        ]));
    }

    let total = lines.len();
    let visible = inner.height as usize;
    let max_scroll = total.saturating_sub(visible);
    let scroll = if app.follow {
        max_scroll
    } else {
        app.scroll.min(max_scroll)
    };

    #[allow(clippy::cast_possible_truncation)]
    let paragraph = Paragraph::new(lines).scroll((scroll as u16, 0));
    paragraph.render(inner, buf);
}

/// Build the styled lines for one message: header, body, metadata strip.
fn message_lines(message: &Message, wrap_width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let (label, label_style) = if message.is_user() {
        ("You", Styles::user())
    } else if message.is_error {
        ("JarvisAI", Styles::error())
    } else {
        ("JarvisAI", Styles::assistant())
    };

    lines.push(Line::from(vec![
        Span::styled(label.to_string(), label_style),
        Span::styled(
            format!("  {}", format_clock(message.timestamp)),
            Styles::dim(),
        ),
    ]));

    if message.is_user() {
        // User text is plain, wrapped to the pane width.
        for wrapped in textwrap::wrap(&message.content, wrap_width) {
            lines.push(Line::styled(wrapped.into_owned(), Styles::default()));
        }
    } else if message.is_error {
        for wrapped in textwrap::wrap(&message.content, wrap_width) {
            lines.push(Line::styled(wrapped.into_owned(), Styles::error()));
        }
    } else {
        lines.extend(render_markdown(&message.content));
        // Drop a trailing blank the paragraph renderer leaves behind
        while lines.last().is_some_and(|l| l.spans.is_empty() || l.to_string().is_empty()) {
            lines.pop();
        }
    }

    if let Some(meta) = &message.metadata {
        lines.push(metadata_line(meta));
    }

    lines
}

/// One-line summary of backend metadata under an assistant reply.
fn metadata_line(meta: &MessageMetadata) -> Line<'static> {
    let mut spans = Vec::new();

    if meta.is_completed {
        spans.push(Span::styled(
            format!("{} Completed", Symbols::CHECK),
            Styles::success(),
        ));
    } else {
        spans.push(Span::styled(
            format!("{} Partial", Symbols::WARN),
            Styles::warning(),
        ));
    }

    if let Some(agent) = &meta.agent {
        spans.push(Span::styled(format!("  agent: {agent}"), Styles::dim()));
    }
    if let Some(ms) = meta.processing_time_ms {
        spans.push(Span::styled(format!("  {}", format_millis(ms)), Styles::dim()));
    }
    if let Some(iterations) = meta.total_iterations {
        spans.push(Span::styled(
            format!("  {iterations} iterations"),
            Styles::dim(),
        ));
    }
    if meta.agent_chain.len() > 1 {
        spans.push(Span::styled(
            format!("  {}", format_agent_chain(&meta.agent_chain)),
            Styles::dim(),
        ));
    }

    Line::from(spans)
}

fn render_input(app: &App, area: Rect, buf: &mut Buffer) {
    let in_flight = app.conversation.is_in_flight();

    let border_style = if in_flight {
        Styles::border()
    } else {
        Styles::border_active()
    };

    let block = Block::default()
        .title(" Prompt ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Styles::default());

    TextInput::new(&app.input)
        .block(block)
        .placeholder("Ask JarvisAI anything...")
        .enabled(!in_flight)
        .render(area, buf);
}

fn render_status(app: &App, area: Rect, buf: &mut Buffer) {
    let hints = vec![
        KeyHint::new("Enter", "Send"),
        KeyHint::new("^L", "Clear"),
        KeyHint::new("^Y", "Copy"),
        KeyHint::new("^S", "System"),
        KeyHint::new("^H", "Help"),
        KeyHint::new("^C", "Quit"),
    ];

    let right = if let Some(notification) = &app.notification {
        notification.clone()
    } else if app.copy_confirmed() {
        "Copied!".to_string()
    } else if app.conversation.is_in_flight() {
        "Working".to_string()
    } else {
        "Ready".to_string()
    };

    StatusBar::new("Chat").hints(hints).right(&right).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use jarvis_client::ClientConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_text(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                ChatScreen.render(app, area, f.buffer_mut());
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_renders_initial_greeting() {
        let app = App::new(ClientConfig::default());
        let text = render_to_text(&app);
        assert!(text.contains("JarvisAI"));
        assert!(text.contains("intelligent assistant"));
    }

    #[test]
    fn test_renders_user_message() {
        let mut app = App::new(ClientConfig::default());
        app.input.insert_str("book a flight");
        let _ = app.begin_send();
        let text = render_to_text(&app);
        assert!(text.contains("You"));
        assert!(text.contains("book a flight"));
        assert!(text.contains("thinking"));
    }

    #[test]
    fn test_metadata_line_completed() {
        let meta = MessageMetadata {
            agent: Some("research".to_string()),
            is_completed: true,
            processing_time_ms: Some(1500),
            total_iterations: Some(3),
            agent_chain: vec!["router".to_string(), "research".to_string()],
            ..MessageMetadata::default()
        };
        let line = metadata_line(&meta);
        let text = line.to_string();
        assert!(text.contains("[ok] Completed"));
        assert!(text.contains("agent: research"));
        assert!(text.contains("1.50s"));
        assert!(text.contains("3 iterations"));
        assert!(text.contains("router → research"));
    }

    #[test]
    fn test_metadata_line_partial() {
        let meta = MessageMetadata::default();
        let text = metadata_line(&meta).to_string();
        assert!(text.contains("[!] Partial"));
    }

    #[test]
    fn test_single_agent_chain_not_shown() {
        let meta = MessageMetadata {
            agent_chain: vec!["router".to_string()],
            is_completed: true,
            ..MessageMetadata::default()
        };
        let text = metadata_line(&meta).to_string();
        assert!(!text.contains("router"));
    }
}
