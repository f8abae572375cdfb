//! Screen definitions for the jarvis TUI.

pub mod chat;
pub mod system_info;

use crate::app::App;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render the help overlay.
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    use crate::ui::centered_fixed;
    use crate::ui::theme::Styles;
    use ratatui::widgets::{Block, Borders, Clear, Paragraph};

    let help_text = r"
  Chat
    Enter             Send message
    Ctrl+J            Insert newline
    Up/Down           Prompt history (when input is empty)
    Ctrl+L            Clear chat
    Ctrl+Y            Copy last reply

  View
    PageUp/PageDown   Scroll messages
    Ctrl+S            System info
    Ctrl+R            Refresh system info
    Ctrl+H / F1       Toggle this help
    Esc               Close overlay
    Ctrl+C            Quit

  [Press Esc to close]
";

    let width = 54.min(area.width.saturating_sub(4));
    let height = 20.min(area.height.saturating_sub(4));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::default());

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(Styles::default());

    paragraph.render(overlay_area, buf);
}
