//! Markdown rendering using pulldown-cmark.
//!
//! Converts assistant replies to styled ratatui [`Line`]s. Raw HTML events
//! are discarded so backend output cannot inject markup into the terminal.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::ui::theme::Palette;

/// Style set used by the renderer.
#[derive(Debug, Clone, Copy)]
struct MarkdownStyles {
    text: Style,
    emphasis: Style,
    strong: Style,
    strikethrough: Style,
    code: Style,
    code_block: Style,
    link: Style,
    list_marker: Style,
    blockquote: Style,
    h1: Style,
    h2: Style,
    h3: Style,
}

impl Default for MarkdownStyles {
    fn default() -> Self {
        Self {
            text: Style::default().fg(Palette::FG),
            emphasis: Style::default().add_modifier(Modifier::ITALIC),
            strong: Style::default().add_modifier(Modifier::BOLD),
            strikethrough: Style::default().add_modifier(Modifier::CROSSED_OUT),
            code: Style::default().fg(Palette::ACCENT),
            code_block: Style::default().fg(Palette::ACCENT),
            link: Style::default()
                .fg(Palette::ACCENT)
                .add_modifier(Modifier::UNDERLINED),
            list_marker: Style::default().fg(Palette::ACCENT),
            blockquote: Style::default().fg(Palette::DIM),
            h1: Style::default()
                .fg(Palette::ACCENT)
                .add_modifier(Modifier::BOLD),
            h2: Style::default()
                .fg(Palette::ACCENT)
                .add_modifier(Modifier::BOLD),
            h3: Style::default().add_modifier(Modifier::BOLD),
        }
    }
}

/// Render markdown text to styled ratatui Lines.
pub fn render_markdown(input: &str) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(input, options);

    let mut renderer = MarkdownRenderer::new(MarkdownStyles::default());
    renderer.run(parser);
    renderer.lines
}

/// Internal renderer that processes pulldown-cmark events.
struct MarkdownRenderer {
    lines: Vec<Line<'static>>,
    styles: MarkdownStyles,
    /// Stack of active styles for nested formatting.
    style_stack: Vec<Style>,
    /// Current line being built.
    current_spans: Vec<Span<'static>>,
    /// Current indentation level (for nested lists).
    indent_level: usize,
    in_code_block: bool,
    in_blockquote: bool,
    /// Pending list marker to prepend to next text.
    pending_list_marker: Option<String>,
    /// Task list checkbox state (Some(checked) if in task item).
    task_checkbox: Option<bool>,
}

impl MarkdownRenderer {
    fn new(styles: MarkdownStyles) -> Self {
        Self {
            lines: Vec::new(),
            styles,
            style_stack: Vec::new(),
            current_spans: Vec::new(),
            indent_level: 0,
            in_code_block: false,
            in_blockquote: false,
            pending_list_marker: None,
            task_checkbox: None,
        }
    }

    fn run<'a>(&mut self, parser: impl Iterator<Item = Event<'a>>) {
        for event in parser {
            self.handle_event(event);
        }
        self.flush_line();
    }

    #[allow(clippy::too_many_lines)]
    fn handle_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush_line();
                let style = self.heading_style(level);
                self.style_stack.push(style);
            }
            Event::End(TagEnd::Heading(_)) => {
                self.flush_line();
                self.style_stack.pop();
            }

            Event::Start(Tag::Emphasis) => {
                self.style_stack.push(self.styles.emphasis);
            }
            Event::Start(Tag::Strong) => {
                self.style_stack.push(self.styles.strong);
            }
            Event::Start(Tag::Strikethrough) => {
                self.style_stack.push(self.styles.strikethrough);
            }
            Event::End(TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link) => {
                self.style_stack.pop();
            }

            Event::Start(Tag::CodeBlock(_)) => {
                self.flush_line();
                self.in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                self.flush_line();
                self.in_code_block = false;
            }

            Event::Start(Tag::List(_)) => {
                self.flush_line();
                self.indent_level += 1;
            }
            Event::End(TagEnd::List(_)) => {
                self.indent_level = self.indent_level.saturating_sub(1);
            }

            Event::Start(Tag::Item) => {
                self.flush_line();
                let indent = "  ".repeat(self.indent_level.saturating_sub(1));
                self.pending_list_marker = Some(format!("{indent}• "));
            }
            Event::End(TagEnd::Item) => {
                self.flush_line();
                self.task_checkbox = None;
            }

            Event::TaskListMarker(checked) => {
                self.task_checkbox = Some(checked);
            }

            Event::Start(Tag::BlockQuote) => {
                self.flush_line();
                self.in_blockquote = true;
            }
            Event::End(TagEnd::BlockQuote) => {
                self.flush_line();
                self.in_blockquote = false;
            }

            Event::Start(Tag::Link { .. }) => {
                self.style_stack.push(self.styles.link);
            }

            Event::End(TagEnd::Paragraph) => {
                self.flush_line();
                // Blank line after paragraph
                self.lines.push(Line::from(""));
            }

            Event::Text(text) => {
                self.add_text(&text);
            }

            Event::Code(code) => {
                let style = self.styles.code;
                self.current_spans
                    .push(Span::styled(format!("`{code}`"), style));
            }

            Event::SoftBreak => {
                self.add_text(" ");
            }
            Event::HardBreak => {
                self.flush_line();
            }

            // Raw HTML is dropped, everything else has no terminal rendering
            Event::Start(
                Tag::Paragraph
                | Tag::Image { .. }
                | Tag::Table(_)
                | Tag::TableHead
                | Tag::TableRow
                | Tag::TableCell
                | Tag::FootnoteDefinition(_)
                | Tag::MetadataBlock(_)
                | Tag::HtmlBlock,
            )
            | Event::End(
                TagEnd::Image
                | TagEnd::Table
                | TagEnd::TableHead
                | TagEnd::TableRow
                | TagEnd::TableCell
                | TagEnd::FootnoteDefinition
                | TagEnd::MetadataBlock(_)
                | TagEnd::HtmlBlock,
            )
            | Event::Html(_)
            | Event::InlineHtml(_)
            | Event::FootnoteReference(_)
            | Event::Rule => {}
        }
    }

    fn add_text(&mut self, text: &str) {
        if self.in_code_block {
            for line in text.lines() {
                let indent = "  ".repeat(self.indent_level.saturating_sub(1));
                self.current_spans.push(Span::styled(
                    format!("{indent}  {line}"),
                    self.styles.code_block,
                ));
                self.flush_line();
            }
            return;
        }

        if let Some(marker) = self.pending_list_marker.take() {
            self.current_spans
                .push(Span::styled(marker, self.styles.list_marker));
            if let Some(checked) = self.task_checkbox.take() {
                let checkbox = if checked { "[x] " } else { "[ ] " };
                self.current_spans
                    .push(Span::styled(checkbox, self.styles.list_marker));
            }
        }

        if self.in_blockquote && self.current_spans.is_empty() {
            self.current_spans
                .push(Span::styled("> ".to_string(), self.styles.blockquote));
        }

        let style = self.current_style();
        self.current_spans
            .push(Span::styled(text.to_string(), style));
    }

    fn current_style(&self) -> Style {
        let mut style = self.styles.text;
        for s in &self.style_stack {
            style = style.patch(*s);
        }
        style
    }

    fn heading_style(&self, level: HeadingLevel) -> Style {
        match level {
            HeadingLevel::H1 => self.styles.h1,
            HeadingLevel::H2 => self.styles.h2,
            _ => self.styles.h3,
        }
    }

    fn flush_line(&mut self) {
        if !self.current_spans.is_empty() {
            let spans = std::mem::take(&mut self.current_spans);
            self.lines.push(Line::from(spans));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered_text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|l| {
                l.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_simple_text() {
        let lines = render_markdown("Hello, world!");
        assert!(!lines.is_empty());
    }

    #[test]
    fn test_render_heading() {
        let lines = render_markdown("# Title");
        assert!(!lines.is_empty());
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("Title"));
    }

    #[test]
    fn test_render_bold() {
        let lines = render_markdown("**bold text**");
        assert!(!lines.is_empty());
        assert!(lines[0]
            .spans
            .iter()
            .any(|s| s.style.add_modifier.contains(Modifier::BOLD)));
    }

    #[test]
    fn test_render_inline_code() {
        let lines = render_markdown("Use `code` here");
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("`code`"));
    }

    #[test]
    fn test_render_code_block() {
        let md = "```rust\nfn main() {}\n```";
        let lines = render_markdown(md);
        assert!(!lines.is_empty());
        assert!(rendered_text(&lines).contains("fn main() {}"));
    }

    #[test]
    fn test_render_list() {
        let md = "- Item 1\n- Item 2";
        let lines = render_markdown(md);
        assert!(lines.len() >= 2);
        assert!(rendered_text(&lines).contains("• Item 1"));
    }

    #[test]
    fn test_render_checkbox() {
        let md = "- [ ] Unchecked\n- [x] Checked";
        let lines = render_markdown(md);
        assert!(lines.len() >= 2);
    }

    #[test]
    fn test_render_blockquote() {
        let md = "> This is a quote";
        let lines = render_markdown(md);
        assert!(rendered_text(&lines).contains("> "));
    }

    #[test]
    fn test_render_empty() {
        let lines = render_markdown("");
        assert!(lines.is_empty());
    }

    #[test]
    fn test_raw_html_is_dropped() {
        let md = "before\n\n<script>alert('hi')</script>\n\nafter";
        let text = rendered_text(&render_markdown(md));
        assert!(text.contains("before"));
        assert!(text.contains("after"));
        assert!(!text.contains("script"));
    }

    #[test]
    fn test_inline_html_is_dropped() {
        let text = rendered_text(&render_markdown("a <b>bold</b> word"));
        assert!(!text.contains("<b>"));
        assert!(text.contains("bold"));
    }
}
