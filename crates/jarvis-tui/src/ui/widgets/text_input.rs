//! Prompt input widget.
//!
//! Multi-line text entry with history navigation. Enter submits; the
//! event loop inserts a literal newline for Ctrl+J.

use crate::ui::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// State for the prompt input, managing content, cursor, and history.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    /// The text content.
    content: String,
    /// Cursor position as a character index.
    pub cursor: usize,
    /// Submitted prompts for Up/Down navigation.
    history: Vec<String>,
    /// Current history offset (None = editing a fresh prompt).
    history_index: Option<usize>,
    /// Fresh prompt saved while navigating history.
    saved_input: String,
}

impl TextInputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of characters in the content.
    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte offset of the cursor's character index.
    fn byte_offset(&self) -> usize {
        self.content
            .char_indices()
            .nth(self.cursor)
            .map_or(self.content.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_offset();
        self.content.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor.
    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_offset();
        self.content.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset();
            self.content.remove(at);
        }
    }

    /// Delete the character at the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset();
            self.content.remove(at);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Move cursor to the start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to the end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Take the content, recording it in history.
    pub fn submit(&mut self) -> String {
        let content = std::mem::take(&mut self.content);
        self.cursor = 0;
        if !content.trim().is_empty() {
            self.history.push(content.clone());
        }
        self.history_index = None;
        self.saved_input.clear();
        content
    }

    /// Whether a history entry is currently recalled.
    pub fn history_active(&self) -> bool {
        self.history_index.is_some()
    }

    /// Recall the previous history entry.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next = match self.history_index {
            None => {
                self.saved_input = std::mem::take(&mut self.content);
                0
            }
            Some(i) if i + 1 < self.history.len() => i + 1,
            Some(i) => i,
        };
        self.history_index = Some(next);
        self.content = self.history[self.history.len() - 1 - next].clone();
        self.cursor = self.char_len();
    }

    /// Recall the next history entry, or restore the saved prompt.
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(0) => {
                self.content = std::mem::take(&mut self.saved_input);
                self.history_index = None;
                self.cursor = self.char_len();
            }
            Some(i) => {
                self.history_index = Some(i - 1);
                self.content = self.history[self.history.len() - i].clone();
                self.cursor = self.char_len();
            }
        }
    }
}

/// The prompt input widget.
pub struct TextInput<'a> {
    state: &'a TextInputState,
    block: Option<Block<'a>>,
    placeholder: Option<&'a str>,
    enabled: bool,
}

impl<'a> TextInput<'a> {
    /// Create an input widget over the given state.
    pub fn new(state: &'a TextInputState) -> Self {
        Self {
            state,
            block: None,
            placeholder: None,
            enabled: true,
        }
    }

    /// Surround the input with a block.
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Placeholder shown while the input is empty.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Whether input is currently accepted (hides the cursor otherwise).
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

const PROMPT: &str = "> ";

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner.height < 1 || inner.width < 1 {
            return;
        }

        if self.state.is_empty() {
            let mut spans = vec![Span::styled(PROMPT, Styles::title())];
            if self.enabled {
                spans.push(Span::styled("_", Styles::default()));
            }
            if let Some(placeholder) = self.placeholder {
                spans.push(Span::styled(placeholder, Styles::dim()));
            }
            Paragraph::new(Line::from(spans)).render(inner, buf);
            return;
        }

        // Render content line by line with the cursor inline.
        let mut lines: Vec<Line<'_>> = Vec::new();
        let mut current = String::from(PROMPT);
        let mut cursor_drawn = false;

        for (idx, ch) in self.state.content().chars().enumerate() {
            if self.enabled && idx == self.state.cursor && !cursor_drawn {
                current.push('|');
                cursor_drawn = true;
            }
            if ch == '\n' {
                lines.push(Line::from(current.clone()));
                current.clear();
                // Continuation lines align under the prompt
                current.push_str(&" ".repeat(PROMPT.len()));
            } else {
                current.push(ch);
            }
        }

        if self.enabled && !cursor_drawn {
            current.push('_');
        }
        lines.push(Line::from(current));

        Paragraph::new(lines).style(Styles::default()).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete() {
        let mut state = TextInputState::new();
        assert!(state.is_empty());

        state.insert('H');
        state.insert('i');
        assert_eq!(state.content(), "Hi");
        assert_eq!(state.cursor, 2);

        state.backspace();
        assert_eq!(state.content(), "H");

        state.clear();
        assert!(state.is_empty());
    }

    #[test]
    fn test_cursor_movement() {
        let mut state = TextInputState::new();
        state.insert_str("Hello");

        state.move_left();
        state.move_left();
        assert_eq!(state.cursor, 3);

        state.insert('X');
        assert_eq!(state.content(), "HelXlo");

        state.move_home();
        assert_eq!(state.cursor, 0);

        state.move_end();
        assert_eq!(state.cursor, 6);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut state = TextInputState::new();
        state.insert_str("héllo");
        state.move_left();
        state.move_left();
        state.move_left();
        state.delete();
        assert_eq!(state.content(), "hélo");
    }

    #[test]
    fn test_history_navigation() {
        let mut state = TextInputState::new();

        state.insert_str("first");
        state.submit();
        assert!(state.is_empty());

        state.insert_str("second");
        state.submit();

        state.history_prev();
        assert_eq!(state.content(), "second");

        state.history_prev();
        assert_eq!(state.content(), "first");

        state.history_next();
        assert_eq!(state.content(), "second");
    }

    #[test]
    fn test_history_restores_draft() {
        let mut state = TextInputState::new();
        state.insert_str("sent");
        state.submit();

        state.insert_str("draft");
        state.history_prev();
        assert_eq!(state.content(), "sent");

        state.history_next();
        assert_eq!(state.content(), "draft");
    }

    #[test]
    fn test_submit_skips_blank_history() {
        let mut state = TextInputState::new();
        state.insert_str("   ");
        state.submit();
        state.history_prev();
        assert!(state.is_empty());
    }
}
