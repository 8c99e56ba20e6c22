//! Single-line text input component

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::theme;

/// Single-line text input widget
#[derive(Clone, Default)]
pub struct TextInput {
    /// Current value
    value: String,
    /// Cursor position in characters
    cursor: usize,
    /// Label displayed in the border
    label: String,
    /// Placeholder text when empty
    placeholder: String,
    /// Whether input is digits only
    numeric: bool,
}

impl TextInput {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Default::default()
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn insert(&mut self, c: char) -> bool {
        if self.numeric && !c.is_ascii_digit() {
            return false;
        }
        let at = self.byte_index();
        self.value.insert(at, c);
        self.cursor += 1;
        true
    }

    /// Insert pasted text at the cursor; line breaks are dropped
    pub fn handle_paste(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            self.insert(c);
        }
    }

    /// Handle key event, returns true if the event was handled
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            // Ctrl+U: Clear line (check before general Char case)
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                true
            }
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => false,
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index();
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.len() {
                    let at = self.byte_index();
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                if self.cursor < self.len() {
                    self.cursor += 1;
                }
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.len();
                true
            }
            _ => false,
        }
    }

    /// Render the text input, scrolling horizontally to keep the cursor visible
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border(focused))
            .title(self.label.as_str());

        let width = area.width.saturating_sub(2) as usize;
        let offset = (self.cursor + 1).saturating_sub(width);

        let display_value = if self.value.is_empty() {
            Span::styled(self.placeholder.as_str(), theme::placeholder())
        } else {
            let visible: String = self.value.chars().skip(offset).take(width).collect();
            Span::styled(visible, Style::default().fg(theme::TEXT))
        };

        let paragraph = Paragraph::new(Line::from(display_value)).block(block);
        frame.render_widget(paragraph, area);

        if focused && width > 0 {
            frame.set_cursor_position((area.x + 1 + (self.cursor - offset) as u16, area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_editing() {
        let mut input = TextInput::new("Address");
        for c in "tb1q".chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(input.value(), "tb1q");

        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.value(), "tbq");

        input.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_numeric_rejects_letters() {
        let mut input = TextInput::new("Index").numeric();
        assert!(!input.handle_key(key(KeyCode::Char('x'))));
        assert!(input.handle_key(key(KeyCode::Char('7'))));
        input.handle_paste("1a2\n");
        assert_eq!(input.value(), "712");
    }

    #[test]
    fn test_multibyte_cursor() {
        let mut input = TextInput::new("Label").with_value("₿1");
        input.handle_key(key(KeyCode::Home));
        input.handle_key(key(KeyCode::Delete));
        assert_eq!(input.value(), "1");
    }
}
