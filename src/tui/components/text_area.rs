//! Multi-line text area for PSBTs and key lists

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::theme;

/// Multi-line text area widget.
///
/// Enter is left to the caller (it runs the section's action), so line
/// breaks only arrive through paste.
#[derive(Clone, Default)]
pub struct TextArea {
    /// Content lines
    lines: Vec<String>,
    /// Current line
    cursor_line: usize,
    /// Current column in characters
    cursor_col: usize,
    /// Label
    label: String,
    /// Placeholder
    placeholder: String,
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// Split a line into rows of `width` characters. A line whose length is a
/// multiple of `width` ends with an empty row for the cursor.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    (0..=chars.len() / width)
        .map(|row| {
            let start = row * width;
            let end = (start + width).min(chars.len());
            chars[start..end].iter().collect()
        })
        .collect()
}

impl TextArea {
    pub fn new(label: &str) -> Self {
        Self {
            lines: vec![String::new()],
            label: label.to_string(),
            ..Default::default()
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the content, leaving the cursor at the end
    pub fn set_content(&mut self, content: &str) {
        self.lines = content.lines().map(|s| s.to_string()).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor_line = self.lines.len() - 1;
        self.cursor_col = char_len(&self.lines[self.cursor_line]);
    }

    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.cursor_line = 0;
        self.cursor_col = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    fn split_line(&mut self) {
        let at = byte_index(&self.lines[self.cursor_line], self.cursor_col);
        let rest = self.lines[self.cursor_line].split_off(at);
        self.cursor_line += 1;
        self.lines.insert(self.cursor_line, rest);
        self.cursor_col = 0;
    }

    fn insert(&mut self, c: char) {
        let line = &mut self.lines[self.cursor_line];
        let at = byte_index(line, self.cursor_col);
        line.insert(at, c);
        self.cursor_col += 1;
    }

    /// Handle pasted text
    pub fn handle_paste(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.split_line();
            } else if !ch.is_control() {
                self.insert(ch);
            }
        }
    }

    /// Handle key event
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                true
            }
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => false,
            KeyCode::Char(c) => {
                self.insert(c);
                true
            }
            KeyCode::Backspace => {
                if self.cursor_col > 0 {
                    self.cursor_col -= 1;
                    let line = &mut self.lines[self.cursor_line];
                    let at = byte_index(line, self.cursor_col);
                    line.remove(at);
                } else if self.cursor_line > 0 {
                    let current = self.lines.remove(self.cursor_line);
                    self.cursor_line -= 1;
                    self.cursor_col = char_len(&self.lines[self.cursor_line]);
                    self.lines[self.cursor_line].push_str(&current);
                }
                true
            }
            KeyCode::Delete => {
                let len = char_len(&self.lines[self.cursor_line]);
                if self.cursor_col < len {
                    let line = &mut self.lines[self.cursor_line];
                    let at = byte_index(line, self.cursor_col);
                    line.remove(at);
                } else if self.cursor_line + 1 < self.lines.len() {
                    let next = self.lines.remove(self.cursor_line + 1);
                    self.lines[self.cursor_line].push_str(&next);
                }
                true
            }
            KeyCode::Left => {
                if self.cursor_col > 0 {
                    self.cursor_col -= 1;
                } else if self.cursor_line > 0 {
                    self.cursor_line -= 1;
                    self.cursor_col = char_len(&self.lines[self.cursor_line]);
                }
                true
            }
            KeyCode::Right => {
                if self.cursor_col < char_len(&self.lines[self.cursor_line]) {
                    self.cursor_col += 1;
                } else if self.cursor_line + 1 < self.lines.len() {
                    self.cursor_line += 1;
                    self.cursor_col = 0;
                }
                true
            }
            KeyCode::Up => {
                if self.cursor_line > 0 {
                    self.cursor_line -= 1;
                    self.cursor_col = self.cursor_col.min(char_len(&self.lines[self.cursor_line]));
                }
                true
            }
            KeyCode::Down => {
                if self.cursor_line + 1 < self.lines.len() {
                    self.cursor_line += 1;
                    self.cursor_col = self.cursor_col.min(char_len(&self.lines[self.cursor_line]));
                }
                true
            }
            KeyCode::Home => {
                self.cursor_col = 0;
                true
            }
            KeyCode::End => {
                self.cursor_col = char_len(&self.lines[self.cursor_line]);
                true
            }
            _ => false,
        }
    }

    /// Content wrapped to `width` columns
    fn visual_rows(&self, width: usize) -> Vec<String> {
        let width = width.max(1);
        self.lines
            .iter()
            .flat_map(|line| wrap_line(line, width))
            .collect()
    }

    /// Cursor row and column once the content is wrapped to `width` columns
    fn cursor_visual_position(&self, width: usize) -> (usize, usize) {
        let width = width.max(1);
        let rows_before: usize = self.lines[..self.cursor_line]
            .iter()
            .map(|line| char_len(line) / width + 1)
            .sum();
        (
            rows_before + self.cursor_col / width,
            self.cursor_col % width,
        )
    }

    /// Render the text area. Long lines wrap at the block width and the
    /// view scrolls to keep the cursor row visible.
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border(focused))
            .title(self.label.as_str());

        let inner = block.inner(area);
        let width = usize::from(inner.width);
        let visible_height = usize::from(inner.height);
        let (cursor_row, cursor_col) = self.cursor_visual_position(width);
        let scroll = (cursor_row + 1).saturating_sub(visible_height);

        let content: Vec<Line> = if self.is_empty() {
            vec![Line::from(Span::styled(
                self.placeholder.as_str(),
                theme::placeholder(),
            ))]
        } else {
            self.visual_rows(width)
                .into_iter()
                .skip(scroll)
                .take(visible_height)
                .map(|row| Line::styled(row, Style::default().fg(theme::TEXT)))
                .collect()
        };

        frame.render_widget(Paragraph::new(content).block(block), area);

        if focused && inner.width > 0 && inner.height > 0 {
            let row = u16::try_from(cursor_row - scroll);
            let col = u16::try_from(cursor_col);
            let (Ok(row), Ok(col)) = (row, col) else {
                return;
            };
            frame.set_cursor_position((inner.x + col, inner.y + row));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paste_keeps_lines() {
        let mut area = TextArea::new("Public keys");
        area.handle_paste("02aa,\r\n03bb");
        assert_eq!(area.content(), "02aa,\n03bb");
        assert!(!area.is_empty());
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut area = TextArea::new("PSBT");
        area.handle_paste("ab\ncd");
        area.handle_key(KeyEvent::new(KeyCode::Home, KeyModifiers::NONE));
        area.handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(area.content(), "abcd");
    }

    #[test]
    fn test_set_content_and_clear() {
        let mut area = TextArea::new("PSBT");
        area.set_content("cHNidP8=");
        assert_eq!(area.content(), "cHNidP8=");
        area.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(area.content(), "cHNidP8=x");
        area.clear();
        assert!(area.is_empty());
    }

    #[test]
    fn test_cursor_follows_wrapped_rows() {
        let mut area = TextArea::new("PSBT");
        area.handle_paste(&"a".repeat(25));
        // 25 chars at width 10: rows of 10, 10 and 5
        assert_eq!(area.cursor_visual_position(10), (2, 5));
        assert_eq!(area.visual_rows(10).len(), 3);

        area.handle_paste("\nbc");
        assert_eq!(area.cursor_visual_position(10), (3, 2));

        area.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
        area.handle_key(KeyEvent::new(KeyCode::Home, KeyModifiers::NONE));
        assert_eq!(area.cursor_visual_position(10), (0, 0));
        area.handle_key(KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        assert_eq!(area.cursor_visual_position(10), (2, 5));
    }

    #[test]
    fn test_full_row_moves_cursor_to_next_row() {
        let mut area = TextArea::new("PSBT");
        area.handle_paste(&"x".repeat(10));
        assert_eq!(area.cursor_visual_position(10), (1, 0));
        assert_eq!(area.visual_rows(10), vec!["x".repeat(10), String::new()]);
    }

    #[test]
    fn test_render_scrolls_to_wrapped_cursor() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut area = TextArea::new("PSBT");
        // Eight rows of content in a three-row interior
        area.handle_paste(&format!("{}END", "a".repeat(10 * 7)));

        let mut terminal = Terminal::new(TestBackend::new(12, 5)).unwrap();
        terminal
            .draw(|f| area.render(f, Rect::new(0, 0, 12, 5), true))
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let last_row: String = (1..11).map(|x| buffer[(x, 3)].symbol().to_string()).collect();
        assert_eq!(last_row.trim_end(), "END");
        terminal.backend_mut().assert_cursor_position((4, 3));
    }
}
