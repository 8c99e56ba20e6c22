//! Result console

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use btcguide::console::PROMPT;

use crate::tui::theme;

/// Read-only panel showing the latest result on a page
pub struct Console<'a> {
    output: &'a str,
    scroll: u16,
}

impl<'a> Console<'a> {
    pub fn new(output: &'a str) -> Self {
        Self { output, scroll: 0 }
    }

    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    /// Prompt on the first line, output below it line by line
    pub fn lines(&self) -> Vec<Line<'a>> {
        let style = theme::console_output(self.output);
        let mut output = self.output.lines();
        let first = output.next().unwrap_or("");

        let mut lines = vec![Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(theme::PRIMARY)),
            Span::styled(first, style),
        ])];
        lines.extend(output.map(|line| Line::styled(line, style)));
        lines
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border(false))
            .style(Style::default().bg(theme::PANEL))
            .title("Console");

        let paragraph = Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));

        frame.render_widget(paragraph, area);
    }
}
