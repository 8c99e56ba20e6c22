//! Home screen - welcome text and guide list

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use btcguide::guide::Route;

use crate::tui::theme;

/// Render the home screen
pub fn render_home(frame: &mut Frame, area: Rect) {
    let text = Style::default().fg(theme::TEXT);

    let mut lines = vec![
        Line::styled("Welcome to the Bitcoin Interactive Guide", theme::heading()),
        Line::raw(""),
        Line::styled(
            "Hands-on examples for working with Bitcoin addresses, keys, fees, \
             multisig wallets and Partially Signed Bitcoin Transactions.",
            text,
        ),
        Line::raw(""),
        Line::styled("Getting Started", theme::heading()),
        Line::styled("Choose a topic from the sidebar to begin:", text),
        Line::raw(""),
    ];

    for route in Route::all().iter().filter(|r| !r.actions().is_empty()) {
        lines.push(Line::from(vec![
            Span::styled("  • ", theme::key_hint()),
            Span::styled(route.title(), Style::default().fg(theme::SECONDARY)),
            Span::styled(format!(" ({})", route.path()), theme::placeholder()),
            Span::styled(format!(": {}", route.summary()), text),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(Route::Home.intro(), text));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Home"))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
