//! Network selection popup

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use btcguide::NetworkSelection;

use crate::tui::app::App;
use crate::tui::theme;

/// Render network selection popup
pub fn render_network_select(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect(40, 30, area);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(true))
        .title(" Select Network ");

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(2),
            Constraint::Length(1),
        ])
        .split(inner);

    let items: Vec<ListItem> = NetworkSelection::all()
        .iter()
        .map(|network| {
            let is_current = *network == app.network;
            let prefix = if is_current { "● " } else { "○ " };
            let style = if is_current {
                theme::heading()
            } else {
                Style::default().fg(theme::TEXT)
            };
            let suffix = if network.is_mainnet() {
                " (real addresses)"
            } else {
                ""
            };

            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(network.display_name(), style),
                Span::styled(suffix, theme::network(true)),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .bg(theme::PANEL)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default().with_selected(Some(app.network_selector_index));
    frame.render_stateful_widget(list, chunks[1], &mut state);

    let help = Paragraph::new(Line::from(vec![
        Span::styled("↑/↓", theme::key_hint()),
        Span::raw(": Select  "),
        Span::styled("Enter", theme::key_hint()),
        Span::raw(": Confirm  "),
        Span::styled("Esc", theme::key_hint()),
        Span::raw(": Cancel"),
    ]))
    .alignment(Alignment::Center);

    frame.render_widget(help, chunks[2]);
}

/// Create a centered rectangle of given percentage width and height
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
