//! Side navigation

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use btcguide::guide::Route;

use crate::tui::app::App;
use crate::tui::state::Focus;
use crate::tui::theme;

/// Width of the sidebar in columns
pub const SIDEBAR_WIDTH: u16 = 22;

/// Render the route list, highlighting the current route
pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Sidebar;

    let items: Vec<ListItem> = Route::all()
        .iter()
        .map(|route| {
            let style = if *route == app.route {
                theme::active_route()
            } else {
                Style::default().fg(theme::TEXT)
            };
            ListItem::new(Line::from(vec![
                Span::styled(route.label(), style),
                Span::styled(format!("  {}", route.path()), theme::placeholder()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border(focused))
                .title(Span::styled("Guides", theme::heading())),
        )
        .highlight_symbol(if focused { ">> " } else { "   " });

    let mut state = ListState::default().with_selected(Some(app.sidebar_index));
    frame.render_stateful_widget(list, area, &mut state);
}
