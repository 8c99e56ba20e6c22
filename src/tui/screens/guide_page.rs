//! Guide page: section list and page intro, the focused section's form,
//! the equivalent library code, and the console

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use btcguide::NetworkSelection;

use crate::tui::app::App;
use crate::tui::components::Console;
use crate::tui::state::{Focus, PageState};
use crate::tui::theme;

const SECTION_LIST_WIDTH: u16 = 30;
const MAX_CODE_HEIGHT: u16 = 12;

/// Render a Bitcoin or PSBT guide page
pub fn render_guide_page(frame: &mut Frame, app: &App, area: Rect) {
    let page = &app.page;
    let focused = app.focus == Focus::Page;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SECTION_LIST_WIDTH), Constraint::Min(20)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(page.sections.len() as u16 + 2),
            Constraint::Min(0),
        ])
        .split(chunks[0]);

    render_section_list(frame, page, focused, left[0]);
    render_intro(frame, page, left[1]);
    render_section(frame, page, focused, app.network, chunks[1]);
}

fn render_intro(frame: &mut Frame, page: &PageState, area: Rect) {
    let lines: Vec<Line> = page
        .route
        .intro()
        .lines()
        .map(|line| Line::styled(line, Style::default().fg(theme::TEXT)))
        .collect();

    let intro = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border(false))
                .title("About"),
        );
    frame.render_widget(intro, area);
}

/// Rows `text` takes when wrapped to `width` columns, plus the border
fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.saturating_sub(2)).max(1);
    let rows: usize = text
        .lines()
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows + 2)
        .unwrap_or(MAX_CODE_HEIGHT)
        .min(MAX_CODE_HEIGHT)
}

fn render_section_list(frame: &mut Frame, page: &PageState, focused: bool, area: Rect) {
    let items: Vec<ListItem> = page
        .sections
        .iter()
        .map(|s| ListItem::new(s.action.title()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border(false))
                .title(Span::styled(page.route.title(), theme::heading())),
        )
        .style(Style::default().fg(theme::TEXT))
        .highlight_style(if focused {
            theme::active_route()
        } else {
            Style::default().fg(theme::SECONDARY)
        })
        .highlight_symbol("▸ ");

    let mut state = ListState::default().with_selected(Some(page.section));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_section(
    frame: &mut Frame,
    page: &PageState,
    focused: bool,
    network: NetworkSelection,
    area: Rect,
) {
    let Some(section) = page.current_section() else {
        return;
    };
    let snippet = section.action.snippet(&section.values(), network);

    let mut constraints = vec![Constraint::Length(4)];
    constraints.extend(section.fields.iter().map(|f| Constraint::Length(f.height())));
    constraints.push(Constraint::Length(wrapped_height(&snippet, area.width)));
    constraints.push(Constraint::Min(5));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let header = Paragraph::new(vec![
        Line::styled(section.action.title(), theme::heading()),
        Line::styled(section.action.description(), Style::default().fg(theme::TEXT)),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::BOTTOM).border_style(theme::border(false)));
    frame.render_widget(header, chunks[0]);

    for (i, field) in section.fields.iter().enumerate() {
        field.render(frame, chunks[i + 1], focused && i == page.field);
    }

    let code = Paragraph::new(snippet.as_str())
        .style(Style::default().fg(theme::SECONDARY))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border(false))
                .title("Code"),
        );
    frame.render_widget(code, chunks[section.fields.len() + 1]);

    let console_area = chunks[section.fields.len() + 2];
    Console::new(&page.console)
        .scroll(page.console_scroll)
        .render(frame, console_area);
}
