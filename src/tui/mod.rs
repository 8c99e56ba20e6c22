//! Terminal UI for the Bitcoin guide
//!
//! Provides an interactive terminal interface for:
//! - Navigating between the Home, Bitcoin and PSBT pages
//! - Filling in guide sections and running them against the library
//! - Network selection (Mainnet, Testnet)
//! - Copying console output to the clipboard

pub mod app;
pub mod components;
pub mod screens;
pub mod state;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;

use btcguide::config::GuideConfig;

use app::App;
use state::Focus;

/// Run the terminal UI, starting on the page at `path`
pub fn run_tui(config: GuideConfig, path: &str) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!(network = %config.network, path, "starting tui");

    // Create app and run
    let mut app = App::new(config);
    app.navigate_path(path);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    tracing::info!("tui closed");
    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.width = terminal.size()?.width;
        terminal.draw(|f| ui(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key(app, key) {
                    return Ok(());
                }
            }
            Event::Paste(text) => handle_paste(app, &text),
            _ => {}
        }
    }
}

/// Dispatch a key press. Returns true when the app should quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match app.focus {
        Focus::Sidebar => return handle_sidebar_keys(app, key.code),
        Focus::Page => handle_page_keys(app, key),
        Focus::NetworkSelect => handle_network_select_keys(app, key.code),
    }
    false
}

fn handle_sidebar_keys(app: &mut App, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('q') => return true,
        KeyCode::Down | KeyCode::Char('j') => app.next_route(),
        KeyCode::Up | KeyCode::Char('k') => app.prev_route(),
        KeyCode::Enter => app.open_selected_route(),
        KeyCode::Tab | KeyCode::Right => app.focus_page(),
        KeyCode::Char('b') => app.toggle_sidebar(),
        KeyCode::Char('n') => app.open_network_select(),
        KeyCode::Char('c') => app.copy_console(),
        _ => {}
    }
    false
}

fn handle_page_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.focus_sidebar(),
        KeyCode::Tab => app.page.next_field(),
        KeyCode::BackTab => app.page.prev_field(),
        KeyCode::Enter => app.run_action(),
        KeyCode::PageDown => app.page.scroll_console_down(),
        KeyCode::PageUp => app.page.scroll_console_up(),
        _ => {
            if let Some(field) = app.page.focused_field_mut() {
                field.handle_key(key);
            }
        }
    }
}

fn handle_network_select_keys(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up | KeyCode::Char('k') => app.prev_network(),
        KeyCode::Down | KeyCode::Char('j') => app.next_network(),
        KeyCode::Enter => app.confirm_network(),
        KeyCode::Esc => app.cancel_network_select(),
        _ => {}
    }
}

fn handle_paste(app: &mut App, text: &str) {
    if app.focus != Focus::Page {
        return;
    }
    if let Some(field) = app.page.focused_field_mut() {
        field.handle_paste(text);
    }
}

fn ui(frame: &mut Frame, app: &App) {
    frame.render_widget(
        Block::default().style(Style::default().bg(theme::BACKGROUND)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Help bar
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0]);

    let content = if app.sidebar_visible() {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(screens::SIDEBAR_WIDTH),
                Constraint::Min(20),
            ])
            .split(chunks[1]);
        screens::render_sidebar(frame, app, body[0]);
        body[1]
    } else {
        chunks[1]
    };

    if app.page.has_sections() {
        screens::render_guide_page(frame, app, content);
    } else {
        screens::render_home(frame, content);
    }

    render_help_bar(frame, app, chunks[2]);

    if app.focus == Focus::NetworkSelect {
        screens::render_network_select(frame, app, frame.area());
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled("Bitcoin Interactive Guide", theme::heading()),
        Span::raw("  "),
        Span::styled(app.route.title(), Style::default().fg(theme::TEXT)),
        Span::raw("  "),
        Span::styled("[", Style::default().fg(theme::MUTED)),
        Span::styled(
            app.network.display_name(),
            theme::network(app.network.is_mainnet()),
        ),
        Span::styled("]", Style::default().fg(theme::MUTED)),
    ]);

    let paragraph = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_help_bar(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = if let Some(msg) = &app.message {
        msg.clone()
    } else {
        match app.focus {
            Focus::Sidebar => {
                "↑/↓:Nav | Enter:Open | Tab:Page | b:Sidebar | n:Net | c:Copy | q:Quit".to_string()
            }
            Focus::Page => {
                "Tab/Shift+Tab:Field | Enter:Run | PgUp/PgDn:Scroll | Ctrl+U:Clear | Esc:Sidebar"
                    .to_string()
            }
            Focus::NetworkSelect => "↑/↓:Select | Enter:Confirm | Esc:Cancel".to_string(),
        }
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(theme::MUTED))
        .block(Block::default().borders(Borders::ALL).title("Help"));

    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use btcguide::guide::Route;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn render(app: &mut App, width: u16, height: u16) -> String {
        app.width = width;
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_home_renders_guides() {
        let mut app = App::new(GuideConfig::default());
        let screen = render(&mut app, 120, 30);
        assert!(screen.contains("Welcome to the Bitcoin Interactive Guide"));
        assert!(screen.contains("/bitcoin"));
        assert!(screen.contains("/psbt"));
        assert!(screen.contains("[Testnet]"));
    }

    #[test]
    fn test_each_route_renders_its_page() {
        let mut app = App::new(GuideConfig::default());
        for route in Route::all() {
            app.navigate(*route);
            let screen = render(&mut app, 140, 40);
            assert!(screen.contains(route.title()), "{:?}", route);
            for action in route.actions() {
                assert!(screen.contains(action.title()), "{:?}", action);
            }
        }
    }

    #[test]
    fn test_sidebar_hidden_below_breakpoint() {
        let mut app = App::new(GuideConfig::default());
        assert!(render(&mut app, 120, 30).contains("Guides"));
        assert!(!render(&mut app, 80, 30).contains("Guides"));

        press(&mut app, KeyCode::Char('b'));
        assert!(render(&mut app, 80, 30).contains("Guides"));
        press(&mut app, KeyCode::Char('b'));
        assert!(!render(&mut app, 80, 30).contains("Guides"));
    }

    #[test]
    fn test_validate_address_flow() {
        let mut app = App::new(GuideConfig::default());
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route, Route::Bitcoin);
        assert_eq!(app.focus, Focus::Page);

        type_text(&mut app, "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.page.console, "Address is valid");

        let screen = render(&mut app, 140, 40);
        assert!(screen.contains("> Address is valid"));
    }

    #[test]
    fn test_guide_page_shows_code_for_current_values() {
        let mut app = App::new(GuideConfig::default());
        app.navigate(Route::Bitcoin);

        let screen = render(&mut app, 140, 40);
        assert!(screen.contains("Code"));
        assert!(screen.contains("use btcguide::{btc::validate_address,"));
        assert!(screen.contains("NetworkSelection::Testnet);"));

        // The snippet follows the network and the typed values
        app.network = btcguide::NetworkSelection::Mainnet;
        type_text(&mut app, "bc1q");
        let screen = render(&mut app, 140, 40);
        assert!(screen.contains("NetworkSelection::Mainnet);"));
        assert!(screen.contains("validate_address(\"bc1q\","));

        press(&mut app, KeyCode::Tab);
        let screen = render(&mut app, 140, 40);
        assert!(screen.contains("validate_public_key(\"\");"));
    }

    #[test]
    fn test_guide_pages_show_intro() {
        let mut app = App::new(GuideConfig::default());
        app.navigate(Route::Psbt);
        let screen = render(&mut app, 140, 40);
        assert!(screen.contains("About"));
        assert!(screen.contains("What is a PSBT?"));
        assert!(screen.contains("create_psbt("));

        app.navigate(Route::Bitcoin);
        let screen = render(&mut app, 140, 40);
        assert!(screen.contains("About"));
        assert!(screen.contains("Work through the"));
    }

    #[test]
    fn test_paste_into_focused_field() {
        let mut app = App::new(GuideConfig::default());
        app.navigate(Route::Bitcoin);
        handle_paste(&mut app, "0.001");
        // Section 0 is the address field; paste lands there regardless of type
        assert_eq!(app.page.sections[0].fields[0].value(), "0.001");
    }

    #[test]
    fn test_keys_in_page_go_to_fields() {
        let mut app = App::new(GuideConfig::default());
        app.navigate(Route::Bitcoin);
        // 'q' types into the field instead of quitting
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.page.sections[0].fields[0].value(), "q");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::Sidebar);
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_network_popup() {
        let mut app = App::new(GuideConfig::default());
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.focus, Focus::NetworkSelect);
        assert!(render(&mut app, 120, 30).contains("Select Network"));

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        assert!(app.network.is_mainnet());
        assert!(render(&mut app, 120, 30).contains("[Mainnet]"));
    }
}
