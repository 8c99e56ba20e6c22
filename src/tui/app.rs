//! TUI application state and logic

use btcguide::config::GuideConfig;
use btcguide::guide::Route;
use btcguide::NetworkSelection;

use crate::tui::state::{Focus, PageState};

/// Main application state
pub struct App {
    /// Current page
    pub route: Route,

    /// Forms and console of the current page
    pub page: PageState,

    /// Pane receiving keys
    pub focus: Focus,

    /// Sidebar toggled open; only matters below the breakpoint
    pub sidebar_open: bool,

    /// Highlighted sidebar entry
    pub sidebar_index: usize,

    /// Currently selected network
    pub network: NetworkSelection,

    /// Network selector index (for popup)
    pub network_selector_index: usize,

    /// Status message
    pub message: Option<String>,

    /// Terminal width at last draw
    pub width: u16,

    pub config: GuideConfig,
}

impl App {
    pub fn new(config: GuideConfig) -> Self {
        Self {
            route: Route::Home,
            page: PageState::new(Route::Home),
            focus: Focus::Sidebar,
            sidebar_open: false,
            sidebar_index: 0,
            network: config.network,
            network_selector_index: config.network.index(),
            message: None,
            width: u16::MAX,
            config,
        }
    }

    /// Whether the sidebar is drawn at the current width
    pub fn sidebar_visible(&self) -> bool {
        self.width >= self.config.sidebar_breakpoint || self.sidebar_open
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Show `route` with fresh forms and an empty console
    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(path = route.path(), "navigate");
        self.route = route;
        self.page = PageState::new(route);
        self.sidebar_index = route.index();
        self.focus = if self.page.has_sections() {
            Focus::Page
        } else {
            Focus::Sidebar
        };
        self.clear_message();
    }

    /// Navigate by path; unknown paths show Home
    pub fn navigate_path(&mut self, path: &str) {
        self.navigate(Route::from_path(path));
    }

    /// Navigate to the highlighted sidebar entry
    pub fn open_selected_route(&mut self) {
        let route = Route::all()
            .get(self.sidebar_index)
            .copied()
            .unwrap_or_default();
        self.navigate(route);
    }

    pub fn next_route(&mut self) {
        self.sidebar_index = (self.sidebar_index + 1) % Route::all().len();
    }

    pub fn prev_route(&mut self) {
        let len = Route::all().len();
        self.sidebar_index = (self.sidebar_index + len - 1) % len;
    }

    /// Return focus to the sidebar, opening it if collapsed
    pub fn focus_sidebar(&mut self) {
        self.focus = Focus::Sidebar;
        if !self.sidebar_visible() {
            self.sidebar_open = true;
        }
    }

    pub fn focus_page(&mut self) {
        if self.page.has_sections() {
            self.focus = Focus::Page;
        }
    }

    /// Run the focused section of the current page
    pub fn run_action(&mut self) {
        self.page.run_action(self.network);
        self.clear_message();
    }

    pub fn open_network_select(&mut self) {
        self.network_selector_index = self.network.index();
        self.focus = Focus::NetworkSelect;
    }

    /// Move to next network in selector
    pub fn next_network(&mut self) {
        self.network_selector_index =
            (self.network_selector_index + 1) % NetworkSelection::all().len();
    }

    /// Move to previous network in selector
    pub fn prev_network(&mut self) {
        let len = NetworkSelection::all().len();
        self.network_selector_index = (self.network_selector_index + len - 1) % len;
    }

    /// Confirm network selection
    pub fn confirm_network(&mut self) {
        if let Some(network) = NetworkSelection::all().get(self.network_selector_index) {
            self.network = *network;
        }
        self.focus = Focus::Sidebar;
        tracing::info!(network = %self.network, "network selected");
        self.message = Some(format!("Switched to {}", self.network.display_name()));
    }

    pub fn cancel_network_select(&mut self) {
        self.focus = Focus::Sidebar;
    }

    /// Copy the console to the system clipboard
    pub fn copy_console(&mut self) {
        if self.page.console.is_empty() {
            self.set_message("Console is empty");
            return;
        }
        let result = arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(self.page.console.clone()));
        match result {
            Ok(()) => self.set_message("Copied console to clipboard"),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard unavailable");
                self.message = Some(format!("Clipboard unavailable: {}", e));
            }
        }
    }

    /// Set status message
    pub fn set_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
    }

    /// Clear status message
    pub fn clear_message(&mut self) {
        self.message = None;
    }
}
