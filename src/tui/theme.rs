//! Colors and styles

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(0x1e, 0x1e, 0x1e);
pub const PANEL: Color = Color::Rgb(0x2d, 0x2d, 0x2d);
pub const TEXT: Color = Color::Rgb(0xd4, 0xd4, 0xd4);
pub const PRIMARY: Color = Color::Rgb(0x56, 0x9c, 0xd6);
pub const SECONDARY: Color = Color::Rgb(0x4e, 0xc9, 0xb0);
pub const ACCENT: Color = Color::Rgb(0xce, 0x91, 0x78);
pub const ERROR: Color = Color::Rgb(0xf4, 0x47, 0x47);
pub const MUTED: Color = Color::DarkGray;

pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(Color::Gray)
    }
}

pub fn heading() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn placeholder() -> Style {
    Style::default().fg(MUTED)
}

/// Sidebar entry for the current route
pub fn active_route() -> Style {
    Style::default()
        .fg(TEXT)
        .bg(Color::Rgb(0x3f, 0x3f, 0x46))
        .add_modifier(Modifier::BOLD)
}

pub fn key_hint() -> Style {
    Style::default().fg(ACCENT)
}

pub fn network(is_mainnet: bool) -> Style {
    if is_mainnet {
        Style::default().fg(ERROR).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(SECONDARY)
    }
}

/// Console text, red for failures
pub fn console_output(output: &str) -> Style {
    if output.starts_with("Error:") {
        Style::default().fg(ERROR)
    } else {
        Style::default().fg(TEXT)
    }
}
