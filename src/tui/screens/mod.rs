//! TUI screens

mod guide_page;
mod home;
mod network_select;
mod sidebar;

pub use guide_page::render_guide_page;
pub use home::render_home;
pub use network_select::render_network_select;
pub use sidebar::{render_sidebar, SIDEBAR_WIDTH};
