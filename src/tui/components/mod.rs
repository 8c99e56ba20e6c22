//! Reusable TUI components

mod console;
mod text_area;
mod text_input;

pub use console::Console;
pub use text_area::TextArea;
pub use text_input::TextInput;
