//! btcguide - an interactive guide to Bitcoin library operations
//!
//! The library holds every guide operation ([`btc`], [`psbt`]), the page
//! and action metadata ([`guide`]) and the console formatting shared by the
//! terminal UI, the CLI and the WASM exports.

pub mod btc;
pub mod config;
pub mod console;
pub mod error;
pub mod guide;
pub mod logging;
pub mod network;
pub mod psbt;
pub mod wasm;

pub use error::{GuideError, Result};
pub use guide::{GuideAction, Route};
pub use network::NetworkSelection;

// Re-export WASM functions
pub use wasm::*;
