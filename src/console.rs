//! Console text for guide results
//!
//! Every surface (TUI, CLI, WASM) shows the same string for an action. The
//! helpers here are the only place that string is produced.

use std::fmt::Display;

use serde::Serialize;

use crate::error::Result;

/// Prefix drawn before console output
pub const PROMPT: &str = "> ";

/// Show `valid` when there is no problem, else the problem verbatim
pub fn format_validation(problem: Option<String>, valid: &str) -> String {
    match problem {
        None => valid.to_string(),
        Some(problem) => {
            tracing::warn!(%problem, "validation failed");
            problem
        }
    }
}

/// Show a plain value, or `Error: <message>`
pub fn format_result<T: Display>(result: Result<T>) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(e) => format_error(&e),
    }
}

/// Show a value as two-space indented JSON, or `Error: <message>`
pub fn format_json<T: Serialize>(result: Result<T>) -> String {
    match result.and_then(|value| Ok(serde_json::to_string_pretty(&value)?)) {
        Ok(json) => json,
        Err(e) => format_error(&e),
    }
}

pub fn format_error(error: &impl Display) -> String {
    tracing::warn!(%error, "guide action failed");
    format!("Error: {}", error)
}
