//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. The metrics and routing logic
//! is total and never produces them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Export failed: {0}")]
    Export(String),

    #[error("Event dispatch failed: {0}")]
    Events(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("UI error: {0}")]
    Ui(String),
}
