//! Error types for gaze analytics

use thiserror::Error;

/// Errors that can occur during analysis
///
/// Empty sessions and "no distraction found" are success states, not errors;
/// they produce zero-valued results instead of a variant here.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Failed to parse gaze session: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
