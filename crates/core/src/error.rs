//! Error types for the Shelfmate catalog assistant.
//!
//! This module defines a unified error enum covering all error categories in
//! the application: configuration, oracle transport, query translation,
//! catalog execution, and answer synthesis.

use thiserror::Error;

/// Unified error type for the Shelfmate catalog assistant.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated. The planner
/// and synthesizer recover every failure locally; `AppError` values cross
/// component boundaries only inside those components.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (bad config file, unknown provider)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Oracle transport errors (availability, authorization, malformed replies)
    #[error("Oracle error: {0}")]
    Llm(String),

    /// The oracle returned statement text that is unusable or unsafe
    #[error("Translation error: {0}")]
    Translation(String),

    /// A statement failed against the catalog store
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// The oracle failed while composing the final answer
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    /// Instruction profile rendering errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
