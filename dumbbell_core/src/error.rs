//! Error types for the dumbbell_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for dumbbell_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// A user-adjustable setting was given a value outside its domain
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    /// A state machine operation was requested from a phase that does not allow it
    #[error("Cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },

    /// Attempted to start a session on a plan with no exercises
    #[error("The plan for {0} has no exercises")]
    EmptyPlan(String),

    /// Settings that shape the plan cannot change mid-session
    #[error("A workout session is in progress")]
    SessionActive,

    /// Key-value store failure
    #[error("Storage error: {0}")]
    Storage(String),
}
