//! Error types for the kitchen_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for kitchen_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A friendly ID contained a symbol outside the alphabet
    #[error("Invalid character '{ch}' at position {position} in friendly ID")]
    InvalidFriendlyIdChar { ch: char, position: usize },

    /// A friendly ID decoded to a value wider than 128 bits
    #[error("Friendly ID '{0}' does not fit in a 128-bit identifier")]
    FriendlyIdOverflow(String),

    /// Text that should have been a UUID did not parse
    #[error("Invalid UUID '{0}'")]
    InvalidUuid(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
