//! Error types for the insurefin-core library.
//!
//! Field extraction itself never fails; these errors cover the configuration
//! layer around it.

use thiserror::Error;

/// Main error type for the insurefin library.
#[derive(Error, Debug)]
pub enum InsurefinError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in a configuration file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for the insurefin library.
pub type Result<T> = std::result::Result<T, InsurefinError>;
