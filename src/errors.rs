//! Shared error types for the crate

use thiserror::Error;

/// Main error type for sortlink operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors, including malformed sort keys
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type with the crate error pre-applied
pub type Result<T> = std::result::Result<T, Error>;
