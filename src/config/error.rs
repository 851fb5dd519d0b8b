//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A numeric environment variable could not be parsed.
    #[error("failed to parse {var}='{value}' as a number")]
    InvalidNumber { var: &'static str, value: String },

    /// The confidence threshold must be a finite, positive distance.
    #[error("invalid confidence threshold {value}: must be finite and > 0")]
    InvalidThreshold { value: f64 },

    /// A collaborator base URL is required but was not configured.
    #[error("missing required environment variable: {name}")]
    MissingCollaboratorUrl { name: &'static str },
}
