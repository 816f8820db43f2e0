//! Error types for the monitoring client.

use thiserror::Error;

/// Main error type for monitoring registration operations.
#[derive(Debug, Error)]
pub enum MonitoringError {
    // Wiring errors, surfaced to the caller
    #[error("Invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Monitoring service returned {status} for {url}: {message}")]
    Api {
        status: u16,
        url: String,
        message: String,
    },

    #[error("No registration found for {service_name}")]
    RegistrationNotFound { service_name: String },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

/// Result type alias for monitoring operations.
pub type Result<T> = std::result::Result<T, MonitoringError>;

// Conversion implementations for common error types

impl From<reqwest::Error> for MonitoringError {
    fn from(err: reqwest::Error) -> Self {
        MonitoringError::Network {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for MonitoringError {
    fn from(err: serde_json::Error) -> Self {
        MonitoringError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}
