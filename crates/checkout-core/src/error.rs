//! # Checkout Error Types
//!
//! Typed error handling for the checkout client.
//! All checkout operations return `Result<T, CheckoutError>`, so callers
//! have a single branch covering validation, declined payments, and
//! transport failures.

use std::collections::BTreeMap;
use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing env vars, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed client input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Local pre-submission validation failure.
    /// Keys are form-field identifiers, values are human-readable
    /// messages. The remote call is never attempted on this path.
    #[error("Validation failed for {} field(s)", .errors.len())]
    Validation { errors: BTreeMap<String, String> },

    /// The backend explicitly reported a non-success status.
    /// `recoverable` signals whether the user may edit and resubmit.
    #[error("Payment declined: {}", .errors.join("; "))]
    Declined {
        errors: Vec<String>,
        status_code: u16,
        recoverable: bool,
        raw: serde_json::Value,
    },

    /// Transport-level or unhandled server failure. Diagnostic messages
    /// are best-effort extracted from the raw failure payload.
    #[error("Server error: {}", .messages.join("; "))]
    ServerError {
        messages: Vec<String>,
        status_code: u16,
    },

    /// Network/HTTP error reaching the backend
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CheckoutError {
    /// Returns true if the user may correct their input and resubmit.
    ///
    /// Only a handled decline that the backend flagged as recoverable
    /// qualifies; transport and server failures are always terminal.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CheckoutError::Declined {
                recoverable: true,
                ..
            }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Configuration(_) => 500,
            CheckoutError::InvalidRequest(_) => 400,
            CheckoutError::Validation { .. } => 400,
            CheckoutError::Declined { status_code, .. } => *status_code,
            CheckoutError::ServerError { status_code, .. } => *status_code,
            CheckoutError::Network(_) => 503,
            CheckoutError::Serialization(_) => 500,
        }
    }

    /// Flattened user-facing messages for this error
    pub fn messages(&self) -> Vec<String> {
        match self {
            CheckoutError::Validation { errors } => errors.values().cloned().collect(),
            CheckoutError::Declined { errors, .. } => errors.clone(),
            CheckoutError::ServerError { messages, .. } => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;
