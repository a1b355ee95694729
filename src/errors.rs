//! Unified error types for the barn dashboard data layer.
//!
//! Missing or malformed fields in remote records are never errors; they are absorbed
//! by the normalizer's fallbacks. What remains here are configuration problems,
//! transport failures, and lookups against the mocked payment provider.

use thiserror::Error;

/// Every failure the crate surfaces to its callers.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Required credentials or identifiers are not set
    #[error("Missing configuration: {}", missing.join(", "))]
    MissingConfiguration {
        /// Names of the environment variables that are missing
        missing: Vec<String>,
    },

    /// The remote API answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Provider error message, or the raw body when none was given
        message: String,
    },

    /// A write succeeded but the response carried no record
    #[error("Empty response from table {table}")]
    EmptyResponse {
        /// Table that was written to
        table: String,
    },

    /// The request never completed (connect, TLS, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A remote payload could not be decoded at all
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invoice lookup failed in the payment provider
    #[error("Invoice not found: {id}")]
    InvoiceNotFound {
        /// Invoice id that was requested
        id: String,
    },

    /// Customer lookup failed in the payment provider
    #[error("Customer not found: {id}")]
    CustomerNotFound {
        /// Customer id that was requested
        id: String,
    },

    /// Amount was negative or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A local file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
