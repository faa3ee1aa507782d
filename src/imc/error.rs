//! Error types for the CIMC XML API client

use thiserror::Error;

/// Errors that can occur while talking to a management controller
#[derive(Error, Debug)]
pub enum ImcError {
    /// HTTP request failed (connection refused, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Controller answered with a non-success HTTP status
    #[error("HTTP {status} from {url}")]
    Status {
        status: u16,
        url: String,
    },

    /// Controller rejected the request
    #[error("API error ({code}): {description}")]
    Api {
        code: String,
        description: String,
    },

    /// Response body was not well-formed XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Response parsed but lacked something we need
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Session was already logged out
    #[error("Session is not logged in")]
    NotLoggedIn,
}

/// Result type for controller operations
pub type Result<T> = std::result::Result<T, ImcError>;
