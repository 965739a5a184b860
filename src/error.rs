// src/error.rs

//! Unified error handling for the job scraper.

use std::fmt;

use thiserror::Error;

/// Result type alias for job scraper operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required container or field is missing from the page
    #[error("{0}")]
    Structure(String),

    /// A backend answered with a non-success status
    #[error("Backend error: {endpoint} returned {status}")]
    Backend { endpoint: String, status: u16 },

    /// A job page could not be downloaded
    #[error("Could not fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// An analysis request is already in flight
    #[error("An analysis request is already in progress")]
    Busy,

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a structural-absence error.
    pub fn structure(message: impl Into<String>) -> Self {
        Self::Structure(message.into())
    }

    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a backend status error.
    pub fn backend(endpoint: impl Into<String>, status: reqwest::StatusCode) -> Self {
        Self::Backend {
            endpoint: endpoint.into(),
            status: status.as_u16(),
        }
    }

    /// Create a page download error.
    pub fn fetch(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether the failure happened talking to a backend.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Backend { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_message_is_verbatim() {
        let err = AppError::structure("jobPostingPage not found");
        assert_eq!(err.to_string(), "jobPostingPage not found");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_backend_is_transport() {
        let err = AppError::backend("/analyze-job", reqwest::StatusCode::BAD_GATEWAY);
        assert!(err.is_transport());
        assert_eq!(
            err.to_string(),
            "Backend error: /analyze-job returned 502"
        );
    }

    #[test]
    fn test_page_fetch_is_not_transport() {
        let err = AppError::fetch("https://acme.wd5.myworkdayjobs.com/job/1", "404 Not Found");
        assert!(!err.is_transport());
        assert_eq!(
            err.to_string(),
            "Could not fetch https://acme.wd5.myworkdayjobs.com/job/1: 404 Not Found"
        );
    }
}
