// src/errors.rs
// DOCUMENTATION: Custom error types for the Places client
// PURPOSE: Centralized error handling for every client operation

use thiserror::Error;

/// Client-specific error types
/// DOCUMENTATION: Every failure a Places call can surface to the caller.
/// Absent JSON fields are never errors; they map to default values instead.
#[derive(Error, Debug)]
pub enum PlacesError {
    /// No API key configured
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request parameters rejected before any network call
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Google answered with a status other than OK
    #[error("Response returned with status: {status}{}", detail(.message))]
    ApiError {
        status: String,
        message: Option<String>,
    },

    /// Network or HTTP-level failure
    #[error("Transport error: {0}")]
    TransportError(String),

    /// Response body was not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl PlacesError {
    /// Raw API status carried by an `ApiError`, e.g. `ZERO_RESULTS`
    pub fn status(&self) -> Option<&str> {
        match self {
            PlacesError::ApiError { status, .. } => Some(status),
            _ => None,
        }
    }
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(" ({})", m),
        None => String::new(),
    }
}

impl From<reqwest::Error> for PlacesError {
    fn from(e: reqwest::Error) -> Self {
        PlacesError::TransportError(e.to_string())
    }
}

impl From<serde_json::Error> for PlacesError {
    fn from(e: serde_json::Error) -> Self {
        PlacesError::ParseError(e.to_string())
    }
}

impl From<validator::ValidationErrors> for PlacesError {
    fn from(e: validator::ValidationErrors) -> Self {
        PlacesError::ValidationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = PlacesError::ApiError {
            status: "REQUEST_DENIED".to_string(),
            message: Some("The provided API key is invalid.".to_string()),
        };

        assert_eq!(err.status(), Some("REQUEST_DENIED"));
        assert_eq!(
            err.to_string(),
            "Response returned with status: REQUEST_DENIED (The provided API key is invalid.)"
        );

        let bare = PlacesError::ApiError {
            status: "ZERO_RESULTS".to_string(),
            message: None,
        };
        assert_eq!(bare.to_string(), "Response returned with status: ZERO_RESULTS");
    }

    #[test]
    fn test_status_only_on_api_errors() {
        let err = PlacesError::ValidationError("'radius' param is not defined.".to_string());
        assert_eq!(err.status(), None);
    }
}
