// --- File: crates/hookify_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Hookify errors.
///
/// This enum provides a common set of error variants that can be used across all crates.
/// Each crate can extend this by implementing From<SpecificError> for HookifyError.
#[derive(Error, Debug)]
pub enum HookifyError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for HookifyError {
    fn status_code(&self) -> u16 {
        match self {
            HookifyError::HttpError(_) => 500,
            HookifyError::ParseError(_) => 400,
            HookifyError::ConfigError(_) => 500,
            HookifyError::ValidationError(_) => 400,
            HookifyError::ExternalServiceError { .. } => 502,
            HookifyError::NotFoundError(_) => 404,
            HookifyError::TimeoutError(_) => 504,
            HookifyError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<serde_json::Error> for HookifyError {
    fn from(err: serde_json::Error) -> Self {
        HookifyError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> HookifyError {
    HookifyError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> HookifyError {
    HookifyError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> HookifyError {
    HookifyError::NotFoundError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> HookifyError {
    HookifyError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> HookifyError {
    HookifyError::InternalError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_variants() {
        assert_eq!(config_error("x").status_code(), 500);
        assert_eq!(validation_error("x").status_code(), 400);
        assert_eq!(not_found("x").status_code(), 404);
        assert_eq!(external_service_error("svc", "x").status_code(), 502);
        assert_eq!(internal_error("x").status_code(), 500);
        assert_eq!(HookifyError::TimeoutError("x".into()).status_code(), 504);
    }

    #[test]
    fn serde_errors_become_parse_errors() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let converted: HookifyError = err.into();
        assert_eq!(converted.status_code(), 400);
        assert!(converted.to_string().starts_with("Failed to parse data"));
    }

    #[test]
    fn external_service_error_names_the_service() {
        let err = external_service_error("subscriber endpoint", "connection reset");
        assert_eq!(
            err.to_string(),
            "External service error: subscriber endpoint - connection reset"
        );
    }
}
