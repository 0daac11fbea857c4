//! Unified error handling for the explorer CLI and client library
//!
//! This module provides:
//! - Unique error codes for debugging and documentation
//! - Structured error information with context
//! - Convenient constructor methods
//! - Automatic conversions from common error types

use std::fmt;
use thiserror::Error;

/// Unified Result type for all explorer operations
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Error codes for explorer operations
///
/// Each error has a unique code in the format `EXXX` where:
/// - E2XX: Network and API errors
/// - E4XX: Configuration errors
/// - E5XX: Validation and input errors
/// - E7XX: Resource and view errors
/// - E8XX: UI and interaction errors
/// - E9XX: Internal errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Network (E2XX)
    /// E201: HTTP request failed
    HttpError,
    /// E202: Connection timeout
    ConnectionTimeout,
    /// E205: API returned a non-2xx status
    ApiError,
    /// E206: Invalid API response format
    InvalidResponse,

    // Configuration (E4XX)
    /// E401: Configuration error
    ConfigError,
    /// E402: Invalid endpoint URL
    InvalidEndpoint,
    /// E403: API credentials are not configured
    MissingCredentials,

    // Validation (E5XX)
    /// E501: Invalid input
    InvalidInput,

    // Resource (E7XX)
    /// E705: Resource not found
    ResourceNotFound,
    /// E707: A view could not load its data
    FetchFailed,

    // UI (E8XX)
    /// E801: Dialog error
    DialogError,

    // Internal (E9XX)
    /// E902: Serialization error
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u16 {
        match self {
            ErrorCode::HttpError => 201,
            ErrorCode::ConnectionTimeout => 202,
            ErrorCode::ApiError => 205,
            ErrorCode::InvalidResponse => 206,

            ErrorCode::ConfigError => 401,
            ErrorCode::InvalidEndpoint => 402,
            ErrorCode::MissingCredentials => 403,

            ErrorCode::InvalidInput => 501,

            ErrorCode::ResourceNotFound => 705,
            ErrorCode::FetchFailed => 707,

            ErrorCode::DialogError => 801,

            ErrorCode::SerializationError => 902,
        }
    }

    /// Get the string code (e.g., "E201")
    pub fn as_str(&self) -> String {
        format!("E{}", self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.code())
    }
}

/// Main error type for all explorer operations
#[derive(Error, Debug)]
pub enum ExplorerError {
    // ==================== Network Errors (E2XX) ====================
    /// HTTP/Network error
    #[error("[{code}] Network error: {message}")]
    Network {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Non-2xx response
    #[error("[{code}] API error ({status}): {message}")]
    Api {
        code: ErrorCode,
        status: u16,
        message: String,
    },

    /// 2xx response whose body is not the expected envelope
    #[error("[{code}] Invalid API response: {message}")]
    InvalidResponse { code: ErrorCode, message: String },

    // ==================== Configuration Errors (E4XX) ====================
    /// Configuration error
    #[error("[{code}] Configuration error: {message}")]
    Config {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<config::ConfigError>,
    },

    // ==================== Validation Errors (E5XX) ====================
    /// Invalid input error
    #[error("[{code}] Invalid input: {message}")]
    InvalidInput { code: ErrorCode, message: String },

    // ==================== Resource Errors (E7XX) ====================
    /// Resource not found
    #[error("[{code}] {resource} not found.")]
    NotFound { code: ErrorCode, resource: String },

    /// User-facing view failure
    #[error("[{code}] {message}")]
    FetchFailed { code: ErrorCode, message: String },

    // ==================== UI Errors (E8XX) ====================
    /// UI/Dialog error
    #[error("[{code}] UI error: {message}")]
    Ui { code: ErrorCode, message: String },

    // ==================== Internal Errors (E9XX) ====================
    /// JSON serialization error
    #[error("[{code}] Serialization error: {message}")]
    Serialization {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

// ==================== Constructor Methods ====================

impl ExplorerError {
    // --- Network ---

    /// Create network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            code: ErrorCode::HttpError,
            message: message.into(),
            source: None,
        }
    }

    /// Create network error from reqwest error, classifying timeouts
    pub fn network_from_reqwest(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            ErrorCode::ConnectionTimeout
        } else {
            ErrorCode::HttpError
        };
        Self::Network {
            code,
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create API error with status code
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            code: ErrorCode::ApiError,
            status,
            message: message.into(),
        }
    }

    /// Create invalid response error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            code: ErrorCode::InvalidResponse,
            message: message.into(),
        }
    }

    // --- Configuration ---

    /// Create configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::ConfigError,
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration error from config crate error
    pub fn config_from_error(err: config::ConfigError) -> Self {
        Self::Config {
            code: ErrorCode::ConfigError,
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create invalid endpoint error
    pub fn invalid_endpoint(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::InvalidEndpoint,
            message: message.into(),
            source: None,
        }
    }

    /// Create missing credentials error
    pub fn missing_credentials() -> Self {
        Self::Config {
            code: ErrorCode::MissingCredentials,
            message: "API keys are not configured. Run `marvel-explorer config set-keys <PUBLIC> <PRIVATE>` or set MARVEL_PUBLIC_KEY and MARVEL_PRIVATE_KEY".to_string(),
            source: None,
        }
    }

    // --- Validation ---

    /// Create invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            code: ErrorCode::InvalidInput,
            message: message.into(),
        }
    }

    // --- Resource ---

    /// Create not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            code: ErrorCode::ResourceNotFound,
            resource: resource.into(),
        }
    }

    /// Create the single user-visible failure a view reports
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::FetchFailed {
            code: ErrorCode::FetchFailed,
            message: message.into(),
        }
    }

    // --- UI ---

    /// Create UI error
    pub fn ui(message: impl Into<String>) -> Self {
        Self::Ui {
            code: ErrorCode::DialogError,
            message: message.into(),
        }
    }

    // ==================== Query Methods ====================

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Network { code, .. } => *code,
            Self::Api { code, .. } => *code,
            Self::InvalidResponse { code, .. } => *code,
            Self::Config { code, .. } => *code,
            Self::InvalidInput { code, .. } => *code,
            Self::NotFound { code, .. } => *code,
            Self::FetchFailed { code, .. } => *code,
            Self::Ui { code, .. } => *code,
            Self::Serialization { code, .. } => *code,
        }
    }

    /// Check if this is a transport error: network failure, non-2xx status,
    /// or an undecodable response body
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Api { .. } | Self::InvalidResponse { .. }
        )
    }

    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ==================== From Implementations ====================

impl From<std::io::Error> for ExplorerError {
    fn from(err: std::io::Error) -> Self {
        Self::config(format!("IO operation failed: {}", err))
    }
}

impl From<reqwest::Error> for ExplorerError {
    fn from(err: reqwest::Error) -> Self {
        Self::network_from_reqwest(err)
    }
}

impl From<serde_json::Error> for ExplorerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            code: ErrorCode::SerializationError,
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<config::ConfigError> for ExplorerError {
    fn from(err: config::ConfigError) -> Self {
        Self::config_from_error(err)
    }
}

impl From<dialoguer::Error> for ExplorerError {
    fn from(err: dialoguer::Error) -> Self {
        Self::ui(format!("Dialog error: {}", err))
    }
}

impl From<validator::ValidationErrors> for ExplorerError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::invalid_input(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::HttpError.code(), 201);
        assert_eq!(ErrorCode::ConfigError.code(), 401);
        assert_eq!(ErrorCode::InvalidInput.code(), 501);
        assert_eq!(ErrorCode::FetchFailed.code(), 707);
    }

    #[test]
    fn test_error_code_string() {
        assert_eq!(ErrorCode::ApiError.as_str(), "E205");
        assert_eq!(ErrorCode::MissingCredentials.to_string(), "E403");
    }

    #[test]
    fn test_error_display() {
        let err = ExplorerError::api(401, "The passed API key is invalid.");
        assert!(err.to_string().contains("E205"));
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("The passed API key is invalid."));
    }

    #[test]
    fn test_transport_classification() {
        assert!(ExplorerError::network("connection reset").is_transport_error());
        assert!(ExplorerError::api(500, "boom").is_transport_error());
        assert!(ExplorerError::invalid_response("not json").is_transport_error());
        assert!(!ExplorerError::invalid_input("limit").is_transport_error());
        assert!(!ExplorerError::missing_credentials().is_transport_error());
    }

    #[test]
    fn test_fetch_failed_display_is_the_message() {
        let err = ExplorerError::fetch_failed("Failed to fetch characters. Please try again later.");
        assert_eq!(
            err.to_string(),
            "[E707] Failed to fetch characters. Please try again later."
        );
    }
}
