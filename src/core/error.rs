//! Typed error handling for media validation
//!
//! Every failure the validators can produce is a [`GuardError`]. Each variant
//! wraps a more specific error type and knows its HTTP status code and a
//! stable error code, so handlers can either match on the error or simply
//! return it and let axum render it.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: request or response media violated its schema
//! - [`MediaError`]: the body could not be read or deserialized
//! - [`SchemaError`]: a schema document could not be compiled
//! - [`ConfigError`]: validation configuration is incomplete or inconsistent
//!
//! # Example
//!
//! ```rust,ignore
//! use media_guard::prelude::*;
//!
//! match validator.validate_request(&payload) {
//!     Ok(()) => {}
//!     Err(GuardError::Validation(ValidationError::Request { message })) => {
//!         println!("client sent bad data: {}", message);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// Title used when request media fails schema validation
pub const REQUEST_VALIDATION_TITLE: &str = "Request data failed validation";

/// Title used when response media fails schema validation
pub const RESPONSE_VALIDATION_TITLE: &str = "Response data failed validation";

/// The main error type of the crate
#[derive(Debug)]
pub enum GuardError {
    /// Media did not satisfy its schema
    Validation(ValidationError),

    /// Media could not be retrieved or deserialized
    Media(MediaError),

    /// A schema document is not a valid JSON Schema
    Schema(SchemaError),

    /// Validation configuration errors
    Config(ConfigError),
}

impl fmt::Display for GuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardError::Validation(e) => write!(f, "{}", e),
            GuardError::Media(e) => write!(f, "{}", e),
            GuardError::Schema(e) => write!(f, "{}", e),
            GuardError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GuardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GuardError::Validation(e) => Some(e),
            GuardError::Media(e) => Some(e),
            GuardError::Schema(e) => Some(e),
            GuardError::Config(e) => Some(e),
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Short human-readable summary
    pub title: String,
    /// Optional longer explanation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl GuardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GuardError::Validation(e) => e.status_code(),
            GuardError::Media(e) => e.status_code(),
            GuardError::Schema(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GuardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            GuardError::Validation(e) => e.error_code(),
            GuardError::Media(e) => e.error_code(),
            GuardError::Schema(_) => "SCHEMA_ERROR",
            GuardError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Short summary shown to HTTP clients
    pub fn title(&self) -> &'static str {
        match self {
            GuardError::Validation(ValidationError::Request { .. }) => REQUEST_VALIDATION_TITLE,
            GuardError::Validation(ValidationError::Response) => RESPONSE_VALIDATION_TITLE,
            GuardError::Media(_) => "Invalid request media",
            GuardError::Schema(_) | GuardError::Config(_) => "Internal Server Error",
        }
    }

    /// Description shown to HTTP clients
    ///
    /// Server-side failures never expose their details.
    pub fn description(&self) -> Option<String> {
        match self {
            GuardError::Validation(ValidationError::Request { message }) => Some(message.clone()),
            GuardError::Media(e) => Some(e.to_string()),
            _ => None,
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            title: self.title().to_string(),
            description: self.description(),
        }
    }

    /// Whether this error was caused by the client
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Schema violations of request or response media
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Incoming media violated the request schema
    Request {
        /// Message produced by the schema validator
        message: String,
    },

    /// Outgoing media violated the response schema
    ///
    /// Carries no detail: a broken response shape is a server bug and its
    /// description must not reach the client.
    Response,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Request { message } => {
                write!(f, "{}: {}", REQUEST_VALIDATION_TITLE, message)
            }
            ValidationError::Response => write!(f, "{}", RESPONSE_VALIDATION_TITLE),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::Request { .. } => StatusCode::BAD_REQUEST,
            ValidationError::Response => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::Request { .. } => "REQUEST_VALIDATION_FAILED",
            ValidationError::Response => "RESPONSE_VALIDATION_FAILED",
        }
    }
}

impl From<ValidationError> for GuardError {
    fn from(err: ValidationError) -> Self {
        GuardError::Validation(err)
    }
}

// =============================================================================
// Media Errors
// =============================================================================

/// Errors raised while retrieving or deserializing a body
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    /// The body was empty
    #[error("Could not parse an empty JSON body")]
    Missing,

    /// The body is not valid JSON
    #[error("Could not parse JSON body - {message}")]
    Malformed { message: String },

    /// The body exceeded the configured limit
    #[error("Body exceeds the configured size limit")]
    TooLarge,

    /// The body could not be read from the connection
    #[error("Could not read body: {message}")]
    Unreadable { message: String },
}

impl MediaError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MediaError::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            MediaError::Missing => "MEDIA_MISSING",
            MediaError::Malformed { .. } => "MEDIA_MALFORMED",
            MediaError::TooLarge => "MEDIA_TOO_LARGE",
            MediaError::Unreadable { .. } => "MEDIA_UNREADABLE",
        }
    }
}

impl From<MediaError> for GuardError {
    fn from(err: MediaError) -> Self {
        GuardError::Media(err)
    }
}

// =============================================================================
// Schema Errors
// =============================================================================

/// A schema document that could not be compiled
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid JSON schema: {message}")]
pub struct SchemaError {
    pub message: String,
}

impl From<SchemaError> for GuardError {
    fn from(err: SchemaError) -> Self {
        GuardError::Schema(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to validation configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No endpoint with this name is configured
    UnknownEndpoint { name: String },

    /// An endpoint is declared without any schema
    EmptyEndpoint { name: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownEndpoint { name } => {
                write!(f, "No validation configured for endpoint '{}'", name)
            }
            ConfigError::EmptyEndpoint { name } => {
                write!(f, "Endpoint '{}' declares neither a request nor a response schema", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for GuardError {
    fn from(err: ConfigError) -> Self {
        GuardError::Config(err)
    }
}
