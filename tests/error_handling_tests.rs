//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses are properly formatted
//! - Error conversions work correctly

use axum::body::to_bytes;
use axum::response::IntoResponse;
use media_guard::prelude::*;

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_request_validation_returns_400() {
        let err = GuardError::Validation(ValidationError::Request {
            message: "\"name\" is a required property".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_response_validation_returns_500() {
        let err = GuardError::Validation(ValidationError::Response);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_media_errors_return_400() {
        for err in [
            MediaError::Missing,
            MediaError::Malformed {
                message: "expected value".to_string(),
            },
            MediaError::Unreadable {
                message: "connection reset".to_string(),
            },
        ] {
            assert_eq!(GuardError::Media(err).status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_media_too_large_returns_413() {
        let err = GuardError::Media(MediaError::TooLarge);
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_schema_and_config_errors_return_500() {
        let schema = GuardError::Schema(SchemaError {
            message: "bad keyword".to_string(),
        });
        let config = GuardError::Config(ConfigError::UnknownEndpoint {
            name: "ping".to_string(),
        });
        assert_eq!(schema.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(config.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// =============================================================================
// Error Code Tests
// =============================================================================

mod error_code_tests {
    use super::*;

    #[test]
    fn test_validation_error_codes() {
        assert_eq!(
            ValidationError::Request {
                message: String::new()
            }
            .error_code(),
            "REQUEST_VALIDATION_FAILED"
        );
        assert_eq!(
            ValidationError::Response.error_code(),
            "RESPONSE_VALIDATION_FAILED"
        );
    }

    #[test]
    fn test_media_error_codes() {
        assert_eq!(MediaError::Missing.error_code(), "MEDIA_MISSING");
        assert_eq!(MediaError::TooLarge.error_code(), "MEDIA_TOO_LARGE");
        assert_eq!(
            MediaError::Malformed {
                message: String::new()
            }
            .error_code(),
            "MEDIA_MALFORMED"
        );
    }

    #[test]
    fn test_top_level_codes() {
        let err: GuardError = SchemaError {
            message: String::new(),
        }
        .into();
        assert_eq!(err.error_code(), "SCHEMA_ERROR");

        let err: GuardError = ConfigError::EmptyEndpoint {
            name: "ping".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}

// =============================================================================
// Error Response Tests
// =============================================================================

mod response_tests {
    use super::*;

    #[tokio::test]
    async fn test_request_error_body() {
        let err = GuardError::from(ValidationError::Request {
            message: "\"name\" is a required property".to_string(),
        });

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "REQUEST_VALIDATION_FAILED");
        assert_eq!(body["title"], "Request data failed validation");
        assert_eq!(body["description"], "\"name\" is a required property");
    }

    #[tokio::test]
    async fn test_schema_error_body_has_no_detail() {
        let err = GuardError::from(SchemaError {
            message: "secret internals".to_string(),
        });

        let response = err.into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!text.contains("secret internals"));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let err = GuardError::from(MediaError::Missing);
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), MediaError::Missing.to_string());
    }
}
