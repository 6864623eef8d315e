//! The validation decorator factory

use super::decorator::Validated;
use crate::core::error::{GuardError, SchemaError, ValidationError};
use crate::core::schema::JsonSchema;
use serde_json::Value;

/// Largest body the HTTP layer buffers by default (matches axum's default limit)
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Validates request and response media against optional JSON Schemas
///
/// Build one with [`validate`] and apply it to a responder with
/// [`MediaValidator::wrap`], or to an axum route with
/// [`MediaValidator::layer`](crate::server::MediaValidationLayer).
#[derive(Debug, Clone)]
pub struct MediaValidator {
    request: Option<JsonSchema>,
    response: Option<JsonSchema>,
    body_limit: usize,
}

/// Create a validator for request and/or response media
///
/// Schemas are compiled here, so a malformed schema is reported once, at
/// construction, rather than on every request.
///
/// # Example
///
/// ```rust,ignore
/// let validator = validate(Some(&json!({
///     "type": "object",
///     "required": ["name"]
/// })), None)?;
///
/// let create_user = validator.wrap(CreateUser);
/// ```
pub fn validate(
    req_schema: Option<&Value>,
    resp_schema: Option<&Value>,
) -> Result<MediaValidator, SchemaError> {
    MediaValidator::new(req_schema, resp_schema)
}

impl MediaValidator {
    pub fn new(req_schema: Option<&Value>, resp_schema: Option<&Value>) -> Result<Self, SchemaError> {
        Ok(Self {
            request: req_schema.map(compile_request).transpose()?,
            response: resp_schema.map(compile_response).transpose()?,
            body_limit: DEFAULT_BODY_LIMIT,
        })
    }

    /// Replace the request schema
    pub fn with_request_schema(mut self, schema: &Value) -> Result<Self, SchemaError> {
        self.request = Some(compile_request(schema)?);
        Ok(self)
    }

    /// Replace the response schema
    pub fn with_response_schema(mut self, schema: &Value) -> Result<Self, SchemaError> {
        self.response = Some(compile_response(schema)?);
        Ok(self)
    }

    /// Limit the number of body bytes buffered by the HTTP layer
    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    pub fn request_schema(&self) -> Option<&JsonSchema> {
        self.request.as_ref()
    }

    pub fn response_schema(&self) -> Option<&JsonSchema> {
        self.response.as_ref()
    }

    pub fn body_limit(&self) -> usize {
        self.body_limit
    }

    /// Validate incoming media
    ///
    /// Succeeds trivially when no request schema is set. A violation becomes
    /// a client error carrying the validator's message.
    pub fn validate_request(&self, media: &Value) -> Result<(), GuardError> {
        let Some(schema) = &self.request else {
            return Ok(());
        };

        schema.validate(media).map_err(|violation| {
            tracing::debug!(error = %violation, "Request media failed schema validation");
            GuardError::from(ValidationError::Request {
                message: violation.message,
            })
        })
    }

    /// Validate outgoing media
    ///
    /// Unset media is validated as `null`. A violation becomes a server error
    /// without detail; the detail only goes to the log.
    pub fn validate_response(&self, media: Option<&Value>) -> Result<(), GuardError> {
        let Some(schema) = &self.response else {
            return Ok(());
        };

        let null = Value::Null;
        schema
            .validate(media.unwrap_or(&null))
            .map_err(|violation| {
                tracing::warn!(error = %violation, "Response media failed schema validation");
                GuardError::from(ValidationError::Response)
            })
    }

    /// Wrap a responder so its media is validated around each call
    ///
    /// The result implements [`Responder`](crate::core::Responder) when `handler`
    /// does and [`AsyncResponder`](crate::core::AsyncResponder) when `handler`
    /// does.
    pub fn wrap<H>(&self, handler: H) -> Validated<H> {
        Validated::new(handler, self.clone())
    }
}

impl Default for MediaValidator {
    fn default() -> Self {
        Self {
            request: None,
            response: None,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

fn compile_request(schema: &Value) -> Result<JsonSchema, SchemaError> {
    JsonSchema::compile(schema).inspect_err(|e| {
        tracing::error!(error = %e, "Request schema failed to compile");
    })
}

fn compile_response(schema: &Value) -> Result<JsonSchema, SchemaError> {
    JsonSchema::compile(schema).inspect_err(|e| {
        tracing::error!(error = %e, "Response schema failed to compile");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_schema() -> Value {
        json!({
            "type": "object",
            "properties": { "name": { "type": "string" } },
            "required": ["name"]
        })
    }

    #[test]
    fn test_no_schemas_accepts_anything() {
        let validator = MediaValidator::default();
        assert!(validator.validate_request(&json!(42)).is_ok());
        assert!(validator.validate_response(None).is_ok());
    }

    #[test]
    fn test_request_violation_is_client_error() {
        let validator = validate(Some(&user_schema()), None).unwrap();
        assert!(validator.validate_request(&json!({ "name": "x" })).is_ok());

        let err = validator.validate_request(&json!({})).unwrap_err();
        assert!(err.is_client_error());
        match err {
            GuardError::Validation(ValidationError::Request { message }) => {
                assert!(message.contains("name"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_response_violation_is_opaque_server_error() {
        let validator = validate(None, Some(&user_schema())).unwrap();
        assert!(validator.validate_response(Some(&json!({ "name": "x" }))).is_ok());

        let err = validator.validate_response(Some(&json!({ "name": 7 }))).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.to_string().contains("string"));
    }

    #[test]
    fn test_unset_response_media_is_null() {
        let validator = validate(None, Some(&json!({ "type": "null" }))).unwrap();
        assert!(validator.validate_response(None).is_ok());

        let validator = validate(None, Some(&user_schema())).unwrap();
        assert!(validator.validate_response(None).is_err());
    }

    #[test]
    fn test_invalid_schema_is_rejected_at_construction() {
        assert!(validate(Some(&json!({ "type": "nope" })), None).is_err());
        assert!(validate(None, Some(&json!({ "type": 42 }))).is_err());
    }

    #[test]
    fn test_builder_methods() {
        let validator = MediaValidator::default()
            .with_request_schema(&user_schema())
            .unwrap()
            .with_response_schema(&json!({ "type": "object" }))
            .unwrap()
            .with_body_limit(1024);

        assert_eq!(validator.body_limit(), 1024);
        assert_eq!(validator.request_schema().unwrap().as_value(), &user_schema());
        assert!(validator.response_schema().is_some());
    }
}
