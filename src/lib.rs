//! # media-guard
//!
//! JSON Schema validation of request and response media for axum.
//!
//! ## Features
//!
//! - **Request validation**: incoming media is checked before the handler runs;
//!   violations become `400 Bad Request` with the validator's message
//! - **Response validation**: outgoing media is checked after the handler
//!   returns; violations become `500 Internal Server Error` without detail
//! - **Format checks**: the `format` keyword (email, date-time, ...) is enforced
//! - **Sync and async responders**: one wrapper, picked by the responder's trait
//! - **Tower layer**: the same validation for plain axum handlers
//! - **YAML configuration**: endpoint schemas declared outside the code
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use media_guard::prelude::*;
//! use serde_json::json;
//!
//! struct CreateUser;
//!
//! #[async_trait]
//! impl AsyncResponder<MediaRequest, MediaResponse> for CreateUser {
//!     type Output = ();
//!     type Error = GuardError;
//!
//!     async fn respond_async(
//!         &self,
//!         req: &mut MediaRequest,
//!         resp: &mut MediaResponse,
//!         _args: (),
//!     ) -> Result<(), GuardError> {
//!         let user = req.get_media().await?.clone();
//!         resp.set_status(StatusCode::CREATED);
//!         resp.set_media(user);
//!         Ok(())
//!     }
//! }
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": { "name": { "type": "string" } },
//!     "required": ["name"]
//! });
//!
//! let validator = validate(Some(&schema), Some(&schema))?;
//! let app = Router::new().route("/users", post(into_handler(validator.wrap(CreateUser))));
//! ```

pub mod config;
pub mod core;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Validation ===
    pub use crate::core::{
        DEFAULT_BODY_LIMIT, JsonSchema, MediaValidator, SchemaViolation, Validated, validate,
    };

    // === Responders & Media ===
    pub use crate::core::{
        AsyncRequestMedia, AsyncResponder, FnResponder, MediaRequest, MediaResponse,
        RequestMedia, Responder, ResponseMedia, responder_fn,
    };

    // === Errors ===
    pub use crate::core::{
        ConfigError, ErrorResponse, GuardError, MediaError, SchemaError, ValidationError,
    };

    // === Config ===
    pub use crate::config::{EndpointConfig, ValidationConfig};

    // === Server ===
    pub use crate::server::{
        MediaValidationLayer, MediaValidationService, into_handler, into_sync_handler,
    };

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde_json::Value;

    // === Axum ===
    pub use axum::{
        Router,
        extract::{Path, State},
        http::{StatusCode, Uri},
        routing::{get, post, put},
    };
}
