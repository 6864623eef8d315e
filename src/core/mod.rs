//! Core module containing the validation types and traits

pub mod error;
pub mod media;
pub mod responder;
pub mod schema;
pub mod validation;

pub use error::{
    ConfigError, ErrorResponse, GuardError, MediaError, SchemaError, ValidationError,
};
pub use media::{AsyncRequestMedia, MediaRequest, MediaResponse, RequestMedia, ResponseMedia};
pub use responder::{AsyncResponder, FnResponder, Responder, responder_fn};
pub use schema::{JsonSchema, SchemaViolation};
pub use validation::{DEFAULT_BODY_LIMIT, MediaValidator, Validated, validate};
