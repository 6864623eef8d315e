//! Media validation
//!
//! [`validate`] builds a [`MediaValidator`] from optional request and response
//! schemas; [`MediaValidator::wrap`] applies it to a responder, producing a
//! [`Validated`] responder that checks media before and after the handler.

pub mod decorator;
pub mod validator;

pub use decorator::Validated;
pub use validator::{DEFAULT_BODY_LIMIT, MediaValidator, validate};
