//! Axum integration
//!
//! - [`extractor`]: `MediaRequest` as an extractor, `MediaResponse` as a response
//! - [`handler`]: responders as axum handlers
//! - [`layer`]: a tower layer validating the media of plain axum routes

pub mod extractor;
pub mod handler;
pub mod layer;

pub use handler::{into_handler, into_sync_handler};
pub use layer::{MediaValidationLayer, MediaValidationService};
