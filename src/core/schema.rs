//! Compiled JSON Schema documents
//!
//! A [`JsonSchema`] is compiled once, when a validator is built, and then
//! shared by every request it validates. Semantic checks through the
//! `format` keyword are switched on for all formats the `jsonschema` crate
//! knows about.

use super::error::SchemaError;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A single violation reported by the schema validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Human-readable message, e.g. `"name" is a required property`
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A compiled JSON Schema
///
/// Cloning is cheap; the compiled form is reference counted.
#[derive(Clone)]
pub struct JsonSchema {
    source: Arc<Value>,
    validator: Arc<jsonschema::Validator>,
}

impl JsonSchema {
    /// Compile a schema document
    ///
    /// The draft is taken from `$schema` when present, otherwise the latest
    /// draft supported by the validator is used.
    pub fn compile(schema: &Value) -> Result<Self, SchemaError> {
        let validator = jsonschema::options()
            .should_validate_formats(true)
            .build(schema)
            .map_err(|e| SchemaError {
                message: e.to_string(),
            })?;

        Ok(Self {
            source: Arc::new(schema.clone()),
            validator: Arc::new(validator),
        })
    }

    /// Validate an instance, reporting the first violation found
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaViolation> {
        self.validator
            .validate(instance)
            .map_err(|e| SchemaViolation {
                message: e.to_string(),
            })
    }

    /// Check an instance without building an error
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// The schema document this was compiled from
    pub fn as_value(&self) -> &Value {
        &self.source
    }
}

impl fmt::Debug for JsonSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchema")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl TryFrom<&Value> for JsonSchema {
    type Error = SchemaError;

    fn try_from(schema: &Value) -> Result<Self, Self::Error> {
        Self::compile(schema)
    }
}
