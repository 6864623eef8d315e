//! Configuration loading for endpoint schemas
//!
//! Schemas can be declared in YAML instead of being built in code:
//!
//! ```yaml
//! body_limit: 1048576
//! endpoints:
//!   - name: create_user
//!     request_schema:
//!       type: object
//!       required: [name]
//!     response_schema:
//!       type: object
//! ```

use crate::core::error::{ConfigError, GuardError};
use crate::core::validation::MediaValidator;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schemas for one endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Name used to look the endpoint up
    pub name: String,

    /// Schema for incoming media
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_schema: Option<Value>,

    /// Schema for outgoing media
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

/// Complete validation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum body size buffered by the HTTP layer, in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_limit: Option<usize>,

    /// Endpoint schema declarations
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

impl ValidationConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        tracing::debug!(path, endpoints = config.endpoints.len(), "Loaded validation config");
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Merge several configurations into one
    ///
    /// An endpoint declared again replaces the earlier declaration in place.
    /// The last body limit that is set wins.
    pub fn merge(configs: Vec<Self>) -> Self {
        let mut merged = Self::default();

        for config in configs {
            if config.body_limit.is_some() {
                merged.body_limit = config.body_limit;
            }

            for endpoint in config.endpoints {
                match merged.endpoints.iter_mut().find(|e| e.name == endpoint.name) {
                    Some(existing) => {
                        tracing::debug!(endpoint = %endpoint.name, "Overriding endpoint schemas");
                        *existing = endpoint;
                    }
                    None => merged.endpoints.push(endpoint),
                }
            }
        }

        merged
    }

    /// Find an endpoint by name
    pub fn endpoint(&self, name: &str) -> Option<&EndpointConfig> {
        self.endpoints.iter().find(|e| e.name == name)
    }

    /// Build the validator for an endpoint
    pub fn validator(&self, name: &str) -> Result<MediaValidator, GuardError> {
        let endpoint = self
            .endpoint(name)
            .ok_or_else(|| ConfigError::UnknownEndpoint {
                name: name.to_string(),
            })?;

        if endpoint.request_schema.is_none() && endpoint.response_schema.is_none() {
            return Err(ConfigError::EmptyEndpoint {
                name: name.to_string(),
            }
            .into());
        }

        let validator = MediaValidator::new(
            endpoint.request_schema.as_ref(),
            endpoint.response_schema.as_ref(),
        )?;

        Ok(match self.body_limit {
            Some(limit) => validator.with_body_limit(limit),
            None => validator,
        })
    }
}
