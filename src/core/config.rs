//! Pipeline documents in YAML or JSON

use crate::core::{value::Value, Pipeline};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a pipeline document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("cannot read pipeline document: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid pipeline: {0}")]
    Invalid(String),
}

/// Top-level pipeline document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Free-form description printed before the run
    #[serde(default)]
    pub description: String,

    /// Prefix joined in front of every action endpoint
    #[serde(
        default,
        rename = "baseURL",
        alias = "base_url",
        alias = "baseUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_url: Option<String>,

    /// Actions, executed in document order
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
}

/// One action as written in the document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfig {
    /// HTTP method, GET when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    pub endpoint: String,

    /// Expected status code, 200 when absent
    #[serde(default, alias = "status_code", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,

    /// Response path -> variable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setters: Option<IndexMap<String, String>>,

    /// Response path -> expected value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assertions: Option<IndexMap<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, alias = "log_request_body", skip_serializing_if = "Option::is_none")]
    pub log_request_body: Option<bool>,

    #[serde(default, alias = "log_response_body", skip_serializing_if = "Option::is_none")]
    pub log_response_body: Option<bool>,
}

impl PipelineConfig {
    /// Load a pipeline document, choosing the format from the file extension
    ///
    /// `.json` files are read as JSON, everything else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Parse a pipeline document from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, DocumentError> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a pipeline document from a JSON string
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check what deserialization alone cannot
    pub fn validate(&self) -> Result<(), DocumentError> {
        for (index, action) in self.actions.iter().enumerate() {
            let position = index + 1;

            if action.endpoint.trim().is_empty() {
                return Err(DocumentError::Invalid(format!(
                    "action #{} has an empty endpoint",
                    position
                )));
            }

            if let Some(method) = &action.method {
                if !is_http_token(method) {
                    return Err(DocumentError::Invalid(format!(
                        "action #{} has an invalid method '{}'",
                        position, method
                    )));
                }
            }

            if let Some(status) = action.status_code {
                if !(100..=599).contains(&status) {
                    return Err(DocumentError::Invalid(format!(
                        "action #{} expects status code {}, which is outside 100-599",
                        position, status
                    )));
                }
            }

            if let Some(body) = &action.body {
                if body.as_mapping().is_none() {
                    return Err(DocumentError::Invalid(format!(
                        "action #{} body must be a mapping, found a {}",
                        position,
                        body.kind()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Convert config to a Pipeline domain model
    pub fn to_pipeline(&self) -> Pipeline {
        Pipeline::from_config(self)
    }
}

/// RFC 9110 token characters
fn is_http_token(method: &str) -> bool {
    !method.is_empty()
        && method
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c))
}
