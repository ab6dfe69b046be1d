//! Failure taxonomy for actions and pipeline runs

use crate::core::{ExtractionError, Value};
use crate::http::TransportError;
use thiserror::Error;

/// Why a single action failed
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("request body cannot be encoded: {0}")]
    BodySerialization(#[source] serde_json::Error),

    #[error("expected status {expected} but got {actual}{}", format_body(.body))]
    UnexpectedStatus {
        expected: u16,
        actual: u16,
        body: Option<Value>,
    },

    #[error("response body is not valid JSON: {0}")]
    ResponseDecode(#[source] serde_json::Error),

    #[error("setter '{path}' could not be resolved: {source}")]
    SetterResolutionFailed {
        path: String,
        #[source]
        source: ExtractionError,
    },

    #[error("assertion '{path}' could not be resolved: {source}")]
    AssertionExtractionFailed {
        path: String,
        #[source]
        source: ExtractionError,
    },

    #[error("assertion '{path}' failed: expected {expected}, got {actual}")]
    AssertionMismatch {
        path: String,
        expected: Value,
        actual: Value,
    },
}

fn format_body(body: &Option<Value>) -> String {
    match body {
        Some(body) => format!(" (response: {})", body),
        None => String::new(),
    }
}

impl ActionError {
    /// Short name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            ActionError::Transport(_) => "TransportError",
            ActionError::BodySerialization(_) => "BodySerializationError",
            ActionError::UnexpectedStatus { .. } => "UnexpectedStatus",
            ActionError::ResponseDecode(_) => "ResponseDecodeError",
            ActionError::SetterResolutionFailed { .. } => "SetterResolutionFailed",
            ActionError::AssertionExtractionFailed { .. } => "AssertionExtractionFailed",
            ActionError::AssertionMismatch { .. } => "AssertionMismatch",
        }
    }
}

/// A pipeline run aborted by its first failing action
#[derive(Debug, Error)]
#[error("action #{position} ({label}) failed: {source}")]
pub struct PipelineError {
    /// 1-based position of the failing action
    pub position: usize,

    /// Description or `METHOD endpoint` of the failing action
    pub label: String,

    #[source]
    pub source: ActionError,
}
