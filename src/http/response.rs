//! HTTP request / response types and transport errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to obtain a response at all
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("timeout after {0} seconds")]
    Timeout(u64),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("transport error: {0}")]
    Other(String),
}

/// A fully resolved request, ready to send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    /// Serialized JSON body; empty when the action has none
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            body,
        }
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// Body as text, lossily decoded
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Status and payload of a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A response carrying a JSON document
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// A response with no payload
    pub fn empty(status: u16) -> Self {
        Self::new(status, Vec::new())
    }

    /// True when the payload is empty or only whitespace
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(|b| b.is_ascii_whitespace())
    }

    /// Body as text, lossily decoded
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
