//! Pipeline domain model

use crate::core::{
    config::{ActionConfig, PipelineConfig},
    value::Value,
};
use indexmap::IndexMap;
use serde::Serialize;

pub const DEFAULT_METHOD: &str = "GET";
pub const DEFAULT_STATUS_CODE: u16 = 200;

/// A pipeline: ordered actions sharing one base URL
#[derive(Debug, Clone, Default, Serialize)]
pub struct Pipeline {
    pub description: String,

    pub base_url: Option<String>,

    pub actions: Vec<Action>,
}

/// One HTTP call with its captures and checks
///
/// Document defaults are applied once, when the action is built from its
/// config; `0`, `""` and `false` written in the document are kept as is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    /// Upper-cased HTTP method
    pub method: String,

    /// Endpoint template, joined to the base URL
    pub endpoint: String,

    pub status_code: u16,

    /// Request body template
    pub body: Option<Value>,

    /// Response path -> variable name
    pub setters: IndexMap<String, String>,

    /// Response path -> expected value template
    pub assertions: IndexMap<String, Value>,

    pub description: Option<String>,

    pub log_request_body: bool,

    pub log_response_body: bool,
}

impl Pipeline {
    /// Create an empty pipeline
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Create a pipeline from configuration
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            description: config.description.clone(),
            base_url: config.base_url.clone(),
            actions: config.actions.iter().map(Action::from_config).collect(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}

impl Action {
    /// A GET action expecting 200 with nothing to capture or check
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            method: DEFAULT_METHOD.to_string(),
            endpoint: endpoint.into(),
            status_code: DEFAULT_STATUS_CODE,
            body: None,
            setters: IndexMap::new(),
            assertions: IndexMap::new(),
            description: None,
            log_request_body: false,
            log_response_body: false,
        }
    }

    /// Create an action from its document form
    pub fn from_config(config: &ActionConfig) -> Self {
        Self {
            method: config
                .method
                .as_deref()
                .unwrap_or(DEFAULT_METHOD)
                .to_ascii_uppercase(),
            endpoint: config.endpoint.clone(),
            status_code: config.status_code.unwrap_or(DEFAULT_STATUS_CODE),
            body: config.body.clone(),
            setters: config.setters.clone().unwrap_or_default(),
            assertions: config.assertions.clone().unwrap_or_default(),
            description: config.description.clone(),
            log_request_body: config.log_request_body.unwrap_or(false),
            log_response_body: config.log_response_body.unwrap_or(false),
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into().to_ascii_uppercase();
        self
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_setter(mut self, path: impl Into<String>, variable: impl Into<String>) -> Self {
        self.setters.insert(path.into(), variable.into());
        self
    }

    pub fn with_assertion(mut self, path: impl Into<String>, expected: Value) -> Self {
        self.assertions.insert(path.into(), expected);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_body_logging(mut self, request: bool, response: bool) -> Self {
        self.log_request_body = request;
        self.log_response_body = response;
        self
    }

    /// Short human label: the description, or `METHOD endpoint`
    pub fn label(&self) -> String {
        match &self.description {
            Some(description) if !description.is_empty() => description.clone(),
            _ => format!("{} {}", self.method, self.endpoint),
        }
    }

    /// Whether the response body is needed after status validation
    pub fn reads_response(&self) -> bool {
        !self.setters.is_empty() || !self.assertions.is_empty()
    }
}

/// Join a base URL and an endpoint with exactly one `/` between them
pub fn join_url(base_url: Option<&str>, endpoint: &str) -> String {
    match base_url {
        Some(base) => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        ),
        None => endpoint.to_string(),
    }
}
