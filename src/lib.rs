//! apiline - run declarative HTTP API pipelines
//!
//! A pipeline document lists HTTP actions. Each action resolves `@{name}`
//! tokens against variables captured by earlier actions, sends its request,
//! checks the status code, then captures and asserts values from the JSON
//! response.

pub mod cli;
pub mod core;
pub mod execution;
pub mod http;

// Re-export commonly used types
pub use crate::core::config::{DocumentError, PipelineConfig};
pub use crate::core::{Action, ExecutionStatus, ExtractionError, Pipeline, Value, VariableStore};
pub use crate::execution::{ActionError, ExecutionEngine, ExecutionEvent, PipelineError};
pub use crate::http::{HttpClientConfig, HttpDispatcher, ReqwestDispatcher};
