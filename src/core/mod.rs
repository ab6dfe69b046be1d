//! Core domain models for Pipeline
//!
//! This module defines the value tree, the variable store, the two pure
//! engines that operate on them (template substitution and path
//! extraction) and the pipeline / action model loaded from documents.

pub mod config;
pub mod context;
pub mod extract;
pub mod pipeline;
pub mod state;
pub mod template;
pub mod value;

pub use context::*;
pub use extract::{extract, ExtractionError};
pub use pipeline::*;
pub use state::*;
pub use template::{substitute, substitute_str};
pub use value::{Mapping, Number, Value, ValueKind};
