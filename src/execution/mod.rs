//! Pipeline execution engine

pub mod engine;
pub mod error;
pub mod events;
pub mod executor;

pub use engine::{ExecutionEngine, RunOutcome};
pub use error::{ActionError, PipelineError};
pub use events::{EventEmitter, EventHandler, ExecutionEvent};
pub use executor::{ActionExecutor, ExecutionResult};
