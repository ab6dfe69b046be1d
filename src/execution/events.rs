//! Observational events emitted while a pipeline runs

use crate::core::{ActionPhase, ExecutionStatus, Value};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Events that can occur during pipeline execution
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    PipelineStarted {
        execution_id: Uuid,
        description: String,
        total_actions: usize,
    },
    ActionStarted {
        position: usize,
        method: String,
        label: String,
    },
    EndpointResolved {
        position: usize,
        url: String,
    },
    /// Only emitted for actions with request body logging on
    RequestBody {
        position: usize,
        body: Value,
    },
    StatusReceived {
        position: usize,
        status: u16,
        expected: u16,
    },
    /// Only emitted for actions with response body logging on
    ResponseBody {
        position: usize,
        text: String,
    },
    VariableSet {
        position: usize,
        name: String,
        value: Value,
    },
    AssertionPassed {
        position: usize,
        path: String,
        value: Value,
    },
    ActionCompleted {
        position: usize,
        status: u16,
    },
    ActionFailed {
        position: usize,
        phase: ActionPhase,
        error: String,
    },
    PipelineCompleted {
        execution_id: Uuid,
        status: ExecutionStatus,
        completed_actions: usize,
        total_actions: usize,
        duration: Option<Duration>,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(ExecutionEvent) + Send + Sync>;

/// Fans events out to every registered handler
#[derive(Clone, Default)]
pub struct EventEmitter {
    handlers: Vec<EventHandler>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_handler<F>(&mut self, handler: F)
    where
        F: Fn(ExecutionEvent) + Send + Sync + 'static,
    {
        self.handlers.push(Arc::new(handler));
    }

    pub fn emit(&self, event: ExecutionEvent) {
        for handler in &self.handlers {
            handler(event.clone());
        }
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
