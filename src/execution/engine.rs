//! Main execution engine - runs a pipeline's actions in order

use crate::{
    core::{Pipeline, PipelineState, VariableStore},
    execution::{
        ActionExecutor, EventEmitter, ExecutionEvent, ExecutionResult, PipelineError,
    },
    http::HttpDispatcher,
};
use tracing::{error, info};

/// Everything a finished run leaves behind
#[derive(Debug)]
pub struct RunOutcome {
    pub state: PipelineState,

    /// Variables captured during the run
    pub variables: VariableStore,

    pub result: Result<(), PipelineError>,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Main pipeline execution engine
///
/// Actions run strictly one after another; the first failing action aborts
/// the run. Every run starts from an empty variable store, so nothing leaks
/// between pipelines executed by the same engine.
pub struct ExecutionEngine<D> {
    executor: ActionExecutor<D>,
    events: EventEmitter,
}

impl<D: HttpDispatcher> ExecutionEngine<D> {
    pub fn new(dispatcher: D) -> Self {
        Self {
            executor: ActionExecutor::new(dispatcher),
            events: EventEmitter::new(),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(ExecutionEvent) + Send + Sync + 'static,
    {
        self.events.add_handler(handler);
    }

    /// Builder form of [`add_event_handler`](Self::add_event_handler)
    pub fn with_event_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(ExecutionEvent) + Send + Sync + 'static,
    {
        self.add_event_handler(handler);
        self
    }

    pub fn dispatcher(&self) -> &D {
        self.executor.dispatcher()
    }

    /// Run the pipeline, reporting only success or the first failure
    pub async fn run(&self, pipeline: &Pipeline) -> Result<(), PipelineError> {
        self.execute(pipeline).await.result
    }

    /// Run the pipeline and keep its state and captured variables
    pub async fn execute(&self, pipeline: &Pipeline) -> RunOutcome {
        let mut state = PipelineState::new();
        let mut variables = VariableStore::new();
        let execution_id = state.execution_id;

        info!(
            "Starting pipeline execution: {} ({})",
            pipeline.description, execution_id
        );
        self.events.emit(ExecutionEvent::PipelineStarted {
            execution_id,
            description: pipeline.description.clone(),
            total_actions: pipeline.actions.len(),
        });

        state.start(pipeline.actions.len());

        let mut result = Ok(());
        for (index, action) in pipeline.actions.iter().enumerate() {
            let position = index + 1;
            self.events.emit(ExecutionEvent::ActionStarted {
                position,
                method: action.method.clone(),
                label: action.label(),
            });

            match self
                .executor
                .execute(
                    position,
                    action,
                    pipeline.base_url.as_deref(),
                    &mut variables,
                    &self.events,
                )
                .await
            {
                ExecutionResult::Success { status } => {
                    state.action_completed();
                    self.events
                        .emit(ExecutionEvent::ActionCompleted { position, status });
                }
                ExecutionResult::Failed { phase, error } => {
                    self.events.emit(ExecutionEvent::ActionFailed {
                        position,
                        phase,
                        error: error.to_string(),
                    });
                    state.fail(position);
                    result = Err(PipelineError {
                        position,
                        label: action.label(),
                        source: error,
                    });
                    break;
                }
            }
        }

        if result.is_ok() {
            state.complete();
            info!(
                "Pipeline completed: {} actions in {:?}",
                state.completed_actions,
                state.duration().unwrap_or_default()
            );
        } else {
            error!(
                "Pipeline failed at action #{}",
                state.failed_action.unwrap_or_default()
            );
        }

        self.events.emit(ExecutionEvent::PipelineCompleted {
            execution_id,
            status: state.status,
            completed_actions: state.completed_actions,
            total_actions: state.total_actions,
            duration: state.duration(),
        });

        RunOutcome {
            state,
            variables,
            result,
        }
    }
}
