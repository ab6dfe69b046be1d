//! Execution state models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Overall pipeline execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// Pipeline has not started
    Pending,
    /// Pipeline is currently running
    Running,
    /// Every action succeeded
    Completed,
    /// An action failed and the run was aborted
    Failed,
}

/// Phases an action moves through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionPhase {
    ResolveBody,
    Dispatch,
    ValidateStatus,
    ParseResponse,
    ResolveSetters,
    ResolveAssertions,
}

impl std::fmt::Display for ActionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionPhase::ResolveBody => "resolve body",
            ActionPhase::Dispatch => "dispatch",
            ActionPhase::ValidateStatus => "validate status",
            ActionPhase::ParseResponse => "parse response",
            ActionPhase::ResolveSetters => "resolve setters",
            ActionPhase::ResolveAssertions => "resolve assertions",
        };
        f.write_str(name)
    }
}

/// Bookkeeping for one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineState {
    /// Unique execution ID
    pub execution_id: Uuid,

    /// Current execution status
    pub status: ExecutionStatus,

    /// When execution started
    pub started_at: Option<DateTime<Utc>>,

    /// When execution completed/failed
    pub completed_at: Option<DateTime<Utc>>,

    /// Total number of actions
    pub total_actions: usize,

    /// Number of actions that succeeded
    pub completed_actions: usize,

    /// 1-based position of the action that failed
    pub failed_action: Option<usize>,
}

impl PipelineState {
    /// Create a new pipeline state
    pub fn new() -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            status: ExecutionStatus::Pending,
            started_at: None,
            completed_at: None,
            total_actions: 0,
            completed_actions: 0,
            failed_action: None,
        }
    }

    /// Mark pipeline as started
    pub fn start(&mut self, total_actions: usize) {
        self.status = ExecutionStatus::Running;
        self.started_at = Some(Utc::now());
        self.total_actions = total_actions;
    }

    /// Record one more successful action
    pub fn action_completed(&mut self) {
        self.completed_actions += 1;
    }

    /// Mark pipeline as completed
    pub fn complete(&mut self) {
        self.status = ExecutionStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    /// Mark pipeline as failed at the given 1-based action position
    pub fn fail(&mut self, position: usize) {
        self.status = ExecutionStatus::Failed;
        self.failed_action = Some(position);
        self.completed_at = Some(Utc::now());
    }

    /// Wall-clock duration, once the run has finished
    pub fn duration(&self) -> Option<std::time::Duration> {
        let (start, end) = (self.started_at?, self.completed_at?);
        end.signed_duration_since(start).to_std().ok()
    }

}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}
