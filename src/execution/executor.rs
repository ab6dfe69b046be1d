//! Action executor - runs one action against the dispatcher

use crate::{
    core::{
        extract, join_url, substitute, substitute_str, template::token_names, Action,
        ActionPhase, Value, VariableStore,
    },
    execution::{ActionError, EventEmitter, ExecutionEvent},
    http::{HttpDispatcher, HttpRequest, HttpResponse},
};
use tracing::{debug, error, info, warn};

/// Result of executing an action
#[derive(Debug)]
pub enum ExecutionResult {
    /// Every phase passed
    Success {
        status: u16,
    },
    /// The action stopped in `phase`
    Failed {
        phase: ActionPhase,
        error: ActionError,
    },
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success { .. })
    }
}

type PhaseResult<T> = Result<T, (ActionPhase, ActionError)>;

/// Executes a single action
///
/// Phases run strictly in order: resolve endpoint, resolve body, dispatch,
/// validate status, parse response, resolve setters, resolve assertions.
/// The first failing phase ends the action. Setters write into the shared
/// store as they resolve, so captures made before a failing assertion stay
/// visible to the caller.
pub struct ActionExecutor<D> {
    dispatcher: D,
}

impl<D: HttpDispatcher> ActionExecutor<D> {
    pub fn new(dispatcher: D) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Execute an action and return the result
    pub async fn execute(
        &self,
        position: usize,
        action: &Action,
        base_url: Option<&str>,
        variables: &mut VariableStore,
        events: &EventEmitter,
    ) -> ExecutionResult {
        info!("Executing action #{}: {}", position, action.label());

        match self.run_phases(position, action, base_url, variables, events).await {
            Ok(status) => {
                info!("Action #{} completed with status {}", position, status);
                ExecutionResult::Success { status }
            }
            Err((phase, error)) => {
                error!("Action #{} failed during {}: {}", position, phase, error);
                ExecutionResult::Failed { phase, error }
            }
        }
    }

    async fn run_phases(
        &self,
        position: usize,
        action: &Action,
        base_url: Option<&str>,
        variables: &mut VariableStore,
        events: &EventEmitter,
    ) -> PhaseResult<u16> {
        let url = substitute_str(&join_url(base_url, &action.endpoint), variables).into_owned();
        debug!("Resolved endpoint for action #{}: {} {}", position, action.method, url);
        let unresolved = token_names(&url);
        if !unresolved.is_empty() {
            warn!(
                "Action #{} endpoint still has unresolved tokens: {}",
                position,
                unresolved.join(", ")
            );
        }
        events.emit(ExecutionEvent::EndpointResolved {
            position,
            url: url.clone(),
        });

        let body = action.body.as_ref().map(|body| substitute(body, variables));
        let payload = match &body {
            Some(body) => serde_json::to_vec(body)
                .map_err(|e| (ActionPhase::ResolveBody, ActionError::BodySerialization(e)))?,
            None => Vec::new(),
        };
        if action.log_request_body {
            events.emit(ExecutionEvent::RequestBody {
                position,
                body: body.clone().unwrap_or_default(),
            });
        }

        let response = self
            .dispatcher
            .send(HttpRequest::new(action.method.as_str(), url, payload))
            .await
            .map_err(|e| (ActionPhase::Dispatch, ActionError::from(e)))?;

        events.emit(ExecutionEvent::StatusReceived {
            position,
            status: response.status,
            expected: action.status_code,
        });

        if response.status != action.status_code {
            return Err((
                ActionPhase::ValidateStatus,
                ActionError::UnexpectedStatus {
                    expected: action.status_code,
                    actual: response.status,
                    body: serde_json::from_slice(&response.body).ok(),
                },
            ));
        }

        let Some(root) = self.parse_response(position, action, &response, events)? else {
            return Ok(response.status);
        };

        for (path, name) in &action.setters {
            let value = extract(&root, path)
                .map_err(|source| {
                    (
                        ActionPhase::ResolveSetters,
                        ActionError::SetterResolutionFailed {
                            path: path.clone(),
                            source,
                        },
                    )
                })?
                .clone();

            debug!("Setting variable {} from '{}'", name, path);
            events.emit(ExecutionEvent::VariableSet {
                position,
                name: name.clone(),
                value: value.clone(),
            });
            variables.set(name.as_str(), value);
        }

        for (path, expected) in &action.assertions {
            let expected = substitute(expected, variables);
            let actual = extract(&root, path).map_err(|source| {
                (
                    ActionPhase::ResolveAssertions,
                    ActionError::AssertionExtractionFailed {
                        path: path.clone(),
                        source,
                    },
                )
            })?;

            if *actual != expected {
                return Err((
                    ActionPhase::ResolveAssertions,
                    ActionError::AssertionMismatch {
                        path: path.clone(),
                        expected,
                        actual: actual.clone(),
                    },
                ));
            }

            events.emit(ExecutionEvent::AssertionPassed {
                position,
                path: path.clone(),
                value: expected,
            });
        }

        Ok(response.status)
    }

    /// Decode the response payload
    ///
    /// `None` means there is nothing for setters or assertions to read:
    /// either the payload is empty, or it is not JSON and the action never
    /// looks at it.
    fn parse_response(
        &self,
        position: usize,
        action: &Action,
        response: &HttpResponse,
        events: &EventEmitter,
    ) -> PhaseResult<Option<Value>> {
        if response.is_empty() {
            if action.log_response_body {
                events.emit(ExecutionEvent::ResponseBody {
                    position,
                    text: String::new(),
                });
            }
            if action.reads_response() {
                warn!(
                    "Action #{} returned an empty body, skipping setters and assertions",
                    position
                );
            }
            return Ok(None);
        }

        let parsed = match serde_json::from_slice::<Value>(&response.body) {
            Ok(value) => Some(value),
            Err(e) if action.reads_response() => {
                return Err((ActionPhase::ParseResponse, ActionError::ResponseDecode(e)));
            }
            Err(e) => {
                debug!("Ignoring non-JSON response of action #{}: {}", position, e);
                None
            }
        };

        if action.log_response_body {
            let text = match &parsed {
                Some(value) => value.to_pretty_string(),
                None => response.text(),
            };
            events.emit(ExecutionEvent::ResponseBody { position, text });
        }

        Ok(parsed)
    }
}
