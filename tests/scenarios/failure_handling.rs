//! Test: Failure Handling - the first failing action aborts the run

use crate::helpers::*;
use apiline::core::Value;
use apiline::execution::{ActionError, ExecutionEvent};
use apiline::http::{HttpResponse, TransportError};
use apiline::ExtractionError;
use serde_json::json;

/// A status mismatch aborts before any setter runs
#[tokio::test]
async fn test_status_mismatch_aborts_before_setters() {
    let yaml = r#"
actions:
  - method: POST
    endpoint: "https://api.test/users"
    statusCode: 201
    setters:
      id: userId
"#;

    let result = run_yaml_with_mock(yaml, vec![json_response(200, json!({"id": "1"}))]).await;

    assert_pipeline_failed_at(&result, 1);
    match &result.failure().source {
        ActionError::UnexpectedStatus {
            expected,
            actual,
            body,
        } => {
            assert_eq!((*expected, *actual), (201, 200));
            assert_eq!(body.as_ref(), Some(&Value::from(json!({"id": "1"}))));
        }
        other => panic!("Unexpected error: {:?}", other),
    }
    assert!(result.variable("userId").is_none());
    assert!(result.variables_set().is_empty());
}

/// Actions after the failing one are never dispatched
#[tokio::test]
async fn test_fail_fast() {
    let yaml = r#"
baseURL: "https://api.test"
actions:
  - endpoint: a
  - endpoint: b
    description: "Second"
  - endpoint: c
"#;

    let result = run_yaml_with_mock(
        yaml,
        vec![
            HttpResponse::empty(200),
            HttpResponse::new(500, "boom"),
            HttpResponse::empty(200),
        ],
    )
    .await;

    assert_pipeline_failed_at(&result, 2);
    assert_requests(
        &result,
        &[("GET", "https://api.test/a"), ("GET", "https://api.test/b")],
    );
    assert_eq!(result.failure().label, "Second");
    assert!(result.failure().to_string().starts_with("action #2 (Second) failed"));

    // Non-JSON error bodies are not attached
    assert!(matches!(
        result.failure().source,
        ActionError::UnexpectedStatus { body: None, .. }
    ));
}

/// Transport failures surface as the pipeline error
#[tokio::test]
async fn test_transport_error() {
    let pipeline = apiline::core::config::PipelineConfig::from_yaml(
        "actions:\n  - endpoint: \"https://api.test/slow\"\n",
    )
    .unwrap()
    .to_pipeline();
    let dispatcher = MockDispatcher::with_results(vec![Err(TransportError::Timeout(2))]);

    let result = run_pipeline_with_mock(&pipeline, dispatcher).await;

    assert_pipeline_failed_at(&result, 1);
    assert!(matches!(
        result.failure().source,
        ActionError::Transport(TransportError::Timeout(2))
    ));
}

/// Bodies JSON cannot represent fail before anything is sent
#[tokio::test]
async fn test_non_finite_body_is_not_sent() {
    let yaml = r#"
baseURL: "https://api.test"
actions:
  - method: POST
    endpoint: metrics
    body:
      ratio: .inf
      n: .nan
  - endpoint: never
"#;

    let result = run_yaml_with_mock(
        yaml,
        vec![HttpResponse::empty(200), HttpResponse::empty(200)],
    )
    .await;

    assert_pipeline_failed_at(&result, 1);
    assert!(matches!(
        result.failure().source,
        ActionError::BodySerialization(_)
    ));
    assert!(result.requests.is_empty());
    assert_eq!(result.failure().source.kind(), "BodySerializationError");
}

/// A missing setter path fails the action
#[tokio::test]
async fn test_missing_setter_path() {
    let yaml = r#"
actions:
  - endpoint: "https://api.test/users"
    setters:
      id: userId
      uuid: userUuid
"#;

    let result = run_yaml_with_mock(yaml, vec![json_response(200, json!({"id": "1"}))]).await;

    assert_pipeline_failed_at(&result, 1);
    match &result.failure().source {
        ActionError::SetterResolutionFailed { path, source } => {
            assert_eq!(path, "uuid");
            assert_eq!(source, &ExtractionError::KeyNotFound("uuid".to_string()));
        }
        other => panic!("Unexpected error: {:?}", other),
    }
    // Setters before the failing one already took effect
    assert_eq!(result.variable("userId"), Some(&Value::from("1")));
}

/// A body that is not JSON fails once setters need it
#[tokio::test]
async fn test_non_json_response_with_setters() {
    let yaml = r#"
actions:
  - endpoint: "https://api.test/html"
    setters:
      id: id
"#;

    let result =
        run_yaml_with_mock(yaml, vec![HttpResponse::new(200, "<html></html>")]).await;

    assert_pipeline_failed_at(&result, 1);
    assert!(matches!(
        result.failure().source,
        ActionError::ResponseDecode(_)
    ));
}

/// The failure event names the phase that failed
#[tokio::test]
async fn test_failure_event_reports_phase() {
    let yaml = r#"
actions:
  - endpoint: "https://api.test/x"
    statusCode: 204
"#;

    let result = run_yaml_with_mock(yaml, vec![HttpResponse::empty(200)]).await;

    let failed: Vec<&ExecutionEvent> = result
        .events
        .iter()
        .filter(|e| matches!(e, ExecutionEvent::ActionFailed { .. }))
        .collect();
    assert_eq!(failed.len(), 1);
    assert!(matches!(
        failed[0],
        ExecutionEvent::ActionFailed {
            position: 1,
            phase: apiline::core::ActionPhase::ValidateStatus,
            ..
        }
    ));
    assert!(matches!(
        result.events.last(),
        Some(ExecutionEvent::PipelineCompleted { .. })
    ));
}
