//! Test: Assertions - deep comparison of response values

use crate::helpers::*;
use apiline::core::Value;
use apiline::execution::{ActionError, ExecutionEvent};
use apiline::http::HttpResponse;
use apiline::ExtractionError;
use serde_json::json;

fn single_action(assertions: &str) -> String {
    format!(
        "actions:\n  - endpoint: \"https://api.test/users\"\n    assertions:\n{}",
        assertions
    )
}

/// Indexed paths reach into sequences
#[tokio::test]
async fn test_indexed_path_assertion_passes() {
    let yaml = single_action("      user/[0]/email: \"a@b.com\"\n");

    let result = run_yaml_with_mock(
        &yaml,
        vec![json_response(200, json!({"user": [{"email": "a@b.com"}]}))],
    )
    .await;

    assert_pipeline_completed(&result);
    assert!(result.events.iter().any(|e| matches!(
        e,
        ExecutionEvent::AssertionPassed { path, .. } if path == "user/[0]/email"
    )));
}

/// Indexing an empty sequence fails the assertion
#[tokio::test]
async fn test_indexed_path_on_empty_sequence() {
    let yaml = single_action("      user/[0]/email: \"a@b.com\"\n");

    let result = run_yaml_with_mock(&yaml, vec![json_response(200, json!({"user": []}))]).await;

    assert_pipeline_failed_at(&result, 1);
    match &result.failure().source {
        ActionError::AssertionExtractionFailed { path, source } => {
            assert_eq!(path, "user/[0]/email");
            assert_eq!(
                source,
                &ExtractionError::IndexOutOfRange {
                    index: 0,
                    length: 0
                }
            );
        }
        other => panic!("Unexpected error: {:?}", other),
    }
}

/// A number never equals its string spelling
#[tokio::test]
async fn test_number_never_equals_string() {
    let yaml = single_action("      id: \"1\"\n");

    let result = run_yaml_with_mock(&yaml, vec![json_response(200, json!({"id": 1}))]).await;

    assert_pipeline_failed_at(&result, 1);
    match &result.failure().source {
        ActionError::AssertionMismatch {
            path,
            expected,
            actual,
        } => {
            assert_eq!(path, "id");
            assert_eq!(expected, &Value::from("1"));
            assert_eq!(actual, &Value::from(1));
        }
        other => panic!("Unexpected error: {:?}", other),
    }
}

/// Integers and floats compare by numeric value
#[tokio::test]
async fn test_integer_equals_float() {
    let yaml = single_action("      price: 10\n      ratio: 0.5\n");

    let result = run_yaml_with_mock(
        &yaml,
        vec![json_response(200, json!({"price": 10.0, "ratio": 0.5}))],
    )
    .await;

    assert_pipeline_completed(&result);
}

/// Whole objects compare deeply, ignoring key order
#[tokio::test]
async fn test_mapping_assertion_ignores_key_order() {
    let yaml = single_action(
        "      address:\n        zip: \"0150\"\n        city: \"Oslo\"\n      tags: [\"a\", \"b\"]\n",
    );

    let result = run_yaml_with_mock(
        &yaml,
        vec![json_response(
            200,
            json!({"address": {"city": "Oslo", "zip": "0150"}, "tags": ["a", "b"]}),
        )],
    )
    .await;

    assert_pipeline_completed(&result);
}

/// Sequences compare element by element, in order
#[tokio::test]
async fn test_sequence_order_matters() {
    let yaml = single_action("      tags: [\"b\", \"a\"]\n");

    let result =
        run_yaml_with_mock(&yaml, vec![json_response(200, json!({"tags": ["a", "b"]}))]).await;

    assert_pipeline_failed_at(&result, 1);
    assert!(matches!(
        result.failure().source,
        ActionError::AssertionMismatch { .. }
    ));
}

/// A present null matches an expected null; a missing key does not
#[tokio::test]
async fn test_null_assertions() {
    let yaml = single_action("      deletedAt: null\n");

    let result =
        run_yaml_with_mock(&yaml, vec![json_response(200, json!({"deletedAt": null}))]).await;
    assert_pipeline_completed(&result);

    let result = run_yaml_with_mock(&yaml, vec![json_response(200, json!({}))]).await;
    assert_pipeline_failed_at(&result, 1);
    assert!(matches!(
        result.failure().source,
        ActionError::AssertionExtractionFailed {
            source: ExtractionError::KeyNotFound(_),
            ..
        }
    ));
}

/// Expected values may reference captured variables
#[tokio::test]
async fn test_assertion_uses_captured_variable() {
    let yaml = r#"
baseURL: "https://api.test"
actions:
  - method: POST
    endpoint: users
    setters:
      id: userId
  - endpoint: "users/@{userId}"
    assertions:
      id: "@{userId}"
      self: "/users/@{userId}"
"#;

    let result = run_yaml_with_mock(
        yaml,
        vec![
            json_response(200, json!({"id": "42"})),
            json_response(200, json!({"id": "42", "self": "/users/42"})),
        ],
    )
    .await;

    assert_pipeline_completed(&result);
}

/// Assertions run in document order and stop at the first mismatch
#[tokio::test]
async fn test_first_mismatch_is_reported() {
    let yaml = single_action("      a: 1\n      b: 2\n      c: 3\n");

    let result = run_yaml_with_mock(
        &yaml,
        vec![json_response(200, json!({"a": 1, "b": 0, "c": 0}))],
    )
    .await;

    assert_pipeline_failed_at(&result, 1);
    match &result.failure().source {
        ActionError::AssertionMismatch { path, .. } => assert_eq!(path, "b"),
        other => panic!("Unexpected error: {:?}", other),
    }
    let passed = result
        .events
        .iter()
        .filter(|e| matches!(e, ExecutionEvent::AssertionPassed { .. }))
        .count();
    assert_eq!(passed, 1);
}

/// An empty response skips assertions instead of failing them
#[tokio::test]
async fn test_empty_response_skips_assertions() {
    let yaml = r#"
actions:
  - method: DELETE
    endpoint: "https://api.test/users/1"
    statusCode: 204
    assertions:
      deleted: true
"#;

    let result = run_yaml_with_mock(yaml, vec![HttpResponse::empty(204)]).await;

    assert_pipeline_completed(&result);
}
