//! Test: Success Chain - actions run in order and share captured variables

use crate::helpers::*;
use apiline::core::config::PipelineConfig;
use apiline::core::Value;
use apiline::http::HttpResponse;
use serde_json::json;

/// Create, fetch and delete a user, threading the id through the chain
#[tokio::test]
async fn test_success_chain() {
    let yaml = r#"
description: "User lifecycle"
baseURL: "https://api.test"
actions:
  - method: POST
    endpoint: users
    statusCode: 201
    description: "Create user"
    body:
      name: "alice"
    setters:
      id: userId

  - endpoint: "/users/@{userId}"
    assertions:
      name: "alice"

  - method: delete
    endpoint: "users/@{userId}"
    statusCode: 204
"#;

    let result = run_yaml_with_mock(
        yaml,
        vec![
            json_response(201, json!({"id": "42"})),
            json_response(200, json!({"id": "42", "name": "alice"})),
            HttpResponse::empty(204),
        ],
    )
    .await;

    assert_pipeline_completed(&result);
    assert_requests(
        &result,
        &[
            ("POST", "https://api.test/users"),
            ("GET", "https://api.test/users/42"),
            ("DELETE", "https://api.test/users/42"),
        ],
    );
    assert_eq!(result.request_body(0), json!({"name": "alice"}));
    assert!(!result.requests[1].has_body());
    assert_eq!(result.variable("userId"), Some(&Value::from("42")));
}

/// A longer chain where each action feeds the next
#[tokio::test]
async fn test_success_chain_long() {
    let yaml = r#"
baseURL: "https://api.test/"
actions:
  - endpoint: step/start
    setters:
      next: s1
  - endpoint: "step/@{s1}"
    setters:
      next: s2
  - endpoint: "step/@{s2}"
    setters:
      next: s3
  - endpoint: "step/@{s3}"
    setters:
      next: s4
  - endpoint: "step/@{s4}"
"#;

    let responses = (1..=5)
        .map(|n| json_response(200, json!({"next": format!("n{}", n)})))
        .collect();
    let result = run_yaml_with_mock(yaml, responses).await;

    assert_pipeline_completed(&result);
    assert_eq!(
        result.urls(),
        vec![
            "https://api.test/step/start",
            "https://api.test/step/n1",
            "https://api.test/step/n2",
            "https://api.test/step/n3",
            "https://api.test/step/n4",
        ]
    );
    assert_eq!(result.variables_set(), vec!["s1", "s2", "s3", "s4"]);
}

/// An empty pipeline completes without sending anything
#[tokio::test]
async fn test_empty_pipeline() {
    let result = run_yaml_with_mock("description: nothing\n", vec![]).await;

    assert_pipeline_completed(&result);
    assert!(result.requests.is_empty());
    assert_eq!(result.state.total_actions, 0);
}

/// JSON documents run exactly like YAML ones
#[tokio::test]
async fn test_json_document() {
    let json_doc = r#"{
        "baseURL": "https://api.test",
        "actions": [
            {"method": "PUT", "endpoint": "items/1", "body": {"qty": 3}, "setters": {"qty": "qty"}},
            {"endpoint": "items/1", "assertions": {"qty": 3}}
        ]
    }"#;

    let pipeline = PipelineConfig::from_json(json_doc).unwrap().to_pipeline();
    let dispatcher = MockDispatcher::new(vec![
        json_response(200, json!({"qty": 3})),
        json_response(200, json!({"qty": 3.0})),
    ]);
    let result = run_pipeline_with_mock(&pipeline, dispatcher).await;

    assert_pipeline_completed(&result);
    assert_eq!(result.request_body(0), json!({"qty": 3}));
    assert_eq!(result.variable("qty"), Some(&Value::from(3)));
}

/// Captured values can be whole objects, not only strings
#[tokio::test]
async fn test_setter_captures_subtree() {
    let yaml = r#"
actions:
  - endpoint: "https://api.test/profile"
    setters:
      address: addr
      tags/[1]: secondTag
"#;

    let result = run_yaml_with_mock(
        yaml,
        vec![json_response(
            200,
            json!({"address": {"city": "Oslo", "zip": "0150"}, "tags": ["a", "b"]}),
        )],
    )
    .await;

    assert_pipeline_completed(&result);
    let expected = Value::from(json!({"zip": "0150", "city": "Oslo"}));
    assert_eq!(result.variable("addr"), Some(&expected));
    assert_eq!(result.variable("secondTag"), Some(&Value::from("b")));
}
