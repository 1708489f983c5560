//! Tests for the discussion MCP tool

use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::client::{DiscussionOptions, Urgency};
use crate::mcp::TaskRelayServer;
use crate::mcp::tools::{CreateDiscussionParams, DiscussionContextParams, UrgencyParam};
use crate::test_support::{MockBackend, TEST_ASSISTANT_ID, tool_json};

const DISCUSS: &str = "/projects/p/discuss";

#[tokio::test]
async fn test_create_discussion_defaults_to_medium() {
    let backend = MockBackend::builder()
        .route("POST", DISCUSS, 201, json!({"id": "d1", "message": "created"}))
        .start()
        .await;
    let server = TaskRelayServer::new(backend.client());

    let params = CreateDiscussionParams {
        topic: "Auth provider".to_string(),
        message: "Should we use OAuth or magic links?".to_string(),
        urgency: None,
        context: None,
    };
    let result = server.create_discussion(Parameters(params)).await.unwrap();

    assert_eq!(tool_json(&result)["id"], "d1");
    let body = backend.requests_to(DISCUSS)[0].body.clone().unwrap();
    assert_eq!(
        body,
        json!({
            "type": "question",
            "title": "Auth provider",
            "message": "Should we use OAuth or magic links?",
            "context": {
                "task_id": null,
                "relevant_files": [],
                "specific_challenge": null,
                "urgency": "medium"
            },
            "urgency": "medium",
            "requires_human_response": true,
            "created_by": TEST_ASSISTANT_ID
        })
    );
}

#[tokio::test]
async fn test_create_discussion_with_context() {
    let backend = MockBackend::builder()
        .route("POST", DISCUSS, 201, json!({"id": "d2"}))
        .start()
        .await;
    let server = TaskRelayServer::new(backend.client());

    let params = CreateDiscussionParams {
        topic: "Blocked on secrets".to_string(),
        message: "The staging API key is missing".to_string(),
        urgency: Some(UrgencyParam::High),
        context: Some(DiscussionContextParams {
            task_id: Some("t7".to_string()),
            relevant_files: Some(vec![".env.example".to_string()]),
            specific_challenge: Some("cannot run integration tests".to_string()),
        }),
    };
    server.create_discussion(Parameters(params)).await.unwrap();

    let body = backend.requests_to(DISCUSS)[0].body.clone().unwrap();
    assert_eq!(body["urgency"], "high");
    assert_eq!(body["context"]["urgency"], "high");
    assert_eq!(body["context"]["task_id"], "t7");
    assert_eq!(body["context"]["relevant_files"], json!([".env.example"]));
    assert_eq!(
        body["context"]["specific_challenge"],
        "cannot run integration tests"
    );
}

#[test]
fn test_unknown_urgency_is_rejected() {
    let result = serde_json::from_value::<CreateDiscussionParams>(json!({
        "topic": "t",
        "message": "m",
        "urgency": "critical"
    }));

    assert!(result.is_err());
}

#[test]
fn test_discussion_mapping() {
    let options = DiscussionOptions::from(CreateDiscussionParams {
        topic: "Naming".to_string(),
        message: "Which crate name?".to_string(),
        urgency: Some(UrgencyParam::Low),
        context: None,
    });

    assert_eq!(options.topic, "Naming");
    assert_eq!(options.urgency, Some(Urgency::Low));
    assert!(options.relevant_files.is_empty());
    assert!(options.task_id.is_none());
}

#[tokio::test]
async fn test_blank_topic_is_rejected() {
    let backend = MockBackend::builder().start().await;
    let server = TaskRelayServer::new(backend.client());

    let params = CreateDiscussionParams {
        topic: String::new(),
        message: "m".to_string(),
        urgency: None,
        context: None,
    };
    let err = server.create_discussion(Parameters(params)).await.unwrap_err();

    assert_eq!(err.message, "invalid_topic");
    assert!(backend.requests().is_empty());
}
