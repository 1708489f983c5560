//! Tests for MCP server construction and the tool registry

use rmcp::ServerHandler;

use crate::mcp::TaskRelayServer;
use crate::test_support::client_for;

const TOOLS: [&str; 7] = [
    "complete_task",
    "create_discussion",
    "get_next_task",
    "get_project_context",
    "health_check",
    "start_task",
    "update_progress",
];

#[test]
fn test_server_info() {
    let server = TaskRelayServer::disconnected();

    let info = server.get_info();

    assert!(
        info.capabilities.tools.is_some(),
        "Server should support tools"
    );
    assert!(
        info.instructions.is_some(),
        "Server should provide instructions"
    );
}

#[test]
fn test_registry_is_the_fixed_tool_set() {
    let server = TaskRelayServer::new(client_for("http://127.0.0.1:9"));

    let mut names: Vec<String> = server
        .router()
        .list_all()
        .into_iter()
        .map(|tool| tool.name.to_string())
        .collect();
    names.sort();

    assert_eq!(names, TOOLS);
}

#[test]
fn test_every_tool_has_a_description() {
    let server = TaskRelayServer::disconnected();

    for tool in server.router().list_all() {
        assert!(
            tool.description.as_deref().is_some_and(|d| !d.is_empty()),
            "{} should have a description",
            tool.name
        );
    }
}

#[test]
fn test_update_progress_schema_bounds_percentage() {
    let server = TaskRelayServer::disconnected();
    let tool = server
        .router()
        .list_all()
        .into_iter()
        .find(|tool| tool.name == "update_progress")
        .unwrap();

    let progress = &tool.input_schema["properties"]["progress"];
    assert_eq!(progress["minimum"].as_f64(), Some(0.0));
    assert_eq!(progress["maximum"].as_f64(), Some(100.0));

    let required = tool.input_schema["required"].as_array().unwrap();
    assert!(required.iter().any(|r| r == "task_id"));
    assert!(required.iter().any(|r| r == "progress"));
}

#[tokio::test]
async fn test_tools_fail_fast_without_client() {
    let server = TaskRelayServer::disconnected();

    let err = server.get_project_context().await.unwrap_err();

    assert_eq!(err.message, "not_connected");
}
