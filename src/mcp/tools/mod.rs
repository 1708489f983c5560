//! MCP tool implementations
//!
//! Tools are grouped by the part of the backend they talk to. Each group is
//! an `impl TaskRelayServer` block with its own `#[tool_router]`, and the
//! server adds the routers together once at construction.

mod discussions;
mod projects;
mod tasks;

#[cfg(test)]
mod discussions_test;

pub use discussions::{CreateDiscussionParams, DiscussionContextParams, UrgencyParam};
pub use tasks::{CompleteTaskParams, StartTaskParams, UpdateProgressParams};

use rmcp::{ErrorData as McpError, model::*};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::client::{ApiError, ApiResponse, ApiResult};
use crate::error::Error;

/// Convert a crate error into an MCP error
pub(crate) fn map_error(e: Error) -> McpError {
    match e {
        Error::NotConnected => McpError::internal_error(
            "not_connected",
            Some(json!({"error": e.to_string()})),
        ),
        other => McpError::internal_error(
            "internal_error",
            Some(json!({"error": other.to_string()})),
        ),
    }
}

pub(crate) fn invalid_params(field: &str, message: impl Into<String>) -> McpError {
    McpError::invalid_params(
        format!("invalid_{}", field),
        Some(json!({"field": field, "error": message.into()})),
    )
}

/// Reject a blank required string argument.
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), McpError> {
    if value.trim().is_empty() {
        return Err(invalid_params(field, format!("{} must not be empty", field)));
    }
    Ok(())
}

/// Turn a client result into a tool result.
///
/// Success is the pretty-printed result as a single text block. An API
/// failure is a failed tool result carrying the error envelope.
pub(crate) fn respond<T: Serialize>(tool: &str, result: ApiResult<T>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => Ok(CallToolResult::success(vec![Content::text(to_json(&value)?)])),
        Err(error) => {
            warn!(tool, error = %error, "Tool call failed");
            api_failure(error)
        }
    }
}

fn api_failure(error: ApiError) -> Result<CallToolResult, McpError> {
    let envelope: ApiResponse<()> = ApiResponse::failed(error);
    Ok(CallToolResult::error(vec![Content::text(to_json(&envelope)?)]))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(
            "serialization_error",
            Some(json!({"error": e.to_string()})),
        )
    })
}
