//! Value types exchanged with the backend.
//!
//! Response types type the fields this crate relies on and keep everything
//! else in a flattened `extra` map, so a backend object passes through
//! structurally unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ApiError;

// =============================================================================
// Envelope
// =============================================================================

/// Uniform success/failure wrapper around a client call.
///
/// `data` is present if and only if `success` is true; the fields are only
/// reachable through the constructors and getters to keep it that way.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ApiError>,
    timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failed(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            timestamp: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn into_result(self) -> Result<T, ApiError> {
        match (self.data, self.error) {
            (Some(data), _) => Ok(data),
            (None, Some(error)) => Err(error),
            (None, None) => Err(ApiError::invalid_response("Empty response envelope")),
        }
    }
}

impl<T> From<Result<T, ApiError>> for ApiResponse<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::failed(error),
        }
    }
}

// =============================================================================
// Project and tasks
// =============================================================================

/// Project metadata as the backend sends it. Only the shape of the
/// surrounding object is assumed; the values are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub id: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub name: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Snapshot of a project: metadata, plan, task summary and recent activity.
/// Fetched fresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectContext {
    pub project: ProjectInfo,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub plan: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub tasks: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub context: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lifecycle state of a task. Values this crate does not know are kept
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    #[serde(untagged)]
    Other(String),
}

/// Optional hints for carrying out a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionHints {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollback_plan: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub success_checks: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One unit of work, owned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_hints: Option<ExecutionHints>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `task` is `None` when nothing is ready to work on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextTaskResponse {
    #[serde(default)]
    pub task: Option<TaskSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartTaskResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteTaskResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskSummary>,
    /// Next task unlocked by this completion, when the backend reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_task: Option<TaskSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscussionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

// =============================================================================
// Request bodies
// =============================================================================

/// Caller-supplied options for starting a task.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartTaskOptions {
    pub approach: Option<String>,
    pub estimated_time_minutes: Option<u32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct StartTaskRequest<'a> {
    pub(crate) ai_assistant_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) estimated_time_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) approach: Option<String>,
}

/// Progress report body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub completion_percentage: u8,
    pub files_created: Vec<String>,
    pub files_modified: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_spent_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_step: Option<String>,
    pub completed_steps: Vec<String>,
}

/// Task completion body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub files_created: Vec<String>,
    pub files_modified: Vec<String>,
    pub completion_notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_spent_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_evidence: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

/// Caller-supplied options for opening a discussion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscussionOptions {
    pub topic: String,
    pub message: String,
    pub urgency: Option<Urgency>,
    pub task_id: Option<String>,
    pub relevant_files: Vec<String>,
    pub specific_challenge: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct DiscussionContext {
    pub(crate) task_id: Option<String>,
    pub(crate) relevant_files: Vec<String>,
    pub(crate) specific_challenge: Option<String>,
    pub(crate) urgency: Urgency,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct DiscussionRequest<'a> {
    #[serde(rename = "type")]
    pub(crate) kind: &'static str,
    pub(crate) title: String,
    pub(crate) message: String,
    pub(crate) context: DiscussionContext,
    pub(crate) urgency: Urgency,
    pub(crate) requires_human_response: bool,
    pub(crate) created_by: &'a str,
}

impl<'a> DiscussionRequest<'a> {
    pub(crate) fn question(options: DiscussionOptions, created_by: &'a str) -> Self {
        let urgency = options.urgency.unwrap_or_default();
        Self {
            kind: "question",
            title: options.topic,
            message: options.message,
            context: DiscussionContext {
                task_id: options.task_id,
                relevant_files: options.relevant_files,
                specific_challenge: options.specific_challenge,
                urgency,
            },
            urgency,
            requires_human_response: true,
            created_by,
        }
    }
}

// =============================================================================
// Connection heartbeat
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Working,
    Disconnected,
}

/// Heartbeat body posted to the internal connections endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionRecord {
    pub ai_assistant_id: String,
    pub status: ConnectionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_task_id: Option<String>,
    pub metadata: Value,
}

/// One entry of the project's connection listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConnection {
    pub ai_assistant_id: String,
    pub status: ConnectionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
