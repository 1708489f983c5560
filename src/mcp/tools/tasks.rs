//! MCP tools for working on tasks.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{CompletionRequest, ProgressUpdate, StartTaskOptions};
use crate::mcp::server::TaskRelayServer;
use crate::mcp::tools::{invalid_params, map_error, require_non_empty, respond};

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StartTaskParams {
    #[schemars(description = "ID of the task to start")]
    pub task_id: String,
    #[schemars(description = "How you plan to implement the task (optional)")]
    pub approach: Option<String>,
    #[schemars(description = "Estimated time to finish, in minutes (optional)")]
    pub estimated_duration: Option<u32>,
    #[schemars(description = "Additional notes (optional)")]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateProgressParams {
    #[schemars(description = "ID of the task being worked on")]
    pub task_id: String,
    #[schemars(
        description = "Completion percentage from 0 to 100",
        range(min = 0, max = 100)
    )]
    pub progress: f64,
    #[schemars(description = "What was done since the last update (optional)")]
    pub notes: Option<String>,
    #[schemars(description = "Files changed so far (optional)")]
    pub files_modified: Option<Vec<String>>,
    #[schemars(description = "Problems or blockers encountered (optional)")]
    pub challenges: Option<String>,
    #[schemars(description = "Time spent so far, in minutes (optional)")]
    pub time_spent: Option<u32>,
    #[schemars(description = "Step currently being worked on (optional)")]
    pub current_step: Option<String>,
    #[schemars(description = "Steps already finished (optional)")]
    pub completed_steps: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CompleteTaskParams {
    #[schemars(description = "ID of the task to complete")]
    pub task_id: String,
    #[schemars(description = "Summary of what was implemented")]
    pub summary: String,
    #[schemars(description = "Files modified while implementing the task (optional)")]
    pub files_modified: Option<Vec<String>>,
    #[schemars(description = "Files created while implementing the task (optional)")]
    pub files_created: Option<Vec<String>>,
    #[schemars(description = "Total time spent, in minutes (optional)")]
    pub time_spent: Option<u32>,
    #[schemars(
        description = "Evidence that the acceptance criteria are met, e.g. commands run and test results (optional)"
    )]
    pub verification_evidence: Option<Map<String, Value>>,
}

impl UpdateProgressParams {
    fn validate(&self) -> Result<(), McpError> {
        require_non_empty("task_id", &self.task_id)?;
        if !(0.0..=100.0).contains(&self.progress) {
            return Err(invalid_params(
                "progress",
                format!("progress must be between 0 and 100, got {}", self.progress),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Argument Mapping
// =============================================================================

impl From<StartTaskParams> for StartTaskOptions {
    fn from(params: StartTaskParams) -> Self {
        Self {
            approach: params.approach,
            estimated_time_minutes: params.estimated_duration,
            notes: params.notes,
        }
    }
}

/// `challenges` is reported upstream as `blockers`; tool callers only list
/// modified files, so `files_created` is sent empty. `progress` must already
/// be validated; fractions are rounded to the nearest whole percent.
impl From<UpdateProgressParams> for ProgressUpdate {
    fn from(params: UpdateProgressParams) -> Self {
        Self {
            completion_percentage: params.progress.round() as u8,
            files_created: Vec::new(),
            files_modified: params.files_modified.unwrap_or_default(),
            notes: params.notes,
            blockers: params.challenges,
            time_spent_minutes: params.time_spent,
            current_step: params.current_step,
            completed_steps: params.completed_steps.unwrap_or_default(),
        }
    }
}

impl From<CompleteTaskParams> for CompletionRequest {
    fn from(params: CompleteTaskParams) -> Self {
        Self {
            files_created: params.files_created.unwrap_or_default(),
            files_modified: params.files_modified.unwrap_or_default(),
            completion_notes: params.summary,
            time_spent_minutes: params.time_spent,
            verification_evidence: params.verification_evidence,
        }
    }
}

// =============================================================================
// Task Tools
// =============================================================================

#[tool_router(router = task_router, vis = "pub(crate)")]
impl TaskRelayServer {
    #[tool(
        description = "Start working on a task. Marks the task in progress and reports this assistant as working on it."
    )]
    pub async fn start_task(
        &self,
        params: Parameters<StartTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        require_non_empty("task_id", &params.0.task_id)?;
        let client = self.client().map_err(map_error)?;

        let task_id = params.0.task_id.clone();
        let result = client.start_task(&task_id, params.0.into()).await;
        respond("start_task", result)
    }

    #[tool(
        description = "Report progress on the current task: percentage complete (0-100), notes, modified files and any challenges."
    )]
    pub async fn update_progress(
        &self,
        params: Parameters<UpdateProgressParams>,
    ) -> Result<CallToolResult, McpError> {
        params.0.validate()?;
        let client = self.client().map_err(map_error)?;

        let task_id = params.0.task_id.clone();
        let update = ProgressUpdate::from(params.0);
        respond(
            "update_progress",
            client.update_progress(&task_id, &update).await,
        )
    }

    #[tool(
        description = "Mark a task as completed with a summary of the work, the files touched and verification evidence."
    )]
    pub async fn complete_task(
        &self,
        params: Parameters<CompleteTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        require_non_empty("task_id", &params.0.task_id)?;
        require_non_empty("summary", &params.0.summary)?;
        let client = self.client().map_err(map_error)?;

        let task_id = params.0.task_id.clone();
        let completion = CompletionRequest::from(params.0);
        respond(
            "complete_task",
            client.complete_task(&task_id, &completion).await,
        )
    }
}
