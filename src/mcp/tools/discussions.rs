//! Discussion tool: ask the humans on the project a question.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::client::{DiscussionOptions, Urgency};
use crate::mcp::server::TaskRelayServer;
use crate::mcp::tools::{map_error, require_non_empty, respond};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyParam {
    Low,
    Medium,
    High,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct DiscussionContextParams {
    #[schemars(description = "Task the question is about (optional)")]
    pub task_id: Option<String>,
    #[schemars(description = "Files relevant to the question (optional)")]
    pub relevant_files: Option<Vec<String>>,
    #[schemars(description = "The specific problem you are stuck on (optional)")]
    pub specific_challenge: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateDiscussionParams {
    #[schemars(description = "Short topic of the discussion")]
    pub topic: String,
    #[schemars(description = "The question or message for the team")]
    pub message: String,
    #[schemars(description = "How urgent a human answer is: low, medium (default) or high")]
    pub urgency: Option<UrgencyParam>,
    #[schemars(description = "Where the question comes from (optional)")]
    pub context: Option<DiscussionContextParams>,
}

impl From<UrgencyParam> for Urgency {
    fn from(urgency: UrgencyParam) -> Self {
        match urgency {
            UrgencyParam::Low => Urgency::Low,
            UrgencyParam::Medium => Urgency::Medium,
            UrgencyParam::High => Urgency::High,
        }
    }
}

/// `topic` becomes the discussion title; context fields are sent as-is.
impl From<CreateDiscussionParams> for DiscussionOptions {
    fn from(params: CreateDiscussionParams) -> Self {
        let context = params.context.unwrap_or_default();
        Self {
            topic: params.topic,
            message: params.message,
            urgency: params.urgency.map(Urgency::from),
            task_id: context.task_id,
            relevant_files: context.relevant_files.unwrap_or_default(),
            specific_challenge: context.specific_challenge,
        }
    }
}

#[tool_router(router = discussion_router, vis = "pub(crate)")]
impl TaskRelayServer {
    #[tool(
        description = "Ask the project team a question that needs a human answer, e.g. unclear requirements or missing credentials. Urgency defaults to medium."
    )]
    pub async fn create_discussion(
        &self,
        params: Parameters<CreateDiscussionParams>,
    ) -> Result<CallToolResult, McpError> {
        require_non_empty("topic", &params.0.topic)?;
        require_non_empty("message", &params.0.message)?;
        let client = self.client().map_err(map_error)?;

        let result = client.create_discussion(params.0.into()).await;
        respond("create_discussion", result)
    }
}
