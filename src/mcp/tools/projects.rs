//! Project-level tools: context, next task and backend health.

use rmcp::{ErrorData as McpError, model::*, tool, tool_router};

use crate::mcp::server::TaskRelayServer;
use crate::mcp::tools::{map_error, respond};

#[tool_router(router = project_router, vis = "pub(crate)")]
impl TaskRelayServer {
    #[tool(
        description = "Get the full project context: project metadata, the implementation plan, task counts and recent activity. Call this first to understand what you are working on."
    )]
    pub async fn get_project_context(&self) -> Result<CallToolResult, McpError> {
        let client = self.client().map_err(map_error)?;
        respond("get_project_context", client.fetch_project_context().await)
    }

    #[tool(
        description = "Get the next task that is ready to work on, with acceptance criteria and execution hints. A null task means nothing is currently available."
    )]
    pub async fn get_next_task(&self) -> Result<CallToolResult, McpError> {
        let client = self.client().map_err(map_error)?;
        respond("get_next_task", client.fetch_next_task().await)
    }

    #[tool(description = "Check that the project-management API is reachable.")]
    pub async fn health_check(&self) -> Result<CallToolResult, McpError> {
        let client = self.client().map_err(map_error)?;
        respond("health_check", client.health_check().await)
    }
}
