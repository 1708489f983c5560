//! MCP server implementation
//!
//! The server owns the shared API client and the tool router. The router is
//! assembled once from the per-group routers and never changes afterwards.

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};

use crate::client::ApiClient;
use crate::error::Error;

/// MCP server exposing the project-management API as tools.
#[derive(Clone)]
pub struct TaskRelayServer {
    client: Option<Arc<ApiClient>>,
    tool_router: ToolRouter<Self>,
}

impl TaskRelayServer {
    /// Create a server backed by the given client.
    pub fn new(client: ApiClient) -> Self {
        Self::from_client(Some(Arc::new(client)))
    }

    /// Create a server without a client. Every tool call fails with
    /// [`Error::NotConnected`].
    pub fn disconnected() -> Self {
        Self::from_client(None)
    }

    pub fn from_client(client: Option<Arc<ApiClient>>) -> Self {
        Self {
            client,
            tool_router: Self::project_router() + Self::task_router() + Self::discussion_router(),
        }
    }

    /// Get the tool router for this handler
    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    pub(crate) fn client(&self) -> crate::error::Result<&ApiClient> {
        self.client.as_deref().ok_or(Error::NotConnected)
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for TaskRelayServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build()).with_instructions(
            "TaskRelay MCP Server - Fetch project context and tasks, report progress, complete tasks and ask the team questions"
                .to_string(),
        )
    }
}
