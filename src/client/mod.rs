//! HTTP client for the project-management backend
//!
//! - **api_client**: authenticated transport, one method per remote operation
//! - **models**: request bodies, response types and the response envelope
//! - **error**: the normalized [`ApiError`] every failure is mapped to

mod api_client;
mod error;
mod models;

#[cfg(test)]
mod error_test;

pub use api_client::{ASSISTANT_ID_HEADER, ApiClient, ApiResult};
pub use error::ApiError;
pub use models::{
    AiConnection, ApiResponse, CompleteTaskResponse, CompletionRequest, ConnectionRecord,
    ConnectionStatus, DiscussionOptions, DiscussionResponse, ExecutionHints, HealthStatus,
    NextTaskResponse, ProgressResponse, ProgressUpdate, ProjectContext, ProjectInfo,
    StartTaskOptions, StartTaskResponse, TaskStatus, TaskSummary, Urgency,
};
