use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::client::error::ApiError;
use crate::client::models::*;
use crate::config::{API_KEY_VAR, Config, ConfigError, DEFAULT_TIMEOUT, Options};
use crate::error::{Error, Result};

/// Header carrying the assistant identity on every request.
pub const ASSISTANT_ID_HEADER: &str = "x-ai-assistant-id";

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Capabilities advertised in every connection heartbeat.
const CAPABILITIES: [&str; 4] = [
    "task_execution",
    "progress_reporting",
    "completion_reporting",
    "discussions",
];

/// Client for the project-management API.
///
/// Authentication and identity headers are installed once when the
/// underlying HTTP client is built and are sent unchanged with every
/// request for the lifetime of the instance.
pub struct ApiClient {
    base_url: String,
    project_id: String,
    assistant_id: String,
    options: Options,
    client: Client,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// When the config carries no assistant id, a random `claude-` prefixed
    /// id is generated.
    pub fn new(config: Config, options: Options) -> Result<Self> {
        // reqwest is built without a bundled TLS provider; a second install is a no-op
        let _ = rustls::crypto::ring::default_provider().install_default();

        let assistant_id = config
            .assistant_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(generate_assistant_id);

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key)).map_err(
            |e| ConfigError::Invalid {
                var: API_KEY_VAR,
                message: e.to_string(),
            },
        )?;
        auth.set_sensitive(true);

        let identity =
            HeaderValue::from_str(&assistant_id).map_err(|e| ConfigError::Invalid {
                var: "TASKRELAY_AI_ASSISTANT_ID",
                message: e.to_string(),
            })?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(HeaderName::from_static(ASSISTANT_ID_HEADER), identity);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|source| Error::HttpClient { source })?;

        debug!(
            base_url = %config.base_url,
            project_id = %config.project_id,
            assistant_id = %assistant_id,
            "API client created"
        );

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_id: config.project_id,
            assistant_id,
            options,
            client,
        })
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn assistant_id(&self) -> &str {
        &self.assistant_id
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    // -------------------------------------------------------------------------
    // Project
    // -------------------------------------------------------------------------

    #[instrument(skip_all, fields(project_id = %self.project_id))]
    pub async fn fetch_project_context(&self) -> ApiResult<ProjectContext> {
        self.get(&format!("/projects/{}/context", self.project_id))
            .await
    }

    /// Fetch the next task to work on. A response without a task means
    /// nothing is available and is not an error.
    #[instrument(skip_all, fields(project_id = %self.project_id))]
    pub async fn fetch_next_task(&self) -> ApiResult<NextTaskResponse> {
        self.get(&format!("/projects/{}/next-task", self.project_id))
            .await
    }

    #[instrument(skip_all, fields(project_id = %self.project_id))]
    pub async fn create_discussion(
        &self,
        options: DiscussionOptions,
    ) -> ApiResult<DiscussionResponse> {
        let body = DiscussionRequest::question(options, &self.assistant_id);
        self.post(&format!("/projects/{}/discuss", self.project_id), &body)
            .await
    }

    #[instrument(skip_all)]
    pub async fn health_check(&self) -> ApiResult<HealthStatus> {
        self.get("/health").await
    }

    // -------------------------------------------------------------------------
    // Tasks
    // -------------------------------------------------------------------------

    /// Start a task and report the assistant as working on it.
    #[instrument(skip(self, options))]
    pub async fn start_task(
        &self,
        task_id: &str,
        options: StartTaskOptions,
    ) -> ApiResult<StartTaskResponse> {
        let body = StartTaskRequest {
            ai_assistant_id: &self.assistant_id,
            estimated_time_minutes: options.estimated_time_minutes,
            notes: options.notes,
            approach: options.approach,
        };
        let response = self
            .post(&task_path(task_id, "start"), &body)
            .await?;

        self.heartbeat(ConnectionStatus::Working, Some(task_id))
            .await;
        Ok(response)
    }

    #[instrument(skip(self, update), fields(progress = update.completion_percentage))]
    pub async fn update_progress(
        &self,
        task_id: &str,
        update: &ProgressUpdate,
    ) -> ApiResult<ProgressResponse> {
        let response = self
            .post(&task_path(task_id, "progress"), update)
            .await?;

        self.heartbeat(ConnectionStatus::Working, Some(task_id))
            .await;
        Ok(response)
    }

    /// Complete a task. The assistant goes back to plain `connected`.
    #[instrument(skip(self, completion))]
    pub async fn complete_task(
        &self,
        task_id: &str,
        completion: &CompletionRequest,
    ) -> ApiResult<CompleteTaskResponse> {
        let response = self
            .post(&task_path(task_id, "complete"), completion)
            .await?;

        self.heartbeat(ConnectionStatus::Connected, None).await;
        Ok(response)
    }

    // -------------------------------------------------------------------------
    // Connection status
    // -------------------------------------------------------------------------

    /// Announce this assistant as connected.
    ///
    /// Unlike the heartbeats sent after task operations, the failure is
    /// returned so the caller can log it; it is never fatal.
    pub async fn connect(&self) -> Result<()> {
        self.report_status(ConnectionStatus::Connected, None)
            .await
            .map_err(|source| Error::Telemetry { source })
    }

    /// Announce this assistant as disconnected. Never fails.
    pub async fn disconnect(&self) {
        self.heartbeat(ConnectionStatus::Disconnected, None).await;
    }

    /// Look up this assistant's entry in the project's connection list.
    #[instrument(skip_all, fields(assistant_id = %self.assistant_id))]
    pub async fn connection_status(&self) -> ApiResult<Option<AiConnection>> {
        let connections: Vec<AiConnection> = self
            .get(&format!("/projects/{}/ai-connections", self.project_id))
            .await?;

        Ok(connections
            .into_iter()
            .find(|c| c.ai_assistant_id == self.assistant_id))
    }

    async fn heartbeat(&self, status: ConnectionStatus, task_id: Option<&str>) {
        if let Err(e) = self.report_status(status, task_id).await {
            warn!(
                assistant_id = %self.assistant_id,
                ?status,
                error = %e,
                "Connection status update failed"
            );
        }
    }

    async fn report_status(&self, status: ConnectionStatus, task_id: Option<&str>) -> ApiResult<()> {
        let record = ConnectionRecord {
            ai_assistant_id: self.assistant_id.clone(),
            status,
            current_task_id: task_id.map(str::to_string),
            metadata: json!({
                "client": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "project_id": self.project_id,
                "capabilities": CAPABILITIES,
            }),
        };

        let response = self
            .client
            .post(self.url("/internal/ai-connections"))
            .json(&record)
            .send()
            .await?;

        let code = response.status();
        if code.is_success() {
            debug!(?status, "Connection status reported");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_response(code, &body))
        }
    }

    // -------------------------------------------------------------------------
    // Transport
    // -------------------------------------------------------------------------

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Handle API response with standardized error handling
    ///
    /// Returns the deserialized response body on success, or a normalized
    /// [`ApiError`] on non-success status codes.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await?;
            serde_json::from_slice(&bytes).map_err(|e| {
                ApiError::invalid_response(format!("Invalid response from API server: {}", e))
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "API request failed");
            Err(ApiError::from_response(status, &body))
        }
    }
}

/// Path of a task action. The id is encoded as a single path segment.
fn task_path(task_id: &str, action: &str) -> String {
    format!("/tasks/{}/{}", urlencoding::encode(task_id), action)
}

fn generate_assistant_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("claude-{}", &id[..8])
}
