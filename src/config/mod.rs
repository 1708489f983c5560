//! Process configuration
//!
//! Connection parameters are read once at startup, from command line flags
//! with environment variable fallback, and stay read-only afterwards.

mod error;


use std::fmt;
use std::time::Duration;

use clap::Parser;

pub use error::{ConfigError, ConfigResult};

/// Production endpoint used when no API URL is configured.
pub const DEFAULT_API_URL: &str = "https://api.taskrelay.dev/v1";

/// Assistant identity reported when none is configured.
pub const DEFAULT_ASSISTANT_ID: &str = "claude-code";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const API_KEY_VAR: &str = "TASKRELAY_API_KEY";
pub const PROJECT_ID_VAR: &str = "TASKRELAY_PROJECT_ID";
pub const API_URL_VAR: &str = "TASKRELAY_API_URL";

/// Connection parameters for the remote API.
#[derive(Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: String,
    pub project_id: String,
    /// Generated by the client when absent.
    pub assistant_id: Option<String>,
    /// Falls back to [`DEFAULT_TIMEOUT`] when absent.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Config pointing at the production endpoint with default timeout and
    /// a generated assistant id.
    pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            project_id: project_id.into(),
            assistant_id: None,
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_assistant_id(mut self, assistant_id: impl Into<String>) -> Self {
        self.assistant_id = Some(assistant_id.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("project_id", &self.project_id)
            .field("assistant_id", &self.assistant_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Client behaviour switches.
///
/// `retries` and `realtime_updates` are accepted and stored but not acted
/// on: requests are issued exactly once and nothing subscribes to updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub retries: u32,
    pub log_level: String,
    pub realtime_updates: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            retries: 3,
            log_level: "info".to_string(),
            realtime_updates: false,
        }
    }
}

/// Validated startup settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
    pub options: Options,
}

#[derive(Parser, Debug)]
#[command(name = "taskrelay-mcp")]
#[command(
    author,
    version,
    about = "MCP server exposing project tasks to AI coding assistants",
    long_about = None
)]
pub struct Args {
    /// API key for the project-management backend
    #[arg(long, env = API_KEY_VAR, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Project to work on
    #[arg(long, env = PROJECT_ID_VAR)]
    pub project_id: Option<String>,

    /// Base URL of the backend API
    #[arg(long, env = API_URL_VAR, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Identity reported to the backend for this assistant instance
    #[arg(long, env = "TASKRELAY_AI_ASSISTANT_ID", default_value = DEFAULT_ASSISTANT_ID)]
    pub assistant_id: String,

    /// Log level for stderr logging (error, warn, info, debug, trace, off)
    #[arg(long, env = "TASKRELAY_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request real-time updates (accepted, currently unused)
    #[arg(long, env = "TASKRELAY_REALTIME_UPDATES")]
    pub realtime_updates: bool,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "TASKRELAY_TIMEOUT_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Retry count (accepted, currently unused)
    #[arg(long, env = "TASKRELAY_RETRIES", default_value_t = 3)]
    pub retries: u32,

    /// Print the available tools and exit
    #[arg(long)]
    pub list_tools: bool,
}

impl Args {
    /// Validate the parsed arguments into [`Settings`].
    pub fn into_settings(self) -> ConfigResult<Settings> {
        let api_key = required(self.api_key, API_KEY_VAR)?;
        let project_id = required(self.project_id, PROJECT_ID_VAR)?;

        let api_url = self.api_url.trim();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: API_URL_VAR,
                message: format!("'{}' is not an http(s) URL", api_url),
            });
        }

        let log_level = self.log_level.trim().to_lowercase();
        if !matches!(
            log_level.as_str(),
            "error" | "warn" | "info" | "debug" | "trace" | "off"
        ) {
            return Err(ConfigError::Invalid {
                var: "TASKRELAY_LOG_LEVEL",
                message: format!("unknown level '{}'", self.log_level),
            });
        }

        let mut config = Config::new(api_key, project_id)
            .with_base_url(api_url)
            .with_timeout(Duration::from_secs(self.timeout_secs));
        let assistant_id = self.assistant_id.trim();
        if !assistant_id.is_empty() {
            config = config.with_assistant_id(assistant_id);
        }

        Ok(Settings {
            config,
            options: Options {
                retries: self.retries,
                log_level,
                realtime_updates: self.realtime_updates,
            },
        })
    }
}

fn required(value: Option<String>, var: &'static str) -> ConfigResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing { var })
}
