//! Crate-level error type.

use miette::Diagnostic;
use thiserror::Error;

use crate::client::ApiError;
use crate::config::ConfigError;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Api(#[from] ApiError),

    /// Connection status could not be reported. Logged, never fatal.
    #[error("Failed to report connection status: {source}")]
    #[diagnostic(code(taskrelay::telemetry))]
    Telemetry {
        #[source]
        source: ApiError,
    },

    #[error("API client is not connected")]
    #[diagnostic(
        code(taskrelay::not_connected),
        help("The server started without a working API client. Check the configuration and restart.")
    )]
    NotConnected,

    #[error("Failed to build HTTP client")]
    #[diagnostic(code(taskrelay::http_client))]
    HttpClient {
        #[source]
        source: reqwest::Error,
    },

    #[error("MCP transport error: {message}")]
    #[diagnostic(code(taskrelay::transport))]
    Transport { message: String },

    #[error("I/O error: {0}")]
    #[diagnostic(code(taskrelay::io))]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
