//! Configuration error types.

use miette::Diagnostic;
use thiserror::Error;

/// Startup configuration errors. Always fatal.
#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration: {var}")]
    #[diagnostic(
        code(taskrelay::config::missing),
        help("Set the {var} environment variable or pass the matching command line flag.")
    )]
    Missing { var: &'static str },

    #[error("Invalid value for {var}: {message}")]
    #[diagnostic(code(taskrelay::config::invalid))]
    Invalid { var: &'static str, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
