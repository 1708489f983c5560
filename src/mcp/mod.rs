//! Model Context Protocol (MCP) server implementation
//!
//! This module provides an MCP server using the stdio transport. The server
//! exposes a fixed set of tools, each bound to one API client call:
//!
//! - **projects**: get_project_context, get_next_task, health_check
//! - **tasks**: start_task, update_progress, complete_task
//! - **discussions**: create_discussion
//!
//! Logs go to stderr; stdout carries the protocol stream.

pub mod server;
pub mod tools;

#[cfg(test)]
mod server_test;

pub use server::TaskRelayServer;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::io::stdio};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::client::ApiClient;
use crate::config::Settings;
use crate::error::{Error, Result};

/// Initialize tracing subscriber with env filter, writing to stderr
fn init_tracing(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("taskrelay={},rmcp=warn", level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init();
}

/// Run the MCP server over stdio until the client hangs up or a shutdown
/// signal arrives.
///
/// Failing to reach the backend at startup is logged and tolerated; tools
/// then fail individually until the backend is reachable again.
pub async fn run(settings: Settings) -> Result<()> {
    init_tracing(&settings.options.log_level);
    info!(
        project_id = %settings.config.project_id,
        base_url = %settings.config.base_url,
        "Starting TaskRelay MCP server"
    );

    let client = match ApiClient::new(settings.config, settings.options) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            error!(error = %e, "API client unavailable, tools will report not connected");
            None
        }
    };

    if let Some(client) = &client {
        startup_checks(client).await;
    }

    let service = TaskRelayServer::from_client(client.clone())
        .serve(stdio())
        .await
        .map_err(|e| Error::Transport {
            message: e.to_string(),
        })?;
    info!("MCP server running on stdio");

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sighup = signal(SignalKind::hangup())?;

        tokio::select! {
            result = service.waiting() => match result {
                Ok(reason) => info!(?reason, "Service ended"),
                Err(e) => warn!(error = %e, "Service ended with error"),
            },
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
            _ = sigint.recv() => info!("Received SIGINT, shutting down"),
            _ = sighup.recv() => info!("Received SIGHUP, shutting down"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::select! {
            result = service.waiting() => {
                if let Err(e) = result {
                    warn!(error = %e, "Service ended with error");
                }
            }
            _ = tokio::signal::ctrl_c() => info!("Received Ctrl-C, shutting down"),
        }
    }

    if let Some(client) = client {
        client.disconnect().await;
    }
    info!("Shutdown complete");
    Ok(())
}

async fn startup_checks(client: &ApiClient) {
    match client.health_check().await {
        Ok(health) => info!(status = %health.status, "API reachable"),
        Err(e) => warn!(error = %e, "API health check failed, continuing"),
    }

    match client.connect().await {
        Ok(()) => info!(assistant_id = %client.assistant_id(), "Connected"),
        Err(e) => warn!(error = %e, "Could not report connection, continuing"),
    }
}
