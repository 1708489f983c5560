//! TaskRelay: a project-management API exposed to AI coding assistants as
//! MCP tools over stdio.
//!
//! - [`client`]: authenticated HTTP client, one method per remote operation
//! - [`mcp`]: the tool registry and stdio server
//! - [`config`]: flag and environment driven startup configuration

pub mod client;
pub mod config;
pub mod error;
pub mod mcp;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Error, Result};
