//! TaskRelay MCP server binary.
//!
//! Reads configuration from flags and environment, then serves the tools
//! over stdio.

use clap::Parser;
use miette::Result;
use taskrelay::config::Args;
use taskrelay::mcp::TaskRelayServer;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.list_tools {
        print_tools();
        return Ok(());
    }

    let settings = args.into_settings()?;
    taskrelay::mcp::run(settings).await?;
    Ok(())
}

fn print_tools() {
    println!("Available tools:");
    for tool in TaskRelayServer::disconnected().router().list_all() {
        println!(
            "  {:<22} {}",
            tool.name,
            tool.description.as_deref().unwrap_or("")
        );
    }
}
