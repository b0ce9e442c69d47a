//! MCP server launcher
//!
//! Starts the MCP server over stdio.

use anyhow::{Context, Result};
use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};

use crate::config::load_config;
use crate::mcp::HatcheryServer;

/// Run the MCP server over stdio.
///
/// # Arguments
/// * `config_path` - Optional path to a config file override
pub async fn run_mcp_server(config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path).context("Failed to load configuration")?;

    let server = HatcheryServer::with_config(config);

    tracing::info!("Serving MCP over stdio");
    let service = server.serve((stdin(), stdout())).await?;

    service.waiting().await?;

    Ok(())
}
