//! CLI module for mcp-hatchery
//!
//! Provides command-line interface with the following subcommands:
//! - `analyze` - Scan server source and print its inventory
//! - `files` - List candidate source files
//! - `config` - Show configuration
//! - `mcp` - Start MCP server over stdio

pub mod commands;
pub mod mcp;

pub use commands::{Cli, Commands};
pub use mcp::run_mcp_server;
