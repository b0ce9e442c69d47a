//! MCP Server module
//!
//! Provides MCP tools for server inventory:
//! - `analyze_server` - Inventory a local or GitHub-hosted server
//! - `list_source_files` - List the files a scan would read

pub mod server;

pub use server::HatcheryServer;
