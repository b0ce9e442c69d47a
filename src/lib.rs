//! mcp-hatchery - MCP server inventory from source
//!
//! Reads the JavaScript/TypeScript source of an MCP server and reports what
//! it declares:
//! - **Tools** - name, description, and a shallow input schema
//! - **Resources** - name and URI
//! - **Prompts** - name
//!
//! ## Features
//!
//! - Local directory or public GitHub repository sources
//! - Lexical, bracket-aware extraction (no JavaScript parser needed)
//! - Deterministic, order-stable inventories with cross-file tool dedup
//! - XDG-compliant layered configuration
//! - MCP tools for agent integration
//!
//! ## MCP Tools
//!
//! - `analyze_server` - Inventory a local or GitHub-hosted server
//! - `list_source_files` - List the files a scan would read

pub mod acquire;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;

pub use acquire::{analyze_source, SourceMode};
pub use analyzer::{analyze_local, Analysis, Inventory, PromptEntry, ResourceEntry, ToolEntry};
pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::{AnalyzeError, ErrorInfo};
pub use mcp::HatcheryServer;
