//! CLI command definitions using clap
//!
//! Defines all CLI subcommands and their arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::acquire::SourceMode;

/// Inventory the tools, resources, and prompts an MCP server declares.
///
/// Reads JavaScript/TypeScript server source from a local directory or a
/// GitHub repository. Can be used as a standalone CLI or as an MCP server.
#[derive(Parser, Debug)]
#[command(name = "mcp-hatchery")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (overrides default XDG paths)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan server source and print its inventory
    Analyze(AnalyzeArgs),

    /// List the source files a scan would read
    Files(FilesArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Start MCP server over stdio
    Mcp,
}

/// Arguments for the `analyze` subcommand
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Server project directory (defaults to current directory)
    #[arg(conflicts_with_all = ["github", "bare"])]
    pub path: Option<PathBuf>,

    /// Clone and scan a GitHub repository instead
    #[arg(short, long, value_name = "URL", conflicts_with = "bare")]
    pub github: Option<String>,

    /// Skip source inspection and report an empty inventory
    #[arg(long)]
    pub bare: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl AnalyzeArgs {
    /// Source selected by the flags
    pub fn source_mode(&self) -> SourceMode {
        if self.bare {
            SourceMode::Bare
        } else if let Some(ref url) = self.github {
            SourceMode::Github { url: url.clone() }
        } else {
            SourceMode::Local {
                path: self.path.clone().unwrap_or_else(|| PathBuf::from(".")),
            }
        }
    }
}

/// Arguments for the `files` subcommand
#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Server project directory (defaults to current directory)
    pub path: Option<PathBuf>,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary and listings
    Table,
    /// JSON inventory
    Json,
    /// Plain text (one name per line)
    Plain,
}

/// Arguments for the `config` subcommand
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Config output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum ConfigFormat {
    Json,
    Toml,
}
