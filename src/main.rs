//! mcp-hatchery CLI entry point
//!
//! Usage:
//!   mcp-hatchery analyze [PATH]          Inventory a local server project
//!   mcp-hatchery analyze --github URL    Inventory a GitHub repository
//!   mcp-hatchery files [PATH]            List candidate source files
//!   mcp-hatchery config                  Show configuration
//!   mcp-hatchery mcp                     Start MCP server over stdio

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use mcp_hatchery::acquire::{analyze_source, SourceMode};
use mcp_hatchery::analyzer::{Analysis, SourceFiles, Summary, ToolEntry};
use mcp_hatchery::cli::{
    commands::{AnalyzeArgs, ConfigArgs, ConfigFormat, FilesArgs, OutputFormat},
    run_mcp_server, Cli, Commands,
};
use mcp_hatchery::config::{find_config_files, load_config};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Install the tracing subscriber on stderr
///
/// stdout carries command output and the MCP transport.
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze(args) => {
            analyze(args, cli.config.as_deref()).await?;
        }
        Commands::Files(args) => {
            list_files(args, cli.config.as_deref())?;
        }
        Commands::Config(args) => {
            show_config(args, cli.config.as_deref())?;
        }
        Commands::Mcp => {
            run_mcp_server(cli.config.as_deref()).await?;
        }
    }

    Ok(())
}

/// Scan a server and print its inventory
async fn analyze(args: AnalyzeArgs, config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    let mode = args.source_mode();

    let spinner = match (&mode, &args.format) {
        (SourceMode::Github { url }, OutputFormat::Table) => Some(clone_spinner(url)),
        _ => None,
    };

    let result = analyze_source(&mode, &config).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let analysis = result.with_context(|| format!("Failed to analyze {}", mode))?;

    for skipped in &analysis.skipped {
        eprintln!(
            "{}: skipped {}: {}",
            "warning".yellow(),
            skipped.path,
            skipped.reason
        );
    }

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&analysis.inventory)?);
        }
        OutputFormat::Plain => {
            let inventory = &analysis.inventory;
            let names = inventory
                .tools
                .iter()
                .map(|t| &t.name)
                .chain(inventory.resources.iter().map(|r| &r.name))
                .chain(inventory.prompts.iter().map(|p| &p.name));
            for name in names {
                println!("{}", name);
            }
        }
        OutputFormat::Table => print_table(&mode, &analysis),
    }

    Ok(())
}

fn clone_spinner(url: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Cloning {}", url));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn print_table(mode: &SourceMode, analysis: &Analysis) {
    let inventory = &analysis.inventory;

    println!("{}: {}", "Source".cyan(), mode);
    println!("{}: {}", "Files scanned".cyan(), analysis.files_scanned);
    println!();

    if inventory.is_empty() {
        println!("{}", "No tools, resources, or prompts found.".yellow());
        return;
    }

    for line in summary_lines(&inventory.summary) {
        println!("{}", line.green());
    }
    println!();

    if !inventory.tools.is_empty() {
        println!("{}:", "Tools".cyan());
        let width = inventory.tools.iter().map(|t| t.name.len()).max().unwrap_or(10);
        for tool in &inventory.tools {
            println!(
                "  {:width$}  - {} ({})",
                tool.name.green(),
                tool.description,
                tool.file,
                width = width
            );
            if let Some(schema) = schema_line(tool) {
                println!("  {:width$}    {}", "", schema.dimmed(), width = width);
            }
        }
    }

    if !inventory.resources.is_empty() {
        println!("{}:", "Resources".cyan());
        let width = inventory
            .resources
            .iter()
            .map(|r| r.name.len())
            .max()
            .unwrap_or(10);
        for resource in &inventory.resources {
            println!(
                "  {:width$}  {} ({})",
                resource.name.green(),
                resource.uri,
                resource.file,
                width = width
            );
        }
    }

    if !inventory.prompts.is_empty() {
        println!("{}:", "Prompts".cyan());
        for prompt in &inventory.prompts {
            println!("  {} ({})", prompt.name.green(), prompt.file);
        }
    }
}

/// `Found N tool(s)` lines for the non-zero counts
fn summary_lines(summary: &Summary) -> Vec<String> {
    [
        (summary.tool_count, "tool"),
        (summary.resource_count, "resource"),
        (summary.prompt_count, "prompt"),
    ]
    .into_iter()
    .filter(|(count, _)| *count > 0)
    .map(|(count, kind)| format!("Found {} {}(s)", count, kind))
    .collect()
}

fn schema_line(tool: &ToolEntry) -> Option<String> {
    if tool.input_schema.is_empty() {
        return None;
    }
    let fields: Vec<String> = tool
        .input_schema
        .iter()
        .map(|(name, kind)| format!("{}: {}", name, kind))
        .collect();
    Some(format!("inputSchema {{ {} }}", fields.join(", ")))
}

/// List the files a local scan would read
fn list_files(args: FilesArgs, config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    let root = match args.path {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let files = SourceFiles::new(&root, &config.analysis)?;
    for path in &files {
        let relative = path
            .strip_prefix(files.root())
            .map(PathBuf::from)
            .unwrap_or_else(|_| path.clone());
        println!("{}", relative.display());
    }

    Ok(())
}

/// Show resolved configuration and the files it came from
fn show_config(args: ConfigArgs, config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    let mut sources = find_config_files();
    if let Some(path) = config_path {
        sources.push(PathBuf::from(path));
    }

    match args.format {
        ConfigFormat::Json => {
            let json = serde_json::to_string_pretty(&serde_json::json!({
                "files": sources,
                "config": config,
            }))?;
            println!("{}", json);
        }
        ConfigFormat::Toml => {
            if sources.is_empty() {
                println!("# No config files found, using defaults");
            }
            for source in &sources {
                println!("# Loaded from {}", source.display());
            }
            let rendered =
                toml::to_string_pretty(&config).context("Failed to render configuration")?;
            print!("{}", rendered);
        }
    }

    Ok(())
}
