//! MCP Server implementation
//!
//! Exposes the analyzer as MCP tools using the rmcp SDK.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::model::{Implementation, ServerCapabilities, ServerInfo, ToolsCapability};
use rmcp::{tool, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::acquire::{analyze_source, SourceMode};
use crate::analyzer::{Inventory, SkippedFile, SourceFiles};
use crate::config::Config;
use crate::error::{AnalyzeError, ErrorInfo};

/// MCP Server for mcp-hatchery
#[derive(Clone)]
pub struct HatcheryServer {
    config: Arc<Config>,
}

impl HatcheryServer {
    /// Create with a specific config
    pub fn with_config(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl Default for HatcheryServer {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

// === Tool Parameter Types ===

/// Parameters for analyze_server tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AnalyzeServerParams {
    /// "local" (scan `path`), "github" (clone `github_url`), anything else for none
    #[serde(default)]
    pub source_type: Option<String>,

    /// Server project directory for local sources
    #[serde(default)]
    pub path: Option<String>,

    /// Repository URL for github sources
    #[serde(default)]
    pub github_url: Option<String>,
}

/// Response from analyze_server tool
#[derive(Debug, Serialize)]
pub struct AnalyzeServerResponse {
    pub success: bool,
    /// Source that was analyzed
    pub source: SourceMode,
    #[serde(flatten)]
    pub inventory: Inventory,
    pub files_scanned: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedFile>,
}

/// Parameters for list_source_files tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListSourceFilesParams {
    /// Server project directory (defaults to current directory)
    #[serde(default)]
    pub path: Option<String>,
}

/// Response from list_source_files tool
#[derive(Debug, Serialize)]
pub struct ListSourceFilesResponse {
    /// Absolute root that was walked
    pub root: String,
    /// Candidate files relative to the root, in walk order
    pub files: Vec<String>,
    pub count: usize,
}

/// Error response for tools
#[derive(Debug, Serialize)]
struct ToolError {
    success: bool,
    #[serde(flatten)]
    error: ErrorInfo,
}

impl ToolError {
    fn new(err: &AnalyzeError) -> String {
        serde_json::to_string_pretty(&ToolError {
            success: false,
            error: ErrorInfo::from(err),
        })
        .unwrap_or_else(|_| format!("{{\"success\":false,\"message\":\"{}\"}}", err))
    }

    fn serialization(e: serde_json::Error) -> String {
        Self::new(&AnalyzeError::Io(std::io::Error::other(format!(
            "Serialization error: {}",
            e
        ))))
    }
}

// === MCP Tool Implementations ===

#[tool(tool_box)]
impl HatcheryServer {
    /// Inventory the tools, resources, and prompts a server declares
    #[tool(
        description = "Analyze an MCP server's JavaScript/TypeScript source (local directory or GitHub repository) and return the tools, resources, and prompts it declares."
    )]
    pub async fn analyze_server(&self, #[tool(aggr)] params: AnalyzeServerParams) -> String {
        let mode = match SourceMode::from_source_type(
            params.source_type.as_deref(),
            params.path.as_deref(),
            params.github_url.as_deref(),
        ) {
            Ok(mode) => mode,
            Err(e) => return ToolError::new(&e),
        };

        let analysis = match analyze_source(&mode, &self.config).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!("Analysis of {} failed: {}", mode, e);
                return ToolError::new(&e);
            }
        };

        let response = AnalyzeServerResponse {
            success: true,
            source: mode,
            inventory: analysis.inventory,
            files_scanned: analysis.files_scanned,
            skipped: analysis.skipped,
        };

        serde_json::to_string_pretty(&response).unwrap_or_else(ToolError::serialization)
    }

    /// List the files a local analysis would read
    #[tool(
        description = "List the JavaScript/TypeScript source files under a directory that analyze_server would scan."
    )]
    pub async fn list_source_files(&self, #[tool(aggr)] params: ListSourceFilesParams) -> String {
        let root = match params.path {
            Some(path) => PathBuf::from(path),
            None => match std::env::current_dir() {
                Ok(dir) => dir,
                Err(e) => return ToolError::new(&AnalyzeError::Io(e)),
            },
        };

        let files = match SourceFiles::new(&root, &self.config.analysis) {
            Ok(files) => files,
            Err(e) => return ToolError::new(&e),
        };

        let listed: Vec<String> = files
            .iter()
            .map(|path| {
                path.strip_prefix(files.root())
                    .unwrap_or(path.as_path())
                    .to_string_lossy()
                    .to_string()
            })
            .collect();

        let response = ListSourceFilesResponse {
            root: files.root().display().to_string(),
            count: listed.len(),
            files: listed,
        };

        serde_json::to_string_pretty(&response).unwrap_or_else(ToolError::serialization)
    }
}

#[tool(tool_box)]
impl ServerHandler for HatcheryServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "mcp-hatchery".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "Inventories MCP servers written in JavaScript/TypeScript. \
                 Reports declared tools with input schemas, resources, and prompts \
                 from a local directory or a public GitHub repository."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(
            dir.path().join("src/index.ts"),
            r#"server.registerTool("forecast", {
  description: "Get the forecast",
  inputSchema: { city: z.string(), days: z.number() }
});
server.prompt("summarize", async () => ({ messages: [] }));
"#,
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("node_modules/sdk")).unwrap();
        fs::write(dir.path().join("node_modules/sdk/index.js"), "server.tool('x', 'y')").unwrap();
        dir
    }

    #[test]
    fn test_server_info() {
        let server = HatcheryServer::default();
        let info = server.get_info();

        assert_eq!(info.server_info.name, "mcp-hatchery");
        assert!(!info.server_info.version.is_empty());
        assert!(info.instructions.is_some());
    }

    #[test]
    fn test_analyze_params_defaults() {
        let params: AnalyzeServerParams = serde_json::from_str("{}").unwrap();
        assert!(params.source_type.is_none());
        assert!(params.path.is_none());
        assert!(params.github_url.is_none());
    }

    #[tokio::test]
    async fn test_analyze_server_local() {
        let dir = project();
        let server = HatcheryServer::default();

        let result = server
            .analyze_server(AnalyzeServerParams {
                source_type: Some("local".into()),
                path: Some(dir.path().display().to_string()),
                github_url: None,
            })
            .await;
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["success"], true);
        assert_eq!(parsed["source"]["mode"], "local");
        assert_eq!(parsed["files_scanned"], 1);
        assert_eq!(parsed["tools"][0]["name"], "forecast");
        assert_eq!(parsed["tools"][0]["inputSchema"]["city"], "string");
        assert_eq!(parsed["tools"][0]["inputSchema"]["days"], "number");
        assert_eq!(parsed["prompts"][0]["name"], "summarize");
        assert_eq!(parsed["summary"]["toolCount"], 1);
        assert_eq!(parsed["summary"]["promptCount"], 1);
    }

    #[tokio::test]
    async fn test_analyze_server_unknown_type_is_bare() {
        let server = HatcheryServer::default();
        let result = server
            .analyze_server(AnalyzeServerParams {
                source_type: Some("npm".into()),
                path: Some("/does/not/matter".into()),
                github_url: None,
            })
            .await;
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["success"], true);
        assert_eq!(parsed["source"]["mode"], "bare");
        assert_eq!(parsed["tools"].as_array().unwrap().len(), 0);
        assert_eq!(parsed["summary"]["toolCount"], 0);
    }

    #[tokio::test]
    async fn test_analyze_server_missing_path() {
        let server = HatcheryServer::default();
        let result = server
            .analyze_server(AnalyzeServerParams {
                source_type: Some("local".into()),
                path: Some("/nonexistent/mcp/server".into()),
                github_url: None,
            })
            .await;
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["success"], false);
        assert_eq!(parsed["error_type"], "path_not_found");
        assert!(parsed["message"]
            .as_str()
            .unwrap()
            .contains("/nonexistent/mcp/server"));
    }

    #[tokio::test]
    async fn test_analyze_server_github_requires_url() {
        let server = HatcheryServer::default();
        let result = server
            .analyze_server(AnalyzeServerParams {
                source_type: Some("github".into()),
                path: None,
                github_url: None,
            })
            .await;
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["success"], false);
        assert_eq!(parsed["error_type"], "config_error");
    }

    #[tokio::test]
    async fn test_list_source_files() {
        let dir = project();
        let server = HatcheryServer::default();

        let result = server
            .list_source_files(ListSourceFilesParams {
                path: Some(dir.path().display().to_string()),
            })
            .await;
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["count"], 1);
        assert_eq!(
            parsed["files"][0].as_str().unwrap().replace('\\', "/"),
            "src/index.ts"
        );
    }

    #[tokio::test]
    async fn test_tools_run_concurrently_on_shared_server() {
        let dir = project();
        let server = HatcheryServer::default();
        let other = server.clone();
        let path = dir.path().display().to_string();

        let (analyzed, listed) = tokio::join!(
            server.analyze_server(AnalyzeServerParams {
                source_type: Some("local".into()),
                path: Some(path.clone()),
                github_url: None,
            }),
            other.list_source_files(ListSourceFilesParams { path: Some(path) }),
        );

        let analyzed: serde_json::Value = serde_json::from_str(&analyzed).unwrap();
        let listed: serde_json::Value = serde_json::from_str(&listed).unwrap();
        assert_eq!(analyzed["summary"]["toolCount"], 1);
        assert_eq!(listed["count"], 1);
    }

    #[tokio::test]
    async fn test_list_source_files_uses_server_config() {
        let dir = project();
        fs::create_dir_all(dir.path().join("vendor")).unwrap();
        fs::write(dir.path().join("vendor/lib.js"), "export {}").unwrap();

        let mut config = Config::default();
        config.analysis.excluded_dirs.push("vendor".to_string());
        let server = HatcheryServer::with_config(config);

        let result = server
            .list_source_files(ListSourceFilesParams {
                path: Some(dir.path().display().to_string()),
            })
            .await;
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["count"], 1);
    }
}
