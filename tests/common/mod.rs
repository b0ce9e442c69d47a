//! Common test utilities for mcp-hatchery tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary project with the given `(relative path, content)` files
pub fn create_server_project(files: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (relative, content) in files {
        write_file(dir.path(), relative, content);
    }
    let path = dir.path().to_path_buf();
    (dir, path)
}

/// Creates a temporary directory with no source files
pub fn create_empty_project() -> (TempDir, PathBuf) {
    create_server_project(&[])
}

pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    std::fs::write(&path, content).expect("Failed to write file");
}

/// Writes an executable shell script
#[cfg(unix)]
pub fn write_script(path: &Path, content: &str) {
    use std::os::unix::fs::PermissionsExt;

    std::fs::write(path, content).expect("Failed to write script");
    let mut perms = std::fs::metadata(path)
        .expect("Failed to get metadata")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).expect("Failed to set permissions");
}

/// Number of entries directly under `dir`
pub fn entry_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).expect("Failed to read dir").count()
}

/// Weather server using the current registration API
pub const SAMPLE_TS_SERVER: &str = r#"
import { McpServer } from "@modelcontextprotocol/sdk/server/mcp.js";
import { z } from "zod";

const server = new McpServer({ name: "weather", version: "1.0.0" });

server.registerTool(
  "get_forecast",
  {
    title: "Forecast",
    description: "Get the weather forecast for a city",
    inputSchema: {
      city: z.string().describe("City name"),
      days: z.number().min(1).max(7),
      metric: z.boolean().optional(),
    },
  },
  async ({ city, days }) => ({ content: [] })
);

server.registerResource(
  "stations",
  "weather://stations",
  { mimeType: "application/json" },
  async (uri) => ({ contents: [] })
);

server.registerPrompt("daily_briefing", { description: "Morning summary" }, () => ({
  messages: [],
}));
"#;

/// Server using the legacy positional API
pub const SAMPLE_JS_SERVER: &str = r#"
const server = new Server();

server.tool("echo", "Echo the input back", { text: z.string() }, async ({ text }) => text);
server.tool('ping', 'Health check');
server.prompt("greeting", async () => ({ messages: [] }));
"#;
