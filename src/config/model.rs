//! Configuration model for mcp-hatchery
//!
//! Defines the structure for XDG-compliant layered configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Source discovery and extraction settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Remote repository acquisition settings
    #[serde(default)]
    pub remote: RemoteConfig,
}

/// Source discovery and extraction settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// File extensions considered source (literal, case-sensitive, no dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory names never descended into
    #[serde(default = "default_excluded_dirs")]
    pub excluded_dirs: Vec<String>,

    /// Skip entries whose name starts with a dot
    #[serde(default = "default_true")]
    pub skip_hidden: bool,

    /// Characters after a tool declaration searched for its input schema
    #[serde(default = "default_schema_window")]
    pub schema_window: usize,

    /// Files larger than this many bytes are skipped
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

fn default_extensions() -> Vec<String> {
    vec!["ts".to_string(), "js".to_string(), "mjs".to_string()]
}

fn default_excluded_dirs() -> Vec<String> {
    vec!["node_modules".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_schema_window() -> usize {
    1000
}

fn default_max_file_size() -> u64 {
    2 * 1024 * 1024
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            excluded_dirs: default_excluded_dirs(),
            skip_hidden: default_true(),
            schema_window: default_schema_window(),
            max_file_size: default_max_file_size(),
        }
    }
}

impl AnalysisConfig {
    /// Whether a file name carries one of the configured extensions
    pub fn is_source_file(&self, file_name: &str) -> bool {
        match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => self.extensions.iter().any(|e| e == ext),
            _ => false,
        }
    }

    /// Whether a directory entry is pruned from the walk
    pub fn is_excluded(&self, name: &str) -> bool {
        (self.skip_hidden && name.starts_with('.')) || self.excluded_dirs.iter().any(|d| d == name)
    }
}

/// Remote repository acquisition settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Command used to fetch repositories
    #[serde(default = "default_git_command")]
    pub git_command: String,

    /// Clone timeout in seconds (0 disables the timeout)
    #[serde(default = "default_clone_timeout")]
    pub clone_timeout: u64,

    /// Fetch only the latest commit
    #[serde(default = "default_true")]
    pub shallow: bool,

    /// Name prefix for scratch directories
    #[serde(default = "default_scratch_prefix")]
    pub scratch_prefix: String,

    /// Parent directory for scratch directories (system temp dir if unset)
    #[serde(default)]
    pub scratch_root: Option<String>,
}

fn default_git_command() -> String {
    "git".to_string()
}

fn default_clone_timeout() -> u64 {
    300
}

fn default_scratch_prefix() -> String {
    "mcp-hatchery-".to_string()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            git_command: default_git_command(),
            clone_timeout: default_clone_timeout(),
            shallow: default_true(),
            scratch_prefix: default_scratch_prefix(),
            scratch_root: None,
        }
    }
}

impl RemoteConfig {
    /// Resolve the scratch parent directory, expanding `~` and `$VARS`
    pub fn scratch_root_dir(&self) -> PathBuf {
        match self.scratch_root.as_deref() {
            Some(root) => match shellexpand::full(root) {
                Ok(expanded) => PathBuf::from(expanded.as_ref()),
                Err(e) => {
                    tracing::warn!("Failed to expand scratch_root '{}': {}", root, e);
                    PathBuf::from(root)
                }
            },
            None => std::env::temp_dir(),
        }
    }
}
