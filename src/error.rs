//! Error types for mcp-hatchery
//!
//! Fatal errors abort a scan and carry the path or URL they concern.
//! Per-file read problems are not errors; they surface as
//! [`SkippedFile`](crate::analyzer::SkippedFile) records next to the inventory.

use serde::Serialize;
use thiserror::Error;

/// Main error type for analysis operations
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// Source root does not exist
    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    /// Source root exists but is not a directory
    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    /// Remote fetch failed, could not be spawned, or timed out
    #[error("Failed to clone {url}: {reason}")]
    CloneFailed {
        url: String,
        reason: String,
        exit_code: Option<i32>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalyzeError {
    pub(crate) fn path_not_found(path: &std::path::Path) -> Self {
        AnalyzeError::PathNotFound {
            path: path.display().to_string(),
        }
    }

    pub(crate) fn clone_failed(url: &str, reason: impl Into<String>) -> Self {
        AnalyzeError::CloneFailed {
            url: url.to_string(),
            reason: reason.into(),
            exit_code: None,
        }
    }
}

/// Serializable error info for MCP responses
#[derive(Debug, Serialize, Clone)]
pub struct ErrorInfo {
    pub message: String,
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl From<&AnalyzeError> for ErrorInfo {
    fn from(err: &AnalyzeError) -> Self {
        let (error_type, suggestion, exit_code) = match err {
            AnalyzeError::PathNotFound { .. } => (
                "path_not_found",
                Some("Check that the source path exists and is readable".to_string()),
                None,
            ),
            AnalyzeError::NotADirectory { .. } => (
                "not_a_directory",
                Some("Point the analyzer at the server's project directory".to_string()),
                None,
            ),
            AnalyzeError::CloneFailed {
                reason, exit_code, ..
            } => ("clone_failed", suggest_clone_fix(reason), *exit_code),
            AnalyzeError::Config(_) => (
                "config_error",
                Some("Check your mcp-hatchery configuration file".to_string()),
                None,
            ),
            AnalyzeError::Io(_) => ("io_error", None, None),
        };

        ErrorInfo {
            message: err.to_string(),
            error_type: error_type.to_string(),
            suggestion,
            exit_code,
        }
    }
}

/// Suggest fixes for common clone failures
pub fn suggest_clone_fix(reason: &str) -> Option<String> {
    if reason.contains("not found on PATH") || reason.contains("No such file") {
        return Some("git is required for github sources. Install git or set [remote].git_command.".to_string());
    }

    if reason.contains("timed out") {
        return Some(
            "The clone took too long. Increase [remote].clone_timeout or check the network."
                .to_string(),
        );
    }

    if reason.contains("Authentication failed")
        || reason.contains("could not read Username")
        || reason.contains("terminal prompts disabled")
    {
        return Some(
            "The repository requires credentials. Only public repositories can be cloned non-interactively."
                .to_string(),
        );
    }

    if reason.contains("not found") || reason.contains("does not exist") {
        return Some("Repository not found. Check the URL.".to_string());
    }

    if reason.contains("Could not resolve host") {
        return Some("Network error. Check your connection and the repository host.".to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_not_found_error() {
        let err = AnalyzeError::PathNotFound {
            path: "/nonexistent".to_string(),
        };
        assert_eq!(err.to_string(), "Path not found: /nonexistent");

        let info = ErrorInfo::from(&err);
        assert_eq!(info.error_type, "path_not_found");
        assert!(info.suggestion.is_some());
    }

    #[test]
    fn test_clone_failed_error() {
        let err = AnalyzeError::CloneFailed {
            url: "https://github.com/acme/server".to_string(),
            reason: "git exited with status 128: Repository not found".to_string(),
            exit_code: Some(128),
        };
        assert!(err.to_string().contains("https://github.com/acme/server"));

        let info = ErrorInfo::from(&err);
        assert_eq!(info.error_type, "clone_failed");
        assert_eq!(info.exit_code, Some(128));
        assert!(info.suggestion.unwrap().contains("URL"));
    }

    #[test]
    fn test_suggest_clone_fix_timeout() {
        let suggestion = suggest_clone_fix("timed out after 30s");
        assert!(suggestion.unwrap().contains("clone_timeout"));
    }

    #[test]
    fn test_suggest_clone_fix_missing_git() {
        let suggestion = suggest_clone_fix("'git' not found on PATH");
        assert!(suggestion.unwrap().contains("Install git"));
    }

    #[test]
    fn test_suggest_clone_fix_credentials() {
        let suggestion =
            suggest_clone_fix("fatal: could not read Username for 'https://github.com'");
        assert!(suggestion.unwrap().contains("credentials"));
    }

    #[test]
    fn test_suggest_clone_fix_no_match() {
        assert!(suggest_clone_fix("some random failure").is_none());
    }

    #[test]
    fn test_error_info_skips_empty_fields() {
        let err = AnalyzeError::Io(std::io::Error::other("boom"));
        let info = ErrorInfo::from(&err);

        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("io_error"));
        assert!(!json.contains("suggestion"));
        assert!(!json.contains("exit_code"));
    }
}
