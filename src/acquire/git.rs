//! Repository fetching via the `git` command line
//!
//! The clone runs non-interactively: no terminal prompts, stdin closed,
//! stdout discarded, stderr captured for the error message. A child that
//! outlives the configured timeout is killed.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::time::timeout;

use crate::config::RemoteConfig;
use crate::error::AnalyzeError;

/// Maximum stderr kept for the failure reason (in bytes)
const MAX_STDERR_SIZE: usize = 8 * 1024;

const TRUNCATION_MARKER: &str = "\n... [stderr truncated] ...";

/// Fetches a remote repository into an existing empty directory
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RepositoryFetcher: Send + Sync {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<(), AnalyzeError>;
}

/// [`RepositoryFetcher`] backed by `git clone`
#[derive(Debug, Clone)]
pub struct GitFetcher {
    command: String,
    timeout: Option<Duration>,
    shallow: bool,
}

impl GitFetcher {
    pub fn new(config: &RemoteConfig) -> Self {
        let timeout = match config.clone_timeout {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Self {
            command: config.git_command.clone(),
            timeout,
            shallow: config.shallow,
        }
    }

    /// Arguments passed to the fetch command
    pub fn clone_args(&self, url: &str, dest: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["clone".into()];
        if self.shallow {
            args.push("--depth".into());
            args.push("1".into());
        }
        args.push("--".into());
        args.push(url.into());
        args.push(dest.as_os_str().to_owned());
        args
    }

    fn resolve_command(&self, url: &str) -> Result<PathBuf, AnalyzeError> {
        which::which(&self.command).map_err(|_| {
            AnalyzeError::clone_failed(url, format!("'{}' not found on PATH", self.command))
        })
    }
}

#[async_trait]
impl RepositoryFetcher for GitFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<(), AnalyzeError> {
        let program = self.resolve_command(url)?;

        let mut cmd = Command::new(&program);
        cmd.args(self.clone_args(url, dest))
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!("Executing: {} clone {}", program.display(), url);

        let mut child = cmd.spawn().map_err(|e| {
            AnalyzeError::clone_failed(url, format!("failed to spawn {}: {}", self.command, e))
        })?;

        let stderr = child.stderr.take();
        let stderr_handle = tokio::spawn(async move {
            match stderr {
                Some(stderr) => read_and_truncate(stderr, MAX_STDERR_SIZE).await,
                None => String::new(),
            }
        });

        let waited = match self.timeout {
            Some(limit) => match timeout(limit, child.wait()).await {
                Ok(waited) => waited,
                Err(_) => {
                    if let Err(e) = child.kill().await {
                        tracing::warn!("Failed to kill timed out clone of {}: {}", url, e);
                    }
                    return Err(AnalyzeError::clone_failed(
                        url,
                        format!("timed out after {}s", limit.as_secs()),
                    ));
                }
            },
            None => child.wait().await,
        };

        let status = waited.map_err(|e| {
            AnalyzeError::clone_failed(url, format!("failed waiting for {}: {}", self.command, e))
        })?;

        let stderr = stderr_handle.await.unwrap_or_default();

        if !status.success() {
            let detail = stderr.trim();
            let reason = if detail.is_empty() {
                format!("{} exited with {}", self.command, status)
            } else {
                detail.to_string()
            };
            return Err(AnalyzeError::CloneFailed {
                url: url.to_string(),
                reason,
                exit_code: status.code(),
            });
        }

        Ok(())
    }
}

/// Read from an async reader, keeping at most `max_size` bytes
async fn read_and_truncate<R: tokio::io::AsyncRead + Unpin>(reader: R, max_size: usize) -> String {
    let mut buf_reader = BufReader::new(reader);
    let mut output = String::new();
    let mut line = String::new();

    loop {
        line.clear();
        match buf_reader.read_line(&mut line).await {
            Ok(0) => break,
            Ok(_) => {
                if output.len() + line.len() > max_size {
                    let mut remaining = max_size.saturating_sub(output.len()).min(line.len());
                    while !line.is_char_boundary(remaining) {
                        remaining -= 1;
                    }
                    output.push_str(&line[..remaining]);
                    output.push_str(TRUNCATION_MARKER);
                    break;
                }
                output.push_str(&line);
            }
            Err(e) => {
                tracing::warn!("Error reading clone output: {}", e);
                break;
            }
        }
    }

    output
}
