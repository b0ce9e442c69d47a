//! Source acquisition
//!
//! Turns a requested source (local directory, GitHub repository, or none)
//! into an [`Analysis`]. Remote sources are cloned into a scratch directory
//! that is removed before the result is returned.

pub mod git;
pub mod scratch;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::analyzer::{analyze_local, Analysis};
use crate::config::{AnalysisConfig, Config};
use crate::error::AnalyzeError;

pub use git::{GitFetcher, RepositoryFetcher};
pub use scratch::ScratchDir;

/// Where the server source comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SourceMode {
    /// Directory on the local filesystem
    Local { path: PathBuf },
    /// Repository cloned from a URL
    Github { url: String },
    /// Nothing to inspect; yields an empty inventory
    Bare,
}

impl SourceMode {
    /// Select a mode from a loosely typed request
    ///
    /// `"local"` and `"github"` pick those modes; any other value means bare.
    ///
    /// # Errors
    /// * `AnalyzeError::Config` - the selected mode is missing its path or URL
    pub fn from_source_type(
        source_type: Option<&str>,
        path: Option<&str>,
        url: Option<&str>,
    ) -> Result<Self, AnalyzeError> {
        match source_type {
            Some("local") => match path {
                Some(path) if !path.trim().is_empty() => Ok(SourceMode::Local {
                    path: PathBuf::from(path),
                }),
                _ => Err(AnalyzeError::Config(
                    "source_type 'local' requires a path".to_string(),
                )),
            },
            Some("github") => match url {
                Some(url) if !url.trim().is_empty() => Ok(SourceMode::Github {
                    url: url.trim().to_string(),
                }),
                _ => Err(AnalyzeError::Config(
                    "source_type 'github' requires a github_url".to_string(),
                )),
            },
            _ => Ok(SourceMode::Bare),
        }
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceMode::Local { path } => write!(f, "local:{}", path.display()),
            SourceMode::Github { url } => write!(f, "github:{}", url),
            SourceMode::Bare => write!(f, "bare"),
        }
    }
}

/// Analyze the requested source
pub async fn analyze_source(mode: &SourceMode, config: &Config) -> Result<Analysis, AnalyzeError> {
    tracing::info!("Analyzing {}", mode);

    match mode {
        SourceMode::Local { path } => analyze_blocking(path, &config.analysis).await,
        SourceMode::Github { url } => {
            let fetcher = GitFetcher::new(&config.remote);
            analyze_remote(&fetcher, url, config).await
        }
        SourceMode::Bare => Ok(Analysis::bare()),
    }
}

/// Fetch `url` into a fresh scratch directory and analyze it
///
/// The scratch directory is gone when this returns, whatever the outcome.
pub async fn analyze_remote<F>(
    fetcher: &F,
    url: &str,
    config: &Config,
) -> Result<Analysis, AnalyzeError>
where
    F: RepositoryFetcher + ?Sized,
{
    let scratch = ScratchDir::create(&config.remote)?;

    tracing::info!("Cloning {} into {}", url, scratch.path().display());
    fetcher.fetch(url, scratch.path()).await?;

    let analysis = analyze_blocking(scratch.path(), &config.analysis).await;
    let released = scratch.release();

    let analysis = analysis?;
    released?;
    Ok(analysis)
}

/// Run the directory walk off the async runtime's worker threads
async fn analyze_blocking(root: &Path, config: &AnalysisConfig) -> Result<Analysis, AnalyzeError> {
    let root = root.to_path_buf();
    let config = config.clone();

    tokio::task::spawn_blocking(move || analyze_local(&root, &config))
        .await
        .map_err(|e| AnalyzeError::Io(std::io::Error::other(format!("analysis task failed: {}", e))))?
}
