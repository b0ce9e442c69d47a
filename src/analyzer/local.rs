//! Local directory analysis
//!
//! Discovery, per-file extraction, and a single merge at the end. Files that
//! cannot be read are recorded and skipped; they never abort the scan.

use std::path::Path;

use serde::Serialize;

use super::discover::SourceFiles;
use super::extract::{Extractor, SkippedFile, SourceFile};
use super::inventory::Inventory;
use crate::config::AnalysisConfig;
use crate::error::AnalyzeError;

/// Result of analyzing one source tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub inventory: Inventory,
    /// Number of candidate files read and scanned
    pub files_scanned: usize,
    /// Candidate files left out, with the reason
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedFile>,
}

impl Analysis {
    /// Analysis of a source that was not inspected
    pub fn bare() -> Self {
        Self::default()
    }
}

/// Analyze every candidate source file under `root`
///
/// # Errors
/// * `AnalyzeError::PathNotFound` - `root` does not exist
/// * `AnalyzeError::NotADirectory` - `root` is not a directory
pub fn analyze_local(root: &Path, config: &AnalysisConfig) -> Result<Analysis, AnalyzeError> {
    let files = SourceFiles::new(root, config)?;
    let extractor = Extractor::new(config);

    let mut extractions = Vec::new();
    let mut skipped = Vec::new();

    for path in &files {
        match SourceFile::read(&path, config.max_file_size) {
            Ok(source) => extractions.push(extractor.extract(&source)),
            Err(skip) => {
                tracing::warn!("Skipping {}: {}", skip.path, skip.reason);
                skipped.push(skip);
            }
        }
    }

    let files_scanned = extractions.len();
    let inventory = Inventory::merge(extractions);

    tracing::debug!(
        "Scanned {} file(s) under {}: {} tool(s), {} resource(s), {} prompt(s)",
        files_scanned,
        files.root().display(),
        inventory.summary.tool_count,
        inventory.summary.resource_count,
        inventory.summary.prompt_count
    );

    Ok(Analysis {
        inventory,
        files_scanned,
        skipped,
    })
}
