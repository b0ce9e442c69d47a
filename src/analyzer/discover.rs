//! Candidate source file discovery
//!
//! Walks a root directory depth-first, pruning excluded and hidden entries,
//! and yields files whose extension is one of the configured source
//! extensions. No file content is read here.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::AnalysisConfig;
use crate::error::AnalyzeError;

/// Candidate source files under a root directory
///
/// The walk is lazy and restartable: every call to [`SourceFiles::iter`]
/// re-reads the directory tree. Entries are visited in file-name order so
/// repeated walks of an unchanged tree yield the same sequence.
#[derive(Debug, Clone)]
pub struct SourceFiles {
    root: PathBuf,
    config: AnalysisConfig,
}

impl SourceFiles {
    /// Prepare a walk of `root`
    ///
    /// # Errors
    /// * `AnalyzeError::PathNotFound` - `root` does not exist
    /// * `AnalyzeError::NotADirectory` - `root` is not a directory
    pub fn new(root: impl AsRef<Path>, config: &AnalysisConfig) -> Result<Self, AnalyzeError> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(AnalyzeError::path_not_found(root));
        }
        if !root.is_dir() {
            return Err(AnalyzeError::NotADirectory {
                path: root.display().to_string(),
            });
        }

        let root = root.canonicalize()?;

        Ok(Self {
            root,
            config: config.clone(),
        })
    }

    /// Absolute root of the walk
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a fresh walk
    pub fn iter(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !self.is_pruned(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(move |entry| entry.file_type().is_file() && self.is_candidate(entry))
            .map(DirEntry::into_path)
    }

    /// The root itself is never pruned, even if it is a dot-directory
    fn is_pruned(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0 && self.config.is_excluded(&entry.file_name().to_string_lossy())
    }

    fn is_candidate(&self, entry: &DirEntry) -> bool {
        entry
            .file_name()
            .to_str()
            .is_some_and(|name| self.config.is_source_file(name))
    }
}

impl<'a> IntoIterator for &'a SourceFiles {
    type Item = PathBuf;
    type IntoIter = Box<dyn Iterator<Item = PathBuf> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
