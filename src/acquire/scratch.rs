//! Scratch directory for a single remote clone
//!
//! The directory is removed when the guard is released or dropped, so every
//! exit path (success, error, panic, cancelled future) cleans up.

use std::path::Path;

use tempfile::TempDir;

use crate::config::RemoteConfig;
use crate::error::AnalyzeError;

/// Uniquely named temporary directory owned by one scan
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Create `<scratch_root>/<scratch_prefix><random>`
    pub fn create(config: &RemoteConfig) -> Result<Self, AnalyzeError> {
        let parent = config.scratch_root_dir();
        std::fs::create_dir_all(&parent)?;

        let dir = tempfile::Builder::new()
            .prefix(&config.scratch_prefix)
            .tempdir_in(&parent)?;

        tracing::debug!("Created scratch directory {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the directory now, reporting failures instead of ignoring them
    pub fn release(self) -> Result<(), AnalyzeError> {
        let path = self.dir.path().to_path_buf();
        self.dir.close()?;
        tracing::debug!("Removed scratch directory {}", path.display());
        Ok(())
    }
}
