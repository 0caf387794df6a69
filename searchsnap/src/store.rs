//! Snapshot persistence.
//!
//! One YAML record per keyword per day, named
//! `{safe_keyword}_{snapshot_date}.yaml`. Re-running on the same day
//! overwrites the prior record: last write wins, no versioning.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::errors::SnapError;
use crate::models::SearchResultBundle;

/// Writes and reads snapshot records in an output directory.
#[derive(Debug, Clone)]
pub struct ResultStore {
    output_dir: PathBuf,
}

impl ResultStore {
    /// Creates a store, creating the output directory if needed.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, SnapError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Gets the output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The path a bundle persists to.
    #[must_use]
    pub fn path_for(&self, bundle: &SearchResultBundle) -> PathBuf {
        self.output_dir.join(bundle.file_name())
    }

    /// Persists a bundle as YAML.
    ///
    /// A bundle without results is skipped with a warning, not an error;
    /// `Ok(None)` signals that nothing was written. An existing record at
    /// the target path is overwritten without warning.
    pub fn save(&self, bundle: &SearchResultBundle) -> Result<Option<PathBuf>, SnapError> {
        if bundle.is_empty() {
            warn!(keyword = %bundle.keyword, "no data to save");
            return Ok(None);
        }

        let path = self.path_for(bundle);
        let yaml = serde_yaml::to_string(bundle)?;
        fs::write(&path, yaml)?;

        info!(path = %path.display(), "saved snapshot");
        Ok(Some(path))
    }

    /// Loads a previously persisted bundle.
    pub fn load(path: impl AsRef<Path>) -> Result<SearchResultBundle, SnapError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }
}
