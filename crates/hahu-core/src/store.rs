use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::models::Job;
use crate::traits::JobStore;

/// Default location of the jobs file, relative to the working directory.
pub const DEFAULT_JOBS_FILE: &str = "jobs.json";

/// Stores the job collection as an indented JSON array in a single file.
///
/// Every save rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JobStore for JsonFileStore {
    async fn save(&self, jobs: &[Job]) -> Result<(), AppError> {
        let data = serde_json::to_vec_pretty(jobs)?;
        tokio::fs::write(&self.path, data).await.map_err(|e| {
            AppError::FileError(format!("Failed to write {}: {e}", self.path.display()))
        })?;
        tracing::info!(path = %self.path.display(), count = jobs.len(), "Saved jobs");
        Ok(())
    }

    async fn load(&self) -> Result<Vec<Job>, AppError> {
        let data = tokio::fs::read(&self.path).await.map_err(|e| {
            AppError::FileError(format!("Failed to read {}: {e}", self.path.display()))
        })?;
        let jobs: Vec<Job> = serde_json::from_slice(&data)?;
        tracing::debug!(path = %self.path.display(), count = jobs.len(), "Loaded jobs");
        Ok(jobs)
    }
}
