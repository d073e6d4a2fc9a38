//! Filesystem-backed image store.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, Seed, ShotId};
use crate::ports::{ImageStore, run_directory_name, shot_file_name};

/// Writes run directories under a fixed output root.
#[derive(Debug, Clone)]
pub struct FilesystemImageStore {
    root: PathBuf,
}

impl FilesystemImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageStore for FilesystemImageStore {
    fn prepare_directory(&self, seed: Seed) -> Result<PathBuf, AppError> {
        let directory = self.root.join(run_directory_name(seed));
        fs::create_dir_all(&directory).map_err(|e| AppError::persistence(&directory, e))?;
        Ok(directory)
    }

    fn write_image(
        &self,
        directory: &Path,
        shot_id: &ShotId,
        bytes: &[u8],
    ) -> Result<PathBuf, AppError> {
        let path = directory.join(shot_file_name(shot_id));
        fs::write(&path, bytes).map_err(|e| AppError::persistence(&path, e))?;
        Ok(path)
    }
}
