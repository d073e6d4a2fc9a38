use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::{AppError, Seed, ShotId};
use crate::ports::{ImageStore, run_directory_name, shot_file_name};

/// In-memory image store rooted at a virtual path.
#[derive(Clone)]
pub struct MemoryImageStore {
    root: PathBuf,
    directories: Arc<Mutex<Vec<PathBuf>>>,
    files: Arc<Mutex<Vec<(PathBuf, Vec<u8>)>>>,
}

impl MemoryImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            directories: Arc::new(Mutex::new(vec![])),
            files: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn prepared_directories(&self) -> Vec<PathBuf> {
        self.directories.lock().unwrap().clone()
    }

    pub fn written_files(&self) -> Vec<(PathBuf, Vec<u8>)> {
        self.files.lock().unwrap().clone()
    }
}

impl ImageStore for MemoryImageStore {
    fn prepare_directory(&self, seed: Seed) -> Result<PathBuf, AppError> {
        let directory = self.root.join(run_directory_name(seed));
        let mut directories = self.directories.lock().unwrap();
        if !directories.contains(&directory) {
            directories.push(directory.clone());
        }
        Ok(directory)
    }

    fn write_image(
        &self,
        directory: &Path,
        shot_id: &ShotId,
        bytes: &[u8],
    ) -> Result<PathBuf, AppError> {
        let path = directory.join(shot_file_name(shot_id));
        self.files.lock().unwrap().push((path.clone(), bytes.to_vec()));
        Ok(path)
    }
}
