//! Image persistence port definition.

use std::path::{Path, PathBuf};

use crate::domain::{AppError, Seed, ShotId};

/// Port for writing decoded shot images.
pub trait ImageStore {
    /// Create the run directory for `seed` if absent and return its path.
    fn prepare_directory(&self, seed: Seed) -> Result<PathBuf, AppError>;

    /// Write one shot image into `directory`, returning the file path.
    fn write_image(
        &self,
        directory: &Path,
        shot_id: &ShotId,
        bytes: &[u8],
    ) -> Result<PathBuf, AppError>;
}

/// Leading bytes of every PNG file.
pub const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Directory name for a run: `generated_images_<seed>`.
pub fn run_directory_name(seed: Seed) -> String {
    format!("generated_images_{}", seed)
}

/// File name for a shot image: `shot_<id>.png`.
pub fn shot_file_name(shot_id: &ShotId) -> String {
    format!("shot_{}.png", shot_id)
}
