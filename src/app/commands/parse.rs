//! Offline parsing of a saved shot-division script.

use std::fs;
use std::path::Path;

use crate::domain::{AppError, ShotList, parse_shot_division};

/// Parse the shot-division text stored at `path`.
pub fn execute(path: &Path) -> Result<ShotList, AppError> {
    let text = fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            AppError::config_error(format!("Shot division file not found: {}", path.display()))
        } else {
            AppError::Io(err)
        }
    })?;
    Ok(parse_shot_division(&text)?)
}
