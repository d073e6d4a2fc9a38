//! Parse command implementation.

use std::path::Path;

use crate::domain::AppError;

pub(super) fn run_parse(file: &Path, json: bool) -> Result<(), AppError> {
    let shots = crate::parse_shots_file(file)?;

    if json {
        let rendered = serde_json::to_string_pretty(&shots)
            .map_err(|e| AppError::config_error(format!("Failed to render shots: {}", e)))?;
        println!("{}", rendered);
        return Ok(());
    }

    if shots.is_empty() {
        println!("No shots found");
        return Ok(());
    }

    for shot in &shots {
        println!("Shot {}: {}", shot.id, shot.description);
    }
    Ok(())
}
