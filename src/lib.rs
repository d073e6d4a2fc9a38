//! shotframe: draft a shot-divided video script with an LLM and render one
//! image frame per shot.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use app::commands::{generate, parse, preview};

pub use app::commands::generate::{RunOptions, RunResult};
pub use app::commands::preview::PreviewResult;
pub use app::pipeline::{Pipeline, Stage};
pub use domain::{AppError, ShotDivisionError, ShotList, parse_shot_division};

/// Run the full pipeline against the configured services.
///
/// Reads `TOGETHER_API_KEY`, loads the config file if any, and writes images
/// to `<output_root>/generated_images_<seed>/`.
pub fn run(options: RunOptions) -> Result<RunResult, AppError> {
    generate::execute(options)
}

/// Render the scene-description instruction without calling any service.
pub fn preview(options: &RunOptions) -> Result<PreviewResult, AppError> {
    preview::execute(options)
}

/// Parse a saved shot-division script.
pub fn parse_shots_file(path: &Path) -> Result<ShotList, AppError> {
    parse::execute(path)
}
